//! Posts domain - blog articles, the admin editor and image uploads

pub mod activities;
pub mod errors;
pub mod machines;
pub mod models;

pub use activities::content::{estimate_read_time, slugify};
pub use activities::upload::{upload_image, validate_image, UploadError, MAX_IMAGE_BYTES};
pub use errors::PostError;
pub use machines::{EditorError, EditorState, EditorTarget, PostEditor};
pub use models::{BlogPost, Category, PostDraft, PostFilter, PostInput};
