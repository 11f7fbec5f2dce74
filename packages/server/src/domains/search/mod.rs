//! Search domain - the therapist search pipeline shared by every directory backend

pub mod errors;
pub mod service;
pub mod session;

pub use errors::SearchError;
pub use service::{SearchRequest, SearchService, MIN_AUTOCOMPLETE_CHARS};
pub use session::{MapMarker, SearchSession, ViewMode};
