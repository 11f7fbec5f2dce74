pub mod category;
pub mod draft;
pub mod post;

pub use category::*;
pub use draft::*;
pub use post::*;
