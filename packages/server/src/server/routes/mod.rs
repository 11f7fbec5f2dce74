// HTTP routes
pub mod admin_posts;
pub mod auth;
pub mod health;
pub mod newsletter;
pub mod posts;
pub mod search;
pub mod therapists;
pub mod uploads;

pub use admin_posts::*;
pub use auth::*;
pub use health::*;
pub use newsletter::*;
pub use posts::*;
pub use search::*;
pub use therapists::*;
pub use uploads::*;
