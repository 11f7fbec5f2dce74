//! Newsletter domain - email signups from the site footer

pub mod activities;
pub mod models;

pub use activities::{subscribe, NewsletterError};
pub use models::Subscriber;
