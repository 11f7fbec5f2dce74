// Business domains
pub mod auth;
pub mod newsletter;
pub mod posts;
pub mod providers;
pub mod search;
