pub mod admin_account;

pub use admin_account::*;
