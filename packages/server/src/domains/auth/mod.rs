//! Auth domain - admin accounts, password hashing, session tokens

pub mod activities;
pub mod errors;
pub mod jwt;
pub mod models;
pub mod password;

pub use activities::{bootstrap_admin, login};
pub use errors::AuthError;
pub use jwt::{Claims, JwtService};
pub use models::AdminAccount;
pub use password::{hash_password, verify_password};
