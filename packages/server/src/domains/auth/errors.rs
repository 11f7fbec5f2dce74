use thiserror::Error;

/// Authentication errors for the admin panel
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Authentication required")]
    AuthenticationRequired,

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}
