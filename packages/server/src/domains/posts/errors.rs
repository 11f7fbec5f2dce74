use thiserror::Error;

/// Errors from validating or persisting blog posts
#[derive(Error, Debug)]
pub enum PostError {
    #[error("{0}")]
    Validation(String),

    #[error("A post with the slug '{0}' already exists")]
    SlugTaken(String),

    #[error("Post not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl PostError {
    /// Message safe to show in the admin panel
    pub fn user_message(&self) -> String {
        match self {
            PostError::Database(_) | PostError::Internal(_) => {
                "Something went wrong saving the post. Please try again.".to_string()
            }
            other => other.to_string(),
        }
    }
}
