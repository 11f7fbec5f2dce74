use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;
use tracing::info;

use crate::domains::auth::activities::normalize_email;
use crate::kernel::BaseNewsletterStore;

lazy_static! {
    static ref EMAIL: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

#[derive(Error, Debug)]
pub enum NewsletterError {
    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// Add an email to the newsletter; Ok(false) if it was already subscribed
pub async fn subscribe(
    store: &dyn BaseNewsletterStore,
    email: &str,
) -> Result<bool, NewsletterError> {
    let email = normalize_email(email);
    if !EMAIL.is_match(&email) {
        return Err(NewsletterError::InvalidEmail);
    }

    let added = store.subscribe(&email).await?;
    info!(added, "Newsletter signup");
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::memory::InMemoryNewsletterStore;

    #[tokio::test]
    async fn test_subscribe_is_case_insensitive_and_idempotent() {
        let store = InMemoryNewsletterStore::new();

        assert!(subscribe(&store, "Reader@Example.com").await.unwrap());
        assert!(!subscribe(&store, "reader@example.com ").await.unwrap());
    }

    #[tokio::test]
    async fn test_rejects_invalid_email() {
        let store = InMemoryNewsletterStore::new();
        for bad in ["", "reader", "reader@", "reader@example", "a b@example.com"] {
            assert!(
                matches!(subscribe(&store, bad).await, Err(NewsletterError::InvalidEmail)),
                "accepted {:?}",
                bad
            );
        }
    }
}
