use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::SubscriberId;

/// A newsletter signup
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl Subscriber {
    /// Insert unless the email is already subscribed; true when a row was added
    pub async fn insert_if_new(email: &str, pool: &PgPool) -> Result<bool, sqlx::Error> {
        let inserted = sqlx::query_scalar::<_, SubscriberId>(
            r#"
            INSERT INTO newsletter_subscribers (id, email)
            VALUES ($1, $2)
            ON CONFLICT (email) DO NOTHING
            RETURNING id
            "#,
        )
        .bind(SubscriberId::new())
        .bind(email)
        .fetch_optional(pool)
        .await?;

        Ok(inserted.is_some())
    }
}
