use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::AdminId;

/// Admin account allowed into the blog panel
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AdminAccount {
    pub id: AdminId,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

impl AdminAccount {
    /// Find account by (lower-cased) email
    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM admin_accounts WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(id: AdminId, pool: &PgPool) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as::<_, Self>("SELECT * FROM admin_accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert or refresh an account keyed by email
    pub async fn upsert(
        email: &str,
        display_name: &str,
        password_hash: &str,
        pool: &PgPool,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO admin_accounts (id, email, password_hash, display_name)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO UPDATE SET
                password_hash = EXCLUDED.password_hash,
                display_name = EXCLUDED.display_name
            RETURNING *
            "#,
        )
        .bind(AdminId::new())
        .bind(email)
        .bind(password_hash)
        .bind(display_name)
        .fetch_one(pool)
        .await
    }
}
