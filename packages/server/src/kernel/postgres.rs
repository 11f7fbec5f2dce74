//! Postgres-backed stores (thin adapters over the model query methods)

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use crate::common::{AdminId, PostId};
use crate::domains::auth::AdminAccount;
use crate::domains::newsletter::Subscriber;
use crate::domains::posts::{BlogPost, PostError, PostFilter, PostInput};
use crate::kernel::{BaseAccountStore, BaseNewsletterStore, BasePostStore};

/// Constraint name Postgres generates for `blog_posts.slug UNIQUE`
const SLUG_CONSTRAINT: &str = "blog_posts_slug_key";

fn map_write_error(err: sqlx::Error, slug: &str) -> PostError {
    match &err {
        sqlx::Error::Database(db) if db.constraint() == Some(SLUG_CONSTRAINT) => {
            PostError::SlugTaken(slug.to_string())
        }
        _ => PostError::Database(err),
    }
}

#[derive(Clone)]
pub struct PgPostStore {
    pool: PgPool,
}

impl PgPostStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BasePostStore for PgPostStore {
    #[instrument(skip(self), err)]
    async fn list(&self, filter: &PostFilter) -> Result<Vec<BlogPost>, PostError> {
        Ok(BlogPost::list(filter, &self.pool).await?)
    }

    async fn find_by_id(&self, id: PostId) -> Result<Option<BlogPost>, PostError> {
        Ok(BlogPost::find_by_id(id, &self.pool).await?)
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, PostError> {
        Ok(BlogPost::find_by_slug(slug, &self.pool).await?)
    }

    #[instrument(skip(self, input), fields(slug = %input.slug), err)]
    async fn create(&self, input: PostInput) -> Result<BlogPost, PostError> {
        BlogPost::create(PostId::new(), &input, &self.pool)
            .await
            .map_err(|e| map_write_error(e, &input.slug))
    }

    #[instrument(skip(self, input), fields(slug = %input.slug), err)]
    async fn update(&self, id: PostId, input: PostInput) -> Result<BlogPost, PostError> {
        BlogPost::update(id, &input, &self.pool)
            .await
            .map_err(|e| map_write_error(e, &input.slug))?
            .ok_or(PostError::NotFound)
    }

    #[instrument(skip(self), err)]
    async fn delete(&self, id: PostId) -> Result<(), PostError> {
        if BlogPost::delete(id, &self.pool).await? {
            Ok(())
        } else {
            Err(PostError::NotFound)
        }
    }
}

#[derive(Clone)]
pub struct PgAccountStore {
    pool: PgPool,
}

impl PgAccountStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseAccountStore for PgAccountStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>> {
        AdminAccount::find_by_email(email, &self.pool)
            .await
            .context("Failed to look up admin by email")
    }

    async fn find_by_id(&self, id: AdminId) -> Result<Option<AdminAccount>> {
        AdminAccount::find_by_id(id, &self.pool)
            .await
            .context("Failed to look up admin by id")
    }

    #[instrument(skip(self, password_hash), err)]
    async fn upsert(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<AdminAccount> {
        AdminAccount::upsert(email, display_name, password_hash, &self.pool)
            .await
            .context("Failed to upsert admin account")
    }
}

#[derive(Clone)]
pub struct PgNewsletterStore {
    pool: PgPool,
}

impl PgNewsletterStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BaseNewsletterStore for PgNewsletterStore {
    #[instrument(skip(self), err)]
    async fn subscribe(&self, email: &str) -> Result<bool> {
        Subscriber::insert_if_new(email, &self.pool)
            .await
            .context("Failed to record newsletter signup")
    }
}
