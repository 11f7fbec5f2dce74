// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic.
// Business logic (filtering, validation, the editor machine) lives in domain
// functions that take these traits.
//
// Naming convention: Base* for trait names (e.g., BaseDirectoryService, BasePostStore)

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;

use crate::common::{AdminId, PostId};
use crate::domains::auth::AdminAccount;
use crate::domains::posts::{BlogPost, PostError, PostFilter, PostInput};
use crate::domains::providers::{Provider, SearchCriteria};

// =============================================================================
// Provider Directory Trait (Infrastructure - mock or vendor directories)
// =============================================================================

#[async_trait]
pub trait BaseDirectoryService: Send + Sync {
    /// Short backend name for logs and the health report
    fn name(&self) -> &'static str;

    /// Providers matching the criteria
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Provider>>;

    /// Location names matching a partial query
    async fn locations(&self, query: &str) -> Result<Vec<String>>;
}

// =============================================================================
// Blog Post Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BasePostStore: Send + Sync {
    async fn list(&self, filter: &PostFilter) -> Result<Vec<BlogPost>, PostError>;

    async fn find_by_id(&self, id: PostId) -> Result<Option<BlogPost>, PostError>;

    async fn find_by_slug(&self, slug: &str) -> Result<Option<BlogPost>, PostError>;

    /// Insert; `PostError::SlugTaken` if the slug is in use
    async fn create(&self, input: PostInput) -> Result<BlogPost, PostError>;

    /// Replace; `PostError::NotFound` if missing, `SlugTaken` on collision
    async fn update(&self, id: PostId, input: PostInput) -> Result<BlogPost, PostError>;

    /// Remove; `PostError::NotFound` if missing
    async fn delete(&self, id: PostId) -> Result<(), PostError>;
}

// =============================================================================
// Admin Account Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseAccountStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<AdminAccount>>;

    async fn find_by_id(&self, id: AdminId) -> Result<Option<AdminAccount>>;

    /// Insert or refresh the account with this email
    async fn upsert(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
    ) -> Result<AdminAccount>;
}

// =============================================================================
// Newsletter Store Trait (Infrastructure)
// =============================================================================

#[async_trait]
pub trait BaseNewsletterStore: Send + Sync {
    /// Record a signup; false if the email was already present
    async fn subscribe(&self, email: &str) -> Result<bool>;
}

// =============================================================================
// Object Storage Trait (Infrastructure - uploaded images)
// =============================================================================

#[async_trait]
pub trait BaseObjectStorage: Send + Sync {
    /// Store an object under `key`; returns its public URL
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<String>;
}
