//! Server dependencies (using traits for testability)
//!
//! Central container handed to route handlers. Every external service sits
//! behind a `Base*` trait so tests can swap in memory stores and spies.

use std::sync::Arc;

use sqlx::PgPool;

use crate::domains::auth::JwtService;
use crate::domains::search::SearchService;
use crate::kernel::memory::{InMemoryAccountStore, InMemoryNewsletterStore, InMemoryPostStore};
use crate::kernel::postgres::{PgAccountStore, PgNewsletterStore, PgPostStore};
use crate::kernel::{
    BaseAccountStore, BaseDirectoryService, BaseNewsletterStore, BaseObjectStorage, BasePostStore,
};

#[derive(Clone)]
pub struct ServerDeps {
    /// Present when DATABASE_URL is configured
    pub db_pool: Option<PgPool>,
    pub directory: Arc<dyn BaseDirectoryService>,
    pub posts: Arc<dyn BasePostStore>,
    pub accounts: Arc<dyn BaseAccountStore>,
    pub newsletter: Arc<dyn BaseNewsletterStore>,
    pub storage: Arc<dyn BaseObjectStorage>,
    pub jwt_service: Arc<JwtService>,
}

impl ServerDeps {
    /// Postgres-backed stores
    pub fn with_pool(
        pool: PgPool,
        directory: Arc<dyn BaseDirectoryService>,
        storage: Arc<dyn BaseObjectStorage>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            posts: Arc::new(PgPostStore::new(pool.clone())),
            accounts: Arc::new(PgAccountStore::new(pool.clone())),
            newsletter: Arc::new(PgNewsletterStore::new(pool.clone())),
            db_pool: Some(pool),
            directory,
            storage,
            jwt_service,
        }
    }

    /// Process-local stores; contents are lost on restart
    pub fn in_memory(
        directory: Arc<dyn BaseDirectoryService>,
        storage: Arc<dyn BaseObjectStorage>,
        jwt_service: Arc<JwtService>,
    ) -> Self {
        Self {
            db_pool: None,
            directory,
            posts: Arc::new(InMemoryPostStore::new()),
            accounts: Arc::new(InMemoryAccountStore::new()),
            newsletter: Arc::new(InMemoryNewsletterStore::new()),
            storage,
            jwt_service,
        }
    }

    pub fn search_service(&self) -> SearchService {
        SearchService::new(self.directory.clone())
    }
}
