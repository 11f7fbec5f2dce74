use anyhow::Result;
use async_trait::async_trait;

use crate::domains::providers::data::{seed_locations, seed_providers};
use crate::domains::providers::{apply, filter_locations, Provider, SearchCriteria};
use crate::kernel::BaseDirectoryService;

/// Directory over a fixed provider list (the seeded mock dataset by default)
pub struct InMemoryDirectory {
    providers: Vec<Provider>,
    locations: Vec<&'static str>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::with_providers(seed_providers())
    }

    pub fn with_providers(providers: Vec<Provider>) -> Self {
        Self {
            providers,
            locations: seed_locations().to_vec(),
        }
    }

    /// Synchronous search used directly by the mock API routes
    pub fn query(&self, criteria: &SearchCriteria) -> Vec<Provider> {
        apply(&self.providers, criteria)
    }

    pub fn query_locations(&self, query: Option<&str>) -> Vec<String> {
        filter_locations(&self.locations, query)
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseDirectoryService for InMemoryDirectory {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Provider>> {
        Ok(self.query(criteria))
    }

    async fn locations(&self, query: &str) -> Result<Vec<String>> {
        Ok(self.query_locations(Some(query)))
    }
}
