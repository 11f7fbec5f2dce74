use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use super::SearchError;
use crate::domains::providers::models::{non_blank, SearchCriteria, SortKey};
use crate::domains::providers::{sort_providers, Provider};
use crate::kernel::BaseDirectoryService;

/// Autocomplete only queries the directory once the input is longer than this
pub const MIN_AUTOCOMPLETE_CHARS: usize = 2;

/// What the search form submits
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub location: Option<String>,
    pub specialty: Option<String>,
    pub insurance: Option<String>,
    pub sort_by: SortKey,
}

/// Search pipeline over whichever directory backend is configured
#[derive(Clone)]
pub struct SearchService {
    directory: Arc<dyn BaseDirectoryService>,
}

impl SearchService {
    pub fn new(directory: Arc<dyn BaseDirectoryService>) -> Self {
        Self { directory }
    }

    pub fn backend_name(&self) -> &'static str {
        self.directory.name()
    }

    /// Run a search; location is required and checked before any network call
    #[instrument(skip(self), fields(backend = self.directory.name()))]
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<Provider>, SearchError> {
        let location =
            non_blank(request.location.clone()).ok_or(SearchError::LocationRequired)?;

        let criteria = SearchCriteria {
            location: Some(location),
            specialty: non_blank(request.specialty.clone()),
            insurance: non_blank(request.insurance.clone()),
            sort_by: request.sort_by,
        };

        let mut providers = self.directory.search(&criteria).await.map_err(|e| {
            warn!(error = %e, "Directory search failed");
            SearchError::Backend(e.to_string())
        })?;

        // Vendors may ignore the requested order
        sort_providers(&mut providers, criteria.sort_by);

        if providers.is_empty() {
            debug!("Search returned no providers");
            return Err(SearchError::NoResults);
        }

        info!(count = providers.len(), "Search complete");
        Ok(providers)
    }

    /// Location suggestions for the autocomplete dropdown; never fails
    #[instrument(skip(self), fields(backend = self.directory.name()))]
    pub async fn suggest_locations(&self, input: &str) -> Vec<String> {
        let query = input.trim();
        if query.chars().count() <= MIN_AUTOCOMPLETE_CHARS {
            return Vec::new();
        }

        match self.directory.locations(query).await {
            Ok(locations) => locations,
            Err(e) => {
                warn!(error = %e, "Location autocomplete failed");
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::directory::InMemoryDirectory;
    use crate::kernel::test_dependencies::SpyDirectory;

    fn request(location: &str) -> SearchRequest {
        SearchRequest {
            location: Some(location.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_missing_location_blocks_the_request() {
        let spy = Arc::new(SpyDirectory::new(InMemoryDirectory::new()));
        let service = SearchService::new(spy.clone());

        for req in [SearchRequest::default(), request(""), request("   ")] {
            assert_eq!(service.search(&req).await, Err(SearchError::LocationRequired));
        }
        assert_eq!(spy.search_calls(), 0);
    }

    #[tokio::test]
    async fn test_search_detroit() {
        let service = SearchService::new(Arc::new(InMemoryDirectory::new()));
        let results = service.search(&request("Detroit")).await.unwrap();
        assert_eq!(results.len(), 2);
    }

    #[tokio::test]
    async fn test_no_results_is_an_error_message() {
        let service = SearchService::new(Arc::new(InMemoryDirectory::new()));
        let err = service.search(&request("Chicago")).await.unwrap_err();
        assert_eq!(err, SearchError::NoResults);
        assert!(err.user_message().starts_with("No therapists found"));
    }

    #[tokio::test]
    async fn test_backend_failure_becomes_message() {
        let service = SearchService::new(Arc::new(SpyDirectory::failing("connection refused")));
        let err = service.search(&request("Detroit")).await.unwrap_err();
        assert!(matches!(err, SearchError::Backend(ref msg) if msg.contains("connection refused")));
        assert_eq!(err.user_message(), "Failed to fetch therapists. Please try again.");
    }

    #[tokio::test]
    async fn test_client_side_sort_applies_to_unsorted_backends() {
        // The spy ignores sortBy and returns upstream order
        let spy = SpyDirectory::new(InMemoryDirectory::new()).ignoring_sort();
        let service = SearchService::new(Arc::new(spy));

        let results = service
            .search(&SearchRequest {
                sort_by: SortKey::PriceHigh,
                ..request("Detroit")
            })
            .await
            .unwrap();

        assert_eq!(results[0].name, "Dr. Michael Chen");
    }

    #[tokio::test]
    async fn test_autocomplete_needs_more_than_two_chars() {
        let spy = Arc::new(SpyDirectory::new(InMemoryDirectory::new()));
        let service = SearchService::new(spy.clone());

        assert!(service.suggest_locations("an").await.is_empty());
        assert!(service.suggest_locations("  a ").await.is_empty());
        assert_eq!(spy.location_calls(), 0);

        assert_eq!(service.suggest_locations("ann").await, vec!["Ann Arbor, MI"]);
        assert_eq!(spy.location_calls(), 1);
    }

    #[tokio::test]
    async fn test_autocomplete_failure_is_empty() {
        let service = SearchService::new(Arc::new(SpyDirectory::failing("timeout")));
        assert!(service.suggest_locations("Detroit").await.is_empty());
    }
}
