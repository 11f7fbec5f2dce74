use anyhow::{Context, Result};
use async_trait::async_trait;
use tracing::{debug, instrument};
use url::Url;

use super::{endpoint, ensure_success, http_client, parse_base_url};
use crate::domains::providers::{apply, Provider, SearchCriteria};
use crate::kernel::BaseDirectoryService;

/// Client for a running mock directory API (`/api/therapists`, `/api/locations`)
pub struct MockApiClient {
    base_url: Url,
    client: reqwest::Client,
}

impl MockApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            client: http_client()?,
        })
    }

    /// Query pairs in the mock API's parameter names; blank criteria are omitted
    fn search_params(criteria: &SearchCriteria) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(location) = &criteria.location {
            params.push(("location", location.clone()));
        }
        if let Some(specialty) = &criteria.specialty {
            params.push(("specialty", specialty.clone()));
        }
        if let Some(insurance) = &criteria.insurance {
            params.push(("insurance", insurance.clone()));
        }
        params.push(("sortBy", criteria.sort_by.to_string()));
        params
    }
}

#[async_trait]
impl BaseDirectoryService for MockApiClient {
    fn name(&self) -> &'static str {
        "mock_api"
    }

    #[instrument(skip(self), err)]
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Provider>> {
        let url = endpoint(&self.base_url, "api/therapists")?;

        let response = self
            .client
            .get(url)
            .query(&Self::search_params(criteria))
            .send()
            .await
            .context("Failed to send mock directory search request")?;

        let providers: Vec<Provider> = ensure_success(response, "Mock directory")
            .await?
            .json()
            .await
            .context("Failed to parse mock directory response")?;

        debug!(count = providers.len(), "Mock directory returned providers");
        Ok(apply(&providers, criteria))
    }

    #[instrument(skip(self), err)]
    async fn locations(&self, query: &str) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, "api/locations")?;

        let response = self
            .client
            .get(url)
            .query(&[("query", query)])
            .send()
            .await
            .context("Failed to send mock directory locations request")?;

        ensure_success(response, "Mock directory")
            .await?
            .json()
            .await
            .context("Failed to parse mock directory locations")
    }
}
