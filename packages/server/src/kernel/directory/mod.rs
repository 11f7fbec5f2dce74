//! Provider directory backends
//!
//! Every backend answers the same two questions (search, location
//! autocomplete) so the search pipeline never knows which one it is using.

pub mod care_directory;
pub mod in_memory;
pub mod mock_api;
pub mod teletherapy;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

use crate::config::DirectoryBackend;
use crate::kernel::BaseDirectoryService;

pub use care_directory::CareDirectoryClient;
pub use in_memory::InMemoryDirectory;
pub use mock_api::MockApiClient;
pub use teletherapy::TeletherapyClient;

/// Outbound request timeout for remote directories
pub const DIRECTORY_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the configured backend
pub fn build_directory(backend: &DirectoryBackend) -> Result<Arc<dyn BaseDirectoryService>> {
    let directory: Arc<dyn BaseDirectoryService> = match backend {
        DirectoryBackend::Mock => Arc::new(InMemoryDirectory::new()),
        DirectoryBackend::MockApi { base_url } => Arc::new(MockApiClient::new(base_url)?),
        DirectoryBackend::CareDirectory { base_url, api_key } => {
            Arc::new(CareDirectoryClient::new(base_url, api_key.clone())?)
        }
        DirectoryBackend::Teletherapy { base_url, api_key } => {
            Arc::new(TeletherapyClient::new(base_url, api_key.clone())?)
        }
    };
    Ok(directory)
}

/// Shared HTTP client for directory calls
pub(crate) fn http_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(DIRECTORY_TIMEOUT)
        .user_agent("MindBridge/1.0 (therapist directory)")
        .build()
        .context("Failed to create HTTP client")
}

/// Parse a base URL so relative endpoint paths append instead of replacing the last segment
pub(crate) fn parse_base_url(raw: &str) -> Result<Url> {
    let mut url = Url::parse(raw.trim()).with_context(|| format!("Invalid base URL: {}", raw))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Resolve an endpoint path against a base URL
pub(crate) fn endpoint(base: &Url, path: &str) -> Result<Url> {
    base.join(path.trim_start_matches('/'))
        .with_context(|| format!("Invalid endpoint path: {}", path))
}

/// Turn a non-2xx response into an error carrying status and body
pub(crate) async fn ensure_success(
    response: reqwest::Response,
    vendor: &str,
) -> Result<reqwest::Response> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    anyhow::bail!("{} API error {}: {}", vendor, status, body)
}
