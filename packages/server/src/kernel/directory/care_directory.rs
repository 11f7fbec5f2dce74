use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{endpoint, ensure_success, http_client, parse_base_url};
use crate::common::utils::Coordinates;
use crate::domains::providers::{apply, Address, Provider, SearchCriteria, SortKey};
use crate::kernel::BaseDirectoryService;

/// CareDirectory partner API client (vendor A)
pub struct CareDirectoryClient {
    base_url: Url,
    api_key: String,
    client: reqwest::Client,
}

/// Provider search response
#[derive(Debug, Deserialize)]
struct CareDirectoryResponse {
    data: Vec<CareDirectoryProvider>,
}

/// Individual provider as CareDirectory returns it
#[derive(Debug, Deserialize)]
struct CareDirectoryProvider {
    provider_id: String,
    full_name: String,
    #[serde(default)]
    credentials: String,
    #[serde(default)]
    primary_specialty: String,
    #[serde(default)]
    street: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    state: String,
    #[serde(default)]
    postal_code: String,
    #[serde(default)]
    avg_rating: f64,
    #[serde(default)]
    rating_count: u32,
    #[serde(default)]
    photo_url: Option<String>,
    #[serde(default)]
    accepted_insurance: Vec<String>,
    #[serde(default)]
    modalities: Vec<String>,
    #[serde(default)]
    accepting_new_patients: bool,
    #[serde(default)]
    session_fee: f64,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    next_opening: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    gender: String,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    suggestions: Vec<AutocompleteSuggestion>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteSuggestion {
    label: String,
}

impl CareDirectoryProvider {
    fn into_provider(self) -> Provider {
        let location = match (self.city.is_empty(), self.state.is_empty()) {
            (false, false) => format!("{}, {}", self.city, self.state),
            (false, true) => self.city.clone(),
            _ => self.state.clone(),
        };

        Provider {
            id: format!("care-directory:{}", self.provider_id),
            name: self.full_name,
            credentials: self.credentials,
            specialty: self.primary_specialty,
            image_url: self.photo_url.unwrap_or_default(),
            gender: self.gender,
            rating: self.avg_rating,
            review_count: self.rating_count,
            insurance: self.accepted_insurance,
            approaches: self.modalities,
            languages: self.languages,
            accepting_new_clients: self.accepting_new_patients,
            price: self.session_fee,
            next_available: self.next_opening.unwrap_or_default(),
            location,
            coordinates: Coordinates::new(
                self.latitude.unwrap_or_default(),
                self.longitude.unwrap_or_default(),
            ),
            address: Address {
                street: self.street,
                city: self.city,
                state: self.state,
                zip: self.postal_code,
            },
            phone: self.phone,
            email: self.email,
        }
    }
}

impl CareDirectoryClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key,
            client: http_client()?,
        })
    }

    fn sort_param(sort_by: SortKey) -> Option<&'static str> {
        match sort_by {
            SortKey::Rating => Some("rating"),
            SortKey::PriceLow => Some("price_asc"),
            SortKey::PriceHigh => Some("price_desc"),
            SortKey::Relevance => None,
        }
    }
}

#[async_trait]
impl BaseDirectoryService for CareDirectoryClient {
    fn name(&self) -> &'static str {
        "care_directory"
    }

    #[instrument(skip(self), err)]
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Provider>> {
        let url = endpoint(&self.base_url, "v1/providers")?;

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(location) = criteria.location.as_deref() {
            params.push(("city", location));
        }
        if let Some(specialty) = criteria.specialty.as_deref() {
            params.push(("specialty", specialty));
        }
        if let Some(insurance) = criteria.insurance.as_deref() {
            params.push(("insurance", insurance));
        }
        if let Some(sort) = Self::sort_param(criteria.sort_by) {
            params.push(("sort", sort));
        }

        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(&params)
            .send()
            .await
            .context("Failed to send CareDirectory search request")?;

        let body: CareDirectoryResponse = ensure_success(response, "CareDirectory")
            .await?
            .json()
            .await
            .context("Failed to parse CareDirectory response")?;

        let providers: Vec<Provider> = body
            .data
            .into_iter()
            .map(CareDirectoryProvider::into_provider)
            .collect();

        debug!(count = providers.len(), "CareDirectory returned providers");
        Ok(apply(&providers, criteria))
    }

    #[instrument(skip(self), err)]
    async fn locations(&self, query: &str) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, "v1/locations/autocomplete")?;

        let response = self
            .client
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(&[("q", query)])
            .send()
            .await
            .context("Failed to send CareDirectory autocomplete request")?;

        let body: AutocompleteResponse = ensure_success(response, "CareDirectory")
            .await?
            .json()
            .await
            .context("Failed to parse CareDirectory autocomplete response")?;

        Ok(body.suggestions.into_iter().map(|s| s.label).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_vendor_record() {
        let body: CareDirectoryResponse = serde_json::from_value(serde_json::json!({
            "data": [{
                "provider_id": "cd-881",
                "full_name": "Alex Rivera",
                "credentials": "LCSW",
                "primary_specialty": "Grief & Loss",
                "street": "400 Main St",
                "city": "Ann Arbor",
                "state": "MI",
                "postal_code": "48104",
                "avg_rating": 4.6,
                "rating_count": 41,
                "accepted_insurance": ["Aetna"],
                "modalities": ["ACT"],
                "accepting_new_patients": true,
                "session_fee": 120.0,
                "languages": ["English"],
                "latitude": 42.2808,
                "longitude": -83.743,
                "gender": "Non-binary"
            }],
            "meta": { "total": 1 }
        }))
        .unwrap();

        let provider = body.data.into_iter().next().unwrap().into_provider();
        assert_eq!(provider.id, "care-directory:cd-881");
        assert_eq!(provider.location, "Ann Arbor, MI");
        assert_eq!(provider.address.zip, "48104");
        assert_eq!(provider.price, 120.0);
        assert_eq!(provider.image_url, "");
        assert_eq!(provider.next_available, "");
        assert!(provider.accepts_insurance("aetna"));
    }

    #[test]
    fn test_missing_coordinates_default_to_unset() {
        let record: CareDirectoryProvider = serde_json::from_value(serde_json::json!({
            "provider_id": "cd-1",
            "full_name": "Jordan Lee",
            "city": "Troy"
        }))
        .unwrap();

        let provider = record.into_provider();
        assert!(provider.coordinates.is_unset());
        assert_eq!(provider.location, "Troy");
    }

    #[test]
    fn test_sort_param() {
        assert_eq!(CareDirectoryClient::sort_param(SortKey::PriceLow), Some("price_asc"));
        assert_eq!(CareDirectoryClient::sort_param(SortKey::Relevance), None);
    }
}
