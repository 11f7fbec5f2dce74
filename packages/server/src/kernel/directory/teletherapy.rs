use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use super::{endpoint, ensure_success, http_client, parse_base_url};
use crate::common::utils::Coordinates;
use crate::domains::providers::{apply, Address, Provider, SearchCriteria, SortKey};
use crate::kernel::BaseDirectoryService;

/// Teletherapy network API client (vendor B)
pub struct TeletherapyClient {
    base_url: Url,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<Therapist>,
}

#[derive(Debug, Deserialize)]
struct Therapist {
    id: serde_json::Value,
    name: PersonName,
    #[serde(default)]
    license: String,
    #[serde(default)]
    focus_areas: Vec<String>,
    #[serde(default)]
    location: Option<Place>,
    #[serde(default)]
    reviews: Option<Reviews>,
    #[serde(default)]
    avatar: Option<String>,
    #[serde(default)]
    plans: Vec<String>,
    #[serde(default)]
    methods: Vec<String>,
    #[serde(default)]
    accepting: bool,
    #[serde(default)]
    rate: Option<Rate>,
    #[serde(default)]
    languages: Vec<String>,
    #[serde(default)]
    availability: Option<Availability>,
    #[serde(default)]
    contact: Option<Contact>,
    #[serde(default)]
    gender: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PersonName {
    #[serde(default)]
    title: Option<String>,
    first: String,
    last: String,
}

#[derive(Debug, Default, Deserialize)]
struct Place {
    #[serde(default)]
    street: String,
    #[serde(default)]
    city: String,
    #[serde(default)]
    region: String,
    #[serde(default)]
    postal: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Reviews {
    average: f64,
    count: u32,
}

#[derive(Debug, Deserialize)]
struct Rate {
    amount_cents: i64,
}

#[derive(Debug, Deserialize)]
struct Availability {
    next: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Contact {
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
}

impl Therapist {
    fn into_provider(self) -> Provider {
        // Vendor ids are numeric or string depending on account age
        let id = match &self.id {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };

        let name = match self.name.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => {
                format!("{} {} {}", title, self.name.first, self.name.last)
            }
            _ => format!("{} {}", self.name.first, self.name.last),
        };

        let place = self.location.unwrap_or_default();
        let location = [place.city.as_str(), place.region.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
        let contact = self.contact.unwrap_or_default();
        let (rating, review_count) = self
            .reviews
            .map(|r| (r.average, r.count))
            .unwrap_or((0.0, 0));

        Provider {
            id: format!("teletherapy:{}", id),
            name,
            credentials: self.license,
            specialty: self.focus_areas.join(", "),
            image_url: self.avatar.unwrap_or_default(),
            gender: self.gender.unwrap_or_default(),
            rating,
            review_count,
            insurance: self.plans,
            approaches: self.methods,
            languages: self.languages,
            accepting_new_clients: self.accepting,
            price: self.rate.map(|r| r.amount_cents as f64 / 100.0).unwrap_or_default(),
            next_available: self.availability.and_then(|a| a.next).unwrap_or_default(),
            location,
            coordinates: Coordinates::new(
                place.lat.unwrap_or_default(),
                place.lon.unwrap_or_default(),
            ),
            address: Address {
                street: place.street,
                city: place.city,
                state: place.region,
                zip: place.postal,
            },
            phone: contact.phone,
            email: contact.email,
        }
    }
}

impl TeletherapyClient {
    pub fn new(base_url: &str, api_key: String) -> Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key,
            client: http_client()?,
        })
    }

    fn order_param(sort_by: SortKey) -> Option<&'static str> {
        match sort_by {
            SortKey::Rating => Some("-rating"),
            SortKey::PriceLow => Some("price"),
            SortKey::PriceHigh => Some("-price"),
            SortKey::Relevance => None,
        }
    }
}

#[async_trait]
impl BaseDirectoryService for TeletherapyClient {
    fn name(&self) -> &'static str {
        "teletherapy"
    }

    #[instrument(skip(self), err)]
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Provider>> {
        let url = endpoint(&self.base_url, "api/v2/therapists/search")?;

        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(location) = criteria.location.as_deref() {
            params.push(("location", location));
        }
        if let Some(specialty) = criteria.specialty.as_deref() {
            params.push(("focus", specialty));
        }
        if let Some(insurance) = criteria.insurance.as_deref() {
            params.push(("plan", insurance));
        }
        if let Some(order) = Self::order_param(criteria.sort_by) {
            params.push(("order_by", order));
        }

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&params)
            .send()
            .await
            .context("Failed to send Teletherapy search request")?;

        let body: SearchResponse = ensure_success(response, "Teletherapy")
            .await?
            .json()
            .await
            .context("Failed to parse Teletherapy response")?;

        let providers: Vec<Provider> = body
            .results
            .into_iter()
            .map(Therapist::into_provider)
            .collect();

        debug!(count = providers.len(), "Teletherapy returned providers");
        Ok(apply(&providers, criteria))
    }

    #[instrument(skip(self), err)]
    async fn locations(&self, query: &str) -> Result<Vec<String>> {
        let url = endpoint(&self.base_url, "api/v2/places")?;

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .query(&[("prefix", query)])
            .send()
            .await
            .context("Failed to send Teletherapy places request")?;

        ensure_success(response, "Teletherapy")
            .await?
            .json()
            .await
            .context("Failed to parse Teletherapy places response")
    }
}
