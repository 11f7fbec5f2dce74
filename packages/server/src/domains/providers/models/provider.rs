use serde::{Deserialize, Serialize};

use crate::common::utils::Coordinates;

/// Postal address of a provider's practice
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

/// Provider model - a mental-health professional returned by a directory search
///
/// Records are produced by whichever directory backend answered the search and
/// are never mutated afterwards. The JSON shape is camelCase because that is
/// what the site's cards and map markers read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    pub id: String,

    // Profile
    pub name: String,
    pub credentials: String,
    pub specialty: String,
    pub image_url: String,
    pub gender: String,

    // Reputation
    pub rating: f64,
    pub review_count: u32,

    // Practice
    pub insurance: Vec<String>,
    pub approaches: Vec<String>,
    pub languages: Vec<String>,
    pub accepting_new_clients: bool,
    pub price: f64,
    pub next_available: String,

    // Location
    pub location: String,
    pub coordinates: Coordinates,
    pub address: Address,

    // Contact
    pub phone: String,
    pub email: String,
}

impl Provider {
    /// Case-insensitive check against the plan names this provider accepts
    pub fn accepts_insurance(&self, plan: &str) -> bool {
        let wanted = plan.trim().to_lowercase();
        self.insurance
            .iter()
            .any(|p| p.trim().to_lowercase() == wanted)
    }
}
