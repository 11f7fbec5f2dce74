//! Per-visitor search state: form criteria, last results, list/map toggle.
//!
//! Mirrors what the search page keeps between interactions. A new search
//! overwrites the previous results; a failed one only sets the error message.
//! Responses are applied in completion order with no staleness check.

use serde::Serialize;

use super::{SearchError, SearchRequest, SearchService};
use crate::common::utils::{coarsen_coords, Coordinates};
use crate::domains::providers::{Provider, SortKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    List,
    Map,
}

impl ViewMode {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("map") => ViewMode::Map,
            _ => ViewMode::List,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ViewMode::List => ViewMode::Map,
            ViewMode::Map => ViewMode::List,
        }
    }
}

/// A plottable result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapMarker {
    pub id: String,
    pub name: String,
    pub specialty: String,
    pub coordinates: Coordinates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
}

pub struct SearchSession {
    service: SearchService,
    pub request: SearchRequest,
    results: Vec<Provider>,
    error: Option<String>,
    suggestions: Vec<String>,
    view: ViewMode,
}

impl SearchSession {
    pub fn new(service: SearchService) -> Self {
        Self {
            service,
            request: SearchRequest::default(),
            results: Vec::new(),
            error: None,
            suggestions: Vec::new(),
            view: ViewMode::default(),
        }
    }

    pub fn results(&self) -> &[Provider] {
        &self.results
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.view = view;
    }

    pub fn toggle_view(&mut self) -> ViewMode {
        self.view = self.view.toggled();
        self.view
    }

    pub fn set_sort(&mut self, sort_by: SortKey) {
        self.request.sort_by = sort_by;
    }

    /// Run the search with the current criteria, keeping the typed error
    pub async fn run(&mut self) -> Result<&[Provider], SearchError> {
        match self.service.search(&self.request).await {
            Ok(providers) => {
                self.results = providers;
                self.error = None;
                Ok(&self.results)
            }
            Err(e) => {
                self.error = Some(e.user_message());
                Err(e)
            }
        }
    }

    /// Run the search with the current criteria
    pub async fn submit(&mut self) -> bool {
        self.run().await.is_ok()
    }

    /// Typing in the location box refreshes the suggestion list
    pub async fn set_location_input(&mut self, text: &str) {
        self.request.location = Some(text.to_string());
        self.suggestions = self.service.suggest_locations(text).await;
    }

    /// Picking a suggestion fills the box and searches right away
    pub async fn select_suggestion(&mut self, suggestion: &str) -> bool {
        self.request.location = Some(suggestion.to_string());
        self.suggestions.clear();
        self.submit().await
    }

    /// Map center: the visitor's (coarsened) position, else the first plottable result
    pub fn map_center(&self, geolocation: Option<Coordinates>) -> Option<Coordinates> {
        match geolocation {
            Some(here) => {
                let (lat, lng) = coarsen_coords(here.lat, here.lng);
                Some(Coordinates::new(lat, lng))
            }
            None => self
                .results
                .iter()
                .map(|p| p.coordinates)
                .find(|c| !c.is_unset()),
        }
    }

    /// One marker per plottable result, with distance from the visitor when known
    pub fn markers(&self, geolocation: Option<Coordinates>) -> Vec<MapMarker> {
        self.results
            .iter()
            .filter(|p| !p.coordinates.is_unset())
            .map(|p| MapMarker {
                id: p.id.clone(),
                name: p.name.clone(),
                specialty: p.specialty.clone(),
                coordinates: p.coordinates,
                distance_km: geolocation
                    .map(|here| (here.distance_km(&p.coordinates) * 10.0).round() / 10.0),
            })
            .collect()
    }
}
