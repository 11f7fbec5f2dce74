use axum::{
    extract::{Extension, Query},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::common::utils::Coordinates;
use crate::domains::providers::{Provider, SortKey};
use crate::domains::search::{MapMarker, SearchRequest, SearchSession, ViewMode};
use crate::server::app::AppState;
use crate::server::error::ApiResult;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    location: Option<String>,
    specialty: Option<String>,
    insurance: Option<String>,
    sort_by: Option<String>,
    view: Option<String>,
    lat: Option<f64>,
    lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    view: ViewMode,
    results: Vec<Provider>,
    center: Option<Coordinates>,
    #[serde(skip_serializing_if = "Option::is_none")]
    markers: Option<Vec<MapMarker>>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestParams {
    query: Option<String>,
}

/// GET /api/search
pub async fn search_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<SearchResponse>> {
    let mut session = SearchSession::new(state.deps.search_service());
    session.request = SearchRequest {
        location: params.location,
        specialty: params.specialty,
        insurance: params.insurance,
        sort_by: SortKey::parse(params.sort_by.as_deref()),
    };
    session.set_view(ViewMode::parse(params.view.as_deref()));

    session.run().await?;

    let geolocation = Coordinates::from_parts(params.lat, params.lng);
    let markers = match session.view() {
        ViewMode::Map => Some(session.markers(geolocation)),
        ViewMode::List => None,
    };

    Ok(Json(SearchResponse {
        view: session.view(),
        center: session.map_center(geolocation),
        results: session.results().to_vec(),
        markers,
    }))
}

/// GET /api/search/locations
pub async fn search_locations_handler(
    Extension(state): Extension<AppState>,
    Query(params): Query<SuggestParams>,
) -> Json<Vec<String>> {
    let query = params.query.unwrap_or_default();
    Json(state.deps.search_service().suggest_locations(&query).await)
}
