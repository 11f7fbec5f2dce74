//! Mock directory API: the local reference backend over the seed dataset

use axum::{
    extract::{rejection::QueryRejection, Extension, Query},
    Json,
};
use serde::Deserialize;
use tracing::{debug, error};

use crate::domains::providers::{Provider, SearchCriteria};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TherapistQuery {
    location: Option<String>,
    specialty: Option<String>,
    insurance: Option<String>,
    sort_by: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    query: Option<String>,
}

/// GET /api/therapists
pub async fn list_therapists(
    Extension(state): Extension<AppState>,
    query: Result<Query<TherapistQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<Provider>>> {
    let Query(q) = query.map_err(|e| {
        error!(error = %e, "Unreadable therapist query");
        ApiError::Internal(anyhow::anyhow!(e.body_text()))
    })?;

    let criteria = SearchCriteria::from_query(q.location, q.specialty, q.insurance, q.sort_by);
    let providers = state.mock_directory.query(&criteria);

    debug!(count = providers.len(), ?criteria, "Mock directory query");
    Ok(Json(providers))
}

/// GET /api/locations
pub async fn list_locations(
    Extension(state): Extension<AppState>,
    Query(q): Query<LocationQuery>,
) -> Json<Vec<String>> {
    Json(state.mock_directory.query_locations(q.query.as_deref()))
}
