use axum::{extract::Extension, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::domains::newsletter::subscribe;
use crate::server::app::AppState;
use crate::server::error::ApiResult;

#[derive(Debug, Deserialize)]
pub struct SubscribeRequest {
    email: String,
}

#[derive(Debug, Serialize)]
pub struct SubscribeResponse {
    subscribed: bool,
}

/// POST /api/newsletter - 201 for a new address, 200 if already subscribed
pub async fn subscribe_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<SubscribeRequest>,
) -> ApiResult<(StatusCode, Json<SubscribeResponse>)> {
    let added = subscribe(state.deps.newsletter.as_ref(), &body.email).await?;

    let status = if added {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SubscribeResponse { subscribed: added })))
}
