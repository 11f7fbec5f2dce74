use axum::{
    extract::{Extension, OriginalUri},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::domains::auth::jwt::SESSION_HOURS;
use crate::domains::auth::{login, AdminAccount, AuthError};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};
use crate::server::middleware::{AdminUser, AuthUser, SESSION_COOKIE};
use crate::server::static_files::serve_site;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    token: String,
    admin: AdminAccount,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    admin: AdminAccount,
}

fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; HttpOnly; Path=/; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

fn with_cookie(mut response: Response, cookie: String) -> ApiResult<Response> {
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid cookie header: {}", e)))?;
    response.headers_mut().insert(header::SET_COOKIE, value);
    Ok(response)
}

/// POST /api/auth/login
pub async fn login_handler(
    Extension(state): Extension<AppState>,
    Json(body): Json<LoginRequest>,
) -> ApiResult<Response> {
    let (token, admin) = login(
        state.deps.accounts.as_ref(),
        &state.deps.jwt_service,
        &body.email,
        &body.password,
    )
    .await?;

    let cookie = session_cookie(&token, SESSION_HOURS * 3600, state.secure_cookies);
    with_cookie(Json(LoginResponse { token, admin }).into_response(), cookie)
}

/// POST /api/auth/logout
pub async fn logout_handler(Extension(state): Extension<AppState>) -> ApiResult<Response> {
    with_cookie(
        StatusCode::NO_CONTENT.into_response(),
        session_cookie("", 0, state.secure_cookies),
    )
}

/// GET /api/auth/session
pub async fn session_handler(
    AdminUser(user): AdminUser,
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<SessionResponse>> {
    let admin = state
        .deps
        .accounts
        .find_by_id(user.admin_id)
        .await
        .map_err(AuthError::from)?
        .ok_or(AuthError::AuthenticationRequired)?;

    Ok(Json(SessionResponse { admin }))
}

/// Where an anonymous browser is sent to log in
pub fn login_redirect_target(path: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(path.as_bytes()).collect();
    format!("/login?redirect={}", encoded)
}

/// GET /admin and /admin/*: the SPA for admins, the login page for everyone else
pub async fn admin_page(auth: Option<Extension<AuthUser>>, OriginalUri(uri): OriginalUri) -> Response {
    match auth {
        Some(_) => serve_site(uri).await,
        None => Redirect::to(&login_redirect_target(uri.path())).into_response(),
    }
}
