use crate::common::AdminId;
use crate::domains::auth::{AuthError, JwtService};
use crate::server::error::ApiError;
use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "session";

/// Authenticated admin information from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub admin_id: AdminId,
    pub email: String,
}

/// JWT authentication middleware
///
/// Reads the token from the Authorization header or the session cookie, verifies it,
/// and adds AuthUser to request extensions.
/// If no token or invalid token, request continues without AuthUser (public access).
pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let auth_user = extract_auth_user(request.headers(), &jwt_service);

    if let Some(user) = auth_user {
        debug!(admin_id = %user.admin_id, "Authenticated admin");
        request.extensions_mut().insert(user);
    } else {
        debug!("No valid authentication token");
    }

    next.run(request).await
}

/// Extract and verify JWT token from request headers
fn extract_auth_user(headers: &axum::http::HeaderMap, jwt_service: &JwtService) -> Option<AuthUser> {
    let token = bearer_token(headers).or_else(|| session_cookie(headers))?;

    let claims = jwt_service.verify_token(&token).ok()?;

    Some(AuthUser {
        admin_id: AdminId::from_uuid(claims.admin_id),
        email: claims.email,
    })
}

fn bearer_token(headers: &axum::http::HeaderMap) -> Option<String> {
    let auth_str = headers.get(header::AUTHORIZATION)?.to_str().ok()?;

    // Handle both "Bearer <token>" and raw token
    let token = auth_str.strip_prefix("Bearer ").unwrap_or(auth_str).trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn session_cookie(headers: &axum::http::HeaderMap) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Extractor for routes that require a logged-in admin (401 otherwise)
#[derive(Clone, Debug)]
pub struct AdminUser(pub AuthUser);

#[async_trait]
impl<S> FromRequestParts<S> for AdminUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .map(AdminUser)
            .ok_or(ApiError::Auth(AuthError::AuthenticationRequired))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderMap;
    use uuid::Uuid;

    fn jwt() -> JwtService {
        JwtService::new("test_secret", "test_issuer".to_string())
    }

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, value.parse().unwrap());
        headers
    }

    #[test]
    fn test_extract_token_with_bearer() {
        let jwt_service = jwt();
        let admin_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(admin_id, "editor@example.com".to_string())
            .unwrap();

        let auth_user = extract_auth_user(
            &headers(header::AUTHORIZATION, &format!("Bearer {}", token)),
            &jwt_service,
        );
        assert_eq!(auth_user.unwrap().admin_id, AdminId::from_uuid(admin_id));
    }

    #[test]
    fn test_extract_token_from_session_cookie() {
        let jwt_service = jwt();
        let admin_id = Uuid::new_v4();
        let token = jwt_service
            .create_token(admin_id, "editor@example.com".to_string())
            .unwrap();

        let auth_user = extract_auth_user(
            &headers(header::COOKIE, &format!("theme=dark; session={}", token)),
            &jwt_service,
        );
        assert_eq!(auth_user.unwrap().email, "editor@example.com");
    }

    #[test]
    fn test_no_credentials() {
        assert!(extract_auth_user(&HeaderMap::new(), &jwt()).is_none());
        assert!(extract_auth_user(&headers(header::COOKIE, "session="), &jwt()).is_none());
    }

    #[test]
    fn test_invalid_token() {
        let auth_user =
            extract_auth_user(&headers(header::AUTHORIZATION, "Bearer invalid_token"), &jwt());
        assert!(auth_user.is_none());
    }

    #[test]
    fn test_token_from_other_issuer_is_anonymous() {
        let other = JwtService::new("test_secret", "someone_else".to_string());
        let token = other
            .create_token(Uuid::new_v4(), "x@example.com".to_string())
            .unwrap();

        let auth_user =
            extract_auth_user(&headers(header::AUTHORIZATION, &format!("Bearer {}", token)), &jwt());
        assert!(auth_user.is_none());
    }
}
