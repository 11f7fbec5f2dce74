//! Application setup and server configuration.

use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::kernel::{InMemoryDirectory, ServerDeps};
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{
    admin_page, create_post, delete_post, get_post, get_post_by_slug, health_handler,
    list_admin_posts, list_locations, list_posts, list_therapists, login_handler,
    logout_handler, search_handler, search_locations_handler, session_handler,
    subscribe_handler, update_post, upload_handler,
};
use crate::server::static_files::serve_site;

/// Multipart bodies may exceed the image ceiling so oversized files reach validation
pub const UPLOAD_BODY_LIMIT: usize = 8 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
    /// Seed dataset behind the mock directory API
    pub mock_directory: Arc<InMemoryDirectory>,
    pub secure_cookies: bool,
}

/// Router options that are not dependencies
#[derive(Debug, Clone, Default)]
pub struct AppOptions {
    pub allowed_origins: Vec<String>,
    pub upload_dir: PathBuf,
    /// Add `Secure` to the session cookie
    pub secure_cookies: bool,
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
}

/// Build the Axum application router
pub fn build_app(deps: ServerDeps, options: AppOptions) -> Router {
    let jwt_service = deps.jwt_service.clone();

    let app_state = AppState {
        deps: Arc::new(deps),
        mock_directory: Arc::new(InMemoryDirectory::new()),
        secure_cookies: options.secure_cookies,
    };

    let api = Router::new()
        // Mock directory API
        .route("/therapists", get(list_therapists))
        .route("/locations", get(list_locations))
        // Search pipeline over the configured backend
        .route("/search", get(search_handler))
        .route("/search/locations", get(search_locations_handler))
        // Blog
        .route("/posts", get(list_posts))
        .route("/posts/:slug", get(get_post_by_slug))
        .route("/admin/posts", get(list_admin_posts).post(create_post))
        .route(
            "/admin/posts/:id",
            get(get_post).put(update_post).delete(delete_post),
        )
        .route(
            "/admin/uploads",
            post(upload_handler).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        // Auth
        .route("/auth/login", post(login_handler))
        .route("/auth/logout", post(logout_handler))
        .route("/auth/session", get(session_handler))
        // Newsletter
        .route("/newsletter", post(subscribe_handler));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api)
        .route("/admin", get(admin_page))
        .route("/admin/*rest", get(admin_page))
        .nest_service("/uploads", ServeDir::new(options.upload_dir))
        .fallback(serve_site)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(middleware::from_fn(move |req, next| {
            jwt_auth_middleware(jwt_service.clone(), req, next)
        }))
        .layer(Extension(app_state))
        .layer(cors_layer(&options.allowed_origins))
        .layer(TraceLayer::new_for_http())
}
