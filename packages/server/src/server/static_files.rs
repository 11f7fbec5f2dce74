use axum::{
    http::{header, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use rust_embed::RustEmbed;
use serde_json::json;

// Embed the site build at compile time
// Replace `packages/server/site/` with the front-end build output before release builds
#[derive(RustEmbed)]
#[folder = "site/"]
pub struct SiteAssets;

/// Serve the site from embedded assets with SPA fallback
pub async fn serve_site(uri: Uri) -> Response {
    // Unknown API paths are JSON 404s, never the HTML shell
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        return (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response();
    }
    serve_spa::<SiteAssets>(uri).await
}

/// Generic SPA serving function with fallback to index.html
async fn serve_spa<E: RustEmbed>(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');

    // If path is empty, serve index.html
    let path = if path.is_empty() { "index.html" } else { path };

    match E::get(path) {
        Some(content) => {
            let mime = mime_guess::from_path(path).first_or_octet_stream();
            ([(header::CONTENT_TYPE, mime.as_ref())], content.data).into_response()
        }
        None => {
            // SPA fallback: if file not found, serve index.html
            // This allows client-side routing to work
            match E::get("index.html") {
                Some(content) => {
                    ([(header::CONTENT_TYPE, "text/html")], content.data).into_response()
                }
                None => (StatusCode::NOT_FOUND, "404 Not Found").into_response(),
            }
        }
    }
}
