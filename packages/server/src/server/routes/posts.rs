//! Public blog endpoints

use axum::{
    extract::{Extension, Path, Query},
    Json,
};
use serde::Deserialize;

use crate::domains::posts::{BlogPost, Category, PostError, PostFilter};
use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiResult};

/// Upper bound on `limit`
const MAX_PAGE_SIZE: i64 = 100;

#[derive(Debug, Default, Deserialize)]
pub struct PostQuery {
    category: Option<String>,
    featured: Option<bool>,
    limit: Option<i64>,
}

impl PostQuery {
    fn into_filter(self) -> Result<PostFilter, ApiError> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(raw) => Some(
                raw.parse::<Category>()
                    .map_err(|e| ApiError::BadRequest(e.to_string()))?,
            ),
        };

        Ok(PostFilter {
            category,
            featured_only: self.featured.unwrap_or(false),
            limit: self.limit.map(|l| l.clamp(1, MAX_PAGE_SIZE)),
        })
    }
}

/// GET /api/posts
pub async fn list_posts(
    Extension(state): Extension<AppState>,
    Query(query): Query<PostQuery>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    let filter = query.into_filter()?;
    Ok(Json(state.deps.posts.list(&filter).await?))
}

/// GET /api/posts/:slug
pub async fn get_post_by_slug(
    Extension(state): Extension<AppState>,
    Path(slug): Path<String>,
) -> ApiResult<Json<BlogPost>> {
    let post = state
        .deps
        .posts
        .find_by_slug(&slug)
        .await?
        .ok_or(PostError::NotFound)?;
    Ok(Json(post))
}
