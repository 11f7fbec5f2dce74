//! Admin blog endpoints; every handler requires a logged-in admin
//!
//! Writes go through the editor state machine so the admin panel gets the
//! same notification text whether a submit fails validation or in the store.

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde::Serialize;
use tracing::info;

use crate::common::{Notification, PostId};
use crate::domains::posts::machines::submit;
use crate::domains::posts::{BlogPost, PostDraft, PostEditor, PostError, PostFilter};
use crate::server::app::AppState;
use crate::server::error::ApiResult;
use crate::server::middleware::AdminUser;

#[derive(Debug, Serialize)]
pub struct SavedPost {
    post: BlogPost,
    notification: Option<Notification>,
}

/// GET /api/admin/posts
pub async fn list_admin_posts(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
) -> ApiResult<Json<Vec<BlogPost>>> {
    Ok(Json(state.deps.posts.list(&PostFilter::default()).await?))
}

/// GET /api/admin/posts/:id
pub async fn get_post(
    _admin: AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<Json<BlogPost>> {
    let post = state
        .deps
        .posts
        .find_by_id(id)
        .await?
        .ok_or(PostError::NotFound)?;
    Ok(Json(post))
}

/// POST /api/admin/posts
pub async fn create_post(
    AdminUser(admin): AdminUser,
    Extension(state): Extension<AppState>,
    Json(draft): Json<PostDraft>,
) -> ApiResult<(StatusCode, Json<SavedPost>)> {
    let mut editor = PostEditor::new();
    editor.start_new()?;
    editor.update_draft(|d| *d = draft)?;

    let post = submit(&mut editor, state.deps.posts.as_ref(), Utc::now().date_naive()).await??;

    info!(admin_id = %admin.admin_id, post_id = %post.id, "Post created");
    Ok((
        StatusCode::CREATED,
        Json(SavedPost {
            post,
            notification: editor.take_notification(),
        }),
    ))
}

/// PUT /api/admin/posts/:id
pub async fn update_post(
    AdminUser(admin): AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<PostId>,
    Json(draft): Json<PostDraft>,
) -> ApiResult<Json<SavedPost>> {
    let existing = state
        .deps
        .posts
        .find_by_id(id)
        .await?
        .ok_or(PostError::NotFound)?;

    let mut editor = PostEditor::new();
    editor.start_edit(&existing)?;
    editor.update_draft(|d| *d = draft)?;

    let post = submit(&mut editor, state.deps.posts.as_ref(), Utc::now().date_naive()).await??;

    info!(admin_id = %admin.admin_id, post_id = %post.id, "Post updated");
    Ok(Json(SavedPost {
        post,
        notification: editor.take_notification(),
    }))
}

/// DELETE /api/admin/posts/:id
pub async fn delete_post(
    AdminUser(admin): AdminUser,
    Extension(state): Extension<AppState>,
    Path(id): Path<PostId>,
) -> ApiResult<StatusCode> {
    state.deps.posts.delete(id).await?;

    info!(admin_id = %admin.admin_id, post_id = %id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}
