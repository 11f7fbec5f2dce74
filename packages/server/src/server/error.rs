//! HTTP error mapping
//!
//! Every handler failure becomes `{"error": "<message>"}` with a status that
//! matches the domain error. Internal failures are logged and replaced by a
//! generic message.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domains::auth::AuthError;
use crate::domains::newsletter::NewsletterError;
use crate::domains::posts::{EditorError, PostError, UploadError};
use crate::domains::search::SearchError;

const INTERNAL_MESSAGE: &str = "Internal server error";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Post(#[from] PostError),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Newsletter(#[from] NewsletterError),

    #[error(transparent)]
    Editor(#[from] EditorError),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(&'static str),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Status code and the message the client sees
    fn parts(&self) -> (StatusCode, String) {
        match self {
            ApiError::Search(e) => {
                let status = match e {
                    SearchError::LocationRequired => StatusCode::UNPROCESSABLE_ENTITY,
                    SearchError::NoResults => StatusCode::NOT_FOUND,
                    SearchError::Backend(_) => StatusCode::BAD_GATEWAY,
                };
                (status, e.user_message())
            }
            ApiError::Post(e) => {
                let status = match e {
                    PostError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    PostError::SlugTaken(_) => StatusCode::CONFLICT,
                    PostError::NotFound => StatusCode::NOT_FOUND,
                    PostError::Database(_) | PostError::Internal(_) => {
                        StatusCode::INTERNAL_SERVER_ERROR
                    }
                };
                (status, e.user_message())
            }
            ApiError::Upload(e) => match e {
                UploadError::FileTooLarge { .. } => (StatusCode::PAYLOAD_TOO_LARGE, e.to_string()),
                UploadError::UnsupportedType(_) => {
                    (StatusCode::UNSUPPORTED_MEDIA_TYPE, e.to_string())
                }
                UploadError::MissingFile => (StatusCode::BAD_REQUEST, e.to_string()),
                UploadError::Storage(_) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to upload image. Please try again.".to_string(),
                ),
            },
            ApiError::Auth(e) => match e {
                AuthError::InternalError(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
                }
                other => (StatusCode::UNAUTHORIZED, other.to_string()),
            },
            ApiError::Newsletter(e) => match e {
                NewsletterError::InvalidEmail => (StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
                NewsletterError::Internal(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
                }
            },
            ApiError::Editor(e) => (StatusCode::CONFLICT, e.to_string()),
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message.to_string()),
            ApiError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.parts();
        if status.is_server_error() {
            error!(error = %self, status = status.as_u16(), "Request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_statuses() {
        assert_eq!(
            ApiError::from(SearchError::LocationRequired).parts().0,
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(ApiError::from(SearchError::NoResults).parts().0, StatusCode::NOT_FOUND);

        let (status, message) = ApiError::from(SearchError::Backend("503".into())).parts();
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(message, "Failed to fetch therapists. Please try again.");
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let (status, message) =
            ApiError::from(anyhow::anyhow!("password=hunter2 connection reset")).parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(message, INTERNAL_MESSAGE);
    }

    #[test]
    fn test_oversized_upload_is_413() {
        let err = UploadError::FileTooLarge {
            size: 6 * 1024 * 1024,
            max: 5 * 1024 * 1024,
        };
        assert_eq!(ApiError::from(err).parts().0, StatusCode::PAYLOAD_TOO_LARGE);
    }
}
