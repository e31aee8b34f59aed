use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::db::StoreError;
use crate::users::validate::ValidationError;

/// Error returned by every handler. Renders as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

/// Which entity a store call was about, for error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    User,
    Advertisement,
}

impl Entity {
    fn name(self) -> &'static str {
        match self {
            Entity::User => "user",
            Entity::Advertisement => "advertisement",
        }
    }
}

impl ApiError {
    pub fn from_store(err: StoreError, entity: Entity) -> Self {
        match err {
            StoreError::NotFound => ApiError::NotFound(format!("{} not found", entity.name())),
            StoreError::Conflict => {
                ApiError::Conflict(format!("{} already exists", entity.name()))
            }
            // only advertisements reference another row: their owner
            StoreError::MissingReference => ApiError::NotFound("user not found".into()),
            StoreError::Database(e) => ApiError::Internal(anyhow::Error::new(e)),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(e) = &self {
            error!(error = ?e, "request failed");
        }
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}
