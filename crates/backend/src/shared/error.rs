use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use contracts::shared::messages::{self, Message, Notification, Operation};
use contracts::shared::validation::ValidationError;
use thiserror::Error;

use super::store::StoreError;
use crate::system::auth::AuthError;

/// Error returned by every handler; rendered as a localized notification.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("sign-in required")]
    Unauthenticated,

    #[error("session token is invalid or expired")]
    SessionExpired,

    #[error("admin capability missing")]
    Forbidden,

    #[error(transparent)]
    Auth(AuthError),

    #[error("bad request: {}", .0.description.en)]
    BadRequest(Message),

    #[error("not found: {}", .0.description.en)]
    NotFound(Message),

    #[error("{operation:?} failed: {source}")]
    Store {
        operation: Operation,
        #[source]
        source: StoreError,
    },

    #[error("not implemented: {}", .0.description.en)]
    NotImplemented(Message),

    #[error("{}: {source:#}", .message.description.en)]
    Internal {
        message: Message,
        #[source]
        source: anyhow::Error,
    },
}

impl ApiError {
    /// Store failure for `operation`; logged here so call sites stay short
    pub fn store(operation: Operation, source: StoreError) -> Self {
        tracing::error!("{:?} failed: {}", operation, source);
        ApiError::Store { operation, source }
    }

    pub fn internal(message: Message, source: anyhow::Error) -> Self {
        tracing::error!("{}: {:#}", message.description.en, source);
        ApiError::Internal { message, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated | ApiError::SessionExpired => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Auth(e) => e.status(),
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Store { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::NotImplemented(_) => StatusCode::NOT_IMPLEMENTED,
        }
    }

    pub fn message(&self) -> Message {
        match self {
            ApiError::Validation(e) => e.message(),
            ApiError::Unauthenticated => messages::SIGN_IN_REQUIRED,
            ApiError::SessionExpired => messages::SESSION_EXPIRED,
            ApiError::Forbidden => messages::NOT_AUTHORIZED,
            ApiError::Auth(e) => e.message(),
            ApiError::BadRequest(m) | ApiError::NotFound(m) | ApiError::NotImplemented(m) => *m,
            ApiError::Store { operation, .. } => operation.failure(),
            ApiError::Internal { message, .. } => *message,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        if let AuthError::Internal(source) = &e {
            tracing::error!("Auth failure: {:#}", source);
        }
        ApiError::Auth(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let notification: Notification = self.message().notification();
        (self.status(), Json(notification)).into_response()
    }
}
