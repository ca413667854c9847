pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod throttle;

use axum::http::StatusCode;
use contracts::shared::messages::{self, Message};
use contracts::system::auth::AuthErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{}", .0.code())]
    Rejected(AuthErrorCode),

    #[error("refresh token is invalid, expired or revoked")]
    InvalidRefreshToken,

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AuthError {
    pub fn code(&self) -> Option<AuthErrorCode> {
        match self {
            AuthError::Rejected(code) => Some(*code),
            _ => None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Rejected(code) => match code {
                AuthErrorCode::InvalidCredential
                | AuthErrorCode::WrongPassword
                | AuthErrorCode::UserNotFound => StatusCode::UNAUTHORIZED,
                AuthErrorCode::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
                AuthErrorCode::EmailAlreadyInUse => StatusCode::CONFLICT,
                AuthErrorCode::WeakPassword | AuthErrorCode::InvalidEmail => {
                    StatusCode::BAD_REQUEST
                }
            },
            AuthError::InvalidRefreshToken => StatusCode::UNAUTHORIZED,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Localized text; unmapped failures get the generic sign-in message
    pub fn message(&self) -> Message {
        match self {
            AuthError::Rejected(code) => code.message(),
            AuthError::InvalidRefreshToken => messages::SESSION_EXPIRED,
            AuthError::Internal(_) => messages::SIGN_IN_FAILED,
        }
    }
}

impl From<AuthErrorCode> for AuthError {
    fn from(code: AuthErrorCode) -> Self {
        AuthError::Rejected(code)
    }
}
