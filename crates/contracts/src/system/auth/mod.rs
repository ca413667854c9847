use serde::{Deserialize, Serialize};

use crate::shared::messages::{self, Message, Notification};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user: SessionUser,
    pub notification: Notification,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
    /// Whether the admin capability grants this session the back office
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String, // user_id
    pub email: String,
    pub exp: usize, // expiration timestamp
    pub iat: usize, // issued at
}

/// Signed-in identity carried by a valid access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub uid: String,
    pub email: String,
}

impl From<TokenClaims> for Session {
    fn from(claims: TokenClaims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
        }
    }
}

// ============================================================================
// Error codes
// ============================================================================

/// Error codes reported by the auth service, in their `auth/...` wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthErrorCode {
    InvalidCredential,
    WrongPassword,
    UserNotFound,
    TooManyRequests,
    EmailAlreadyInUse,
    WeakPassword,
    InvalidEmail,
}

impl AuthErrorCode {
    pub const ALL: [AuthErrorCode; 7] = [
        AuthErrorCode::InvalidCredential,
        AuthErrorCode::WrongPassword,
        AuthErrorCode::UserNotFound,
        AuthErrorCode::TooManyRequests,
        AuthErrorCode::EmailAlreadyInUse,
        AuthErrorCode::WeakPassword,
        AuthErrorCode::InvalidEmail,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            AuthErrorCode::InvalidCredential => "auth/invalid-credential",
            AuthErrorCode::WrongPassword => "auth/wrong-password",
            AuthErrorCode::UserNotFound => "auth/user-not-found",
            AuthErrorCode::TooManyRequests => "auth/too-many-requests",
            AuthErrorCode::EmailAlreadyInUse => "auth/email-already-in-use",
            AuthErrorCode::WeakPassword => "auth/weak-password",
            AuthErrorCode::InvalidEmail => "auth/invalid-email",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.code() == code)
    }

    pub fn message(&self) -> Message {
        match self {
            AuthErrorCode::InvalidCredential | AuthErrorCode::WrongPassword => {
                messages::BAD_CREDENTIALS
            }
            AuthErrorCode::UserNotFound => messages::USER_NOT_FOUND,
            AuthErrorCode::TooManyRequests => messages::TOO_MANY_REQUESTS,
            AuthErrorCode::EmailAlreadyInUse => messages::EMAIL_ALREADY_IN_USE,
            AuthErrorCode::WeakPassword => messages::WEAK_PASSWORD,
            AuthErrorCode::InvalidEmail => messages::INVALID_EMAIL,
        }
    }
}

/// Localized message for a raw error code; unknown codes get the generic text
pub fn message_for_code(code: &str) -> Message {
    AuthErrorCode::from_code(code)
        .map(|c| c.message())
        .unwrap_or(messages::SIGN_IN_FAILED)
}
