use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use contracts::system::auth::Session;

use crate::shared::error::ApiError;

/// Extractor for the session put into extensions by `require_auth` / `require_admin`
/// Usage in handlers: `async fn handler(CurrentUser(session): CurrentUser) -> Response`
pub struct CurrentUser(pub Session);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Session>()
            .cloned()
            .map(CurrentUser)
            .ok_or(ApiError::Unauthenticated)
    }
}
