use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use contracts::system::access_gate::{evaluate, GateDecision, SessionState};
use contracts::system::auth::Session;

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// Session from `Authorization: Bearer <token>`.
///
/// No header gives `Ok(None)`; a header that does not carry a valid,
/// unexpired token is a [`ApiError::SessionExpired`].
pub fn session_from_headers(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<Option<Session>, ApiError> {
    let Some(auth_header) = headers.get("Authorization") else {
        return Ok(None);
    };

    let token = auth_header
        .to_str()
        .ok()
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(ApiError::SessionExpired)?;

    let claims = state
        .jwt
        .validate_token(token)
        .map_err(|_| ApiError::SessionExpired)?;

    Ok(Some(Session::from(claims)))
}

/// Admin gate decision mapped onto the API: render means pass,
/// redirect-to-login means 401, redirect-to-home means 403
pub fn authorize_admin(state: &AppState, headers: &HeaderMap) -> Result<Session, ApiError> {
    let session_state = SessionState::from(session_from_headers(state, headers)?);

    match evaluate(&session_state, state.admin_policy.as_ref()) {
        GateDecision::RenderView => match session_state {
            SessionState::Active(session) => Ok(session),
            _ => Err(ApiError::Unauthenticated),
        },
        GateDecision::RenderLoading | GateDecision::RedirectToLogin => {
            Err(ApiError::Unauthenticated)
        }
        GateDecision::RedirectToHome => {
            tracing::warn!("Admin area refused for a non-admin session");
            Err(ApiError::Forbidden)
        }
    }
}

/// Middleware that requires valid JWT authentication
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = session_from_headers(&state, req.headers())?.ok_or(ApiError::Unauthenticated)?;

    // Сессия доступна обработчикам через CurrentUser
    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}

/// Middleware that lets only admin-capable sessions through
pub async fn require_admin(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let session = authorize_admin(&state, req.headers())?;

    req.extensions_mut().insert(session);

    Ok(next.run(req).await)
}
