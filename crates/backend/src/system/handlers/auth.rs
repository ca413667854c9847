use axum::{
    extract::{Json, State},
    http::StatusCode,
};
use contracts::shared::messages::{self, Notification};
use contracts::system::auth::{
    RefreshRequest, RefreshResponse, SessionResponse, SessionUser, SignInRequest,
};
use contracts::system::registration::{RegistrationError, RegistrationFlow, RegistrationForm};
use contracts::system::users::User;
use sea_orm::DatabaseConnection;

use crate::domain::a003_user_profile::repository as profile_repository;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::{jwt, AuthError};
use crate::system::users::{repository as user_repository, service as user_service};

/// Sign-in handler
pub async fn sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let user =
        user_service::verify_credentials(&state.conn, &state.throttle, &request.email, &request.password)
            .await?;

    Ok(Json(issue_session(&state, user).await?))
}

/// Вход в панель администратора.
///
/// The typed email must pass the admin allowlist before credentials are
/// checked at all; otherwise the request ends with "غير مصرح".
pub async fn admin_sign_in(
    State(state): State<AppState>,
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    if !state.admin_policy.admits_email(&request.email) {
        tracing::warn!("Admin sign-in refused for a non-admin email");
        return Err(ApiError::Forbidden);
    }

    sign_in(State(state), Json(request)).await
}

/// Registration: validate, create the account, write the profile, sign in
pub async fn register(
    State(state): State<AppState>,
    Json(form): Json<RegistrationForm>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let mut flow = RegistrationFlow::new();

    let valid = match flow.submit(&form) {
        Ok(valid) => valid,
        Err(RegistrationError::Invalid(e)) => return Err(e.into()),
        Err(e) => return Err(ApiError::internal(messages::REGISTRATION_FAILED, e.into())),
    };

    let user = match user_service::sign_up(&state.conn, &valid.email, &valid.password).await {
        Ok(user) => user,
        Err(e) => {
            flow.complete(Err(e.message())).ok();
            return Err(e.into());
        }
    };

    let mut profile = valid.profile(&user.id);
    profile.email = user.email.clone();

    if let Err(e) = profile_repository::insert(&state.conn, &profile).await {
        flow.complete(Err(messages::REGISTRATION_FAILED)).ok();
        return Err(ApiError::internal(messages::REGISTRATION_FAILED, e));
    }

    flow.complete(Ok(()))
        .map_err(|e| ApiError::internal(messages::REGISTRATION_FAILED, e.into()))?;
    tracing::info!(
        "Registered {} as {}",
        user.id,
        profile.account_type.as_str()
    );

    let mut response = issue_session(&state, user).await?;
    response.notification = messages::REGISTRATION_SUCCESS.notification();

    Ok((StatusCode::CREATED, Json(response)))
}

/// Refresh token handler
pub async fn refresh(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let user_id = validate_refresh_token(&state.conn, &request.refresh_token)
        .await
        .map_err(|e| ApiError::internal(messages::SIGN_IN_FAILED, e))?
        .ok_or(AuthError::InvalidRefreshToken)?;

    let user = user_repository::get_by_id(&state.conn, &user_id)
        .await
        .map_err(|e| ApiError::internal(messages::SIGN_IN_FAILED, e))?
        .filter(|u| u.is_active)
        .ok_or(AuthError::InvalidRefreshToken)?;

    let access_token = state
        .jwt
        .generate_access_token(&user.id, &user.email)
        .map_err(|e| ApiError::internal(messages::SIGN_IN_FAILED, e))?;

    Ok(Json(RefreshResponse { access_token }))
}

/// Sign-out handler: revokes the refresh token
pub async fn sign_out(
    State(state): State<AppState>,
    Json(request): Json<RefreshRequest>,
) -> Result<Json<Notification>, ApiError> {
    revoke_refresh_token(&state.conn, &request.refresh_token)
        .await
        .map_err(|e| ApiError::internal(messages::SIGN_IN_FAILED, e))?;

    Ok(Json(messages::SIGN_OUT_SUCCESS.notification()))
}

/// Current session (protected by middleware)
pub async fn me(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Json<SessionUser> {
    Json(SessionUser {
        is_admin: state.admin_policy.is_admin(&session),
        uid: session.uid,
        email: session.email,
    })
}

async fn issue_session(state: &AppState, user: User) -> Result<SessionResponse, ApiError> {
    let access_token = state
        .jwt
        .generate_access_token(&user.id, &user.email)
        .map_err(|e| ApiError::internal(messages::SIGN_IN_FAILED, e))?;

    let refresh_token = jwt::generate_refresh_token();
    store_refresh_token(&state.conn, &state.jwt, &user.id, &refresh_token)
        .await
        .map_err(|e| ApiError::internal(messages::SIGN_IN_FAILED, e))?;

    Ok(SessionResponse {
        access_token,
        refresh_token,
        user: SessionUser {
            is_admin: state.admin_policy.admits_email(&user.email),
            uid: user.id,
            email: user.email,
        },
        notification: messages::SIGN_IN_SUCCESS.notification(),
    })
}

// Helper functions for refresh tokens

async fn store_refresh_token(
    conn: &DatabaseConnection,
    keys: &jwt::JwtKeys,
    user_id: &str,
    token: &str,
) -> anyhow::Result<()> {
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_id = uuid::Uuid::new_v4().to_string();
    let token_hash = jwt::hash_token(token);
    let expires_at = keys.refresh_token_expiration();
    let created_at = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            token_id.into(),
            user_id.to_string().into(),
            token_hash.into(),
            expires_at.into(),
            created_at.into(),
        ],
    ))
    .await?;

    Ok(())
}

async fn validate_refresh_token(
    conn: &DatabaseConnection,
    token: &str,
) -> anyhow::Result<Option<String>> {
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_hash = jwt::hash_token(token);
    let now = Utc::now().to_rfc3339();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [token_hash.into(), now.into()],
        ))
        .await?;

    match result {
        Some(row) => {
            let user_id: String = row.try_get("", "user_id")?;
            Ok(Some(user_id))
        }
        None => Ok(None),
    }
}

async fn revoke_refresh_token(conn: &DatabaseConnection, token: &str) -> anyhow::Result<()> {
    use chrono::Utc;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let token_hash = jwt::hash_token(token);
    let revoked_at = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ? AND revoked_at IS NULL",
        [revoked_at.into(), token_hash.into()],
    ))
    .await?;

    Ok(())
}
