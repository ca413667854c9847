use axum::{extract::State, Json};
use contracts::domain::a003_user_profile::aggregate::{ProfileEdit, UserProfile};
use contracts::shared::messages;

use crate::domain::a003_user_profile::repository;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

async fn load(state: &AppState, uid: &str) -> Result<UserProfile, ApiError> {
    repository::get_by_uid(&state.conn, uid)
        .await
        .map_err(|e| ApiError::internal(messages::LOAD_FAILED, e))?
        .ok_or(ApiError::NotFound(messages::PROFILE_NOT_FOUND))
}

/// GET /api/profile
pub async fn get_own(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(load(&state, &session.uid).await?))
}

/// PUT /api/profile
///
/// Изменения проверяются, но не сохраняются: хранение правок профиля
/// пока не реализовано, и клиент получает об этом явный ответ 501.
pub async fn update_own(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(edit): Json<ProfileEdit>,
) -> Result<Json<UserProfile>, ApiError> {
    let current = load(&state, &session.uid).await?;
    let _validated = edit.validate(&current)?;

    tracing::warn!("Profile edit for {} validated but not persisted", session.uid);
    Err(ApiError::NotImplemented(
        messages::PROFILE_PERSISTENCE_UNAVAILABLE,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::test_state;
    use axum::http::StatusCode;
    use contracts::domain::a003_user_profile::aggregate::AccountType;
    use contracts::system::auth::Session;

    fn profile() -> UserProfile {
        UserProfile {
            uid: "p1".into(),
            email: "amal@example.com".into(),
            full_name: "أمل".into(),
            phone: "91234567".into(),
            location: "salalah".into(),
            governorate: "dhofar".into(),
            account_type: AccountType::Owner,
            created_at: chrono::Utc::now(),
        }
    }

    fn caller(uid: &str) -> CurrentUser {
        CurrentUser(Session {
            uid: uid.into(),
            email: "amal@example.com".into(),
        })
    }

    #[tokio::test]
    async fn get_and_unpersisted_edit() {
        let (_dir, state) = test_state().await;
        repository::insert(&state.conn, &profile()).await.unwrap();

        let Json(loaded) = get_own(State(state.clone()), caller("p1")).await.unwrap();
        assert_eq!(loaded.full_name, "أمل");

        let edit = ProfileEdit {
            full_name: Some("أمل سالم".into()),
            ..Default::default()
        };
        let err = update_own(State(state.clone()), caller("p1"), Json(edit))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_IMPLEMENTED);

        // Профиль не изменился
        let Json(again) = get_own(State(state.clone()), caller("p1")).await.unwrap();
        assert_eq!(again.full_name, "أمل");

        let bad = ProfileEdit {
            phone: Some("12345678".into()),
            ..Default::default()
        };
        let err = update_own(State(state), caller("p1"), Json(bad))
            .await
            .unwrap_err();
        assert_eq!(err.message(), messages::INVALID_PHONE_PROFILE);
    }

    #[tokio::test]
    async fn missing_profile_is_not_found() {
        let (_dir, state) = test_state().await;
        let err = get_own(State(state), caller("nobody")).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.message(), messages::PROFILE_NOT_FOUND);
    }
}
