use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a001_artist::aggregate::{Artist, ArtistForm, ArtistId};
use contracts::shared::messages::{self, Acknowledged, Notification, Operation};

use super::{parse_id, DeleteQuery, SearchQuery};
use crate::domain::a001_artist::service;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

/// GET /api/artists?search=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<Artist>>, ApiError> {
    Ok(Json(service::search(&state.artists, &query.search).await?))
}

/// GET /api/artists/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Artist>, ApiError> {
    let id: ArtistId = parse_id(&id)?;
    service::get_by_id(&state.artists, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(messages::ENTITY_NOT_FOUND))
}

/// POST /api/admin/artists
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(form): Json<ArtistForm>,
) -> Result<(StatusCode, Json<Acknowledged<Artist>>), ApiError> {
    let artist = service::create(&state.artists, &form, &session.uid).await?;
    tracing::info!("Artist {} added by {}", artist.id.0, session.email);
    Ok((
        StatusCode::CREATED,
        Json(Acknowledged::new(artist, Operation::AddArtist.success())),
    ))
}

/// PUT /api/admin/artists/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<Acknowledged<Artist>>, ApiError> {
    let id: ArtistId = parse_id(&id)?;
    let artist = service::update(&state.artists, id, &form).await?;
    Ok(Json(Acknowledged::new(artist, Operation::UpdateArtist.success())))
}

/// DELETE /api/admin/artists/:id?confirm=true
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Notification>, ApiError> {
    query.require_confirmed()?;
    let id: ArtistId = parse_id(&id)?;
    service::delete(&state.artists, id).await?;
    Ok(Json(Operation::DeleteArtist.success().notification()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::state::test_state;
    use contracts::system::auth::Session;

    fn admin() -> CurrentUser {
        CurrentUser(Session {
            uid: "admin-uid".into(),
            email: "admin1@beauty.com".into(),
        })
    }

    fn form(name: &str) -> ArtistForm {
        ArtistForm {
            name: name.into(),
            specialty: "ميكب عرائس".into(),
            location: "مسقط".into(),
            price: "50".into(),
            services: "ميكب عرائس, حنة".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_then_list_contains_submitted_fields() {
        let (_dir, state) = test_state().await;

        let (status, Json(created)) = create(State(state.clone()), admin(), Json(form("لمى")))
            .await
            .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(created.notification.title, "تم الإضافة");

        let Json(all) = list(State(state.clone()), Query(SearchQuery::default()))
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
        let artist = &all[0];
        assert_eq!(artist.id, created.item.id);
        assert_eq!(artist.name, "لمى");
        assert_eq!(artist.price, 50.0);
        assert_eq!(artist.owner_user_id, "admin-uid");
        assert_eq!(artist.services, vec!["ميكب عرائس", "حنة"]);

        let Json(found) = list(
            State(state.clone()),
            Query(SearchQuery {
                search: "عرائس".into(),
            }),
        )
        .await
        .unwrap();
        assert_eq!(found.len(), 1);
    }

    #[tokio::test]
    async fn missing_specialty_is_blocked() {
        let (_dir, state) = test_state().await;
        let mut bad = form("x");
        bad.specialty.clear();

        let err = create(State(state.clone()), admin(), Json(bad)).await.unwrap_err();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.message().title.ar, "بيانات ناقصة");
        assert!(state.artists.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_requires_confirmation_and_second_delete_fails() {
        let (_dir, state) = test_state().await;
        let (_, Json(created)) = create(State(state.clone()), admin(), Json(form("هند")))
            .await
            .unwrap();
        let id = created.item.id.0.to_string();

        let err = delete(
            State(state.clone()),
            Path(id.clone()),
            Query(DeleteQuery { confirm: false }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.message(), messages::DELETE_NOT_CONFIRMED);

        delete(
            State(state.clone()),
            Path(id.clone()),
            Query(DeleteQuery { confirm: true }),
        )
        .await
        .unwrap();

        let err = delete(State(state.clone()), Path(id), Query(DeleteQuery { confirm: true }))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), messages::DELETE_FAILED);
    }

    #[tokio::test]
    async fn bad_and_unknown_ids() {
        let (_dir, state) = test_state().await;
        let err = get_by_id(State(state.clone()), Path("not-a-uuid".into()))
            .await
            .unwrap_err();
        assert_eq!(err.message(), messages::INVALID_IDENTIFIER);

        let err = get_by_id(State(state), Path(uuid::Uuid::new_v4().to_string()))
            .await
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }
}
