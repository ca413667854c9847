use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use contracts::domain::a002_space::aggregate::{Space, SpaceForm, SpaceId, SpaceStatus};
use contracts::shared::messages::{self, Acknowledged, Notification, Operation};
use serde::Deserialize;

use super::{parse_id, DeleteQuery};
use crate::domain::a002_space::service;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;
use crate::system::auth::extractor::CurrentUser;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SpaceQuery {
    pub search: String,
    pub status: Option<SpaceStatus>,
}

/// GET /api/spaces?search=&status=
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<SpaceQuery>,
) -> Result<Json<Vec<Space>>, ApiError> {
    Ok(Json(
        service::search(&state.spaces, &query.search, query.status).await?,
    ))
}

/// GET /api/spaces/:id
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Space>, ApiError> {
    let id: SpaceId = parse_id(&id)?;
    service::get_by_id(&state.spaces, id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound(messages::ENTITY_NOT_FOUND))
}

/// POST /api/admin/spaces
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(session): CurrentUser,
    Json(form): Json<SpaceForm>,
) -> Result<(StatusCode, Json<Acknowledged<Space>>), ApiError> {
    let space = service::create(&state.spaces, &form, &session.uid).await?;
    tracing::info!("Space {} added by {}", space.id.0, session.email);
    Ok((
        StatusCode::CREATED,
        Json(Acknowledged::new(space, Operation::AddSpace.success())),
    ))
}

/// PUT /api/admin/spaces/:id
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<SpaceForm>,
) -> Result<Json<Acknowledged<Space>>, ApiError> {
    let id: SpaceId = parse_id(&id)?;
    let space = service::update(&state.spaces, id, &form).await?;
    Ok(Json(Acknowledged::new(space, Operation::UpdateSpace.success())))
}

/// DELETE /api/admin/spaces/:id?confirm=true
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DeleteQuery>,
) -> Result<Json<Notification>, ApiError> {
    query.require_confirmed()?;
    let id: SpaceId = parse_id(&id)?;
    service::delete(&state.spaces, id).await?;
    Ok(Json(Operation::DeleteSpace.success().notification()))
}
