use axum::{extract::State, Json};
use contracts::dashboards::d400_admin_overview::{AdminStats, ResyncResponse};
use contracts::shared::messages;

use crate::dashboards::d400_admin_overview::service;
use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// GET /api/admin/stats
pub async fn stats(State(state): State<AppState>) -> Result<Json<AdminStats>, ApiError> {
    Ok(Json(service::get_stats(&state).await?))
}

/// POST /api/admin/resync
pub async fn resync(State(state): State<AppState>) -> Result<Json<ResyncResponse>, ApiError> {
    let (artists, spaces) = service::resync(&state).await?;
    Ok(Json(ResyncResponse {
        artists,
        spaces,
        notification: messages::DATA_RELOADED.notification(),
    }))
}
