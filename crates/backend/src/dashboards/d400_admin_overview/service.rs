use contracts::dashboards::d400_admin_overview::AdminStats;
use contracts::shared::messages::Operation;

use crate::shared::error::ApiError;
use crate::shared::state::AppState;

/// Счётчики для панели администратора (из кэша репозиториев)
pub async fn get_stats(state: &AppState) -> Result<AdminStats, ApiError> {
    let artists = state
        .artists
        .list()
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))?;
    let spaces = state
        .spaces
        .list()
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))?;

    Ok(AdminStats::compute(&artists, &spaces))
}

/// Drop both caches and reload them from the store.
/// Returns the number of artists and spaces now cached.
pub async fn resync(state: &AppState) -> Result<(usize, usize), ApiError> {
    let artists = state
        .artists
        .resync()
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))?;
    let spaces = state
        .spaces
        .resync()
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))?;

    tracing::info!("Caches reloaded: {} artists, {} spaces", artists, spaces);
    Ok((artists, spaces))
}
