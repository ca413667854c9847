use contracts::domain::a001_artist::aggregate::{Artist, ArtistForm, ArtistId};
use contracts::shared::messages::Operation;

use crate::shared::error::ApiError;
use crate::shared::repository::EntityRepository;

/// Создание нового артиста; форма проверяется до обращения к хранилищу
pub async fn create(
    repo: &EntityRepository<Artist>,
    form: &ArtistForm,
    owner_user_id: &str,
) -> Result<Artist, ApiError> {
    let new = form.validate_new(owner_user_id)?;
    repo.create(new)
        .await
        .map_err(|e| ApiError::store(Operation::AddArtist, e))
}

/// Обновление существующего артиста
pub async fn update(
    repo: &EntityRepository<Artist>,
    id: ArtistId,
    form: &ArtistForm,
) -> Result<Artist, ApiError> {
    let patch = form.validate_patch()?;
    repo.update(id, &patch)
        .await
        .map_err(|e| ApiError::store(Operation::UpdateArtist, e))
}

/// Удаление без возможности восстановления
pub async fn delete(repo: &EntityRepository<Artist>, id: ArtistId) -> Result<(), ApiError> {
    repo.delete(id)
        .await
        .map_err(|e| ApiError::store(Operation::DeleteArtist, e))
}

pub async fn get_by_id(
    repo: &EntityRepository<Artist>,
    id: ArtistId,
) -> Result<Option<Artist>, ApiError> {
    repo.get(id)
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))
}

/// Список с поиском по имени и специализации
pub async fn search(repo: &EntityRepository<Artist>, term: &str) -> Result<Vec<Artist>, ApiError> {
    repo.search(term)
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))
}
