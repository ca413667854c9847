use contracts::domain::a002_space::aggregate::{Space, SpaceForm, SpaceId, SpaceStatus};
use contracts::shared::messages::Operation;

use crate::shared::error::ApiError;
use crate::shared::repository::EntityRepository;

pub async fn create(
    repo: &EntityRepository<Space>,
    form: &SpaceForm,
    owner_user_id: &str,
) -> Result<Space, ApiError> {
    let new = form.validate_new(owner_user_id)?;
    repo.create(new)
        .await
        .map_err(|e| ApiError::store(Operation::AddSpace, e))
}

pub async fn update(
    repo: &EntityRepository<Space>,
    id: SpaceId,
    form: &SpaceForm,
) -> Result<Space, ApiError> {
    let patch = form.validate_patch()?;
    repo.update(id, &patch)
        .await
        .map_err(|e| ApiError::store(Operation::UpdateSpace, e))
}

pub async fn delete(repo: &EntityRepository<Space>, id: SpaceId) -> Result<(), ApiError> {
    repo.delete(id)
        .await
        .map_err(|e| ApiError::store(Operation::DeleteSpace, e))
}

pub async fn get_by_id(
    repo: &EntityRepository<Space>,
    id: SpaceId,
) -> Result<Option<Space>, ApiError> {
    repo.get(id)
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))
}

/// Поиск по названию и локации, опционально только с заданным статусом
pub async fn search(
    repo: &EntityRepository<Space>,
    term: &str,
    status: Option<SpaceStatus>,
) -> Result<Vec<Space>, ApiError> {
    let mut items = repo
        .search(term)
        .await
        .map_err(|e| ApiError::store(Operation::Load, e))?;
    if let Some(status) = status {
        items.retain(|s| s.status == status);
    }
    Ok(items)
}
