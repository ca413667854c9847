use async_trait::async_trait;
use contracts::domain::a002_space::aggregate::{NewSpace, Space, SpaceId, SpacePatch, SpaceStatus};
use contracts::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::store::{Collection, StoreError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a002_space")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_user_id: String,
    pub name: String,
    pub location: String,
    pub price: f64,
    pub description: String,
    pub amenities: String,
    pub images: String,
    pub status: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn corrupt(id: &str, reason: impl ToString) -> StoreError {
    StoreError::Corrupt {
        collection: Space::collection_name(),
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

fn decode_list(id: &str, raw: &str) -> Result<Vec<String>, StoreError> {
    serde_json::from_str(raw).map_err(|e| corrupt(id, e))
}

impl TryFrom<Model> for Space {
    type Error = StoreError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = SpaceId::from_string(&m.id).map_err(|e| corrupt(&m.id, e))?;
        let amenities = decode_list(&m.id, &m.amenities)?;
        let images = decode_list(&m.id, &m.images)?;
        let status = SpaceStatus::from_code(&m.status)
            .ok_or_else(|| corrupt(&m.id, format!("unknown status {:?}", m.status)))?;

        Ok(Space {
            id,
            owner_user_id: m.owner_user_id,
            name: m.name,
            location: m.location,
            price: m.price,
            description: m.description,
            amenities,
            images,
            status,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        })
    }
}

fn to_active(aggregate: &Space) -> Result<ActiveModel, StoreError> {
    let id = aggregate.id.as_string();
    let amenities = serde_json::to_string(&aggregate.amenities).map_err(|e| corrupt(&id, e))?;
    let images = serde_json::to_string(&aggregate.images).map_err(|e| corrupt(&id, e))?;

    Ok(ActiveModel {
        id: Set(id),
        owner_user_id: Set(aggregate.owner_user_id.clone()),
        name: Set(aggregate.name.clone()),
        location: Set(aggregate.location.clone()),
        price: Set(aggregate.price),
        description: Set(aggregate.description.clone()),
        amenities: Set(amenities),
        images: Set(images),
        status: Set(aggregate.status.as_str().to_string()),
        created_at: Set(aggregate.metadata.created_at),
        updated_at: Set(aggregate.metadata.updated_at),
    })
}

/// `spaces` collection stored in sqlite
#[derive(Clone)]
pub struct SpaceCollection {
    conn: DatabaseConnection,
}

impl SpaceCollection {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Collection<Space> for SpaceCollection {
    async fn get_all(&self) -> Result<Vec<Space>, StoreError> {
        Entity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Space::try_from)
            .collect()
    }

    async fn get(&self, id: SpaceId) -> Result<Option<Space>, StoreError> {
        Entity::find_by_id(id.as_string())
            .one(&self.conn)
            .await?
            .map(Space::try_from)
            .transpose()
    }

    async fn add(&self, new: NewSpace) -> Result<Space, StoreError> {
        let aggregate = Space::assemble(SpaceId::generate(), new);
        to_active(&aggregate)?.insert(&self.conn).await?;
        Ok(aggregate)
    }

    async fn update(&self, id: SpaceId, patch: &SpacePatch) -> Result<Space, StoreError> {
        let mut aggregate = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found::<Space>(&id))?;
        aggregate.apply(patch);

        let mut active = to_active(&aggregate)?;
        active.created_at = sea_orm::ActiveValue::NotSet;
        active.update(&self.conn).await?;
        Ok(aggregate)
    }

    async fn delete(&self, id: SpaceId) -> Result<(), StoreError> {
        let result = Entity::delete_by_id(id.as_string()).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found::<Space>(&id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;
    use contracts::domain::a002_space::aggregate::SpaceForm;
    use contracts::shared::form::{ListInput, PriceInput};

    async fn collection() -> (tempfile::TempDir, SpaceCollection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = initialize_database(&dir.path().join("test.db")).await.unwrap();
        (dir, SpaceCollection::new(conn))
    }

    fn new_space() -> NewSpace {
        SpaceForm {
            name: "صالون الورد".into(),
            location: "nizwa".into(),
            price: PriceInput::Number(15.5),
            description: "كرسي مع إضاءة".into(),
            amenities: ListInput::Items(vec!["wifi".into(), "مواقف".into()]),
            images: "https://img/a.jpg,https://img/b.jpg".into(),
            status: None,
        }
        .validate_new("owner-2")
        .unwrap()
    }

    #[tokio::test]
    async fn round_trip_with_status_change() {
        let (_dir, store) = collection().await;
        let created = store.add(new_space()).await.unwrap();
        assert_eq!(created.status, SpaceStatus::Available);

        let all = store.get_all().await.unwrap();
        assert_eq!(all, vec![created.clone()]);

        let patch = SpacePatch {
            status: Some(SpaceStatus::Rented),
            ..Default::default()
        };
        store.update(created.id, &patch).await.unwrap();

        let loaded = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.status, SpaceStatus::Rented);
        assert_eq!(loaded.images, vec!["https://img/a.jpg", "https://img/b.jpg"]);
        assert_eq!(loaded.amenities, vec!["wifi", "مواقف"]);
    }

    #[tokio::test]
    async fn delete_twice() {
        let (_dir, store) = collection().await;
        let created = store.add(new_space()).await.unwrap();
        store.delete(created.id).await.unwrap();
        assert!(matches!(
            store.delete(created.id).await,
            Err(StoreError::NotFound { collection: "spaces", .. })
        ));
    }
}
