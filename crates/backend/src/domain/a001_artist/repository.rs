use async_trait::async_trait;
use contracts::domain::a001_artist::aggregate::{Artist, ArtistId, ArtistPatch, NewArtist};
use contracts::domain::common::{AggregateId, AggregateRoot, EntityMetadata};
use sea_orm::entity::prelude::*;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};

use crate::shared::store::{Collection, StoreError};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "a001_artist")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub owner_user_id: String,
    pub name: String,
    pub specialty: String,
    pub location: String,
    pub price: f64,
    pub image: String,
    pub bio: Option<String>,
    /// JSON array of strings
    pub services: String,
    pub rating: f64,
    pub reviews: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

fn corrupt(id: &str, reason: impl ToString) -> StoreError {
    StoreError::Corrupt {
        collection: Artist::collection_name(),
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

impl TryFrom<Model> for Artist {
    type Error = StoreError;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        let id = ArtistId::from_string(&m.id).map_err(|e| corrupt(&m.id, e))?;
        let services: Vec<String> =
            serde_json::from_str(&m.services).map_err(|e| corrupt(&m.id, e))?;
        let reviews = u32::try_from(m.reviews).map_err(|e| corrupt(&m.id, e))?;

        Ok(Artist {
            id,
            owner_user_id: m.owner_user_id,
            name: m.name,
            specialty: m.specialty,
            location: m.location,
            price: m.price,
            image: m.image,
            bio: m.bio,
            services,
            rating: m.rating,
            reviews,
            metadata: EntityMetadata {
                created_at: m.created_at,
                updated_at: m.updated_at,
            },
        })
    }
}

fn to_active(aggregate: &Artist) -> Result<ActiveModel, StoreError> {
    let services = serde_json::to_string(&aggregate.services)
        .map_err(|e| corrupt(&aggregate.id.as_string(), e))?;

    Ok(ActiveModel {
        id: Set(aggregate.id.as_string()),
        owner_user_id: Set(aggregate.owner_user_id.clone()),
        name: Set(aggregate.name.clone()),
        specialty: Set(aggregate.specialty.clone()),
        location: Set(aggregate.location.clone()),
        price: Set(aggregate.price),
        image: Set(aggregate.image.clone()),
        bio: Set(aggregate.bio.clone()),
        services: Set(services),
        rating: Set(aggregate.rating),
        reviews: Set(aggregate.reviews as i32),
        created_at: Set(aggregate.metadata.created_at),
        updated_at: Set(aggregate.metadata.updated_at),
    })
}

/// `artists` collection stored in sqlite
#[derive(Clone)]
pub struct ArtistCollection {
    conn: DatabaseConnection,
}

impl ArtistCollection {
    pub fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl Collection<Artist> for ArtistCollection {
    async fn get_all(&self) -> Result<Vec<Artist>, StoreError> {
        Entity::find()
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .all(&self.conn)
            .await?
            .into_iter()
            .map(Artist::try_from)
            .collect()
    }

    async fn get(&self, id: ArtistId) -> Result<Option<Artist>, StoreError> {
        Entity::find_by_id(id.as_string())
            .one(&self.conn)
            .await?
            .map(Artist::try_from)
            .transpose()
    }

    async fn add(&self, new: NewArtist) -> Result<Artist, StoreError> {
        let aggregate = Artist::assemble(ArtistId::generate(), new);
        to_active(&aggregate)?.insert(&self.conn).await?;
        Ok(aggregate)
    }

    async fn update(&self, id: ArtistId, patch: &ArtistPatch) -> Result<Artist, StoreError> {
        let mut aggregate = self
            .get(id)
            .await?
            .ok_or_else(|| StoreError::not_found::<Artist>(&id))?;
        aggregate.apply(patch);

        let mut active = to_active(&aggregate)?;
        active.created_at = sea_orm::ActiveValue::NotSet;
        active.update(&self.conn).await?;
        Ok(aggregate)
    }

    async fn delete(&self, id: ArtistId) -> Result<(), StoreError> {
        let result = Entity::delete_by_id(id.as_string()).exec(&self.conn).await?;
        if result.rows_affected == 0 {
            return Err(StoreError::not_found::<Artist>(&id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::initialize_database;
    use contracts::domain::a001_artist::aggregate::ArtistForm;

    async fn collection() -> (tempfile::TempDir, ArtistCollection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = initialize_database(&dir.path().join("test.db")).await.unwrap();
        (dir, ArtistCollection::new(conn))
    }

    fn new_artist(name: &str) -> NewArtist {
        ArtistForm {
            name: name.into(),
            specialty: "ميكب سهرات".into(),
            location: "صلالة".into(),
            price: "35".into(),
            services: "ميكب سهرات, تسريحات".into(),
            ..Default::default()
        }
        .validate_new("owner-1")
        .unwrap()
    }

    #[tokio::test]
    async fn add_get_update_delete() {
        let (_dir, store) = collection().await;

        let created = store.add(new_artist("سارة البلوشي")).await.unwrap();
        let loaded = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(loaded.services, vec!["ميكب سهرات", "تسريحات"]);
        assert_eq!(loaded.reviews, 0);
        assert_eq!(loaded.owner_user_id, "owner-1");

        let patch = ArtistPatch {
            price: Some(40.0),
            bio: Some(Some("خبرة 5 سنوات".into())),
            ..Default::default()
        };
        let updated = store.update(created.id, &patch).await.unwrap();
        assert_eq!(updated.price, 40.0);

        let reloaded = store.get(created.id).await.unwrap().unwrap();
        assert_eq!(reloaded.bio.as_deref(), Some("خبرة 5 سنوات"));
        assert_eq!(reloaded.metadata.created_at, created.metadata.created_at);

        store.delete(created.id).await.unwrap();
        assert!(store.get(created.id).await.unwrap().is_none());
        assert!(matches!(
            store.delete(created.id).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn get_all_in_insertion_order() {
        let (_dir, store) = collection().await;
        for name in ["a", "b", "c"] {
            store.add(new_artist(name)).await.unwrap();
        }
        let names: Vec<_> = store
            .get_all()
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let (_dir, store) = collection().await;
        let err = store
            .update(ArtistId::generate(), &ArtistPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { collection: "artists", .. }));
    }
}
