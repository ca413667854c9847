//! Document-store seam.
//!
//! A [`Collection`] is the remote side of an entity list: get-all, get,
//! add, update-by-id and delete-by-id. The sqlite-backed implementations live
//! next to each aggregate; tests use [`memory::MemoryCollection`].

use async_trait::async_trait;
use contracts::domain::common::AggregateRoot;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{collection}/{id} does not exist")]
    NotFound { collection: &'static str, id: String },

    #[error("{collection}/{id} could not be decoded: {reason}")]
    Corrupt {
        collection: &'static str,
        id: String,
        reason: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

impl StoreError {
    pub fn not_found<T: AggregateRoot>(id: &T::Id) -> Self {
        use contracts::domain::common::AggregateId;

        StoreError::NotFound {
            collection: T::collection_name(),
            id: id.as_string(),
        }
    }
}

#[async_trait]
pub trait Collection<T: AggregateRoot>: Send + Sync {
    /// Whole collection in insertion order
    async fn get_all(&self) -> Result<Vec<T>, StoreError>;

    async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError>;

    /// Insert; the store assigns the id
    async fn add(&self, new: T::New) -> Result<T, StoreError>;

    /// Apply `patch` to an existing record and return the stored result
    async fn update(&self, id: T::Id, patch: &T::Patch) -> Result<T, StoreError>;

    /// Remove a record; a missing id is [`StoreError::NotFound`]
    async fn delete(&self, id: T::Id) -> Result<(), StoreError>;
}
