//! Entity repository: a collection plus an id-keyed local cache.
//!
//! The first read loads the whole collection. Every successful mutation
//! patches the cache with the record the store acknowledged; `resync`
//! throws the cache away and reloads it.

use std::collections::HashMap;
use std::sync::Arc;

use contracts::domain::common::{filter_by_search, AggregateId, AggregateRoot};
use tokio::sync::RwLock;

use super::store::{Collection, StoreError};

/// Loaded entities keyed by id, iterated in insertion order
#[derive(Debug, Clone)]
pub struct EntityCache<T: AggregateRoot> {
    items: HashMap<T::Id, T>,
    order: Vec<T::Id>,
}

impl<T: AggregateRoot> Default for EntityCache<T> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<T: AggregateRoot> EntityCache<T> {
    pub fn from_items(items: Vec<T>) -> Self {
        let mut cache = Self::default();
        for item in items {
            cache.upsert(item);
        }
        cache
    }

    /// Insert a new entity at the end, or replace an existing one in place
    pub fn upsert(&mut self, item: T) {
        let id = item.id();
        if self.items.insert(id, item).is_none() {
            self.order.push(id);
        }
    }

    pub fn remove(&mut self, id: &T::Id) -> Option<T> {
        let removed = self.items.remove(id);
        if removed.is_some() {
            self.order.retain(|x| x != id);
        }
        removed
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.items.get(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.order
            .iter()
            .filter_map(|id| self.items.get(id))
            .cloned()
            .collect()
    }
}

pub struct EntityRepository<T: AggregateRoot> {
    store: Arc<dyn Collection<T>>,
    cache: RwLock<Option<EntityCache<T>>>,
}

impl<T: AggregateRoot> EntityRepository<T> {
    pub fn new(store: Arc<dyn Collection<T>>) -> Self {
        Self {
            store,
            cache: RwLock::new(None),
        }
    }

    /// Full ordered collection, loading it on first use
    pub async fn list(&self) -> Result<Vec<T>, StoreError> {
        {
            let guard = self.cache.read().await;
            if let Some(cache) = guard.as_ref() {
                return Ok(cache.to_vec());
            }
        }

        let mut guard = self.cache.write().await;
        // Другой запрос мог загрузить кэш, пока мы ждали блокировку
        if let Some(cache) = guard.as_ref() {
            return Ok(cache.to_vec());
        }
        let cache = self.load().await?;
        let items = cache.to_vec();
        *guard = Some(cache);
        Ok(items)
    }

    /// Case-insensitive substring search over the loaded list
    pub async fn search(&self, term: &str) -> Result<Vec<T>, StoreError> {
        let items = self.list().await?;
        Ok(filter_by_search(&items, term))
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        {
            let guard = self.cache.read().await;
            if let Some(cache) = guard.as_ref() {
                return Ok(cache.get(&id).cloned());
            }
        }
        self.list().await?;
        let guard = self.cache.read().await;
        Ok(guard.as_ref().and_then(|c| c.get(&id).cloned()))
    }

    pub async fn create(&self, new: T::New) -> Result<T, StoreError> {
        let mut guard = self.cache.write().await;
        let created = self.store.add(new).await?;
        if let Some(cache) = guard.as_mut() {
            cache.upsert(created.clone());
        }
        tracing::info!(
            "{}: created {}",
            T::collection_name(),
            created.id().as_string()
        );
        Ok(created)
    }

    pub async fn update(&self, id: T::Id, patch: &T::Patch) -> Result<T, StoreError> {
        let mut guard = self.cache.write().await;
        let updated = self.store.update(id, patch).await?;
        if let Some(cache) = guard.as_mut() {
            cache.upsert(updated.clone());
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        let mut guard = self.cache.write().await;
        self.store.delete(id).await?;
        if let Some(cache) = guard.as_mut() {
            cache.remove(&id);
        }
        Ok(())
    }

    /// Drop the cache and reload the whole collection; returns the new size
    pub async fn resync(&self) -> Result<usize, StoreError> {
        let mut guard = self.cache.write().await;
        let cache = self.load().await?;
        let len = cache.len();
        *guard = Some(cache);
        tracing::info!("{}: resynced {} records", T::collection_name(), len);
        Ok(len)
    }

    async fn load(&self) -> Result<EntityCache<T>, StoreError> {
        let items = self.store.get_all().await?;
        Ok(EntityCache::from_items(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::store::memory::MemoryCollection;
    use contracts::domain::a001_artist::aggregate::{
        Artist, ArtistForm, ArtistId, ArtistPatch, NewArtist,
    };

    fn new_artist(name: &str) -> NewArtist {
        ArtistForm {
            name: name.into(),
            specialty: "ميكب عرائس".into(),
            location: "مسقط".into(),
            price: "45".into(),
            ..Default::default()
        }
        .validate_new("admin")
        .unwrap()
    }

    fn repo() -> (Arc<MemoryCollection<Artist>>, EntityRepository<Artist>) {
        let store = Arc::new(MemoryCollection::<Artist>::new());
        let repo = EntityRepository::new(store.clone() as Arc<dyn Collection<Artist>>);
        (store, repo)
    }

    #[tokio::test]
    async fn create_then_list_round_trip() {
        let (_, repo) = repo();
        let created = repo.create(new_artist("نورة")).await.unwrap();

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
        assert_eq!(listed[0].name, "نورة");
        assert_eq!(listed[0].price, 45.0);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order_and_patches_cache() {
        let (store, repo) = repo();
        let a = repo.create(new_artist("a")).await.unwrap();
        let b = repo.create(new_artist("b")).await.unwrap();
        repo.list().await.unwrap();
        let c = repo.create(new_artist("c")).await.unwrap();

        let calls_before = store.calls();
        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|x| x.name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert_eq!(store.calls(), calls_before, "cached list must not hit the store");

        let patch = ArtistPatch {
            name: Some("b2".into()),
            ..Default::default()
        };
        repo.update(b.id, &patch).await.unwrap();
        repo.delete(a.id).await.unwrap();

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|x| x.name).collect();
        assert_eq!(names, vec!["b2", "c"]);
        assert_eq!(repo.get(c.id).await.unwrap().unwrap().name, "c");
    }

    #[tokio::test]
    async fn second_delete_fails_without_touching_cache() {
        let (_, repo) = repo();
        let a = repo.create(new_artist("a")).await.unwrap();
        repo.list().await.unwrap();

        repo.delete(a.id).await.unwrap();
        let err = repo.delete(a.id).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { collection: "artists", .. }));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_write_leaves_cache_untouched() {
        let (store, repo) = repo();
        let a = repo.create(new_artist("a")).await.unwrap();
        repo.list().await.unwrap();

        store.set_failing(true);
        assert!(repo.create(new_artist("b")).await.is_err());
        assert!(repo.delete(a.id).await.is_err());
        store.set_failing(false);

        let listed = repo.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, a.id);
    }

    #[tokio::test]
    async fn resync_picks_up_external_writes() {
        let (store, repo) = repo();
        repo.list().await.unwrap();

        store.insert_directly(Artist::assemble(
            ArtistId::generate(),
            new_artist("external"),
        ));
        assert!(repo.list().await.unwrap().is_empty());

        assert_eq!(repo.resync().await.unwrap(), 1);
        assert_eq!(repo.list().await.unwrap()[0].name, "external");
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let (_, repo) = repo();
        repo.create(new_artist("Noura")).await.unwrap();
        repo.create(new_artist("Sara")).await.unwrap();

        assert_eq!(repo.search("nou").await.unwrap().len(), 1);
        assert_eq!(repo.search("  ").await.unwrap().len(), 2);
        assert_eq!(repo.search("عرائس").await.unwrap().len(), 2);
    }

    #[test]
    fn cache_replaces_in_place() {
        let mut first = Artist::assemble(
            ArtistId::generate(),
            new_artist("a"),
        );
        let second = Artist::assemble(
            ArtistId::generate(),
            new_artist("b"),
        );
        let mut cache = EntityCache::from_items(vec![first.clone(), second.clone()]);

        first.name = "a2".into();
        cache.upsert(first.clone());
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.to_vec()[0].name, "a2");

        assert!(cache.remove(&second.id).is_some());
        assert!(cache.remove(&second.id).is_none());
        assert_eq!(cache.len(), 1);
    }
}
