//! In-memory local repository implementation.
//!
//! All data lives in a `BTreeMap` keyed by id (which gives id-ordered
//! listing for free) plus a UPC index, guarded by a single lock so id
//! assignment and UPC uniqueness checks are atomic.

use async_trait::async_trait;
use chrono::Utc;
use log::debug;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::db::repository::{BeerRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::{Beer, BeerFilter, BeerId, BeerUpdate, NewBeer, Page, PageRequest};

/// In-memory local repository.
///
/// Cloning is cheap and clones share the same data.
///
/// # Example
/// ```
/// use brewery_rest::db::repositories::LocalRepository;
/// use brewery_rest::db::repository::BeerRepository;
/// use brewery_rest::models::{BeerStyle, NewBeer};
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = LocalRepository::new();
/// let beer = NewBeer::new("Galaxy Cat", BeerStyle::PaleAle, "0631234300019", None).unwrap();
/// let stored = repo.insert(beer).await.unwrap();
///
/// assert_eq!(stored.id.value(), 1);
/// assert_eq!(repo.beer_count(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    beers: BTreeMap<BeerId, Beer>,
    upc_index: HashMap<String, BeerId>,

    // Ids are never reused, also after deletes.
    next_id: i64,

    // Connection health
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            beers: BTreeMap::new(),
            upc_index: HashMap::new(),
            next_id: 1,
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self {
            data: Arc::new(RwLock::new(LocalData::default())),
        }
    }

    /// Set the health status for testing connection failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data and restart id assignment at 1.
    pub fn clear(&self) {
        let mut data = self.data.write();
        *data = LocalData {
            is_healthy: data.is_healthy,
            ..Default::default()
        };
    }

    /// Get the number of records stored.
    pub fn beer_count(&self) -> usize {
        self.data.read().beers.len()
    }

    /// Check if a record exists.
    pub fn has_beer(&self, id: BeerId) -> bool {
        self.data.read().beers.contains_key(&id)
    }

    /// Helper to check health and return error if unhealthy.
    fn check_health(data: &LocalData) -> RepositoryResult<()> {
        if !data.is_healthy {
            return Err(RepositoryError::connection("Database is not healthy"));
        }
        Ok(())
    }

    fn missing_id(operation: &str, id: BeerId) -> RepositoryError {
        RepositoryError::not_found_with_context(
            format!("Beer {} not found", id),
            ErrorContext::new(operation)
                .with_entity("beer")
                .with_entity_id(id),
        )
    }
}

impl Default for LocalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BeerRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let data = self.data.read();
        Self::check_health(&data)?;
        Ok(data.beers.len() as u64)
    }

    async fn find_page(
        &self,
        filter: &BeerFilter,
        page: PageRequest,
    ) -> RepositoryResult<Page<Beer>> {
        let data = self.data.read();
        Self::check_health(&data)?;
        let matching = data.beers.values().filter(|beer| filter.matches(beer)).cloned();
        Ok(Page::from_iter_paged(matching, page))
    }

    async fn find_by_id(&self, id: BeerId) -> RepositoryResult<Beer> {
        let data = self.data.read();
        Self::check_health(&data)?;
        data.beers
            .get(&id)
            .cloned()
            .ok_or_else(|| Self::missing_id("find_by_id", id))
    }

    async fn find_by_upc(&self, upc: &str) -> RepositoryResult<Beer> {
        let data = self.data.read();
        Self::check_health(&data)?;
        data.upc_index
            .get(upc)
            .and_then(|id| data.beers.get(id))
            .cloned()
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    format!("Beer with UPC {} not found", upc),
                    ErrorContext::new("find_by_upc")
                        .with_entity("beer")
                        .with_entity_id(upc),
                )
            })
    }

    async fn insert(&self, beer: NewBeer) -> RepositoryResult<Beer> {
        let mut data = self.data.write();
        Self::check_health(&data)?;

        if let Some(existing) = data.upc_index.get(beer.upc()) {
            return Err(RepositoryError::duplicate_key_with_context(
                format!("UPC {} is already used by beer {}", beer.upc(), existing),
                ErrorContext::new("insert")
                    .with_entity("beer")
                    .with_entity_id(beer.upc())
                    .with_details("key=upc"),
            ));
        }

        let id = BeerId::new(data.next_id);
        data.next_id += 1;

        let stored = Beer::from_new(id, beer, Utc::now());
        data.upc_index.insert(stored.upc.clone(), id);
        data.beers.insert(id, stored.clone());
        debug!("Inserted beer id={} upc={}", id, stored.upc);

        Ok(stored)
    }

    async fn update(&self, id: BeerId, changes: BeerUpdate) -> RepositoryResult<Beer> {
        let mut data = self.data.write();
        Self::check_health(&data)?;

        let beer = data
            .beers
            .get_mut(&id)
            .ok_or_else(|| Self::missing_id("update", id))?;
        beer.apply(changes, Utc::now());
        debug!("Updated beer id={} version={}", id, beer.version);

        Ok(beer.clone())
    }

    async fn delete(&self, id: BeerId) -> RepositoryResult<()> {
        let mut data = self.data.write();
        Self::check_health(&data)?;

        let removed = data
            .beers
            .remove(&id)
            .ok_or_else(|| Self::missing_id("delete", id))?;
        data.upc_index.remove(&removed.upc);
        debug!("Deleted beer id={}", id);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BeerStyle;

    fn beer(name: &str, style: BeerStyle, upc: &str) -> NewBeer {
        NewBeer::new(name, style, upc, None).unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let repo = LocalRepository::new();
        let first = repo.insert(beer("A", BeerStyle::Ale, "1")).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.insert(beer("B", BeerStyle::Ale, "2")).await.unwrap();

        assert_eq!(first.id, BeerId::new(1));
        assert_eq!(second.id, BeerId::new(2));
    }

    #[tokio::test]
    async fn test_deleted_upc_can_be_reused() {
        let repo = LocalRepository::new();
        let first = repo.insert(beer("A", BeerStyle::Ale, "1")).await.unwrap();
        repo.delete(first.id).await.unwrap();

        assert!(repo.find_by_upc("1").await.is_err());
        assert!(repo.insert(beer("A2", BeerStyle::Ale, "1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_clear_resets_ids() {
        let repo = LocalRepository::new();
        repo.insert(beer("A", BeerStyle::Ale, "1")).await.unwrap();
        repo.clear();

        assert_eq!(repo.beer_count(), 0);
        let again = repo.insert(beer("A", BeerStyle::Ale, "1")).await.unwrap();
        assert_eq!(again.id, BeerId::new(1));
    }

    #[tokio::test]
    async fn test_unhealthy_repository_fails_with_connection_error() {
        let repo = LocalRepository::new();
        repo.set_healthy(false);

        assert!(!repo.health_check().await.unwrap());
        let err = repo.find_by_id(BeerId::new(1)).await.unwrap_err();
        assert!(matches!(err, RepositoryError::ConnectionError { .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let repo = LocalRepository::new();
        let clone = repo.clone();
        repo.insert(beer("A", BeerStyle::Ale, "1")).await.unwrap();
        assert!(clone.has_beer(BeerId::new(1)));
    }
}
