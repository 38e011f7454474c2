//! Repository factory for dependency injection.
//!
//! This module creates repository instances from runtime configuration and
//! runs the startup data load when it is enabled.

use std::sync::Arc;

use log::info;

use super::bootstrap;
use super::repositories::LocalRepository;
use super::repository::{BeerRepository, RepositoryResult};
use crate::config::RepositorySettings;

/// Repository factory for creating repository instances.
///
/// # Example
/// ```
/// use brewery_rest::config::RepositorySettings;
/// use brewery_rest::db::repository::BeerRepository;
/// use brewery_rest::db::RepositoryFactory;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let repo = RepositoryFactory::from_settings(&RepositorySettings { seed_sample_data: true })
///     .await
///     .unwrap();
/// assert!(repo.count().await.unwrap() > 0);
/// # });
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create an empty in-memory repository.
    pub fn create_local() -> Arc<dyn BeerRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository pre-loaded with the sample catalog.
    pub async fn create_seeded() -> RepositoryResult<Arc<dyn BeerRepository>> {
        let repo = Self::create_local();
        let loaded = bootstrap::load_sample_beers(repo.as_ref()).await?;
        info!("Loaded {} sample beers", loaded);
        Ok(repo)
    }

    /// Create the repository described by `settings`.
    pub async fn from_settings(
        settings: &RepositorySettings,
    ) -> RepositoryResult<Arc<dyn BeerRepository>> {
        if settings.seed_sample_data {
            Self::create_seeded().await
        } else {
            Ok(Self::create_local())
        }
    }
}
