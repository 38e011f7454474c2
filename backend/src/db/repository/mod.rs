//! Repository trait for abstracting beer catalog storage.
//!
//! This trait defines the interface the service layer consumes, allowing
//! different storage implementations to be swapped via dependency injection.

use async_trait::async_trait;

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::{Beer, BeerFilter, BeerId, BeerUpdate, NewBeer, Page, PageRequest};

/// Repository trait for beer catalog operations.
///
/// # Thread Safety
/// Implementations must be `Send + Sync` so a single instance can be shared
/// across request handlers.
///
/// # Error Handling
/// Lookups and mutations of a missing record fail with
/// [`RepositoryError::NotFound`]; inserting a UPC that is already taken fails
/// with [`RepositoryError::DuplicateKey`].
#[async_trait]
pub trait BeerRepository: Send + Sync {
    // ==================== Health & Connection ====================

    /// Check if the store is healthy.
    ///
    /// # Returns
    /// - `Ok(true)` if the store is healthy
    /// - `Ok(false)` if it is unhealthy but no error occurred
    /// - `Err(RepositoryError)` if the check itself failed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Total number of stored records.
    async fn count(&self) -> RepositoryResult<u64>;

    // ==================== Queries ====================

    /// One page of the records matching `filter`, ordered by id ascending.
    ///
    /// An empty result is not an error.
    async fn find_page(&self, filter: &BeerFilter, page: PageRequest)
        -> RepositoryResult<Page<Beer>>;

    /// Retrieve a record by id.
    ///
    /// # Returns
    /// * `Ok(Beer)` - The stored record
    /// * `Err(RepositoryError::NotFound)` - If no record has that id
    async fn find_by_id(&self, id: BeerId) -> RepositoryResult<Beer>;

    /// Retrieve a record by exact UPC.
    ///
    /// # Returns
    /// * `Ok(Beer)` - The record whose UPC equals `upc`
    /// * `Err(RepositoryError::NotFound)` - If no record has that UPC
    async fn find_by_upc(&self, upc: &str) -> RepositoryResult<Beer>;

    // ==================== Mutations ====================

    /// Store a new record and assign its id.
    async fn insert(&self, beer: NewBeer) -> RepositoryResult<Beer>;

    /// Apply `changes` to an existing record.
    async fn update(&self, id: BeerId, changes: BeerUpdate) -> RepositoryResult<Beer>;

    /// Remove a record. Removing an absent record is `NotFound`, also when it
    /// was removed before.
    async fn delete(&self, id: BeerId) -> RepositoryResult<()>;
}
