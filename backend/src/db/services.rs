//! High-level beer service layer.
//!
//! Repository-agnostic operations used by the HTTP handlers. These functions
//! hold the business rules that must be the same whatever the storage
//! backend: validation of submitted records, the immutable UPC on update and
//! the inventory visibility of returned records.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  HTTP Layer (http/) - routing, extraction, status codes │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! │  - Record validation                                     │
//! │  - Page shaping and inventory visibility                 │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌───────────────▼────────────────┐
//!     │ Local Repository (in-memory)   │
//!     └────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use brewery_rest::db::{services, repositories::LocalRepository};
//! use brewery_rest::models::{BeerFilter, PageRequest};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!
//!     let page = services::list_beers(&repo, &BeerFilter::default(), PageRequest::new(1, 25), false).await?;
//!     println!("Found {} beers", page.total_elements);
//!
//!     Ok(())
//! }
//! ```

use log::{info, warn};

use super::repository::{BeerRepository, RepositoryResult};
use crate::api::{BeerDto, BeerPagedList};
use crate::models::{BeerDraft, BeerFilter, BeerId, BeerUpdate, NewBeer, PageRequest};

// ==================== Health & Connection ====================

/// Check if the repository is healthy.
pub async fn health_check<R: BeerRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

// ==================== Queries ====================

/// List one page of beers matching `filter`.
///
/// # Arguments
/// * `repo` - Repository implementation
/// * `filter` - Optional name and style constraints (conjunctive)
/// * `page` - Normalized page request
/// * `show_inventory` - Include `quantityOnHand` in the returned records
///
/// # Returns
/// * `Ok(BeerPagedList)` - Possibly empty page with total-count metadata
pub async fn list_beers<R: BeerRepository + ?Sized>(
    repo: &R,
    filter: &BeerFilter,
    page: PageRequest,
    show_inventory: bool,
) -> RepositoryResult<BeerPagedList> {
    let beers = repo.find_page(filter, page).await?;
    Ok(beers.map(|beer| BeerDto::from_beer(&beer, show_inventory)))
}

/// Get a beer by id.
///
/// # Returns
/// * `Ok(BeerDto)` - The record
/// * `Err(RepositoryError::NotFound)` - If the id is unknown
pub async fn get_by_id<R: BeerRepository + ?Sized>(
    repo: &R,
    id: BeerId,
    show_inventory: bool,
) -> RepositoryResult<BeerDto> {
    let beer = repo.find_by_id(id).await?;
    Ok(BeerDto::from_beer(&beer, show_inventory))
}

/// Get a beer by its exact UPC. Inventory is always included.
pub async fn get_by_upc<R: BeerRepository + ?Sized>(
    repo: &R,
    upc: &str,
) -> RepositoryResult<BeerDto> {
    let beer = repo.find_by_upc(upc).await?;
    Ok(BeerDto::from_beer(&beer, true))
}

// ==================== Mutations ====================

/// Validate and store a new beer.
///
/// # Returns
/// * `Ok(BeerDto)` - The stored record including its assigned id
/// * `Err(RepositoryError::ValidationError)` - If required fields are missing or invalid
/// * `Err(RepositoryError::DuplicateKey)` - If the UPC is already taken
pub async fn save_new_beer<R: BeerRepository + ?Sized>(
    repo: &R,
    draft: BeerDraft,
) -> RepositoryResult<BeerDto> {
    let beer = NewBeer::try_from(draft).inspect_err(|e| warn!("Rejected new beer: {}", e))?;
    let stored = repo.insert(beer).await?;
    info!("Created beer id={} upc={}", stored.id, stored.upc);
    Ok(BeerDto::from_beer(&stored, true))
}

/// Validate `draft` and overwrite the record `id` with it.
///
/// The draft is validated like a new record; its UPC is then discarded
/// because the UPC of an existing record never changes.
///
/// # Returns
/// * `Ok(BeerDto)` - The updated record
/// * `Err(RepositoryError::ValidationError)` - If the draft is invalid
/// * `Err(RepositoryError::NotFound)` - If the id is unknown
pub async fn update_beer<R: BeerRepository + ?Sized>(
    repo: &R,
    id: BeerId,
    draft: BeerDraft,
) -> RepositoryResult<BeerDto> {
    let beer = NewBeer::try_from(draft)
        .inspect_err(|e| warn!("Rejected update of beer {}: {}", id, e))?;
    let updated = repo.update(id, BeerUpdate::from(beer)).await?;
    info!("Updated beer id={} version={}", updated.id, updated.version);
    Ok(BeerDto::from_beer(&updated, true))
}

/// Delete a beer.
///
/// Not idempotent: deleting an id that does not exist (or no longer exists)
/// fails with `RepositoryError::NotFound`.
pub async fn delete_beer_by_id<R: BeerRepository + ?Sized>(
    repo: &R,
    id: BeerId,
) -> RepositoryResult<()> {
    repo.delete(id).await?;
    info!("Deleted beer id={}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use crate::db::repository::RepositoryError;
    use crate::models::BeerStyle;

    fn draft(name: &str, style: &str, upc: &str) -> BeerDraft {
        BeerDraft {
            name: Some(name.to_string()),
            style: Some(style.to_string()),
            upc: Some(upc.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_save_new_beer_assigns_id() {
        let repo = LocalRepository::new();
        let saved = save_new_beer(&repo, draft("Galaxy Cat", "PALE_ALE", "0631234300019"))
            .await
            .unwrap();

        assert_eq!(saved.id, Some(BeerId::new(1)));
        assert_eq!(saved.version, Some(0));
        assert_eq!(saved.quantity_on_hand, Some(0));
    }

    #[tokio::test]
    async fn test_save_new_beer_rejects_missing_name() {
        let repo = LocalRepository::new();
        let err = save_new_beer(&repo, draft("  ", "ALE", "1")).await.unwrap_err();

        assert!(matches!(err, RepositoryError::ValidationError { .. }));
        assert_eq!(repo.beer_count(), 0);
    }

    #[tokio::test]
    async fn test_update_keeps_upc() {
        let repo = LocalRepository::new();
        let saved = save_new_beer(&repo, draft("Galaxy Cat", "PALE_ALE", "0631234300019"))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        let updated = update_beer(&repo, id, draft("New Name", "IPA", "12345"))
            .await
            .unwrap();

        assert_eq!(updated.beer_name.as_deref(), Some("New Name"));
        assert_eq!(updated.style(), Some(BeerStyle::Ipa));
        assert_eq!(updated.upc.as_deref(), Some("0631234300019"));
        assert_eq!(updated.version, Some(1));
    }

    #[tokio::test]
    async fn test_update_validates_before_lookup() {
        let repo = LocalRepository::new();
        let err = update_beer(&repo, BeerId::new(42), BeerDraft::default())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError { .. }));

        let err = update_beer(&repo, BeerId::new(42), draft("A", "ALE", "1"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_inventory_visibility() {
        let repo = LocalRepository::new();
        let saved = save_new_beer(&repo, draft("Galaxy Cat", "PALE_ALE", "0631234300019"))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        assert!(get_by_id(&repo, id, false).await.unwrap().quantity_on_hand.is_none());
        assert!(get_by_id(&repo, id, true).await.unwrap().quantity_on_hand.is_some());
        assert!(get_by_upc(&repo, "0631234300019")
            .await
            .unwrap()
            .quantity_on_hand
            .is_some());
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let repo = LocalRepository::new();
        let saved = save_new_beer(&repo, draft("A", "ALE", "1")).await.unwrap();
        let id = saved.id.unwrap();

        delete_beer_by_id(&repo, id).await.unwrap();
        let err = delete_beer_by_id(&repo, id).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_beers_filters_and_pages() {
        let repo = LocalRepository::new();
        for i in 0..5 {
            save_new_beer(&repo, draft(&format!("Beer {}", i), "IPA", &format!("ipa-{}", i)))
                .await
                .unwrap();
        }
        save_new_beer(&repo, draft("Stout", "STOUT", "stout-1")).await.unwrap();

        let filter = BeerFilter::new(None, Some(BeerStyle::Ipa));
        let page = list_beers(&repo, &filter, PageRequest::new(2, 2), false)
            .await
            .unwrap();

        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.len(), 2);
        assert_eq!(page.content[0].beer_name.as_deref(), Some("Beer 2"));
        assert!(page.content.iter().all(|b| b.quantity_on_hand.is_none()));
    }
}
