//! Storage module for the beer catalog.
//!
//! This module provides abstractions for catalog storage via the Repository
//! pattern, so storage backends can be swapped without touching the HTTP layer.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Application Layer (REST API, client tests)             │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Service Layer (services.rs) - Business Logic           │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼─────────────────────────────────────┐
//! │  Repository Trait (repository/) - Abstract Interface    │
//! └───────────────────┬─────────────────────────────────────┘
//!                     │
//!     ┌──────────────────────────────────────────────┐
//!     │             Local Repository                  │
//!     │               (in-memory)                     │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! # Repository Pattern
//! The module includes:
//! - `services`: High-level catalog operations (use these in your application!)
//! - `repository`: Trait definition and error types
//! - `repositories::local`: In-memory implementation
//! - `factory`: Factory for creating repository instances
//! - `bootstrap`: Sample catalog loaded at startup
//!
//! # Recommended Usage
//!
//! ```no_run
//! use brewery_rest::db::{services, RepositoryFactory};
//! use brewery_rest::models::BeerId;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = RepositoryFactory::create_seeded().await?;
//!
//!     let beer = services::get_by_id(repo.as_ref(), BeerId::new(1), false).await?;
//!     println!("{:?}", beer.beer_name);
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod factory;
pub mod repositories;
pub mod repository;
pub mod services;

pub use factory::RepositoryFactory;
pub use repositories::LocalRepository;
pub use repository::{BeerRepository, ErrorContext, RepositoryError, RepositoryResult};
