//! # Brewery REST
//!
//! Beer catalog service: a REST API over an in-memory catalog of beers, plus
//! an async client for it.
//!
//! ## Features
//!
//! - **Catalog**: create, read, update and delete beer records keyed by id,
//!   with lookup by UPC
//! - **Listing**: paginated listing with exact name and style filters
//! - **HTTP API**: versioned REST endpoints served with Axum (`http-server`)
//! - **Client**: async client with per-call timeouts (`client`)
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: JSON representations shared by server and client
//! - [`config`]: TOML and environment configuration
//! - [`models`]: catalog records, validation and paging
//! - [`db`]: repository pattern, in-memory storage and the service layer
//! - [`http`]: Axum-based HTTP server and request handlers
//! - [`client`]: reqwest-based API client

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod models;

#[cfg(feature = "http-server")]
pub mod http;

#[cfg(feature = "client")]
pub mod client;
