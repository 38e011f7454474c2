//! Data Transfer Objects for the HTTP API.
//!
//! The catalog record and list query are shared with the client and live in
//! [`crate::api`]; only server-side request/response shapes are defined here.

use serde::{Deserialize, Serialize};

pub use crate::api::{BeerDto, BeerListQuery, BeerPagedList};

/// Query parameters of the get-by-id endpoint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct InventoryQuery {
    /// Include `quantityOnHand` in the response (default: false)
    #[serde(default, rename = "showInventoryOnHand")]
    pub show_inventory_on_hand: Option<bool>,
}

impl InventoryQuery {
    pub fn show_inventory(&self) -> bool {
        self.show_inventory_on_hand.unwrap_or(false)
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the crate serving the API
    pub version: String,
    /// Repository connection status
    pub repository: String,
    /// Number of stored records, when the repository is reachable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beers: Option<u64>,
}
