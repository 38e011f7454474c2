//! Public API surface: wire representations shared by the server and the client.
//!
//! All types derive Serialize/Deserialize and use camelCase field names on the
//! wire.

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::models::{BeerId, BeerStyle};
use crate::models::{Beer, BeerDraft, NewBeer, Page, ValidationErrors};

/// Read/write collection path of API version 1.
pub const BEER_V1_PATH: &str = "/api/v1/beer";
/// UPC lookup path of API version 1.
pub const BEER_V1_UPC_PATH: &str = "/api/v1/beerUpc";
/// Collection path of API version 2.
pub const BEER_V2_PATH: &str = "/api/v2/beer";
/// UPC lookup path of API version 2.
pub const BEER_V2_UPC_PATH: &str = "/api/v2/beerUpc";

/// JSON representation of a catalog record.
///
/// Every field is optional so the same type carries both complete records
/// (responses) and unvalidated submissions (create/update bodies).
/// Server-assigned fields are ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BeerDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<BeerId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub beer_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", with = "decimal_format")]
    pub price: Option<BigDecimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity_on_hand: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
}

impl BeerDto {
    /// Response representation of a stored record.
    ///
    /// `quantityOnHand` is only included when `show_inventory` is set.
    pub fn from_beer(beer: &Beer, show_inventory: bool) -> Self {
        Self {
            id: Some(beer.id),
            version: Some(beer.version),
            beer_name: Some(beer.name.clone()),
            beer_style: Some(beer.style.as_str().to_string()),
            upc: Some(beer.upc.clone()),
            price: beer.price.clone(),
            quantity_on_hand: show_inventory.then_some(beer.quantity_on_hand),
            created_date: Some(beer.created_date),
            last_modified_date: Some(beer.last_modified_date),
        }
    }

    /// Submission body for a validated record.
    pub fn from_new(beer: &NewBeer) -> Self {
        Self {
            beer_name: Some(beer.name().to_string()),
            beer_style: Some(beer.style().as_str().to_string()),
            upc: Some(beer.upc().to_string()),
            price: beer.price().cloned(),
            quantity_on_hand: beer.quantity_on_hand(),
            ..Default::default()
        }
    }

    /// Typed style, if present and recognised.
    pub fn style(&self) -> Option<BeerStyle> {
        self.beer_style.as_deref().and_then(|s| s.parse().ok())
    }
}

impl From<BeerDto> for BeerDraft {
    fn from(dto: BeerDto) -> Self {
        Self {
            name: dto.beer_name,
            style: dto.beer_style,
            upc: dto.upc,
            price: dto.price,
            quantity_on_hand: dto.quantity_on_hand,
        }
    }
}

impl TryFrom<BeerDto> for NewBeer {
    type Error = ValidationErrors;

    fn try_from(dto: BeerDto) -> Result<Self, Self::Error> {
        NewBeer::try_from(BeerDraft::from(dto))
    }
}

/// A page of catalog records.
pub type BeerPagedList = Page<BeerDto>;

/// Query parameters of the list endpoint.
///
/// Accepts both the short names (`page`, `size`, `name`, `style`) and the long
/// ones (`pageNumber`, `pageSize`, `beerName`, `beerStyle`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeerListQuery {
    #[serde(default, alias = "pageNumber", skip_serializing_if = "Option::is_none")]
    pub page: Option<i64>,
    #[serde(default, alias = "pageSize", skip_serializing_if = "Option::is_none")]
    pub size: Option<i64>,
    #[serde(default, alias = "beerName", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, alias = "beerStyle", skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(
        default,
        rename = "showInventoryOnHand",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_inventory_on_hand: Option<bool>,
}

impl BeerListQuery {
    pub fn paged(mut self, page: i64, size: i64) -> Self {
        self.page = Some(page);
        self.size = Some(size);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_style(mut self, style: BeerStyle) -> Self {
        self.style = Some(style.as_str().to_string());
        self
    }

    pub fn show_inventory(mut self, show: bool) -> Self {
        self.show_inventory_on_hand = Some(show);
        self
    }
}

/// Prices travel as decimal strings so no precision is lost; JSON numbers are
/// accepted on input as well.
mod decimal_format {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;
    use serde::{de, Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawDecimal {
        Text(String),
        Number(serde_json::Number),
    }

    pub fn serialize<S: Serializer>(
        value: &Option<BigDecimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(price) => serializer.serialize_str(&price.to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<BigDecimal>, D::Error> {
        Option::<RawDecimal>::deserialize(deserializer)?
            .map(|raw| {
                let text = match raw {
                    RawDecimal::Text(text) => text,
                    RawDecimal::Number(number) => number.to_string(),
                };
                BigDecimal::from_str(text.trim()).map_err(de::Error::custom)
            })
            .transpose()
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
