//! Beer catalog records.
//!
//! A [`Beer`] is the stored form of a catalog entry. New entries enter the
//! system only as a [`NewBeer`], which can only be obtained through validation
//! of a [`BeerDraft`] (or the [`NewBeer::new`] factory), so the repository
//! never sees a record missing its name, style or UPC.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

crate::define_id_type!(i64, BeerId);

/// Longest accepted beer name, in characters.
pub const MAX_NAME_LENGTH: usize = 100;

/// Longest accepted UPC, in characters.
pub const MAX_UPC_LENGTH: usize = 25;

/// Beer style category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeerStyle {
    Lager,
    Pilsner,
    Stout,
    Gose,
    Porter,
    Ale,
    Wheat,
    Ipa,
    PaleAle,
    Saison,
}

impl BeerStyle {
    /// Every style, in declaration order.
    pub const ALL: [BeerStyle; 10] = [
        BeerStyle::Lager,
        BeerStyle::Pilsner,
        BeerStyle::Stout,
        BeerStyle::Gose,
        BeerStyle::Porter,
        BeerStyle::Ale,
        BeerStyle::Wheat,
        BeerStyle::Ipa,
        BeerStyle::PaleAle,
        BeerStyle::Saison,
    ];

    /// Wire name of the style (e.g. `PALE_ALE`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BeerStyle::Lager => "LAGER",
            BeerStyle::Pilsner => "PILSNER",
            BeerStyle::Stout => "STOUT",
            BeerStyle::Gose => "GOSE",
            BeerStyle::Porter => "PORTER",
            BeerStyle::Ale => "ALE",
            BeerStyle::Wheat => "WHEAT",
            BeerStyle::Ipa => "IPA",
            BeerStyle::PaleAle => "PALE_ALE",
            BeerStyle::Saison => "SAISON",
        }
    }
}

impl fmt::Display for BeerStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string does not name a known [`BeerStyle`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown beer style: {0}")]
pub struct UnknownBeerStyle(pub String);

impl FromStr for BeerStyle {
    type Err = UnknownBeerStyle;

    /// Parses a style name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BeerStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownBeerStyle(s.to_string()))
    }
}

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All validation failures found in one submitted record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Validation failed: {}", join_field_errors(.0))]
pub struct ValidationErrors(pub Vec<FieldError>);

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether a failure was recorded for `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

#[derive(Default)]
struct Collector(Vec<FieldError>);

impl Collector {
    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    fn finish<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.0.is_empty() {
            Ok(value())
        } else {
            Err(ValidationErrors(self.0))
        }
    }
}

/// Unvalidated record fields as submitted by a caller.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeerDraft {
    pub name: Option<String>,
    pub style: Option<String>,
    pub upc: Option<String>,
    pub price: Option<BigDecimal>,
    pub quantity_on_hand: Option<i32>,
}

/// A validated record ready to be stored.
///
/// Fields are private: the only ways to obtain one are [`NewBeer::new`] and
/// `NewBeer::try_from(BeerDraft)`.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBeer {
    name: String,
    style: BeerStyle,
    upc: String,
    price: Option<BigDecimal>,
    quantity_on_hand: Option<i32>,
}

impl NewBeer {
    /// Validated factory for code that already holds a typed style.
    pub fn new(
        name: impl Into<String>,
        style: BeerStyle,
        upc: impl Into<String>,
        price: Option<BigDecimal>,
    ) -> Result<Self, ValidationErrors> {
        Self::try_from(BeerDraft {
            name: Some(name.into()),
            style: Some(style.as_str().to_string()),
            upc: Some(upc.into()),
            price,
            quantity_on_hand: None,
        })
    }

    /// Returns a copy with `quantity_on_hand` set, re-checking the bound.
    pub fn with_quantity_on_hand(self, quantity: i32) -> Result<Self, ValidationErrors> {
        let mut errors = Collector::default();
        if quantity < 0 {
            errors.push("quantityOnHand", "must not be negative");
        }
        errors.finish(|| Self {
            quantity_on_hand: Some(quantity),
            ..self
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn style(&self) -> BeerStyle {
        self.style
    }

    pub fn upc(&self) -> &str {
        &self.upc
    }

    pub fn price(&self) -> Option<&BigDecimal> {
        self.price.as_ref()
    }

    pub fn quantity_on_hand(&self) -> Option<i32> {
        self.quantity_on_hand
    }
}

impl TryFrom<BeerDraft> for NewBeer {
    type Error = ValidationErrors;

    fn try_from(draft: BeerDraft) -> Result<Self, Self::Error> {
        let mut errors = Collector::default();

        // Name and UPC are stored as submitted; blankness ignores whitespace.
        let name = draft.name.unwrap_or_default();
        if name.trim().is_empty() {
            errors.push("beerName", "must not be blank");
        } else if name.chars().count() > MAX_NAME_LENGTH {
            errors.push(
                "beerName",
                format!("must be at most {} characters", MAX_NAME_LENGTH),
            );
        }

        let style = match draft.style.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("beerStyle", "must not be null");
                None
            }
            Some(raw) => match raw.parse::<BeerStyle>() {
                Ok(style) => Some(style),
                Err(e) => {
                    errors.push("beerStyle", e.to_string());
                    None
                }
            },
        };

        let upc = draft.upc.unwrap_or_default();
        if upc.trim().is_empty() {
            errors.push("upc", "must not be blank");
        } else if upc.chars().count() > MAX_UPC_LENGTH {
            errors.push("upc", format!("must be at most {} characters", MAX_UPC_LENGTH));
        }

        if let Some(price) = &draft.price {
            if *price < BigDecimal::from(0) {
                errors.push("price", "must not be negative");
            }
        }

        if let Some(quantity) = draft.quantity_on_hand {
            if quantity < 0 {
                errors.push("quantityOnHand", "must not be negative");
            }
        }

        match style {
            Some(style) => errors.finish(|| NewBeer {
                name,
                style,
                upc,
                price: draft.price,
                quantity_on_hand: draft.quantity_on_hand,
            }),
            // A missing style has always recorded an error.
            None => Err(ValidationErrors(errors.0)),
        }
    }
}

/// Changes applied to an existing record.
///
/// Name and style always overwrite; price and quantity only when supplied.
/// The UPC is absent: it never changes after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct BeerUpdate {
    pub name: String,
    pub style: BeerStyle,
    pub price: Option<BigDecimal>,
    pub quantity_on_hand: Option<i32>,
}

impl From<NewBeer> for BeerUpdate {
    fn from(beer: NewBeer) -> Self {
        Self {
            name: beer.name,
            style: beer.style,
            price: beer.price,
            quantity_on_hand: beer.quantity_on_hand,
        }
    }
}

/// A stored catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Beer {
    pub id: BeerId,
    pub version: i64,
    pub name: String,
    pub style: BeerStyle,
    pub upc: String,
    pub price: Option<BigDecimal>,
    pub quantity_on_hand: i32,
    pub created_date: DateTime<Utc>,
    pub last_modified_date: DateTime<Utc>,
}

impl Beer {
    /// Materialize a validated record under a freshly assigned id.
    pub fn from_new(id: BeerId, beer: NewBeer, now: DateTime<Utc>) -> Self {
        Self {
            id,
            version: 0,
            name: beer.name,
            style: beer.style,
            upc: beer.upc,
            price: beer.price,
            quantity_on_hand: beer.quantity_on_hand.unwrap_or(0),
            created_date: now,
            last_modified_date: now,
        }
    }

    /// Overwrite fields from `update` and bump the version.
    pub fn apply(&mut self, update: BeerUpdate, now: DateTime<Utc>) {
        self.name = update.name;
        self.style = update.style;
        if let Some(price) = update.price {
            self.price = Some(price);
        }
        if let Some(quantity) = update.quantity_on_hand {
            self.quantity_on_hand = quantity;
        }
        self.version += 1;
        self.last_modified_date = now;
    }
}

/// Conjunctive list filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeerFilter {
    pub name: Option<String>,
    pub style: Option<BeerStyle>,
}

impl BeerFilter {
    pub fn new(name: Option<String>, style: Option<BeerStyle>) -> Self {
        Self {
            name: name.filter(|n| !n.trim().is_empty()),
            style,
        }
    }

    /// Exact, case-sensitive name match and exact style match.
    pub fn matches(&self, beer: &Beer) -> bool {
        self.name.as_deref().map_or(true, |name| beer.name == name)
            && self.style.map_or(true, |style| beer.style == style)
    }
}

#[cfg(test)]
#[path = "beer_tests.rs"]
mod beer_tests;
