//! Sample catalog loaded into an empty repository at startup.
//!
//! The first three records are stable so clients and smoke tests can rely on
//! ids 1..=3 and the UPCs below after a fresh start.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use log::info;

use super::repository::{BeerRepository, RepositoryResult};
use crate::models::{BeerStyle, FieldError, NewBeer, ValidationErrors};

pub const BEER_1_UPC: &str = "0631234200036";
pub const BEER_2_UPC: &str = "0631234300019";
pub const BEER_3_UPC: &str = "0083783375213";

const SAMPLE_CATALOG: &[(&str, BeerStyle, &str, &str, i32)] = &[
    ("Mango Bobs", BeerStyle::Ale, BEER_1_UPC, "12.95", 120),
    ("Galaxy Cat", BeerStyle::PaleAle, BEER_2_UPC, "11.95", 80),
    ("No Hammers On The Bar", BeerStyle::Wheat, BEER_3_UPC, "9.95", 64),
    ("Blessed", BeerStyle::Stout, "4666337557578", "14.25", 30),
    ("Adjunct Trail", BeerStyle::Stout, "8380495518610", "13.50", 42),
    ("Very GGGreenn", BeerStyle::Ipa, "5677465691934", "12.25", 75),
    ("Double Barrel Hunahpu's", BeerStyle::Stout, "5463533082885", "18.95", 12),
    ("Very Hazy", BeerStyle::Ipa, "5339741428398", "11.50", 90),
    ("SR-71", BeerStyle::Stout, "1726923962766", "13.95", 25),
    ("Pliny the Younger", BeerStyle::Ipa, "8484957731774", "15.95", 8),
    ("Blessed Gose", BeerStyle::Gose, "6266328524787", "10.25", 55),
    ("King Krush", BeerStyle::Ipa, "7490217802727", "12.95", 60),
    ("Static Shock", BeerStyle::Lager, "8579613295827", "8.95", 140),
    ("Sublime Saison", BeerStyle::Saison, "2318301340601", "11.25", 33),
    ("Cave Porter", BeerStyle::Porter, "9401790633828", "10.95", 48),
    ("Prairie Pils", BeerStyle::Pilsner, "4813896316225", "9.25", 100),
];

/// Build the sample catalog.
pub fn sample_beers() -> Result<Vec<NewBeer>, ValidationErrors> {
    SAMPLE_CATALOG
        .iter()
        .map(|&(name, style, upc, price, quantity)| {
            let price = BigDecimal::from_str(price).map_err(|e| {
                ValidationErrors(vec![FieldError {
                    field: "price".to_string(),
                    message: e.to_string(),
                }])
            })?;
            NewBeer::new(name, style, upc, Some(price))?.with_quantity_on_hand(quantity)
        })
        .collect()
}

/// Insert the sample catalog when the repository is empty.
///
/// Returns the number of records inserted (0 when data already existed).
pub async fn load_sample_beers<R: BeerRepository + ?Sized>(repo: &R) -> RepositoryResult<usize> {
    if repo.count().await? > 0 {
        info!("Repository already holds data, skipping sample catalog");
        return Ok(0);
    }

    let beers = sample_beers()?;
    let total = beers.len();
    for beer in beers {
        repo.insert(beer).await?;
    }
    Ok(total)
}
