use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::Utc;
use serde_json::json;

use super::*;
use crate::models::{BeerDraft, NewBeer};

fn stored_beer() -> Beer {
    let new_beer = NewBeer::new(
        "Galaxy Cat",
        BeerStyle::PaleAle,
        "0631234300019",
        Some(BigDecimal::from_str("11.95").unwrap()),
    )
    .unwrap()
    .with_quantity_on_hand(80)
    .unwrap();
    Beer::from_new(BeerId::new(2), new_beer, Utc::now())
}

#[test]
fn test_dto_serializes_camel_case() {
    let dto = BeerDto::from_beer(&stored_beer(), true);
    let json = serde_json::to_value(&dto).unwrap();

    assert_eq!(json["id"], 2);
    assert_eq!(json["version"], 0);
    assert_eq!(json["beerName"], "Galaxy Cat");
    assert_eq!(json["beerStyle"], "PALE_ALE");
    assert_eq!(json["upc"], "0631234300019");
    assert_eq!(json["price"], "11.95");
    assert_eq!(json["quantityOnHand"], 80);
    assert!(json["createdDate"].is_string());
    assert!(json["lastModifiedDate"].is_string());
}

#[test]
fn test_inventory_hidden_by_default() {
    let dto = BeerDto::from_beer(&stored_beer(), false);
    let json = serde_json::to_value(&dto).unwrap();
    assert!(json.get("quantityOnHand").is_none());
}

#[test]
fn test_price_accepts_number_and_string() {
    let from_number: BeerDto = serde_json::from_value(json!({ "price": 8.99 })).unwrap();
    let from_string: BeerDto = serde_json::from_value(json!({ "price": "8.99" })).unwrap();

    let expected = BigDecimal::from_str("8.99").unwrap();
    assert_eq!(from_number.price, Some(expected.clone()));
    assert_eq!(from_string.price, Some(expected));
}

#[test]
fn test_price_rejects_garbage() {
    let result: Result<BeerDto, _> = serde_json::from_value(json!({ "price": "cheap" }));
    assert!(result.is_err());
}

#[test]
fn test_missing_fields_deserialize_to_none() {
    let dto: BeerDto = serde_json::from_value(json!({})).unwrap();
    assert_eq!(dto, BeerDto::default());
}

#[test]
fn test_server_assigned_fields_do_not_reach_draft() {
    let dto: BeerDto = serde_json::from_value(json!({
        "id": 99,
        "version": 7,
        "beerName": "JTs Beer",
        "beerStyle": "PALE_ALE",
        "upc": "12345",
        "price": 8.99
    }))
    .unwrap();

    let beer = NewBeer::try_from(dto).unwrap();
    assert_eq!(beer.name(), "JTs Beer");
    assert_eq!(beer.upc(), "12345");
}

#[test]
fn test_from_new_round_trips_through_validation() {
    let beer = NewBeer::new("JTs Beer", BeerStyle::PaleAle, "12345", None).unwrap();
    let dto = BeerDto::from_new(&beer);
    assert_eq!(dto.style(), Some(BeerStyle::PaleAle));
    assert_eq!(NewBeer::try_from(BeerDraft::from(dto)).unwrap(), beer);
}

#[test]
fn test_list_query_serializes_only_set_fields() {
    let query = BeerListQuery::default()
        .paged(2, 10)
        .with_style(BeerStyle::Ipa)
        .show_inventory(true);
    let json = serde_json::to_value(&query).unwrap();

    assert_eq!(json, json!({ "page": 2, "size": 10, "style": "IPA", "showInventoryOnHand": true }));
}

#[test]
fn test_list_query_accepts_long_parameter_names() {
    let query: BeerListQuery = serde_json::from_value(json!({
        "pageNumber": 3,
        "pageSize": 5,
        "beerName": "Galaxy Cat",
        "beerStyle": "PALE_ALE"
    }))
    .unwrap();

    assert_eq!(query.page, Some(3));
    assert_eq!(query.size, Some(5));
    assert_eq!(query.name.as_deref(), Some("Galaxy Cat"));
    assert_eq!(query.style.as_deref(), Some("PALE_ALE"));
}
