//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic. Extractor rejections are taken as
//! `Result`s so malformed input is reported in the same error body as every
//! other failure.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header, HeaderName, StatusCode},
    Json,
};

use super::dto::{BeerDto, BeerListQuery, BeerPagedList, HealthResponse, InventoryQuery};
use super::error::AppError;
use super::state::AppState;
use crate::api::{BEER_V1_PATH, BEER_V2_PATH};
use crate::db::repository::BeerRepository;
use crate::db::services as db_services;
use crate::models::{BeerDraft, BeerFilter, BeerId, BeerStyle, PageRequest};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Response of the create endpoints: 201 with a `Location` header.
pub type CreatedResponse = (StatusCode, [(HeaderName, String); 1]);

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the repository is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let repository = state.repository.as_ref();
    let (status, beers) = match db_services::health_check(repository).await {
        Ok(true) => ("connected".to_string(), repository.count().await.ok()),
        Ok(false) => ("disconnected".to_string(), None),
        Err(e) => (format!("error: {}", e), None),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        repository: status,
        beers,
    }))
}

// =============================================================================
// Queries
// =============================================================================

/// GET /api/v1/beer
///
/// List one page of the catalog, optionally filtered by exact name and style.
pub async fn list_beers(
    State(state): State<AppState>,
    query: Result<Query<BeerListQuery>, QueryRejection>,
) -> HandlerResult<BeerPagedList> {
    let Query(query) = query?;

    let style = query
        .style
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<BeerStyle>)
        .transpose()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let filter = BeerFilter::new(query.name, style);
    let page = PageRequest::normalize(query.page, query.size, &state.paging);
    let show_inventory = query.show_inventory_on_hand.unwrap_or(false);

    let beers =
        db_services::list_beers(state.repository.as_ref(), &filter, page, show_inventory).await?;
    Ok(Json(beers))
}

/// GET /api/v1/beer/{beer_id}, GET /api/v2/beer/{beer_id}
pub async fn get_beer_by_id(
    State(state): State<AppState>,
    beer_id: Result<Path<i64>, PathRejection>,
    query: Result<Query<InventoryQuery>, QueryRejection>,
) -> HandlerResult<BeerDto> {
    let Path(beer_id) = beer_id?;
    let Query(query) = query?;

    let beer = db_services::get_by_id(
        state.repository.as_ref(),
        BeerId::new(beer_id),
        query.show_inventory(),
    )
    .await?;
    Ok(Json(beer))
}

/// GET /api/v1/beerUpc/{upc}, GET /api/v2/beerUpc/{upc}
pub async fn get_beer_by_upc(
    State(state): State<AppState>,
    upc: Result<Path<String>, PathRejection>,
) -> HandlerResult<BeerDto> {
    let Path(upc) = upc?;
    let beer = db_services::get_by_upc(state.repository.as_ref(), &upc).await?;
    Ok(Json(beer))
}

// =============================================================================
// Mutations
// =============================================================================

/// POST /api/v1/beer
pub async fn create_beer_v1(
    state: State<AppState>,
    body: Result<Json<BeerDto>, JsonRejection>,
) -> Result<CreatedResponse, AppError> {
    create_beer(state, body, BEER_V1_PATH).await
}

/// POST /api/v2/beer
pub async fn create_beer_v2(
    state: State<AppState>,
    body: Result<Json<BeerDto>, JsonRejection>,
) -> Result<CreatedResponse, AppError> {
    create_beer(state, body, BEER_V2_PATH).await
}

async fn create_beer(
    State(state): State<AppState>,
    body: Result<Json<BeerDto>, JsonRejection>,
    base_path: &str,
) -> Result<CreatedResponse, AppError> {
    let Json(body) = body?;

    let saved =
        db_services::save_new_beer(state.repository.as_ref(), BeerDraft::from(body)).await?;
    let id = saved
        .id
        .ok_or_else(|| AppError::Internal("Stored beer has no id".to_string()))?;

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("{}/{}", base_path, id))],
    ))
}

/// PUT /api/v1/beer/{beer_id}, PUT /api/v2/beer/{beer_id}
///
/// Overwrites the record; the UPC of an existing record never changes.
pub async fn update_beer(
    State(state): State<AppState>,
    beer_id: Result<Path<i64>, PathRejection>,
    body: Result<Json<BeerDto>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let Path(beer_id) = beer_id?;
    let Json(body) = body?;

    db_services::update_beer(
        state.repository.as_ref(),
        BeerId::new(beer_id),
        BeerDraft::from(body),
    )
    .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/beer/{beer_id}, DELETE /api/v2/beer/{beer_id}
pub async fn delete_beer(
    State(state): State<AppState>,
    beer_id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(beer_id) = beer_id?;
    db_services::delete_beer_by_id(state.repository.as_ref(), BeerId::new(beer_id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Fallback
// =============================================================================

/// Any unrouted path.
pub async fn not_found() -> AppError {
    AppError::NotFound("No such endpoint".to_string())
}
