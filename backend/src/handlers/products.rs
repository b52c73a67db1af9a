use std::time::Instant;

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{debug, info};

use crate::{
    error::{AppError, AppResult},
    models::PriceFilter,
    AppState,
};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> Response {
    let products = state.catalog.all();
    debug!(count = products.len(), "Listed products");
    (StatusCode::OK, Json(products)).into_response()
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    raw_id: Result<Path<String>, PathRejection>,
) -> AppResult<Response> {
    let id: i64 = raw_id
        .ok()
        .and_then(|Path(raw)| raw.parse().ok())
        .ok_or_else(|| AppError::BadRequest("invalid product id".to_string()))?;

    let start = Instant::now();
    let product = state
        .catalog
        .find_by_id(id)
        .ok_or_else(|| AppError::NotFound("product not found".to_string()))?;

    info!(id, elapsed_us = start.elapsed().as_micros(), "Fetched product");

    Ok((StatusCode::OK, Json(product)).into_response())
}

// ── Search by price ───────────────────────────────────────────────────────────

pub async fn search_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Response> {
    let filter = PriceFilter::from_pairs(pairs);
    let raw = filter
        .price_gt
        .as_deref()
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest("priceGt query parameter is required".to_string()))?;
    let threshold: f64 = raw
        .parse()
        .map_err(|_| AppError::BadRequest("priceGt must be a valid number".to_string()))?;

    let start = Instant::now();
    let matches = state.catalog.priced_above(threshold);

    info!(
        price_gt = threshold,
        count = matches.len(),
        elapsed_us = start.elapsed().as_micros(),
        "Searched products by price"
    );

    Ok((StatusCode::OK, Json(matches)).into_response())
}
