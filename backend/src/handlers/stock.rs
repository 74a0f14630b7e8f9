//! HTTP handlers for stock IN, OUT and adjustments

use axum::{extract::State, http::StatusCode, Json};

use crate::error::AppResult;
use crate::models::Movement;
use crate::services::{StockAdjustInput, StockEntryService, StockInInput, StockOutInput, StockOutOption};
use crate::AppState;

/// Record a purchase
pub async fn stock_in(
    State(state): State<AppState>,
    Json(input): Json<StockInInput>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let service = StockEntryService::new(state.store);
    let movement = service.receive_stock(input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Record a sale or issue
pub async fn stock_out(
    State(state): State<AppState>,
    Json(input): Json<StockOutInput>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let service = StockEntryService::new(state.store);
    let movement = service.issue_stock(input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Record a manual correction
pub async fn stock_adjust(
    State(state): State<AppState>,
    Json(input): Json<StockAdjustInput>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let service = StockEntryService::new(state.store);
    let movement = service.adjust_stock(input).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}

/// Items with their stock for the stock-out picker
pub async fn stock_out_options(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StockOutOption>>> {
    let service = StockEntryService::new(state.store);
    let options = service.stock_out_options().await?;
    Ok(Json(options))
}
