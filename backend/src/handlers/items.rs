//! HTTP handlers for the item screen

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::models::{CreateItemInput, Item, Movement, StockPosition, UpdateItemPricesInput, ITEM_CATEGORIES};
use crate::services::{CatalogService, LedgerService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ItemListQuery {
    /// Include soft-deleted items
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    /// Labels offered by the item form
    pub presets: Vec<String>,
    /// Categories used by active items
    pub in_use: Vec<String>,
}

fn catalog(state: &AppState) -> CatalogService {
    CatalogService::new(state.store.clone(), state.config.inventory.default_unit.clone())
}

/// List items
pub async fn list_items(
    State(state): State<AppState>,
    Query(query): Query<ItemListQuery>,
) -> AppResult<Json<Vec<Item>>> {
    let items = catalog(&state).list_items(!query.include_inactive).await?;
    Ok(Json(items))
}

/// Create an item
pub async fn create_item(
    State(state): State<AppState>,
    Json(input): Json<CreateItemInput>,
) -> AppResult<(StatusCode, Json<Item>)> {
    let item = catalog(&state).create_item(input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Get an item
pub async fn get_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<Item>> {
    let item = catalog(&state).get_item(item_id).await?;
    Ok(Json(item))
}

/// Update cost and/or sale price
pub async fn update_item_prices(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(input): Json<UpdateItemPricesInput>,
) -> AppResult<Json<Item>> {
    let item = catalog(&state).update_prices(item_id, input).await?;
    Ok(Json(item))
}

/// Category presets and categories in use
pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<CategoriesResponse>> {
    let in_use = catalog(&state).list_categories().await?;
    Ok(Json(CategoriesResponse {
        presets: ITEM_CATEGORIES.iter().map(|c| c.to_string()).collect(),
        in_use,
    }))
}

/// Movement history of an item
pub async fn get_item_movements(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<Vec<Movement>>> {
    let service = LedgerService::new(state.store);
    let movements = service.item_movements(item_id).await?;
    Ok(Json(movements))
}

/// Current stock position of an item
pub async fn get_item_stock(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<StockPosition>> {
    let service = LedgerService::new(state.store);
    let position = service.stock_position(item_id).await?;
    Ok(Json(position))
}
