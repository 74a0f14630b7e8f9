//! Reporting handlers for the dashboard, inventory listing and export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::{InventoryFilter, RecentTransaction, StockPosition};
use crate::services::{Dashboard, ReportingService};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    pub limit: Option<u32>,
}

/// Dashboard metrics with the filtered listing
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(filter): Query<InventoryFilter>,
) -> AppResult<Json<Dashboard>> {
    let service = ReportingService::new(state.store.clone());
    let inventory = &state.config.inventory;
    let dashboard = service
        .dashboard(&filter, &inventory.shop_name, &inventory.currency)
        .await?;
    Ok(Json(dashboard))
}

/// Inventory listing
pub async fn get_inventory(
    State(state): State<AppState>,
    Query(filter): Query<InventoryFilter>,
) -> AppResult<Json<Vec<StockPosition>>> {
    let service = ReportingService::new(state.store);
    let positions = service.inventory(&filter).await?;
    Ok(Json(positions))
}

/// Inventory listing as a CSV download
pub async fn export_inventory(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let service = ReportingService::new(state.store);
    let csv = service.export_inventory_csv().await?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (header::CONTENT_DISPOSITION, "attachment; filename=\"inventory_export.csv\""),
        ],
        csv,
    ))
}

/// Recent transactions, newest first. The limit is capped by configuration.
pub async fn get_recent_transactions(
    State(state): State<AppState>,
    Query(query): Query<RecentQuery>,
) -> AppResult<Json<Vec<RecentTransaction>>> {
    let max = state.config.inventory.recent_limit;
    let limit = query.limit.unwrap_or(max).min(max);

    let service = ReportingService::new(state.store);
    let transactions = service.recent_transactions(limit).await?;
    Ok(Json(transactions))
}
