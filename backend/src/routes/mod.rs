//! Route definitions for the Stockroom API

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Dashboard and reports
        .route("/dashboard", get(handlers::get_dashboard))
        .nest("/inventory", inventory_routes())
        .route("/transactions/recent", get(handlers::get_recent_transactions))
        // Item screen
        .nest("/items", item_routes())
        // Stock IN / OUT / adjustments
        .nest("/stock", stock_routes())
        // Suppliers and customers
        .route(
            "/parties",
            get(handlers::list_parties).post(handlers::create_party),
        )
}

/// Item management routes
fn item_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_items).post(handlers::create_item))
        .route("/categories", get(handlers::list_categories))
        .route("/:item_id", get(handlers::get_item))
        .route("/:item_id/prices", patch(handlers::update_item_prices))
        .route("/:item_id/movements", get(handlers::get_item_movements))
        .route("/:item_id/stock", get(handlers::get_item_stock))
}

/// Stock movement routes
fn stock_routes() -> Router<AppState> {
    Router::new()
        .route("/in", post(handlers::stock_in))
        .route("/out", post(handlers::stock_out))
        .route("/out/options", get(handlers::stock_out_options))
        .route("/adjust", post(handlers::stock_adjust))
}

/// Inventory report routes
fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::get_inventory))
        .route("/export", get(handlers::export_inventory))
}
