//! Item catalog: item master records

use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::models::{distinct_categories, CreateItemInput, Item, UpdateItemPricesInput};
use crate::store::SharedStore;

/// Catalog service for creating and maintaining items
#[derive(Clone)]
pub struct CatalogService {
    store: SharedStore,
    default_unit: String,
}

impl CatalogService {
    pub fn new(store: SharedStore, default_unit: impl Into<String>) -> Self {
        Self {
            store,
            default_unit: default_unit.into(),
        }
    }

    /// Create an item from form input
    pub async fn create_item(&self, input: CreateItemInput) -> AppResult<Item> {
        input.validate()?;
        let new_item = input
            .normalize(&self.default_unit)
            .map_err(|(field, message)| AppError::validation(field, message))?;

        let item = self.store.insert_item(new_item).await?;
        tracing::info!(item_id = item.id, name = %item.name, "item created");
        Ok(item)
    }

    /// Update cost and/or sale price; omitted prices are left unchanged
    pub async fn update_prices(&self, item_id: i64, input: UpdateItemPricesInput) -> AppResult<Item> {
        if let Some(cost_price) = input.cost_price {
            shared::validate_price(cost_price).map_err(|e| AppError::validation("cost_price", e))?;
        }
        if let Some(sale_price) = input.sale_price {
            shared::validate_price(sale_price).map_err(|e| AppError::validation("sale_price", e))?;
        }

        let item = self
            .store
            .update_item_prices(item_id, input.cost_price, input.sale_price)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;

        tracing::info!(
            item_id,
            cost_price = %item.cost_price,
            sale_price = %item.sale_price,
            "item prices updated"
        );
        Ok(item)
    }

    /// Get an item by ID
    pub async fn get_item(&self, item_id: i64) -> AppResult<Item> {
        self.store
            .get_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }

    /// List items ordered by name
    pub async fn list_items(&self, active_only: bool) -> AppResult<Vec<Item>> {
        self.store.list_items(active_only).await
    }

    /// Categories in use by active items, for the listing filter
    pub async fn list_categories(&self) -> AppResult<Vec<String>> {
        let items = self.store.list_items(true).await?;
        Ok(distinct_categories(&items))
    }
}
