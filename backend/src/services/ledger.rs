//! Ledger engine: the append-only movement log and derived stock positions
//!
//! The engine accepts any well-formed append. Policies such as "do not
//! sell more than is on hand" live in `StockEntryService`.

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    compute_stock_positions, stock_quantity, Movement, MovementType, NewMovement, StockError,
    StockPosition,
};
use crate::store::SharedStore;

/// Ledger service for appending movements and reading stock positions
#[derive(Clone)]
pub struct LedgerService {
    store: SharedStore,
}

/// Input for appending a movement
#[derive(Debug, Clone, Deserialize)]
pub struct AppendMovementInput {
    pub item_id: i64,
    #[serde(rename = "txn_type")]
    pub movement_type: MovementType,
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub party_id: Option<i64>,
    pub ref_no: Option<String>,
    /// Defaults to today
    pub txn_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

impl AppendMovementInput {
    pub fn new(item_id: i64, movement_type: MovementType, quantity: Decimal) -> Self {
        Self {
            item_id,
            movement_type,
            quantity,
            unit_price: None,
            party_id: None,
            ref_no: None,
            txn_date: None,
            remarks: None,
        }
    }
}

impl LedgerService {
    pub fn new(store: SharedStore) -> Self {
        Self { store }
    }

    /// Append one immutable movement.
    ///
    /// Rejects non-positive quantities before touching the store. A missing
    /// item or party is reported by the store as a referential error.
    pub async fn append(&self, input: AppendMovementInput) -> AppResult<Movement> {
        shared::validate_quantity(input.quantity).map_err(|e| AppError::validation("quantity", e))?;
        if let Some(unit_price) = input.unit_price {
            shared::validate_price(unit_price).map_err(|e| AppError::validation("unit_price", e))?;
        }

        let movement = NewMovement {
            item_id: input.item_id,
            movement_type: input.movement_type,
            quantity: input.quantity,
            unit_price: input.unit_price,
            party_id: input.party_id,
            ref_no: shared::clean_optional_text(input.ref_no.as_deref()),
            txn_date: input.txn_date.unwrap_or_else(|| Utc::now().date_naive()),
            remarks: shared::clean_optional_text(input.remarks.as_deref()),
        };

        let movement = self.store.append_movement(movement).await?;
        tracing::info!(
            movement_id = movement.id,
            item_id = movement.item_id,
            txn_type = %movement.movement_type,
            quantity = %movement.quantity,
            "movement appended"
        );
        Ok(movement)
    }

    /// Current position of one item, active or not
    pub async fn stock_position(&self, item_id: i64) -> AppResult<StockPosition> {
        let item = self
            .store
            .get_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))?;
        let movements = self.store.list_movements(Some(item_id)).await?;

        let qty = stock_quantity(&movements).ok_or(StockError::QuantityOverflow { item_id })?;
        Ok(StockPosition::new(&item, qty)?)
    }

    /// Positions of every active item, ordered by name.
    /// Items with no movements appear with zero quantity.
    pub async fn stock_positions(&self) -> AppResult<Vec<StockPosition>> {
        let items = self.store.list_items(true).await?;
        let movements = self.store.list_movements(None).await?;
        Ok(compute_stock_positions(&items, &movements)?)
    }

    /// Quantity on hand for one item
    pub async fn available_stock(&self, item_id: i64) -> AppResult<Decimal> {
        Ok(self.stock_position(item_id).await?.stock_qty)
    }

    /// Movement history of one item in insertion order
    pub async fn item_movements(&self, item_id: i64) -> AppResult<Vec<Movement>> {
        if self.store.get_item(item_id).await?.is_none() {
            return Err(AppError::NotFound("Item".to_string()));
        }
        self.store.list_movements(Some(item_id)).await
    }
}
