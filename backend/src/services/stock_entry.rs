//! Stock entry screens: purchases, sales and manual corrections
//!
//! Wraps the ledger with the shop's policies: resolving supplier and
//! customer names, defaulting unit prices from the item, and refusing to
//! issue more stock than is on hand.
//!
//! Party creation and the movement append are separate writes. If the
//! append fails, the party row stays and is reused on the next attempt.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{AdjustDirection, Item, Movement, MovementType, PartyType};
use crate::services::{AppendMovementInput, DirectoryService, LedgerService};
use crate::store::SharedStore;

/// Stock entry service for the IN, OUT and adjustment forms
#[derive(Clone)]
pub struct StockEntryService {
    store: SharedStore,
    ledger: LedgerService,
    directory: DirectoryService,
}

/// Stock IN (purchase) form
#[derive(Debug, Clone, Deserialize)]
pub struct StockInInput {
    pub item_id: i64,
    pub quantity: Decimal,
    /// Defaults to the item's cost price
    pub unit_price: Option<Decimal>,
    /// Existing or new supplier name
    pub supplier: Option<String>,
    pub ref_no: Option<String>,
    pub txn_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

/// Stock OUT (sale/issue) form
#[derive(Debug, Clone, Deserialize)]
pub struct StockOutInput {
    pub item_id: i64,
    pub quantity: Decimal,
    /// Defaults to the item's sale price
    pub unit_price: Option<Decimal>,
    /// Existing or new customer name
    pub customer: Option<String>,
    pub ref_no: Option<String>,
    pub txn_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

/// Manual correction form
#[derive(Debug, Clone, Deserialize)]
pub struct StockAdjustInput {
    pub item_id: i64,
    pub quantity: Decimal,
    pub direction: AdjustDirection,
    pub txn_date: Option<NaiveDate>,
    pub remarks: Option<String>,
}

/// Entry in the stock-out item picker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockOutOption {
    pub item_id: i64,
    pub name: String,
    pub in_stock: Decimal,
    pub sale_price: Decimal,
    pub label: String,
}

impl StockEntryService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            ledger: LedgerService::new(store.clone()),
            directory: DirectoryService::new(store.clone()),
            store,
        }
    }

    async fn item(&self, item_id: i64) -> AppResult<Item> {
        self.store
            .get_item(item_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".to_string()))
    }

    /// Field checks shared by every entry form. Runs before any party is resolved.
    fn validate_entry(quantity: Decimal, unit_price: Option<Decimal>) -> AppResult<()> {
        shared::validate_quantity(quantity).map_err(|e| AppError::validation("quantity", e))?;
        if let Some(unit_price) = unit_price {
            shared::validate_price(unit_price).map_err(|e| AppError::validation("unit_price", e))?;
        }
        Ok(())
    }

    async fn ensure_available(&self, item: &Item, requested: Decimal) -> AppResult<()> {
        let available = self.ledger.available_stock(item.id).await?;
        if shared::check_sufficient_stock(available, requested).is_err() {
            return Err(AppError::InsufficientStock {
                item: item.name.clone(),
                available,
                requested,
            });
        }
        Ok(())
    }

    /// Record a purchase
    pub async fn receive_stock(&self, input: StockInInput) -> AppResult<Movement> {
        Self::validate_entry(input.quantity, input.unit_price)?;
        let item = self.item(input.item_id).await?;

        let supplier = self
            .directory
            .find_or_create(PartyType::Supplier, input.supplier.as_deref().unwrap_or(""), None, None)
            .await?;

        self.ledger
            .append(AppendMovementInput {
                item_id: item.id,
                movement_type: MovementType::In,
                quantity: input.quantity,
                unit_price: Some(input.unit_price.unwrap_or(item.cost_price)),
                party_id: supplier.map(|p| p.id),
                ref_no: input.ref_no,
                txn_date: input.txn_date,
                remarks: input.remarks,
            })
            .await
    }

    /// Record a sale or issue.
    ///
    /// Fails with `InsufficientStock` before anything is written when the
    /// requested quantity exceeds the computed stock.
    pub async fn issue_stock(&self, input: StockOutInput) -> AppResult<Movement> {
        Self::validate_entry(input.quantity, input.unit_price)?;
        let item = self.item(input.item_id).await?;
        self.ensure_available(&item, input.quantity).await?;

        let customer = self
            .directory
            .find_or_create(PartyType::Customer, input.customer.as_deref().unwrap_or(""), None, None)
            .await?;

        self.ledger
            .append(AppendMovementInput {
                item_id: item.id,
                movement_type: MovementType::Out,
                quantity: input.quantity,
                unit_price: Some(input.unit_price.unwrap_or(item.sale_price)),
                party_id: customer.map(|p| p.id),
                ref_no: input.ref_no,
                txn_date: input.txn_date,
                remarks: input.remarks,
            })
            .await
    }

    /// Record a manual correction.
    ///
    /// Increases are ADJUST movements. Decreases are OUT movements and are
    /// guarded like sales.
    pub async fn adjust_stock(&self, input: StockAdjustInput) -> AppResult<Movement> {
        Self::validate_entry(input.quantity, None)?;
        let item = self.item(input.item_id).await?;
        if input.direction == AdjustDirection::Decrease {
            self.ensure_available(&item, input.quantity).await?;
        }

        let mut append = AppendMovementInput::new(item.id, input.direction.movement_type(), input.quantity);
        append.txn_date = input.txn_date;
        append.remarks = input.remarks;
        self.ledger.append(append).await
    }

    /// Active items with their stock, for the stock-out picker
    pub async fn stock_out_options(&self) -> AppResult<Vec<StockOutOption>> {
        let positions = self.ledger.stock_positions().await?;
        Ok(positions
            .into_iter()
            .map(|p| StockOutOption {
                item_id: p.id,
                label: p.stock_label(),
                name: p.name,
                in_stock: p.stock_qty,
                sale_price: p.sale_price,
            })
            .collect())
    }
}
