//! Reporting service: read-only inventory views and export

use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::models::{
    format_money, InventoryExportRow, INVENTORY_EXPORT_COLUMNS, InventoryFilter, InventoryTotals, RecentTransaction,
    StockPosition,
};
use crate::services::LedgerService;
use crate::store::SharedStore;

/// Reporting service
#[derive(Clone)]
pub struct ReportingService {
    store: SharedStore,
    ledger: LedgerService,
}

/// Dashboard view: headline figures plus the filtered listing
#[derive(Debug, Serialize)]
pub struct Dashboard {
    pub shop_name: String,
    pub totals: InventoryTotals,
    /// Inventory value at cost, e.g. "PKR 12,500"
    pub inventory_value_display: String,
    pub items: Vec<StockPosition>,
}

impl ReportingService {
    pub fn new(store: SharedStore) -> Self {
        Self {
            ledger: LedgerService::new(store.clone()),
            store,
        }
    }

    /// Active items with stock positions, ordered by name and filtered
    pub async fn inventory(&self, filter: &InventoryFilter) -> AppResult<Vec<StockPosition>> {
        let positions = self.ledger.stock_positions().await?;
        Ok(filter.apply(positions))
    }

    /// Dashboard totals over the filtered listing
    pub async fn dashboard(
        &self,
        filter: &InventoryFilter,
        shop_name: &str,
        currency: &str,
    ) -> AppResult<Dashboard> {
        let items = self.inventory(filter).await?;
        let totals = InventoryTotals::from_positions(&items)?;

        Ok(Dashboard {
            shop_name: shop_name.to_string(),
            inventory_value_display: format_money(currency, totals.total_value),
            totals,
            items,
        })
    }

    /// Full active inventory as CSV with a header row
    pub async fn export_inventory_csv(&self) -> AppResult<String> {
        let positions = self.ledger.stock_positions().await?;
        if positions.is_empty() {
            return Ok(format!("{}\n", INVENTORY_EXPORT_COLUMNS.join(",")));
        }
        let rows: Vec<InventoryExportRow> = positions.iter().map(InventoryExportRow::from).collect();
        Self::export_to_csv(&rows)
    }

    /// Most recently created movements, newest first, at most `limit` rows
    pub async fn recent_transactions(&self, limit: u32) -> AppResult<Vec<RecentTransaction>> {
        self.store.recent_movements(limit).await
    }

    /// Export report data as CSV
    pub fn export_to_csv<T: Serialize>(data: &[T]) -> AppResult<String> {
        let mut wtr = csv::Writer::from_writer(vec![]);
        for record in data {
            wtr.serialize(record)
                .map_err(|e| AppError::Internal(format!("CSV serialization error: {}", e)))?;
        }
        let csv_data = String::from_utf8(
            wtr.into_inner()
                .map_err(|e| AppError::Internal(format!("CSV writer error: {}", e)))?,
        )
        .map_err(|e| AppError::Internal(format!("UTF-8 conversion error: {}", e)))?;
        Ok(csv_data)
    }
}
