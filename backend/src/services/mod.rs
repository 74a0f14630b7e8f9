//! Business logic services for the Stockroom inventory tracker

pub mod catalog;
pub mod directory;
pub mod ledger;
pub mod reporting;
pub mod stock_entry;

pub use catalog::CatalogService;
pub use directory::DirectoryService;
pub use ledger::{AppendMovementInput, LedgerService};
pub use reporting::{Dashboard, ReportingService};
pub use stock_entry::{StockAdjustInput, StockEntryService, StockInInput, StockOutInput, StockOutOption};
