//! Inventory listing, search and totals

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Item, StockError, StockPosition};

/// Category value meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Listing filter from the dashboard sidebar and search box
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InventoryFilter {
    /// Exact category, or "All"
    pub category: Option<String>,
    /// Case-insensitive substring over name, brand and category
    pub q: Option<String>,
}

impl InventoryFilter {
    pub fn matches(&self, position: &StockPosition) -> bool {
        matches_category(position, self.category.as_deref())
            && matches_search(position, self.q.as_deref().unwrap_or(""))
    }

    pub fn apply(&self, positions: Vec<StockPosition>) -> Vec<StockPosition> {
        positions.into_iter().filter(|p| self.matches(p)).collect()
    }
}

/// Items without a category only match when filtering on the empty category.
pub fn matches_category(position: &StockPosition, category: Option<&str>) -> bool {
    match category {
        None | Some(ALL_CATEGORIES) => true,
        Some(category) => position.category.as_deref().unwrap_or("") == category,
    }
}

/// A blank query matches everything.
pub fn matches_search(position: &StockPosition, query: &str) -> bool {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return true;
    }
    [
        Some(position.name.as_str()),
        position.brand.as_deref(),
        position.category.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(&query))
}

/// Distinct, sorted, non-empty categories of the given items
pub fn distinct_categories(items: &[Item]) -> Vec<String> {
    let mut categories: Vec<String> = items
        .iter()
        .filter_map(|item| item.category.clone())
        .filter(|c| !c.is_empty())
        .collect();
    categories.sort();
    categories.dedup();
    categories
}

/// Dashboard headline figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryTotals {
    pub total_items: usize,
    pub total_qty: Decimal,
    pub total_value: Decimal,
}

impl InventoryTotals {
    pub fn from_positions(positions: &[StockPosition]) -> Result<Self, StockError> {
        let mut total_qty = Decimal::ZERO;
        let mut total_value = Decimal::ZERO;
        for position in positions {
            total_qty = total_qty
                .checked_add(position.stock_qty)
                .ok_or(StockError::TotalsOverflow)?;
            total_value = total_value
                .checked_add(position.stock_value_cost)
                .ok_or(StockError::TotalsOverflow)?;
        }

        Ok(Self {
            total_items: positions.len(),
            total_qty,
            total_value,
        })
    }
}

/// Export header, in column order
pub const INVENTORY_EXPORT_COLUMNS: [&str; 8] = [
    "name",
    "category",
    "brand",
    "unit",
    "cost_price",
    "sale_price",
    "stock_qty",
    "stock_value_cost",
];

/// One CSV export row. Field order is the export column order.
#[derive(Debug, Clone, Serialize)]
pub struct InventoryExportRow {
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: String,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub stock_qty: Decimal,
    pub stock_value_cost: Decimal,
}

impl From<&StockPosition> for InventoryExportRow {
    fn from(p: &StockPosition) -> Self {
        Self {
            name: p.name.clone(),
            category: p.category.clone(),
            brand: p.brand.clone(),
            unit: p.unit.clone(),
            cost_price: p.cost_price,
            sale_price: p.sale_price,
            stock_qty: p.stock_qty,
            stock_value_cost: p.stock_value_cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(name: &str, category: Option<&str>, brand: Option<&str>, qty: i64) -> StockPosition {
        StockPosition {
            id: 1,
            name: name.to_string(),
            category: category.map(str::to_string),
            brand: brand.map(str::to_string),
            unit: "pcs".to_string(),
            cost_price: Decimal::from(10),
            sale_price: Decimal::from(15),
            stock_qty: Decimal::from(qty),
            stock_value_cost: Decimal::from(qty * 10),
        }
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let p = position("iPhone 11 Screen", Some("Screen"), Some("Apple"), 2);
        assert!(matches_search(&p, "iphone"));
        assert!(matches_search(&p, "APPLE"));
        assert!(matches_search(&p, " scre "));
        assert!(matches_search(&p, ""));
        assert!(!matches_search(&p, "samsung"));
    }

    #[test]
    fn test_search_ignores_missing_fields() {
        let p = position("Tweezers", None, None, 1);
        assert!(!matches_search(&p, "none"));
        assert!(matches_search(&p, "tweez"));
    }

    #[test]
    fn test_category_filter() {
        let screen = position("A", Some("Screen"), None, 1);
        let bare = position("B", None, None, 1);
        assert!(matches_category(&screen, Some("All")));
        assert!(matches_category(&screen, Some("Screen")));
        assert!(!matches_category(&screen, Some("Battery")));
        assert!(matches_category(&bare, Some("")));
        assert!(!matches_category(&bare, Some("Screen")));
    }

    #[test]
    fn test_filter_combines_category_and_search() {
        let positions = vec![
            position("Galaxy Battery", Some("Battery"), Some("Samsung"), 1),
            position("Galaxy Screen", Some("Screen"), Some("Samsung"), 1),
            position("iPhone Battery", Some("Battery"), Some("Apple"), 1),
        ];
        let filter = InventoryFilter {
            category: Some("Battery".to_string()),
            q: Some("samsung".to_string()),
        };
        let filtered = filter.apply(positions);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].name, "Galaxy Battery");
    }

    #[test]
    fn test_totals() {
        let positions = vec![
            position("A", None, None, 3),
            position("B", None, None, 4),
        ];
        let totals = InventoryTotals::from_positions(&positions).unwrap();
        assert_eq!(totals.total_items, 2);
        assert_eq!(totals.total_qty, Decimal::from(7));
        assert_eq!(totals.total_value, Decimal::from(70));
    }

    #[test]
    fn test_totals_overflow() {
        let mut a = position("A", None, None, 1);
        a.stock_qty = Decimal::MAX;
        let b = position("B", None, None, 1);
        assert_eq!(
            InventoryTotals::from_positions(&[a, b]),
            Err(StockError::TotalsOverflow)
        );
    }

    #[test]
    fn test_distinct_categories() {
        let make = |category: Option<&str>| Item {
            id: 1,
            name: "x".to_string(),
            category: category.map(str::to_string),
            brand: None,
            unit: "pcs".to_string(),
            cost_price: Decimal::ZERO,
            sale_price: Decimal::ZERO,
            active: true,
            notes: None,
        };
        let items = [make(Some("Screen")), make(None), make(Some("Battery")), make(Some("Screen"))];
        assert_eq!(distinct_categories(&items), vec!["Battery", "Screen"]);
    }
}
