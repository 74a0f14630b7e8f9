//! WebAssembly module for the Stockroom inventory tracker
//!
//! Provides client-side computation for:
//! - Stock quantities from a movement list
//! - Dashboard search and category filtering
//! - Stock-out checks before a form is submitted
//! - Item name validation

use std::str::FromStr;

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

fn parse_amount(label: &str, value: &str) -> Result<Decimal, String> {
    Decimal::from_str(value.trim()).map_err(|e| format!("Invalid {}: {}", label, e))
}

fn filter_positions(positions_json: &str, category: Option<String>, query: Option<String>) -> Result<String, String> {
    let positions: Vec<StockPosition> = serde_json::from_str(positions_json)
        .map_err(|e| format!("Invalid inventory JSON: {}", e))?;

    let filter = InventoryFilter { category, q: query };
    let filtered = filter.apply(positions);
    serde_json::to_string(&filtered).map_err(|e| format!("Serialization error: {}", e))
}

fn movements_quantity(movements_json: &str) -> Result<String, String> {
    let movements: Vec<Movement> = serde_json::from_str(movements_json)
        .map_err(|e| format!("Invalid movements JSON: {}", e))?;
    stock_quantity(&movements)
        .map(|qty| qty.to_string())
        .ok_or_else(|| "Stock quantity is out of range".to_string())
}

fn stock_out_check(available: &str, requested: &str) -> Result<(), String> {
    let available = parse_amount("available quantity", available)?;
    let requested = parse_amount("quantity", requested)?;
    validate_quantity(requested).map_err(str::to_string)?;
    check_sufficient_stock(available, requested).map_err(str::to_string)
}

/// Filter the inventory listing by category and search text.
///
/// Takes and returns a JSON array of stock positions.
#[wasm_bindgen]
pub fn search_inventory(
    positions_json: &str,
    category: Option<String>,
    query: Option<String>,
) -> Result<String, JsValue> {
    filter_positions(positions_json, category, query).map_err(|e| JsValue::from_str(&e))
}

/// IN - OUT + ADJUST over a JSON array of movements
#[wasm_bindgen]
pub fn compute_stock_qty(movements_json: &str) -> Result<String, JsValue> {
    movements_quantity(movements_json).map_err(|e| JsValue::from_str(&e))
}

/// Reject a stock-out the shop cannot cover
#[wasm_bindgen]
pub fn check_stock_out(available: &str, requested: &str) -> Result<(), JsValue> {
    stock_out_check(available, requested).map_err(|e| JsValue::from_str(&e))
}

/// Picker label, e.g. "Battery [In Stock: 9]"
#[wasm_bindgen(js_name = stockLabel)]
pub fn stock_label_for(name: &str, stock_qty: &str) -> Result<String, JsValue> {
    let qty = parse_amount("stock quantity", stock_qty).map_err(|e| JsValue::from_str(&e))?;
    Ok(stock_label(name, qty))
}

/// Item form name check
#[wasm_bindgen]
pub fn is_valid_item_name(name: &str) -> bool {
    validate_item_name(name).is_ok()
}

/// Money display, e.g. "PKR 12,500"
#[wasm_bindgen]
pub fn format_amount(currency: &str, amount: &str) -> Result<String, JsValue> {
    let amount = parse_amount("amount", amount).map_err(|e| JsValue::from_str(&e))?;
    Ok(format_money(currency, amount))
}

#[cfg(test)]
mod tests {
    use super::*;

    const POSITIONS: &str = r#"[
        {"id":1,"name":"Galaxy A10 Screen","category":"Screen","brand":"Samsung","unit":"pcs",
         "cost_price":"100","sale_price":"150","stock_qty":"3","stock_value_cost":"300"},
        {"id":2,"name":"iPhone 11 Battery","category":"Battery","brand":null,"unit":"pcs",
         "cost_price":"40","sale_price":"90","stock_qty":"0","stock_value_cost":"0"}
    ]"#;

    #[test]
    fn test_filter_positions() {
        let all = filter_positions(POSITIONS, Some("All".to_string()), None).unwrap();
        let all: Vec<StockPosition> = serde_json::from_str(&all).unwrap();
        assert_eq!(all.len(), 2);

        let found = filter_positions(POSITIONS, None, Some("samsung".to_string())).unwrap();
        let found: Vec<StockPosition> = serde_json::from_str(&found).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        let batteries = filter_positions(POSITIONS, Some("Battery".to_string()), None).unwrap();
        let batteries: Vec<StockPosition> = serde_json::from_str(&batteries).unwrap();
        assert_eq!(batteries[0].name, "iPhone 11 Battery");

        assert!(filter_positions("not json", None, None).is_err());
    }

    #[test]
    fn test_movements_quantity() {
        let movements = r#"[
            {"id":1,"item_id":1,"txn_type":"IN","quantity":"10","unit_price":null,"party_id":null,
             "ref_no":null,"txn_date":"2024-01-01","remarks":null,"created_at":"2024-01-01T10:00:00Z"},
            {"id":2,"item_id":1,"txn_type":"OUT","quantity":"3","unit_price":null,"party_id":null,
             "ref_no":null,"txn_date":"2024-01-02","remarks":null,"created_at":"2024-01-02T10:00:00Z"},
            {"id":3,"item_id":1,"txn_type":"ADJUST","quantity":"2","unit_price":null,"party_id":null,
             "ref_no":null,"txn_date":"2024-01-03","remarks":null,"created_at":"2024-01-03T10:00:00Z"}
        ]"#;
        assert_eq!(movements_quantity(movements).unwrap(), "9");
        assert_eq!(movements_quantity("[]").unwrap(), "0");
    }

    #[test]
    fn test_stock_out_check() {
        assert!(stock_out_check("9", "9").is_ok());
        assert!(stock_out_check("9", "50").is_err());
        assert!(stock_out_check("9", "0").is_err());
        assert!(stock_out_check("9", "abc").is_err());
    }

    #[test]
    fn test_item_name() {
        assert!(is_valid_item_name("Battery"));
        assert!(!is_valid_item_name("   "));
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_stock_label() {
        assert_eq!(stock_label_for("Battery", "9.5").unwrap(), "Battery [In Stock: 9]");
    }

    #[wasm_bindgen_test]
    fn test_format_amount() {
        assert_eq!(format_amount("PKR", "12500").unwrap(), "PKR 12,500");
    }
}
