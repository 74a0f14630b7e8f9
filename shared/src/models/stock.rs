//! Stock position: the derived view over the movement log
//!
//! Positions are never stored. They are recomputed from the full movement
//! history and the item's cost price every time they are read.

use std::collections::HashMap;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{Item, Movement};

/// Decimal places kept for monetary values
pub const MONEY_DP: u32 = 2;

/// Stock figures that no longer fit in a `Decimal`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StockError {
    #[error("Stock quantity of item {item_id} is out of range")]
    QuantityOverflow { item_id: i64 },

    #[error("Stock value of item {item_id} is out of range")]
    ValueOverflow { item_id: i64 },

    #[error("Inventory totals are out of range")]
    TotalsOverflow,
}

/// Current quantity and cost valuation of one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockPosition {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub brand: Option<String>,
    pub unit: String,
    pub cost_price: Decimal,
    pub sale_price: Decimal,
    pub stock_qty: Decimal,
    pub stock_value_cost: Decimal,
}

impl StockPosition {
    pub fn new(item: &Item, stock_qty: Decimal) -> Result<Self, StockError> {
        let stock_value_cost = stock_value(stock_qty, item.cost_price)
            .ok_or(StockError::ValueOverflow { item_id: item.id })?;

        Ok(Self {
            id: item.id,
            name: item.name.clone(),
            category: item.category.clone(),
            brand: item.brand.clone(),
            unit: item.unit.clone(),
            cost_price: item.cost_price,
            sale_price: item.sale_price,
            stock_qty,
            stock_value_cost,
        })
    }

    /// Picker label shown on the stock-out form
    pub fn stock_label(&self) -> String {
        stock_label(&self.name, self.stock_qty)
    }
}

/// Round a monetary amount to two places, half to even
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointNearestEven)
}

/// Value of a quantity at a unit cost; `None` on overflow
pub fn stock_value(stock_qty: Decimal, cost_price: Decimal) -> Option<Decimal> {
    stock_qty.checked_mul(cost_price).map(round_money)
}

/// IN - OUT + ADJUST over the movements of a single item; `None` on overflow
pub fn stock_quantity<'a, I>(movements: I) -> Option<Decimal>
where
    I: IntoIterator<Item = &'a Movement>,
{
    movements
        .into_iter()
        .try_fold(Decimal::ZERO, |total, m| total.checked_add(m.signed_quantity()))
}

/// One position per item, in the order the items are given.
///
/// Movements of items not in `items` are ignored; items without movements
/// get a zero position.
pub fn compute_stock_positions(
    items: &[Item],
    movements: &[Movement],
) -> Result<Vec<StockPosition>, StockError> {
    let mut totals: HashMap<i64, Decimal> = HashMap::with_capacity(items.len());
    for movement in movements {
        let total = totals.entry(movement.item_id).or_insert(Decimal::ZERO);
        *total = total
            .checked_add(movement.signed_quantity())
            .ok_or(StockError::QuantityOverflow { item_id: movement.item_id })?;
    }

    items
        .iter()
        .map(|item| {
            let qty = totals.get(&item.id).copied().unwrap_or(Decimal::ZERO);
            StockPosition::new(item, qty)
        })
        .collect()
}

/// `"<name> [In Stock: <qty>]"`, quantity truncated to a whole number
pub fn stock_label(name: &str, stock_qty: Decimal) -> String {
    format!("{} [In Stock: {}]", name, stock_qty.trunc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MovementType;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn item(id: i64, cost: i64) -> Item {
        Item {
            id,
            name: format!("Item {}", id),
            category: None,
            brand: None,
            unit: "pcs".to_string(),
            cost_price: Decimal::from(cost),
            sale_price: Decimal::ZERO,
            active: true,
            notes: None,
        }
    }

    fn movement(id: i64, item_id: i64, movement_type: MovementType, qty: i64) -> Movement {
        Movement {
            id,
            item_id,
            movement_type,
            quantity: Decimal::from(qty),
            unit_price: None,
            party_id: None,
            ref_no: None,
            txn_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            remarks: None,
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_item_without_movements_is_zero() {
        let positions = compute_stock_positions(&[item(1, 100)], &[]).unwrap();
        assert_eq!(positions.len(), 1);
        assert_eq!(positions[0].stock_qty, Decimal::ZERO);
        assert_eq!(positions[0].stock_value_cost, Decimal::ZERO);
    }

    #[test]
    fn test_in_out_adjust_scenario() {
        let items = [item(1, 100)];
        let mut movements = vec![movement(1, 1, MovementType::In, 10)];
        let p = compute_stock_positions(&items, &movements).unwrap();
        assert_eq!(p[0].stock_qty, Decimal::from(10));
        assert_eq!(p[0].stock_value_cost, Decimal::from(1000));

        movements.push(movement(2, 1, MovementType::Out, 3));
        let p = compute_stock_positions(&items, &movements).unwrap();
        assert_eq!(p[0].stock_qty, Decimal::from(7));
        assert_eq!(p[0].stock_value_cost, Decimal::from(700));

        movements.push(movement(3, 1, MovementType::Adjust, 2));
        let p = compute_stock_positions(&items, &movements).unwrap();
        assert_eq!(p[0].stock_qty, Decimal::from(9));
        assert_eq!(p[0].stock_value_cost, Decimal::from(900));
    }

    #[test]
    fn test_positions_are_per_item() {
        let items = [item(1, 10), item(2, 20)];
        let movements = [
            movement(1, 1, MovementType::In, 5),
            movement(2, 2, MovementType::In, 3),
            movement(3, 1, MovementType::Out, 2),
            movement(4, 99, MovementType::In, 50),
        ];
        let p = compute_stock_positions(&items, &movements).unwrap();
        assert_eq!(p[0].stock_qty, Decimal::from(3));
        assert_eq!(p[1].stock_qty, Decimal::from(3));
        assert_eq!(p[1].stock_value_cost, Decimal::from(60));
    }

    #[test]
    fn test_value_rounds_half_to_even() {
        let qty = Decimal::new(15, 1); // 1.5
        let cost = Decimal::new(1005, 3); // 1.005
        // 1.5075 -> 1.51
        assert_eq!(stock_value(qty, cost), Some(Decimal::new(151, 2)));
        assert_eq!(round_money(Decimal::new(1125, 3)), Decimal::new(112, 2));
    }

    #[test]
    fn test_negative_stock_is_reported_as_is() {
        let items = [item(1, 10)];
        let movements = [movement(1, 1, MovementType::Out, 4)];
        let p = compute_stock_positions(&items, &movements).unwrap();
        assert_eq!(p[0].stock_qty, Decimal::from(-4));
        assert_eq!(p[0].stock_value_cost, Decimal::from(-40));
    }

    #[test]
    fn test_quantity_overflow_is_an_error() {
        let items = [item(1, 10)];
        let mut huge = movement(1, 1, MovementType::In, 1);
        huge.quantity = Decimal::MAX;
        let movements = [huge.clone(), Movement { id: 2, ..huge }];

        assert_eq!(stock_quantity(&movements), None);
        assert_eq!(
            compute_stock_positions(&items, &movements),
            Err(StockError::QuantityOverflow { item_id: 1 })
        );
    }

    #[test]
    fn test_value_overflow_is_an_error() {
        let items = [item(7, 2)];
        let mut huge = movement(1, 7, MovementType::In, 1);
        huge.quantity = Decimal::MAX;

        assert_eq!(stock_value(Decimal::MAX, Decimal::TWO), None);
        assert_eq!(
            compute_stock_positions(&items, &[huge]),
            Err(StockError::ValueOverflow { item_id: 7 })
        );
    }

    #[test]
    fn test_stock_label() {
        assert_eq!(stock_label("Battery", Decimal::new(95, 1)), "Battery [In Stock: 9]");
        assert_eq!(stock_label("Cable", Decimal::ZERO), "Cable [In Stock: 0]");
    }
}
