//! Stock ledger properties
//!
//! - stock quantity is the signed sum IN - OUT + ADJUST
//! - the sum does not depend on movement order
//! - items with no movements report zero
//! - quantities outside (0, MAX_QUANTITY] are rejected

use chrono::{NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{
    compute_stock_positions, stock_quantity, validate_quantity, Item, Movement, MovementType,
    MAX_QUANTITY,
};

fn item(id: i64, cost: Decimal) -> Item {
    Item {
        id,
        name: format!("Item {}", id),
        category: Some("Other".to_string()),
        brand: None,
        unit: "pcs".to_string(),
        cost_price: cost,
        sale_price: Decimal::ZERO,
        active: true,
        notes: None,
    }
}

fn movements_from(entries: &[(MovementType, Decimal)]) -> Vec<Movement> {
    entries
        .iter()
        .enumerate()
        .map(|(i, (movement_type, quantity))| Movement {
            id: i as i64 + 1,
            item_id: 1,
            movement_type: *movement_type,
            quantity: *quantity,
            unit_price: None,
            party_id: None,
            ref_no: None,
            txn_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            remarks: None,
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        })
        .collect()
}

/// Strategy for generating valid quantities (positive decimals)
fn quantity_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..=10000i64).prop_map(|n| Decimal::new(n, 1)) // 0.1 to 1000.0
}

/// Strategy for generating valid cost prices
fn price_strategy() -> impl Strategy<Value = Decimal> {
    (0i64..=100000i64).prop_map(|n| Decimal::new(n, 2)) // 0.00 to 1000.00
}

fn movement_type_strategy() -> impl Strategy<Value = MovementType> {
    prop_oneof![
        Just(MovementType::In),
        Just(MovementType::Out),
        Just(MovementType::Adjust),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Stock quantity equals IN - OUT + ADJUST
    #[test]
    fn prop_stock_is_signed_sum(
        entries in prop::collection::vec((movement_type_strategy(), quantity_strategy()), 0..30)
    ) {
        let movements = movements_from(&entries);

        let mut expected = Decimal::ZERO;
        for (movement_type, qty) in &entries {
            match movement_type {
                MovementType::In => expected += qty,
                MovementType::Out => expected -= qty,
                MovementType::Adjust => expected += qty,
            }
        }

        prop_assert_eq!(stock_quantity(&movements), Some(expected));
    }

    /// Reordering the log never changes the position
    #[test]
    fn prop_stock_is_order_independent(
        entries in prop::collection::vec((movement_type_strategy(), quantity_strategy()), 1..30),
        cost in price_strategy(),
    ) {
        let forward = movements_from(&entries);
        let mut reversed = forward.clone();
        reversed.reverse();
        let mut rotated = forward.clone();
        rotated.rotate_left(entries.len() / 2);

        let items = [item(1, cost)];
        let a = compute_stock_positions(&items, &forward).unwrap();
        let b = compute_stock_positions(&items, &reversed).unwrap();
        let c = compute_stock_positions(&items, &rotated).unwrap();

        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&a, &c);
    }

    /// Recomputing with no intervening writes is identical
    #[test]
    fn prop_recompute_is_deterministic(
        entries in prop::collection::vec((movement_type_strategy(), quantity_strategy()), 0..20),
        cost in price_strategy(),
    ) {
        let movements = movements_from(&entries);
        let items = [item(1, cost)];
        prop_assert_eq!(
            compute_stock_positions(&items, &movements),
            compute_stock_positions(&items, &movements)
        );
    }

    /// Valuation is quantity times cost, at two decimal places
    #[test]
    fn prop_value_is_qty_times_cost(
        entries in prop::collection::vec((movement_type_strategy(), quantity_strategy()), 0..20),
        cost in price_strategy(),
    ) {
        let movements = movements_from(&entries);
        let items = [item(1, cost)];
        let position = &compute_stock_positions(&items, &movements).unwrap()[0];

        let exact = position.stock_qty * cost;
        prop_assert!((position.stock_value_cost - exact).abs() <= Decimal::new(5, 3));
        prop_assert!(position.stock_value_cost.scale() <= 2);
    }

    /// Non-positive quantities are always rejected
    #[test]
    fn prop_non_positive_quantity_rejected(n in -100000i64..=0) {
        prop_assert!(validate_quantity(Decimal::new(n, 2)).is_err());
    }

    /// Quantities above the accepted maximum are always rejected
    #[test]
    fn prop_oversized_quantity_rejected(extra in 1i64..=i64::MAX) {
        let qty = MAX_QUANTITY + Decimal::from(extra);
        prop_assert!(validate_quantity(qty).is_err());
    }
}

#[test]
fn test_item_without_movements_reports_zero() {
    let items = [item(1, Decimal::from(100)), item(2, Decimal::from(5))];
    let positions = compute_stock_positions(&items, &[]).unwrap();

    assert_eq!(positions.len(), 2);
    for position in positions {
        assert_eq!(position.stock_qty, Decimal::ZERO);
        assert_eq!(position.stock_value_cost, Decimal::ZERO);
    }
}
