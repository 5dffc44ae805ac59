use std::collections::HashMap;

use assert_float_eq::*;
use chrono::Utc;

use food_cost_calc::calculator::{
    convert_quantity, cost_per_serving, food_cost_percentage, gross_profit_margin,
    ingredient_usage_cost, recipe_cost_breakdown, recipe_total_cost,
};
use food_cost_calc::error::CalcError;
use food_cost_calc::models::{Ingredient, IngredientCategory, RecipeItem, Unit};

fn make_ingredient(id: &str, price: f64, qty: f64, unit: Unit, yield_pct: f64) -> Ingredient {
    let now = Utc::now();
    Ingredient {
        id: id.to_string(),
        name: id.to_string(),
        category: IngredientCategory::Other,
        price_per_unit: price,
        purchase_unit: unit,
        purchase_quantity: qty,
        yield_percentage: yield_pct,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn make_item(ingredient_id: &str, qty: f64, unit: Unit) -> RecipeItem {
    RecipeItem {
        id: format!("line-{}", ingredient_id),
        ingredient_id: ingredient_id.to_string(),
        used_quantity: qty,
        used_unit: unit,
        notes: None,
    }
}

#[test]
fn test_self_conversion_identity() {
    for unit in Unit::ALL {
        for q in [0.0, 0.001, 1.0 / 7.0, 42.0, 1e9] {
            assert_eq!(convert_quantity(q, unit, unit).unwrap(), q);
        }
    }
}

#[test]
fn test_round_trip_conversion() {
    let pairs = [(Unit::Kg, Unit::G), (Unit::L, Unit::Ml), (Unit::G, Unit::Kg)];
    for (a, b) in pairs {
        for q in [0.3, 1.0, 17.25, 999.9] {
            let there = convert_quantity(q, a, b).unwrap();
            let back = convert_quantity(there, b, a).unwrap();
            assert_float_relative_eq!(back, q, 1e-12);
        }
    }
}

#[test]
fn test_incompatibility_rejection() {
    assert!(matches!(
        convert_quantity(1.0, Unit::Kg, Unit::L),
        Err(CalcError::IncompatibleUnits { .. })
    ));
    assert!(matches!(
        ingredient_usage_cost(10.0, 1.0, Unit::L, 100.0, 1.0, Unit::Pcs),
        Err(CalcError::IncompatibleUnits { .. })
    ));
}

#[test]
fn test_yield_boundary() {
    assert_eq!(
        ingredient_usage_cost(10.0, 1.0, Unit::Kg, 0.0, 1.0, Unit::Kg),
        Err(CalcError::InvalidYield(0.0))
    );
    assert!(ingredient_usage_cost(10.0, 1.0, Unit::Kg, 100.0, 1.0, Unit::Kg).is_ok());
    assert_eq!(
        ingredient_usage_cost(10.0, 1.0, Unit::Kg, 101.0, 1.0, Unit::Kg),
        Err(CalcError::InvalidYield(101.0))
    );
}

#[test]
fn test_invalid_yield_message_includes_value() {
    let err = ingredient_usage_cost(10.0, 1.0, Unit::Kg, 101.0, 1.0, Unit::Kg).unwrap_err();
    assert!(err.to_string().contains("101"));
}

#[test]
fn test_known_worked_example() {
    let cost = ingredient_usage_cost(200.0, 1.0, Unit::Kg, 80.0, 500.0, Unit::G).unwrap();
    assert_eq!(cost, 125.0);
}

#[test]
fn test_zero_sale_price_fallbacks() {
    for x in [0.0, 12.5, 1e6] {
        assert_eq!(food_cost_percentage(x, 0.0), 0.0);
        assert_eq!(cost_per_serving(x, 0.0), 0.0);
        assert_eq!(gross_profit_margin(0.0, x), 0.0);
    }
}

#[test]
fn test_missing_ingredient_contributes_zero() {
    let empty: HashMap<String, Ingredient> = HashMap::new();
    let items = vec![make_item("missing", 1.0, Unit::Pcs)];
    assert_eq!(recipe_total_cost(&items, &empty).unwrap(), 0.0);
    assert_eq!(recipe_total_cost(&[], &empty).unwrap(), 0.0);
}

#[test]
fn test_mixed_list_sums_resolved_items_only() {
    let mut lookup = HashMap::new();
    lookup.insert("pork".to_string(), make_ingredient("pork", 180.0, 1.0, Unit::Kg, 90.0));
    lookup.insert("eggs".to_string(), make_ingredient("eggs", 60.0, 10.0, Unit::Pcs, 100.0));

    let items = vec![
        make_item("pork", 300.0, Unit::G),
        make_item("gone", 2.0, Unit::Kg),
        make_item("eggs", 2.0, Unit::Pcs),
    ];

    // pork: 180 / 0.9 * 0.3 = 60; eggs: 60 / 10 * 2 = 12
    let total = recipe_total_cost(&items, &lookup).unwrap();
    assert_float_absolute_eq!(total, 72.0, 1e-9);

    let breakdown = recipe_cost_breakdown(&items, &lookup).unwrap();
    assert_eq!(breakdown.lines.len(), 2);
    assert_eq!(breakdown.missing, vec!["gone".to_string()]);
}

#[test]
fn test_monotonic_in_used_quantity() {
    let mut previous = 0.0;
    for used in [1.0, 10.0, 100.0, 250.0, 1000.0] {
        let cost = ingredient_usage_cost(90.0, 2.0, Unit::L, 75.0, used, Unit::Ml).unwrap();
        assert!(cost > previous);
        previous = cost;
    }
}

#[test]
fn test_negative_price_rejection() {
    assert_eq!(
        ingredient_usage_cost(-1.0, 1.0, Unit::Kg, 100.0, 1.0, Unit::Kg),
        Err(CalcError::NegativePrice(-1.0))
    );
}

#[test]
fn test_non_positive_quantities_rejected() {
    assert_eq!(
        ingredient_usage_cost(10.0, 0.0, Unit::Kg, 100.0, 1.0, Unit::Kg),
        Err(CalcError::InvalidQuantity)
    );
    assert_eq!(
        ingredient_usage_cost(10.0, 1.0, Unit::Kg, 100.0, -5.0, Unit::Kg),
        Err(CalcError::InvalidQuantity)
    );
}

#[test]
fn test_food_cost_over_one_hundred_is_allowed() {
    assert_float_absolute_eq!(food_cost_percentage(120.0, 100.0), 120.0, 1e-9);
}
