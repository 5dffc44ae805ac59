use assert_float_eq::*;
use tempfile::tempdir;

use food_cost_calc::calculator::FoodCostRating;
use food_cost_calc::models::{
    IngredientCategory, IngredientPatch, NewIngredient, NewRecipe, NewRecipeItem, RecipePatch,
    Unit,
};
use food_cost_calc::state::{CostBook, export_recipes_csv, load_book, save_book};

fn ingredient(name: &str, price: f64, qty: f64, unit: Unit, yield_pct: f64) -> NewIngredient {
    NewIngredient {
        name: name.to_string(),
        category: IngredientCategory::Other,
        price_per_unit: price,
        purchase_unit: unit,
        purchase_quantity: qty,
        yield_percentage: yield_pct,
        notes: None,
    }
}

fn line(ingredient_id: &str, qty: f64, unit: Unit) -> NewRecipeItem {
    NewRecipeItem {
        ingredient_id: ingredient_id.to_string(),
        used_quantity: qty,
        used_unit: unit,
        notes: None,
    }
}

/// Green curry for four: chicken, coconut milk, curry paste.
fn curry_book() -> (CostBook, String) {
    let mut book = CostBook::in_memory();
    let chicken = book
        .add_ingredient(ingredient("Chicken thigh", 150.0, 1.0, Unit::Kg, 75.0))
        .unwrap()
        .id
        .clone();
    let coconut = book
        .add_ingredient(ingredient("Coconut milk", 90.0, 1.0, Unit::L, 100.0))
        .unwrap()
        .id
        .clone();
    let paste = book
        .add_ingredient(ingredient("Green curry paste", 20.0, 1.0, Unit::Pcs, 100.0))
        .unwrap()
        .id
        .clone();

    let recipe_id = book
        .add_recipe(NewRecipe {
            name: "Green curry".to_string(),
            description: Some("Serves four".to_string()),
            items: vec![
                line(&chicken, 600.0, Unit::G),
                line(&coconut, 400.0, Unit::Ml),
                line(&paste, 1.0, Unit::Pcs),
            ],
            servings: 4,
            sale_price: Some(600.0),
            notes: None,
        })
        .unwrap()
        .id
        .clone();

    (book, recipe_id)
}

#[test]
fn test_recipe_totals_and_summary() {
    let (book, recipe_id) = curry_book();

    // chicken 150 / 0.75 * 0.6 = 120; coconut 90 * 0.4 = 36; paste 20
    let recipe = book.get_recipe(&recipe_id).unwrap();
    assert_float_absolute_eq!(recipe.total_cost, 176.0, 1e-9);
    assert_float_absolute_eq!(recipe.food_cost_percentage, 176.0 / 600.0 * 100.0, 1e-9);

    let summary = book.summary(&recipe_id).unwrap();
    assert_float_absolute_eq!(summary.cost_per_serving, 44.0, 1e-9);
    assert_float_absolute_eq!(summary.gross_profit, 424.0, 1e-9);
    assert_eq!(summary.rating, FoodCostRating::Ideal);
}

#[test]
fn test_sale_price_change_updates_percentage() {
    let (mut book, recipe_id) = curry_book();

    let recipe = book
        .update_recipe(
            &recipe_id,
            RecipePatch {
                sale_price: Some(352.0),
                ..Default::default()
            },
        )
        .unwrap();

    assert_float_absolute_eq!(recipe.food_cost_percentage, 50.0, 1e-9);

    let summary = book.summary(&recipe_id).unwrap();
    assert_eq!(summary.rating, FoodCostRating::High);
}

#[test]
fn test_yield_change_reprices_dependent_recipe() {
    let (mut book, recipe_id) = curry_book();
    let chicken = book.find_ingredient("chicken thigh").unwrap().id.clone();

    book.update_ingredient(
        &chicken,
        IngredientPatch {
            yield_percentage: Some(100.0),
            ..Default::default()
        },
    )
    .unwrap();

    // chicken now 150 * 0.6 = 90
    let recipe = book.get_recipe(&recipe_id).unwrap();
    assert_float_absolute_eq!(recipe.total_cost, 146.0, 1e-9);
}

#[test]
fn test_persist_reload_and_export() {
    let (book, recipe_id) = curry_book();
    let dir = tempdir().unwrap();
    let book_path = dir.path().join("food_cost.json");

    save_book(&book_path, &book).unwrap();
    let mut reloaded = load_book(&book_path).unwrap();

    assert_eq!(reloaded.ingredients().len(), 3);
    let recipe = reloaded.find_recipe("GREEN CURRY").unwrap();
    assert_eq!(recipe.id, recipe_id);
    assert_eq!(recipe.description.as_deref(), Some("Serves four"));

    assert_eq!(reloaded.recalculate_all().unwrap(), 1);
    assert_float_absolute_eq!(reloaded.get_recipe(&recipe_id).unwrap().total_cost, 176.0, 1e-9);

    let csv_path = dir.path().join("costs.csv");
    assert_eq!(export_recipes_csv(&csv_path, &reloaded).unwrap(), 1);
    let content = std::fs::read_to_string(&csv_path).unwrap();
    assert!(content.contains("Green curry,4,176.00,44.00,600.00,29.3,424.00,70.7,ideal,0"));
}
