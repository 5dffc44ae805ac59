use std::path::Path;

use crate::calculator::RecipeSummary;
use crate::error::Result;
use crate::state::CostBook;

const HEADER: [&str; 10] = [
    "recipe",
    "servings",
    "total_cost",
    "cost_per_serving",
    "sale_price",
    "food_cost_pct",
    "gross_profit",
    "gross_margin_pct",
    "rating",
    "missing_ingredients",
];

/// Write one row per recipe with its current cost and profitability.
///
/// Figures are recomputed against current ingredient prices, not read from
/// the cached recipe fields.
pub fn export_recipes_csv(path: &Path, book: &CostBook) -> Result<usize> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(HEADER)?;

    let recipes = book.recipes();
    for recipe in &recipes {
        let breakdown = book.breakdown(&recipe.id)?;
        let summary = RecipeSummary::compute(breakdown.total_cost, recipe.sale_price, recipe.servings);

        wtr.write_record([
            recipe.name.clone(),
            recipe.servings.to_string(),
            format!("{:.2}", summary.total_cost),
            format!("{:.2}", summary.cost_per_serving),
            format!("{:.2}", summary.sale_price),
            format!("{:.1}", summary.food_cost_percentage),
            format!("{:.2}", summary.gross_profit),
            format!("{:.1}", summary.gross_profit_margin),
            summary.rating.to_string(),
            breakdown.missing.len().to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(recipes.len())
}
