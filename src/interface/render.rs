use crate::calculator::{RecipeCostBreakdown, RecipeSummary, effective_cost_per_unit};
use crate::interface::format::{
    format_currency, format_currency_whole, format_percentage, format_quantity_short,
};
use crate::models::{Ingredient, Recipe, Unit};

/// Column width for a set of names. `{:<width$}` pads by chars, so count chars.
fn name_width<'a>(names: impl Iterator<Item = &'a str>) -> usize {
    names.map(|n| n.chars().count()).max().unwrap_or(10)
}

/// Display ingredients with purchase price and price per usable unit.
pub fn display_ingredient_list(ingredients: &[&Ingredient]) {
    if ingredients.is_empty() {
        println!("No ingredients yet. Use 'add-ingredient' to create one.");
        return;
    }

    println!();
    println!("=== Ingredients ({} items) ===", ingredients.len());
    println!();

    let width = name_width(ingredients.iter().map(|i| i.name.as_str()));

    for ingredient in ingredients {
        let unit = ingredient.purchase_unit;
        // Effective price is shown per purchase unit, so the yield loss is obvious.
        let effective = effective_cost_per_unit(ingredient, unit)
            .map(format_currency)
            .unwrap_or_else(|_| "—".to_string());

        println!(
            "  {:<width$}  {:<9}  {} / {} ({})  yield {}  => {} per usable {}",
            ingredient.name,
            ingredient.category,
            format_currency(ingredient.price_per_unit),
            unit,
            format_quantity_short(ingredient.purchase_quantity, unit),
            format_percentage(ingredient.yield_percentage),
            effective,
            unit,
        );
    }

    println!();
}

/// Display recipes with cached totals.
pub fn display_recipe_list(recipes: &[&Recipe]) {
    if recipes.is_empty() {
        println!("No recipes yet. Use 'add-recipe' to create one.");
        return;
    }

    println!();
    println!("=== Recipes ({} items) ===", recipes.len());
    println!();

    let width = name_width(recipes.iter().map(|r| r.name.as_str()));

    for recipe in recipes {
        let summary = RecipeSummary::compute(recipe.total_cost, recipe.sale_price, recipe.servings);
        println!(
            "  {:<width$}  {:>2} items  cost {}  price {}  food cost {} ({})",
            recipe.name,
            recipe.items.len(),
            format_currency(recipe.total_cost),
            format_currency_whole(recipe.sale_price),
            format_percentage(recipe.food_cost_percentage),
            summary.rating,
        );
    }

    println!();
}

/// Display a recipe's cost lines and profitability.
pub fn display_recipe_summary(recipe: &Recipe, breakdown: &RecipeCostBreakdown, summary: &RecipeSummary) {
    println!();
    println!("=== {} ===", recipe.name);
    if let Some(description) = &recipe.description {
        println!("{}", description);
    }
    println!();

    let width = name_width(breakdown.lines.iter().map(|l| l.ingredient_name.as_str()));

    for (i, line) in breakdown.lines.iter().enumerate() {
        println!(
            "{:>3}. {:<width$}  {:>12}  {:>12}  {:>6}",
            i + 1,
            line.ingredient_name,
            format_quantity_short(line.used_quantity, line.used_unit),
            format_currency(line.cost),
            format_percentage(line.share_of(breakdown.total_cost)),
        );
    }

    if !breakdown.missing.is_empty() {
        println!();
        println!(
            "Warning: {} ingredient(s) not found, counted as zero cost:",
            breakdown.missing.len()
        );
        for id in &breakdown.missing {
            println!("  - {}", id);
        }
    }

    println!();
    println!("--- Summary ---");
    println!("Total cost: {}", format_currency(summary.total_cost));
    println!(
        "Servings: {} ({} per serving)",
        summary.servings,
        format_currency(summary.cost_per_serving)
    );
    println!("Sale price: {}", format_currency(summary.sale_price));
    println!(
        "Food cost: {} ({})",
        format_percentage(summary.food_cost_percentage),
        summary.rating
    );
    println!("Gross profit: {}", format_currency(summary.gross_profit));
    println!("Gross margin: {}", format_percentage(summary.gross_profit_margin));
    println!();
}

pub fn display_conversion(quantity: f64, from: Unit, converted: f64, to: Unit) {
    println!(
        "{} = {}",
        format_quantity_short(quantity, from),
        format_quantity_short(converted, to)
    );
}
