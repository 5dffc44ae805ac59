use std::path::Path;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use food_cost_calc::calculator::{convert_quantity, ingredient_usage_cost};
use food_cost_calc::cli::{Cli, Command};
use food_cost_calc::error::{AppError, Result};
use food_cost_calc::interface::{
    display_conversion, display_ingredient_list, display_recipe_list, display_recipe_summary,
    format_currency, prompt_edit_ingredient, prompt_edit_recipe, prompt_new_ingredient,
    prompt_new_recipe, prompt_yes_no,
};
use food_cost_calc::models::Unit;
use food_cost_calc::state::{export_recipes_csv, load_book, save_book};

fn main() {
    // Logs go to stderr so table output stays clean.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("food_cost_calc=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or_default();
    let file = cli.file.as_path();

    match command {
        Command::Recipes => cmd_recipes(file),
        Command::Ingredients => cmd_ingredients(file),
        Command::AddIngredient => cmd_add_ingredient(file),
        Command::EditIngredient { ingredient } => cmd_edit_ingredient(file, &ingredient),
        Command::RemoveIngredient { ingredient } => cmd_remove_ingredient(file, &ingredient),
        Command::ClearIngredients => cmd_clear_ingredients(file),
        Command::AddRecipe => cmd_add_recipe(file),
        Command::EditRecipe { recipe } => cmd_edit_recipe(file, &recipe),
        Command::RemoveRecipe { recipe } => cmd_remove_recipe(file, &recipe),
        Command::ClearRecipes => cmd_clear_recipes(file),
        Command::Summary { recipe } => cmd_summary(file, &recipe),
        Command::Recalculate => cmd_recalculate(file),
        Command::Convert { quantity, from, to } => cmd_convert(quantity, from, to),
        Command::Cost {
            price,
            purchase_qty,
            purchase_unit,
            yield_percentage,
            used_qty,
            used_unit,
        } => cmd_cost(
            price,
            purchase_qty,
            purchase_unit,
            yield_percentage,
            used_qty,
            used_unit,
        ),
        Command::Export { path } => cmd_export(file, &path),
    }
}

fn cmd_recipes(file: &Path) -> Result<()> {
    let book = load_book(file)?;
    display_recipe_list(&book.recipes());
    Ok(())
}

fn cmd_ingredients(file: &Path) -> Result<()> {
    let book = load_book(file)?;
    display_ingredient_list(&book.ingredients());
    Ok(())
}

fn cmd_add_ingredient(file: &Path) -> Result<()> {
    let mut book = load_book(file)?;
    let input = prompt_new_ingredient()?;

    let ingredient = book.add_ingredient(input)?;
    println!("Added ingredient '{}'.", ingredient.name);

    save_book(file, &book)?;
    println!("Cost book saved.");
    Ok(())
}

fn cmd_edit_ingredient(file: &Path, query: &str) -> Result<()> {
    let mut book = load_book(file)?;
    let current = book
        .find_ingredient(query)
        .cloned()
        .ok_or_else(|| AppError::IngredientNotFound(query.to_string()))?;

    let patch = prompt_edit_ingredient(&current)?;
    let repriced = book.update_ingredient(&current.id, patch)?;

    save_book(file, &book)?;
    println!(
        "Updated ingredient '{}'; re-priced {} recipe(s).",
        current.name, repriced
    );
    Ok(())
}

fn cmd_remove_ingredient(file: &Path, query: &str) -> Result<()> {
    let mut book = load_book(file)?;
    let (id, name) = book
        .find_ingredient(query)
        .map(|i| (i.id.clone(), i.name.clone()))
        .ok_or_else(|| AppError::IngredientNotFound(query.to_string()))?;

    let used_by = book.recipes().iter().filter(|r| r.uses_ingredient(&id)).count();
    if used_by > 0 {
        let proceed = prompt_yes_no(
            &format!("'{}' is used by {} recipe(s). Remove anyway?", name, used_by),
            false,
        )?;
        if !proceed {
            return Ok(());
        }
    }

    book.remove_ingredient(&id)?;
    save_book(file, &book)?;
    println!("Removed ingredient '{}'.", name);
    Ok(())
}

fn cmd_clear_ingredients(file: &Path) -> Result<()> {
    let mut book = load_book(file)?;
    let count = book.ingredients().len();
    if count == 0 {
        println!("No ingredients to remove.");
        return Ok(());
    }
    if !prompt_yes_no(&format!("Remove all {} ingredient(s)?", count), false)? {
        return Ok(());
    }

    book.clear_ingredients()?;
    save_book(file, &book)?;
    println!("Removed {} ingredient(s).", count);
    Ok(())
}

fn cmd_add_recipe(file: &Path) -> Result<()> {
    let mut book = load_book(file)?;
    let input = prompt_new_recipe(&book.ingredients())?;

    let recipe = book.add_recipe(input)?;
    let id = recipe.id.clone();
    println!(
        "Added recipe '{}' costing {}.",
        recipe.name,
        format_currency(recipe.total_cost)
    );

    save_book(file, &book)?;
    println!("Cost book saved.");

    let breakdown = book.breakdown(&id)?;
    let summary = book.summary(&id)?;
    if let Some(recipe) = book.get_recipe(&id) {
        display_recipe_summary(recipe, &breakdown, &summary);
    }
    Ok(())
}

fn cmd_edit_recipe(file: &Path, query: &str) -> Result<()> {
    let mut book = load_book(file)?;
    let current = book
        .find_recipe(query)
        .cloned()
        .ok_or_else(|| AppError::RecipeNotFound(query.to_string()))?;

    let patch = prompt_edit_recipe(&current, &book.ingredients())?;
    book.update_recipe(&current.id, patch)?;
    save_book(file, &book)?;
    println!("Updated recipe '{}'.", current.name);

    let breakdown = book.breakdown(&current.id)?;
    let summary = book.summary(&current.id)?;
    if let Some(recipe) = book.get_recipe(&current.id) {
        display_recipe_summary(recipe, &breakdown, &summary);
    }
    Ok(())
}

fn cmd_remove_recipe(file: &Path, query: &str) -> Result<()> {
    let mut book = load_book(file)?;
    let id = book
        .find_recipe(query)
        .map(|r| r.id.clone())
        .ok_or_else(|| AppError::RecipeNotFound(query.to_string()))?;

    let removed = book.remove_recipe(&id)?;
    save_book(file, &book)?;
    println!("Removed recipe '{}'.", removed.name);
    Ok(())
}

fn cmd_clear_recipes(file: &Path) -> Result<()> {
    let mut book = load_book(file)?;
    let count = book.recipes().len();
    if count == 0 {
        println!("No recipes to remove.");
        return Ok(());
    }
    if !prompt_yes_no(&format!("Remove all {} recipe(s)?", count), false)? {
        return Ok(());
    }

    book.clear_recipes();
    save_book(file, &book)?;
    println!("Removed {} recipe(s).", count);
    Ok(())
}

fn cmd_summary(file: &Path, query: &str) -> Result<()> {
    let book = load_book(file)?;
    let recipe = book
        .find_recipe(query)
        .ok_or_else(|| AppError::RecipeNotFound(query.to_string()))?;

    let breakdown = book.breakdown(&recipe.id)?;
    let summary = book.summary(&recipe.id)?;
    display_recipe_summary(recipe, &breakdown, &summary);
    Ok(())
}

fn cmd_recalculate(file: &Path) -> Result<()> {
    let mut book = load_book(file)?;
    let count = book.recalculate_all()?;
    save_book(file, &book)?;
    println!("Recalculated {} recipe(s).", count);
    Ok(())
}

fn cmd_convert(quantity: f64, from: Unit, to: Unit) -> Result<()> {
    let converted = convert_quantity(quantity, from, to)?;
    display_conversion(quantity, from, converted, to);
    Ok(())
}

fn cmd_cost(
    price: f64,
    purchase_qty: f64,
    purchase_unit: Unit,
    yield_percentage: f64,
    used_qty: f64,
    used_unit: Unit,
) -> Result<()> {
    let cost = ingredient_usage_cost(
        price,
        purchase_qty,
        purchase_unit,
        yield_percentage,
        used_qty,
        used_unit,
    )?;
    println!(
        "{} {} of an ingredient bought at {} per {} ({}% yield) costs {}",
        used_qty,
        used_unit,
        format_currency(price),
        purchase_unit,
        yield_percentage,
        format_currency(cost)
    );
    Ok(())
}

fn cmd_export(file: &Path, path: &Path) -> Result<()> {
    let book = load_book(file)?;
    let rows = export_recipes_csv(path, &book)?;
    println!("Exported {} recipe(s) to {}.", rows, path.display());
    Ok(())
}
