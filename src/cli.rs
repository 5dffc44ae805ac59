use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::models::Unit;

/// Food cost calculator: ingredient prices with yield loss, recipe costing, and profitability.
#[derive(Parser, Debug)]
#[command(name = "food-cost")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the cost book JSON file.
    #[arg(short, long, default_value = "food_cost.json")]
    pub file: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List recipes with their cost and food cost percentage.
    Recipes,

    /// List ingredients with price per usable unit.
    Ingredients,

    /// Add an ingredient interactively.
    AddIngredient,

    /// Edit an ingredient by name or id; dependent recipes are re-priced.
    EditIngredient { ingredient: String },

    /// Remove an ingredient by name or id.
    RemoveIngredient { ingredient: String },

    /// Remove every ingredient.
    ClearIngredients,

    /// Add a recipe interactively.
    AddRecipe,

    /// Edit a recipe by name or id.
    EditRecipe { recipe: String },

    /// Remove a recipe by name or id.
    RemoveRecipe { recipe: String },

    /// Remove every recipe.
    ClearRecipes,

    /// Show a recipe's cost breakdown and profitability.
    Summary { recipe: String },

    /// Recompute every recipe against current ingredient prices.
    Recalculate,

    /// Convert a quantity between units of the same family.
    Convert {
        quantity: f64,
        #[arg(value_parser = parse_unit)]
        from: Unit,
        #[arg(value_parser = parse_unit)]
        to: Unit,
    },

    /// Cost of using part of a purchased ingredient.
    Cost {
        /// Price paid per purchase unit.
        #[arg(long)]
        price: f64,

        /// Quantity purchased.
        #[arg(long, default_value = "1")]
        purchase_qty: f64,

        /// Purchase unit (kg, g, l, ml, pcs).
        #[arg(long, value_parser = parse_unit)]
        purchase_unit: Unit,

        /// Usable percentage after preparation.
        #[arg(long = "yield", default_value = "100")]
        yield_percentage: f64,

        /// Quantity used.
        #[arg(long)]
        used_qty: f64,

        /// Unit of the used quantity.
        #[arg(long, value_parser = parse_unit)]
        used_unit: Unit,
    },

    /// Export recipe costs to CSV.
    Export {
        #[arg(default_value = "recipe_costs.csv")]
        path: PathBuf,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::Recipes
    }
}

fn parse_unit(s: &str) -> Result<Unit, String> {
    s.parse()
}
