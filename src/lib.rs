pub mod calculator;
pub mod cli;
pub mod error;
pub mod interface;
pub mod models;
pub mod state;

pub use error::{AppError, CalcError, Result};
pub use models::{Ingredient, Recipe, RecipeItem, Unit, UnitType};
