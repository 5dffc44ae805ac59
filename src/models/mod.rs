pub mod ingredient;
pub mod recipe;
pub mod unit;

pub use ingredient::{Ingredient, IngredientCategory, IngredientPatch, NewIngredient};
pub use recipe::{NewRecipe, NewRecipeItem, Recipe, RecipeItem, RecipePatch};
pub use unit::{Unit, UnitMetadata, UnitType, are_compatible};
