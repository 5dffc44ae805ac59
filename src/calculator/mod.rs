pub mod constants;
pub mod conversion;
pub mod cost;
pub mod profitability;

pub use constants::*;
pub use conversion::{convert_quantity, from_base_unit, to_base_unit};
pub use cost::{
    IngredientLookup, ItemCostLine, RecipeCostBreakdown, effective_cost_per_unit,
    ingredient_usage_cost, item_cost, recipe_cost_breakdown, recipe_total_cost,
};
pub use profitability::{
    FoodCostRating, RecipeSummary, cost_per_serving, food_cost_percentage, gross_profit,
    gross_profit_margin,
};
