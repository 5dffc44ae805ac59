use std::collections::HashMap;

use crate::calculator::constants::FULL_YIELD;
use crate::calculator::conversion::to_base_unit;
use crate::error::CalcError;
use crate::models::{Ingredient, RecipeItem, Unit};

/// Resolves an ingredient id to its stored record.
///
/// The engine never touches storage directly; callers hand it one of these.
pub trait IngredientLookup {
    fn find(&self, id: &str) -> Option<&Ingredient>;
}

impl IngredientLookup for HashMap<String, Ingredient> {
    fn find(&self, id: &str) -> Option<&Ingredient> {
        self.get(id)
    }
}

fn check_yield(yield_percentage: f64) -> Result<(), CalcError> {
    if yield_percentage > 0.0 && yield_percentage <= FULL_YIELD {
        Ok(())
    } else {
        Err(CalcError::InvalidYield(yield_percentage))
    }
}

/// Cost of using part of a purchased ingredient, accounting for yield loss.
///
/// Inputs are checked in order (yield, quantities, price, unit family) and
/// the first violation is returned before any arithmetic.
///
/// Formula: `price / (purchase_base * yield%) * used_base`, with both
/// quantities normalized to the family's base unit.
pub fn ingredient_usage_cost(
    price_per_unit: f64,
    purchase_quantity: f64,
    purchase_unit: Unit,
    yield_percentage: f64,
    used_quantity: f64,
    used_unit: Unit,
) -> Result<f64, CalcError> {
    check_yield(yield_percentage)?;

    if !(purchase_quantity > 0.0 && used_quantity > 0.0) {
        return Err(CalcError::InvalidQuantity);
    }

    if price_per_unit < 0.0 || price_per_unit.is_nan() {
        return Err(CalcError::NegativePrice(price_per_unit));
    }

    if !purchase_unit.is_compatible_with(used_unit) {
        return Err(CalcError::incompatible(purchase_unit, used_unit));
    }

    let purchase_base = to_base_unit(purchase_quantity, purchase_unit);
    let used_base = to_base_unit(used_quantity, used_unit);

    let usable_base = purchase_base * (yield_percentage / FULL_YIELD);
    let cost_per_base = price_per_unit / usable_base;

    Ok(cost_per_base * used_base)
}

/// [`ingredient_usage_cost`] fed from a stored ingredient and a recipe line.
pub fn item_cost(ingredient: &Ingredient, item: &RecipeItem) -> Result<f64, CalcError> {
    ingredient_usage_cost(
        ingredient.price_per_unit,
        ingredient.purchase_quantity,
        ingredient.purchase_unit,
        ingredient.yield_percentage,
        item.used_quantity,
        item.used_unit,
    )
}

/// Price per usable `target_unit` of an ingredient after yield loss.
///
/// Equals what a recipe is charged for one `target_unit` of the ingredient.
/// E.g. 200 for 1 kg at 80% yield is 250 per usable kg, 0.25 per usable g.
pub fn effective_cost_per_unit(ingredient: &Ingredient, target_unit: Unit) -> Result<f64, CalcError> {
    check_yield(ingredient.yield_percentage)?;

    if ingredient.purchase_quantity <= 0.0 || ingredient.purchase_quantity.is_nan() {
        return Err(CalcError::InvalidQuantity);
    }

    let purchase_unit = ingredient.purchase_unit;
    if !purchase_unit.is_compatible_with(target_unit) {
        return Err(CalcError::incompatible(purchase_unit, target_unit));
    }

    let factor = target_unit.conversion_factor() / purchase_unit.conversion_factor();
    let price_in_target = ingredient.price_per_unit / ingredient.purchase_quantity * factor;

    Ok(price_in_target / (ingredient.yield_percentage / FULL_YIELD))
}

/// Cost of one resolved recipe line.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemCostLine {
    pub item_id: String,
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub used_quantity: f64,
    pub used_unit: Unit,
    pub cost: f64,
}

impl ItemCostLine {
    /// This line's percentage of `total`; 0 when the total is 0.
    pub fn share_of(&self, total: f64) -> f64 {
        if total == 0.0 {
            return 0.0;
        }
        self.cost / total * 100.0
    }
}

/// Per-line recipe cost plus the lines that could not be priced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeCostBreakdown {
    pub total_cost: f64,
    pub lines: Vec<ItemCostLine>,
    /// Ingredient ids referenced by the recipe but absent from the lookup.
    pub missing: Vec<String>,
}

impl RecipeCostBreakdown {
    /// True when every line resolved to an ingredient.
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Price every line of a recipe.
///
/// Lines whose ingredient is not found contribute 0 and are listed in
/// `missing`. Calculation errors on resolved lines are returned as-is.
pub fn recipe_cost_breakdown<L>(items: &[RecipeItem], lookup: &L) -> Result<RecipeCostBreakdown, CalcError>
where
    L: IngredientLookup + ?Sized,
{
    let mut breakdown = RecipeCostBreakdown::default();

    for item in items {
        let Some(ingredient) = lookup.find(&item.ingredient_id) else {
            breakdown.missing.push(item.ingredient_id.clone());
            continue;
        };

        let cost = item_cost(ingredient, item)?;
        breakdown.total_cost += cost;
        breakdown.lines.push(ItemCostLine {
            item_id: item.id.clone(),
            ingredient_id: ingredient.id.clone(),
            ingredient_name: ingredient.name.clone(),
            used_quantity: item.used_quantity,
            used_unit: item.used_unit,
            cost,
        });
    }

    Ok(breakdown)
}

/// Sum of line costs; unresolved ingredients count as 0.
pub fn recipe_total_cost<L>(items: &[RecipeItem], lookup: &L) -> Result<f64, CalcError>
where
    L: IngredientLookup + ?Sized,
{
    recipe_cost_breakdown(items, lookup).map(|b| b.total_cost)
}
