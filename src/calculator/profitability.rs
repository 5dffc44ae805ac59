use std::fmt;

use crate::calculator::constants::*;

/// Ingredient cost as a percentage of sale price.
///
/// Returns 0 when no sale price is set. Values above 100 mean the dish
/// costs more than it sells for.
pub fn food_cost_percentage(total_cost: f64, sale_price: f64) -> f64 {
    if sale_price == 0.0 {
        return 0.0;
    }
    (total_cost / sale_price) * 100.0
}

/// Recipe cost divided across its servings; 0 for zero servings.
pub fn cost_per_serving(total_cost: f64, servings: f64) -> f64 {
    if servings == 0.0 {
        return 0.0;
    }
    total_cost / servings
}

#[inline]
pub fn gross_profit(sale_price: f64, cost: f64) -> f64 {
    sale_price - cost
}

/// Gross profit as a percentage of sale price; 0 when no sale price is set.
pub fn gross_profit_margin(sale_price: f64, cost: f64) -> f64 {
    if sale_price == 0.0 {
        return 0.0;
    }
    ((sale_price - cost) / sale_price) * 100.0
}

/// Where a food cost percentage falls against the usual restaurant targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodCostRating {
    /// No sale price, so no percentage to judge.
    Unpriced,
    VeryLow,
    Low,
    Ideal,
    Elevated,
    High,
}

impl FoodCostRating {
    /// Classify a percentage. Band edges belong to the ideal side.
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage < FOOD_COST_VERY_LOW {
            FoodCostRating::VeryLow
        } else if percentage < FOOD_COST_IDEAL_MIN {
            FoodCostRating::Low
        } else if percentage <= FOOD_COST_IDEAL_MAX {
            FoodCostRating::Ideal
        } else if percentage <= FOOD_COST_HIGH {
            FoodCostRating::Elevated
        } else {
            FoodCostRating::High
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FoodCostRating::Unpriced => "no sale price",
            FoodCostRating::VeryLow => "very low, check pricing",
            FoodCostRating::Low => "low",
            FoodCostRating::Ideal => "ideal",
            FoodCostRating::Elevated => "elevated",
            FoodCostRating::High => "high, raise price or cut cost",
        }
    }
}

impl fmt::Display for FoodCostRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.description())
    }
}

/// Profitability figures for one recipe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecipeSummary {
    pub total_cost: f64,
    pub sale_price: f64,
    pub servings: u32,
    pub cost_per_serving: f64,
    pub food_cost_percentage: f64,
    pub gross_profit: f64,
    pub gross_profit_margin: f64,
    pub rating: FoodCostRating,
}

impl RecipeSummary {
    pub fn compute(total_cost: f64, sale_price: f64, servings: u32) -> Self {
        let food_cost_percentage = food_cost_percentage(total_cost, sale_price);
        let rating = if sale_price == 0.0 {
            FoodCostRating::Unpriced
        } else {
            FoodCostRating::from_percentage(food_cost_percentage)
        };

        Self {
            total_cost,
            sale_price,
            servings,
            cost_per_serving: cost_per_serving(total_cost, servings as f64),
            food_cost_percentage,
            gross_profit: gross_profit(sale_price, total_cost),
            gross_profit_margin: gross_profit_margin(sale_price, total_cost),
            rating,
        }
    }
}
