use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Unit;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_NOTES_LEN: usize = 500;

/// Grouping used to organize the ingredient list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientCategory {
    Protein,
    Vegetable,
    Fruit,
    Dairy,
    Grain,
    Spice,
    Oil,
    Beverage,
    #[default]
    Other,
}

impl IngredientCategory {
    pub const ALL: [IngredientCategory; 9] = [
        IngredientCategory::Protein,
        IngredientCategory::Vegetable,
        IngredientCategory::Fruit,
        IngredientCategory::Dairy,
        IngredientCategory::Grain,
        IngredientCategory::Spice,
        IngredientCategory::Oil,
        IngredientCategory::Beverage,
        IngredientCategory::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            IngredientCategory::Protein => "protein",
            IngredientCategory::Vegetable => "vegetable",
            IngredientCategory::Fruit => "fruit",
            IngredientCategory::Dairy => "dairy",
            IngredientCategory::Grain => "grain",
            IngredientCategory::Spice => "spice",
            IngredientCategory::Oil => "oil",
            IngredientCategory::Beverage => "beverage",
            IngredientCategory::Other => "other",
        }
    }
}

impl fmt::Display for IngredientCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// A purchasable ingredient with its price and preparation yield.
///
/// `price_per_unit` is what was paid per one `purchase_unit`.
/// `yield_percentage` is the share (0-100] still usable after trimming and prep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: IngredientCategory,
    pub price_per_unit: f64,
    pub purchase_unit: Unit,
    pub purchase_quantity: f64,
    pub yield_percentage: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Ingredient {
    /// Build a stored ingredient from form input, stamping id and timestamps.
    pub fn create(input: NewIngredient) -> Result<Self> {
        input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            category: input.category,
            price_per_unit: input.price_per_unit,
            purchase_unit: input.purchase_unit,
            purchase_quantity: input.purchase_quantity,
            yield_percentage: input.yield_percentage,
            notes: normalize_notes(input.notes),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the present fields of a patch and refresh `updated_at`.
    ///
    /// Leaves `self` untouched when the merged record would be invalid.
    pub fn apply(&mut self, patch: IngredientPatch) -> Result<()> {
        let merged = NewIngredient {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            category: patch.category.unwrap_or(self.category),
            price_per_unit: patch.price_per_unit.unwrap_or(self.price_per_unit),
            purchase_unit: patch.purchase_unit.unwrap_or(self.purchase_unit),
            purchase_quantity: patch.purchase_quantity.unwrap_or(self.purchase_quantity),
            yield_percentage: patch.yield_percentage.unwrap_or(self.yield_percentage),
            notes: match patch.notes {
                Some(notes) => Some(notes),
                None => self.notes.clone(),
            },
        };
        merged.validate()?;

        self.name = merged.name.trim().to_string();
        self.category = merged.category;
        self.price_per_unit = merged.price_per_unit;
        self.purchase_unit = merged.purchase_unit;
        self.purchase_quantity = merged.purchase_quantity;
        self.yield_percentage = merged.yield_percentage;
        self.notes = normalize_notes(merged.notes);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Canonical key for name lookups (lowercase, trimmed).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Form input for a new ingredient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIngredient {
    pub name: String,
    #[serde(default)]
    pub category: IngredientCategory,
    pub price_per_unit: f64,
    pub purchase_unit: Unit,
    pub purchase_quantity: f64,
    pub yield_percentage: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewIngredient {
    /// Form-level checks. Stricter than the engine: a zero price is refused here.
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("Name is required"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(invalid("Name must be less than 100 characters"));
        }
        if !self.price_per_unit.is_finite() || self.price_per_unit <= 0.0 {
            return Err(invalid("Price must be greater than 0"));
        }
        if !self.purchase_quantity.is_finite() || self.purchase_quantity <= 0.0 {
            return Err(invalid("Purchase quantity must be greater than 0"));
        }
        if !(self.yield_percentage > 0.0 && self.yield_percentage <= 100.0) {
            return Err(invalid("Yield percentage must be greater than 0 and at most 100"));
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_NOTES_LEN {
                return Err(invalid("Notes must be less than 500 characters"));
            }
        }
        Ok(())
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct IngredientPatch {
    pub name: Option<String>,
    pub category: Option<IngredientCategory>,
    pub price_per_unit: Option<f64>,
    pub purchase_unit: Option<Unit>,
    pub purchase_quantity: Option<f64>,
    pub yield_percentage: Option<f64>,
    pub notes: Option<String>,
}

pub(crate) fn invalid(message: &str) -> AppError {
    AppError::InvalidInput(message.to_string())
}

/// Empty notes are stored as absent.
pub(crate) fn normalize_notes(notes: Option<String>) -> Option<String> {
    notes
        .map(|n| n.trim().to_string())
        .filter(|n| !n.is_empty())
}
