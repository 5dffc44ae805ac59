use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::Unit;
use crate::models::ingredient::{MAX_NAME_LEN, MAX_NOTES_LEN, invalid, normalize_notes};

pub const MAX_ITEM_NOTES_LEN: usize = 200;

/// One line of ingredient usage within a recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeItem {
    pub id: String,
    pub ingredient_id: String,
    pub used_quantity: f64,
    pub used_unit: Unit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// A dish with its ingredient lines and the cost figures derived from them.
///
/// `total_cost` and `food_cost_percentage` are cached results; they are
/// recomputed whenever items, sale price, or referenced ingredients change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub items: Vec<RecipeItem>,
    #[serde(default)]
    pub total_cost: f64,
    #[serde(default)]
    pub sale_price: f64,
    #[serde(default)]
    pub food_cost_percentage: f64,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Recipe {
    /// Build a stored recipe from form input. Cost fields start at zero.
    pub fn create(input: NewRecipe) -> Result<Self> {
        input.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: input.name.trim().to_string(),
            description: normalize_notes(input.description),
            items: input.items.into_iter().map(NewRecipeItem::into_item).collect(),
            total_cost: 0.0,
            sale_price: input.sale_price.unwrap_or(0.0),
            food_cost_percentage: 0.0,
            servings: input.servings,
            notes: normalize_notes(input.notes),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the present fields of a patch and refresh `updated_at`.
    ///
    /// Replacing `items` issues fresh item ids. Cost fields are left for the
    /// caller to recompute.
    pub fn apply(&mut self, patch: RecipePatch) -> Result<()> {
        let merged = NewRecipe {
            name: patch.name.unwrap_or_else(|| self.name.clone()),
            description: patch.description.or_else(|| self.description.clone()),
            items: match &patch.items {
                Some(items) => items.clone(),
                None => self.items.iter().map(NewRecipeItem::from_item).collect(),
            },
            servings: patch.servings.unwrap_or(self.servings),
            sale_price: Some(patch.sale_price.unwrap_or(self.sale_price)),
            notes: patch.notes.or_else(|| self.notes.clone()),
        };
        merged.validate()?;

        self.name = merged.name.trim().to_string();
        self.description = normalize_notes(merged.description);
        if patch.items.is_some() {
            self.items = merged
                .items
                .into_iter()
                .map(NewRecipeItem::into_item)
                .collect();
        }
        self.servings = merged.servings;
        self.sale_price = merged.sale_price.unwrap_or(0.0);
        self.notes = normalize_notes(merged.notes);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Whether any line references the given ingredient.
    pub fn uses_ingredient(&self, ingredient_id: &str) -> bool {
        self.items.iter().any(|i| i.ingredient_id == ingredient_id)
    }

    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}

/// Form input for one recipe line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipeItem {
    pub ingredient_id: String,
    pub used_quantity: f64,
    pub used_unit: Unit,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRecipeItem {
    fn into_item(self) -> RecipeItem {
        RecipeItem {
            id: uuid::Uuid::new_v4().to_string(),
            ingredient_id: self.ingredient_id.trim().to_string(),
            used_quantity: self.used_quantity,
            used_unit: self.used_unit,
            notes: normalize_notes(self.notes),
        }
    }

    fn from_item(item: &RecipeItem) -> Self {
        Self {
            ingredient_id: item.ingredient_id.clone(),
            used_quantity: item.used_quantity,
            used_unit: item.used_unit,
            notes: item.notes.clone(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.ingredient_id.trim().is_empty() {
            return Err(invalid("All ingredients must have a valid ingredient selected"));
        }
        if !self.used_quantity.is_finite() || self.used_quantity <= 0.0 {
            return Err(invalid("All ingredients must have a quantity greater than 0"));
        }
        if let Some(notes) = &self.notes {
            if notes.chars().count() > MAX_ITEM_NOTES_LEN {
                return Err(invalid("Item notes must be less than 200 characters"));
            }
        }
        Ok(())
    }
}

/// Form input for a new recipe.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub items: Vec<NewRecipeItem>,
    pub servings: u32,
    #[serde(default)]
    pub sale_price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewRecipe {
    pub fn validate(&self) -> Result<()> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(invalid("Recipe name is required"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(invalid("Recipe name must be less than 100 characters"));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_NOTES_LEN {
                return Err(invalid("Description must be less than 500 characters"));
            }
        }
        if self.items.is_empty() {
            return Err(invalid("Recipe must have at least one ingredient"));
        }
        for item in &self.items {
            item.validate()?;
        }
        if self.servings == 0 {
            return Err(invalid("Servings must be greater than 0"));
        }
        if let Some(price) = self.sale_price {
            if !price.is_finite() || price < 0.0 {
                return Err(invalid("Sale price cannot be negative"));
            }
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
pub struct RecipePatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<NewRecipeItem>>,
    pub servings: Option<u32>,
    pub sale_price: Option<f64>,
    pub notes: Option<String>,
}
