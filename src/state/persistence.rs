use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::models::{Ingredient, Recipe};
use crate::state::CostBook;

/// On-disk layout of the cost book.
#[derive(Debug, Default, Serialize, Deserialize)]
struct BookFile {
    #[serde(default)]
    ingredients: Vec<Ingredient>,
    #[serde(default)]
    recipes: Vec<Recipe>,
}

/// Load a cost book from a JSON file.
///
/// A missing file is an empty book. Duplicate ids keep the last occurrence.
pub fn load_book<P: AsRef<Path>>(path: P) -> Result<CostBook> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no cost book file, starting empty");
        return Ok(CostBook::in_memory());
    }

    let content = fs::read_to_string(path)?;
    let file: BookFile = serde_json::from_str(&content)?;
    tracing::debug!(
        path = %path.display(),
        ingredients = file.ingredients.len(),
        recipes = file.recipes.len(),
        "loaded cost book"
    );

    Ok(CostBook::from_records(file.ingredients, file.recipes))
}

/// Save a cost book as pretty-printed JSON, sorted by name.
pub fn save_book<P: AsRef<Path>>(path: P, book: &CostBook) -> Result<()> {
    let file = BookFile {
        ingredients: book.to_ingredients(),
        recipes: book.to_recipes(),
    };
    let json = serde_json::to_string_pretty(&file)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    use crate::models::{IngredientCategory, NewIngredient, NewRecipe, NewRecipeItem, Unit};

    #[test]
    fn test_missing_file_is_empty_book() {
        let dir = tempfile::tempdir().unwrap();
        let book = load_book(dir.path().join("absent.json")).unwrap();
        assert!(book.ingredients().is_empty());
        assert!(book.recipes().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let mut book = CostBook::in_memory();
        let shrimp = book
            .add_ingredient(NewIngredient {
                name: "Shrimp".to_string(),
                category: IngredientCategory::Protein,
                price_per_unit: 350.0,
                purchase_unit: Unit::Kg,
                purchase_quantity: 1.0,
                yield_percentage: 70.0,
                notes: Some("head-on".to_string()),
            })
            .unwrap()
            .id
            .clone();
        book.add_recipe(NewRecipe {
            name: "Tom Yum".to_string(),
            description: None,
            items: vec![NewRecipeItem {
                ingredient_id: shrimp.clone(),
                used_quantity: 200.0,
                used_unit: Unit::G,
                notes: None,
            }],
            servings: 2,
            sale_price: Some(250.0),
            notes: None,
        })
        .unwrap();

        let out = NamedTempFile::new().unwrap();
        save_book(out.path(), &book).unwrap();

        let reloaded = load_book(out.path()).unwrap();
        let ingredient = reloaded.get_ingredient(&shrimp).unwrap();
        assert_eq!(ingredient.notes.as_deref(), Some("head-on"));
        assert_eq!(reloaded.recipes().len(), 1);
        assert_eq!(reloaded.recipes()[0].total_cost, book.recipes()[0].total_cost);
    }

    #[test]
    fn test_reload_keeps_floats_exact() {
        let mut book = CostBook::in_memory();
        let id = book
            .add_ingredient(NewIngredient {
                name: "Lemongrass".to_string(),
                category: IngredientCategory::Spice,
                price_per_unit: 100.00000000000001,
                purchase_unit: Unit::Kg,
                purchase_quantity: 0.1 + 0.2,
                yield_percentage: 66.7,
                notes: None,
            })
            .unwrap()
            .id
            .clone();

        let out = NamedTempFile::new().unwrap();
        save_book(out.path(), &book).unwrap();
        let reloaded = load_book(out.path()).unwrap();

        let before = book.get_ingredient(&id).unwrap();
        let after = reloaded.get_ingredient(&id).unwrap();
        assert_eq!(after.price_per_unit, before.price_per_unit);
        assert_eq!(after.purchase_quantity, before.purchase_quantity);
        assert_eq!(after.yield_percentage, before.yield_percentage);
    }

    #[test]
    fn test_reads_camel_case_document() {
        let json = r#"{
            "ingredients": [
                {"id": "i1", "name": "Garlic", "category": "vegetable", "pricePerUnit": 80,
                 "purchaseUnit": "kg", "purchaseQuantity": 1, "yieldPercentage": 90,
                 "createdAt": "2024-01-15T08:00:00Z", "updatedAt": "2024-01-15T08:00:00Z"}
            ]
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let book = load_book(file.path()).unwrap();
        let garlic = book.find_ingredient("garlic").unwrap();
        assert_eq!(garlic.id, "i1");
        assert_eq!(garlic.purchase_unit, Unit::Kg);
        assert!(book.recipes().is_empty());
    }

    #[test]
    fn test_rejects_unknown_unit() {
        let json = r#"{"ingredients": [{"id": "x", "name": "X", "pricePerUnit": 1,
            "purchaseUnit": "cup", "purchaseQuantity": 1, "yieldPercentage": 100,
            "createdAt": "2024-01-15T08:00:00Z", "updatedAt": "2024-01-15T08:00:00Z"}]}"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        assert!(load_book(file.path()).is_err());
    }
}
