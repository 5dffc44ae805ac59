use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::{AppError, Result};
use crate::models::{
    Ingredient, IngredientCategory, IngredientPatch, NewIngredient, NewRecipe, NewRecipeItem,
    Recipe, RecipePatch, Unit,
};

/// Minimum Jaro-Winkler similarity for a fuzzy ingredient match.
const FUZZY_THRESHOLD: f64 = 0.7;

fn prompt_number(prompt: &str, default: Option<&str>) -> Result<f64> {
    let mut input = Input::<String>::new().with_prompt(prompt);
    if let Some(default) = default {
        input = input.default(default.to_string());
    }
    let text = input.interact_text()?;

    text.trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid number: {}", text.trim())))
}

fn prompt_optional_text(prompt: &str) -> Result<Option<String>> {
    prompt_optional_text_with(prompt, None)
}

/// Free text that may be left empty; `current` is offered as the default.
fn prompt_optional_text_with(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let mut input = Input::<String>::new().with_prompt(prompt).allow_empty(true);
    if let Some(current) = current {
        input = input.default(current.to_string());
    }
    let text = input.interact_text()?;
    let text = text.trim();
    Ok(if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    })
}

/// Pick a unit, optionally restricted to those compatible with `family_of`.
/// `family_of` itself is preselected.
pub fn prompt_unit(prompt: &str, family_of: Option<Unit>) -> Result<Unit> {
    let units: Vec<Unit> = match family_of {
        Some(unit) => Unit::units_of(unit.unit_type()),
        None => Unit::ALL.to_vec(),
    };
    let labels: Vec<String> = units
        .iter()
        .map(|u| format!("{} ({})", u, u.label()))
        .collect();
    let default = family_of
        .and_then(|unit| units.iter().position(|u| *u == unit))
        .unwrap_or(0);

    let selection = Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(units[selection])
}

pub fn prompt_category(current: IngredientCategory) -> Result<IngredientCategory> {
    let labels: Vec<&str> = IngredientCategory::ALL.iter().map(|c| c.name()).collect();
    let default = IngredientCategory::ALL
        .iter()
        .position(|c| *c == current)
        .unwrap_or(IngredientCategory::ALL.len() - 1);
    let selection = Select::new()
        .with_prompt("Category")
        .items(&labels)
        .default(default)
        .interact()?;
    Ok(IngredientCategory::ALL[selection])
}

/// Collect a new ingredient from the terminal.
pub fn prompt_new_ingredient() -> Result<NewIngredient> {
    let name: String = Input::new().with_prompt("Ingredient name").interact_text()?;
    let category = prompt_category(IngredientCategory::default())?;
    let purchase_unit = prompt_unit("Purchase unit", None)?;
    let price_per_unit = prompt_number(&format!("Price per {}", purchase_unit), None)?;
    let purchase_quantity = prompt_number(
        &format!("Quantity purchased ({})", purchase_unit),
        Some("1"),
    )?;
    let yield_percentage = prompt_number("Yield percentage (usable after prep)", Some("100"))?;
    let notes = prompt_optional_text("Notes (optional)")?;

    let input = NewIngredient {
        name,
        category,
        price_per_unit,
        purchase_unit,
        purchase_quantity,
        yield_percentage,
        notes,
    };
    input.validate()?;
    Ok(input)
}

/// Edit an ingredient; every prompt defaults to the stored value.
///
/// The purchase unit stays within its family so existing recipe lines keep
/// converting.
pub fn prompt_edit_ingredient(current: &Ingredient) -> Result<IngredientPatch> {
    let name: String = Input::new()
        .with_prompt("Ingredient name")
        .default(current.name.clone())
        .interact_text()?;
    let category = prompt_category(current.category)?;
    let purchase_unit = prompt_unit("Purchase unit", Some(current.purchase_unit))?;
    let price_per_unit = prompt_number(
        &format!("Price per {}", purchase_unit),
        Some(current.price_per_unit.to_string().as_str()),
    )?;
    let purchase_quantity = prompt_number(
        &format!("Quantity purchased ({})", purchase_unit),
        Some(current.purchase_quantity.to_string().as_str()),
    )?;
    let yield_percentage = prompt_number(
        "Yield percentage (usable after prep)",
        Some(current.yield_percentage.to_string().as_str()),
    )?;
    let notes = prompt_optional_text_with("Notes (optional)", current.notes.as_deref())?;

    Ok(IngredientPatch {
        name: Some(name),
        category: Some(category),
        price_per_unit: Some(price_per_unit),
        purchase_unit: Some(purchase_unit),
        purchase_quantity: Some(purchase_quantity),
        yield_percentage: Some(yield_percentage),
        // Empty clears the stored notes.
        notes: Some(notes.unwrap_or_default()),
    })
}

/// Ingredients ranked by name similarity to `query`, best first.
pub fn fuzzy_matches<'a>(ingredients: &[&'a Ingredient], query: &str) -> Vec<&'a Ingredient> {
    let query = query.trim().to_lowercase();
    let mut candidates: Vec<(&Ingredient, f64)> = ingredients
        .iter()
        .map(|i| (*i, jaro_winkler(&i.key(), &query)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.into_iter().map(|(i, _)| i).collect()
}

/// Ask for an ingredient by name. `None` when the user gives up on this line.
pub fn prompt_ingredient<'a>(ingredients: &[&'a Ingredient]) -> Result<Option<&'a Ingredient>> {
    loop {
        let input: String = Input::new()
            .with_prompt("Ingredient (or press Enter to finish)")
            .allow_empty(true)
            .interact_text()?;

        let input = input.trim();
        if input.is_empty() {
            return Ok(None);
        }

        // Exact match first (case-insensitive)
        let needle = input.to_lowercase();
        if let Some(ingredient) = ingredients.iter().find(|i| i.key() == needle) {
            return Ok(Some(*ingredient));
        }

        let candidates = fuzzy_matches(ingredients, input);

        if candidates.is_empty() {
            println!("No matching ingredient found for '{}'", input);
            continue;
        }

        if candidates.len() == 1 {
            let ingredient = candidates[0];
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", ingredient.name))
                .default(true)
                .interact()?;
            if confirm {
                return Ok(Some(ingredient));
            }
            continue;
        }

        let options: Vec<&Ingredient> = candidates.into_iter().take(5).collect();
        let mut labels: Vec<String> = options.iter().map(|i| i.name.clone()).collect();
        labels.push("None of these".to_string());

        let selection = Select::new()
            .with_prompt("Which did you mean?")
            .items(&labels)
            .default(0)
            .interact()?;

        if selection < options.len() {
            return Ok(Some(options[selection]));
        }
    }
}

/// Collect a new recipe from the terminal.
pub fn prompt_new_recipe(ingredients: &[&Ingredient]) -> Result<NewRecipe> {
    if ingredients.is_empty() {
        return Err(AppError::InvalidInput(
            "Add ingredients before creating a recipe".to_string(),
        ));
    }

    let name: String = Input::new().with_prompt("Recipe name").interact_text()?;
    let description = prompt_optional_text("Description (optional)")?;

    let items = prompt_recipe_items(ingredients)?;
    let servings = prompt_servings("1")?;
    let sale_price = prompt_number("Sale price (0 if not set)", Some("0"))?;
    let notes = prompt_optional_text("Notes (optional)")?;

    let input = NewRecipe {
        name,
        description,
        items,
        servings,
        sale_price: Some(sale_price),
        notes,
    };
    input.validate()?;
    Ok(input)
}

/// Edit a recipe; prompts default to the stored values. Ingredient lines are
/// re-entered only when the user chooses to replace them.
pub fn prompt_edit_recipe(current: &Recipe, ingredients: &[&Ingredient]) -> Result<RecipePatch> {
    let name: String = Input::new()
        .with_prompt("Recipe name")
        .default(current.name.clone())
        .interact_text()?;
    let description =
        prompt_optional_text_with("Description (optional)", current.description.as_deref())?;

    let replace = prompt_yes_no(
        &format!("Replace the {} ingredient line(s)?", current.items.len()),
        false,
    )?;
    let items = if replace {
        if ingredients.is_empty() {
            return Err(AppError::InvalidInput(
                "Add ingredients before editing recipe lines".to_string(),
            ));
        }
        Some(prompt_recipe_items(ingredients)?)
    } else {
        None
    };

    let servings = prompt_servings(&current.servings.to_string())?;
    let sale_price = prompt_number(
        "Sale price (0 if not set)",
        Some(current.sale_price.to_string().as_str()),
    )?;
    let notes = prompt_optional_text_with("Notes (optional)", current.notes.as_deref())?;

    Ok(RecipePatch {
        name: Some(name),
        description: Some(description.unwrap_or_default()),
        items,
        servings: Some(servings),
        sale_price: Some(sale_price),
        notes: Some(notes.unwrap_or_default()),
    })
}

/// Ingredient lines until the user presses Enter on an empty name.
fn prompt_recipe_items(ingredients: &[&Ingredient]) -> Result<Vec<NewRecipeItem>> {
    let mut items = Vec::new();
    while let Some(ingredient) = prompt_ingredient(ingredients)? {
        let used_unit = prompt_unit(
            &format!("Unit for {}", ingredient.name),
            Some(ingredient.purchase_unit),
        )?;
        let used_quantity = prompt_number(&format!("Quantity ({})", used_unit), None)?;
        items.push(NewRecipeItem {
            ingredient_id: ingredient.id.clone(),
            used_quantity,
            used_unit,
            notes: None,
        });
        println!("Added: {} {} {}", used_quantity, used_unit, ingredient.name);
    }
    Ok(items)
}

fn prompt_servings(default: &str) -> Result<u32> {
    let servings = prompt_number("Servings", Some(default))?;
    if servings.fract() != 0.0 || servings < 1.0 || servings > u32::MAX as f64 {
        return Err(AppError::InvalidInput(
            "Servings must be a whole number greater than 0".to_string(),
        ));
    }
    Ok(servings as u32)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
