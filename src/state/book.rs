use crate::calculator::{self, IngredientLookup, RecipeCostBreakdown, RecipeSummary};
use crate::error::{AppError, Result};
use crate::models::{
    Ingredient, IngredientPatch, NewIngredient, NewRecipe, Recipe, RecipePatch,
};
use crate::state::repository::{MemoryRepository, Repository};

/// Exposes an ingredient repository to the calculation engine.
struct RepoLookup<'a, I>(&'a I);

impl<I: Repository<Ingredient>> IngredientLookup for RepoLookup<'_, I> {
    fn find(&self, id: &str) -> Option<&Ingredient> {
        self.0.get(id)
    }
}

/// Ingredients and recipes, with recipe cost figures kept in sync.
pub struct CostBook<I = MemoryRepository<Ingredient>, R = MemoryRepository<Recipe>> {
    ingredients: I,
    recipes: R,
}

impl Default for CostBook {
    fn default() -> Self {
        Self::in_memory()
    }
}

impl CostBook {
    pub fn in_memory() -> Self {
        Self::new(MemoryRepository::default(), MemoryRepository::default())
    }

    /// In-memory book from loaded records. Stored cost figures are trusted as-is.
    pub fn from_records(ingredients: Vec<Ingredient>, recipes: Vec<Recipe>) -> Self {
        Self::new(MemoryRepository::new(ingredients), MemoryRepository::new(recipes))
    }
}

impl<I, R> CostBook<I, R>
where
    I: Repository<Ingredient>,
    R: Repository<Recipe>,
{
    pub fn new(ingredients: I, recipes: R) -> Self {
        Self {
            ingredients,
            recipes,
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Ingredients
    // ─────────────────────────────────────────────────────────────────────

    /// All ingredients sorted by name.
    pub fn ingredients(&self) -> Vec<&Ingredient> {
        let mut list = self.ingredients.list();
        list.sort_by_key(|i| i.key());
        list
    }

    pub fn get_ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.get(id)
    }

    /// Look up by id, then by case-insensitive name.
    pub fn find_ingredient(&self, query: &str) -> Option<&Ingredient> {
        let query = query.trim();
        self.ingredients.get(query).or_else(|| {
            let needle = query.to_lowercase();
            self.ingredients.list().into_iter().find(|i| i.key() == needle)
        })
    }

    pub fn add_ingredient(&mut self, input: NewIngredient) -> Result<&Ingredient> {
        let ingredient = Ingredient::create(input)?;
        let id = ingredient.id.clone();
        tracing::debug!(id = %id, name = %ingredient.name, "adding ingredient");
        self.ingredients.upsert(ingredient);
        self.ingredients
            .get(&id)
            .ok_or(AppError::IngredientNotFound(id))
    }

    /// Apply a patch and re-price every recipe using the ingredient.
    ///
    /// If a dependent recipe can no longer be priced (e.g. the purchase unit
    /// changed family), the ingredient is restored and the error returned.
    /// Returns the number of recipes re-priced.
    pub fn update_ingredient(&mut self, id: &str, patch: IngredientPatch) -> Result<usize> {
        let ingredient = self
            .ingredients
            .get_mut(id)
            .ok_or_else(|| AppError::IngredientNotFound(id.to_string()))?;
        let previous = ingredient.clone();
        ingredient.apply(patch)?;

        match self.reprice_dependents(id) {
            Ok(count) => Ok(count),
            Err(e) => {
                self.ingredients.upsert(previous);
                self.reprice_dependents(id)?;
                Err(e)
            }
        }
    }

    /// Remove an ingredient. Recipes using it are re-priced without it.
    pub fn remove_ingredient(&mut self, id: &str) -> Result<Ingredient> {
        let removed = self
            .ingredients
            .delete(id)
            .ok_or_else(|| AppError::IngredientNotFound(id.to_string()))?;
        self.reprice_dependents(id)?;
        Ok(removed)
    }

    /// Drop every ingredient and re-price all recipes, which then carry only
    /// missing lines. Returns how many recipes were re-priced.
    pub fn clear_ingredients(&mut self) -> Result<usize> {
        self.ingredients.clear();
        self.recalculate_all()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Recipes
    // ─────────────────────────────────────────────────────────────────────

    /// All recipes sorted by name.
    pub fn recipes(&self) -> Vec<&Recipe> {
        let mut list = self.recipes.list();
        list.sort_by_key(|r| r.key());
        list
    }

    pub fn get_recipe(&self, id: &str) -> Option<&Recipe> {
        self.recipes.get(id)
    }

    /// Look up by id, then by case-insensitive name.
    pub fn find_recipe(&self, query: &str) -> Option<&Recipe> {
        let query = query.trim();
        self.recipes.get(query).or_else(|| {
            let needle = query.to_lowercase();
            self.recipes.list().into_iter().find(|r| r.key() == needle)
        })
    }

    /// Store a new recipe with its total cost and food cost percentage filled in.
    pub fn add_recipe(&mut self, input: NewRecipe) -> Result<&Recipe> {
        let mut recipe = Recipe::create(input)?;
        price_recipe(&self.ingredients, &mut recipe)?;

        let id = recipe.id.clone();
        tracing::debug!(id = %id, name = %recipe.name, total = recipe.total_cost, "adding recipe");
        self.recipes.upsert(recipe);
        self.recipes.get(&id).ok_or(AppError::RecipeNotFound(id))
    }

    /// Apply a patch and re-price. Nothing changes if pricing fails.
    pub fn update_recipe(&mut self, id: &str, patch: RecipePatch) -> Result<&Recipe> {
        let mut recipe = self
            .recipes
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))?;
        recipe.apply(patch)?;
        price_recipe(&self.ingredients, &mut recipe)?;

        self.recipes.upsert(recipe);
        self.recipes
            .get(id)
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))
    }

    pub fn remove_recipe(&mut self, id: &str) -> Result<Recipe> {
        self.recipes
            .delete(id)
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))
    }

    pub fn clear_recipes(&mut self) {
        self.recipes.clear();
    }

    /// Recompute and store one recipe's cost figures.
    pub fn recalculate_recipe(&mut self, id: &str) -> Result<RecipeCostBreakdown> {
        let recipe = self
            .recipes
            .get_mut(id)
            .ok_or_else(|| AppError::RecipeNotFound(id.to_string()))?;
        price_recipe(&self.ingredients, recipe)
    }

    /// Recompute every recipe. Returns how many were re-priced.
    pub fn recalculate_all(&mut self) -> Result<usize> {
        let ids: Vec<String> = self.recipes.list().iter().map(|r| r.id.clone()).collect();
        for id in &ids {
            self.recalculate_recipe(id)?;
        }
        tracing::debug!(count = ids.len(), "recalculated recipes");
        Ok(ids.len())
    }

    /// Line-by-line cost of a stored recipe against current prices.
    pub fn breakdown(&self, recipe_id: &str) -> Result<RecipeCostBreakdown> {
        let recipe = self
            .recipes
            .get(recipe_id)
            .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?;
        let breakdown = calculator::recipe_cost_breakdown(&recipe.items, &RepoLookup(&self.ingredients))?;
        warn_missing(recipe, &breakdown);
        Ok(breakdown)
    }

    /// Profitability of a stored recipe against current prices.
    pub fn summary(&self, recipe_id: &str) -> Result<RecipeSummary> {
        let breakdown = self.breakdown(recipe_id)?;
        let recipe = self
            .recipes
            .get(recipe_id)
            .ok_or_else(|| AppError::RecipeNotFound(recipe_id.to_string()))?;
        Ok(RecipeSummary::compute(
            breakdown.total_cost,
            recipe.sale_price,
            recipe.servings,
        ))
    }

    /// Ingredients cloned for serialization.
    pub fn to_ingredients(&self) -> Vec<Ingredient> {
        self.ingredients().into_iter().cloned().collect()
    }

    /// Recipes cloned for serialization.
    pub fn to_recipes(&self) -> Vec<Recipe> {
        self.recipes().into_iter().cloned().collect()
    }

    fn reprice_dependents(&mut self, ingredient_id: &str) -> Result<usize> {
        let ids: Vec<String> = self
            .recipes
            .list()
            .iter()
            .filter(|r| r.uses_ingredient(ingredient_id))
            .map(|r| r.id.clone())
            .collect();
        for id in &ids {
            self.recalculate_recipe(id)?;
        }
        Ok(ids.len())
    }
}

/// Fill in `total_cost` and `food_cost_percentage` from current prices.
fn price_recipe<I: Repository<Ingredient>>(
    ingredients: &I,
    recipe: &mut Recipe,
) -> Result<RecipeCostBreakdown> {
    let breakdown = calculator::recipe_cost_breakdown(&recipe.items, &RepoLookup(ingredients))?;
    warn_missing(recipe, &breakdown);

    recipe.total_cost = breakdown.total_cost;
    recipe.food_cost_percentage =
        calculator::food_cost_percentage(breakdown.total_cost, recipe.sale_price);
    Ok(breakdown)
}

fn warn_missing(recipe: &Recipe, breakdown: &RecipeCostBreakdown) {
    for ingredient_id in &breakdown.missing {
        tracing::warn!(
            recipe = %recipe.name,
            ingredient_id = %ingredient_id,
            "Ingredient not found for recipe item; counted as zero cost"
        );
    }
}
