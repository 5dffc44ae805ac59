pub mod format;
pub mod prompts;
pub mod render;

pub use format::{
    format_currency, format_currency_whole, format_number, format_percentage,
    format_quantity_short,
};
pub use prompts::{
    fuzzy_matches, prompt_category, prompt_edit_ingredient, prompt_edit_recipe, prompt_ingredient,
    prompt_new_ingredient, prompt_new_recipe, prompt_unit, prompt_yes_no,
};
pub use render::{
    display_conversion, display_ingredient_list, display_recipe_list, display_recipe_summary,
};
