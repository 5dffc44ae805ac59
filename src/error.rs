use thiserror::Error;

use crate::models::{Unit, UnitType};

/// Failures raised by the cost calculation engine.
///
/// All of these are local input problems; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error(
        "Cannot convert between incompatible units: {from} ({from_type}) and {to} ({to_type})"
    )]
    IncompatibleUnits {
        from: Unit,
        from_type: UnitType,
        to: Unit,
        to_type: UnitType,
    },

    #[error("Yield percentage must be between 0 and 100, got {0}")]
    InvalidYield(f64),

    #[error("Quantities must be greater than 0")]
    InvalidQuantity,

    #[error("Price cannot be negative, got {0}")]
    NegativePrice(f64),
}

impl CalcError {
    pub(crate) fn incompatible(from: Unit, to: Unit) -> Self {
        CalcError::IncompatibleUnits {
            from,
            from_type: from.unit_type(),
            to,
            to_type: to.unit_type(),
        }
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Calc(#[from] CalcError),

    #[error("Ingredient not found: {0}")]
    IngredientNotFound(String),

    #[error("Recipe not found: {0}")]
    RecipeNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, AppError>;
