use crate::error::CalcError;
use crate::models::Unit;

/// Convert a quantity between two units of the same family.
///
/// Same-unit conversion returns the input untouched, so no float drift.
pub fn convert_quantity(quantity: f64, from: Unit, to: Unit) -> Result<f64, CalcError> {
    if !from.is_compatible_with(to) {
        return Err(CalcError::incompatible(from, to));
    }

    if from == to {
        return Ok(quantity);
    }

    let base = to_base_unit(quantity, from);
    Ok(from_base_unit(base, to))
}

/// Express a quantity in its family's base unit (kg, l, pcs).
#[inline]
pub fn to_base_unit(quantity: f64, unit: Unit) -> f64 {
    quantity * unit.conversion_factor()
}

/// Express a base-unit quantity in `unit`.
#[inline]
pub fn from_base_unit(quantity_in_base: f64, unit: Unit) -> f64 {
    quantity_in_base / unit.conversion_factor()
}
