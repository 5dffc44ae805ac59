// ─────────────────────────────────────────────────────────────────────────────
// Food cost percentage bands (restaurant industry rule of thumb)
// ─────────────────────────────────────────────────────────────────────────────

/// Below this, food cost is suspiciously low (pricing may be off).
pub const FOOD_COST_VERY_LOW: f64 = 25.0;

/// Lower bound of the ideal range for most restaurants.
pub const FOOD_COST_IDEAL_MIN: f64 = 28.0;

/// Upper bound of the ideal range.
pub const FOOD_COST_IDEAL_MAX: f64 = 35.0;

/// Above this, the dish needs a price increase or cost reduction.
pub const FOOD_COST_HIGH: f64 = 40.0;

/// Yield percentages are expressed out of this.
pub const FULL_YIELD: f64 = 100.0;
