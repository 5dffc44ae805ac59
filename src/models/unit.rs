use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Measurement family a unit belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Weight,
    Volume,
    Quantity,
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UnitType::Weight => "weight",
            UnitType::Volume => "volume",
            UnitType::Quantity => "quantity",
        };
        f.pad(name)
    }
}

/// A measurement unit. Metric weight and volume, plus piece counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Kg,
    G,
    L,
    Ml,
    Pcs,
}

/// Display and conversion attributes of a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitMetadata {
    pub unit: Unit,
    pub unit_type: UnitType,
    pub label: &'static str,
    /// Multiplier from this unit into its family's base unit.
    pub conversion_factor: f64,
}

static UNIT_METADATA: [UnitMetadata; 5] = [
    UnitMetadata {
        unit: Unit::Kg,
        unit_type: UnitType::Weight,
        label: "Kilogram",
        conversion_factor: 1.0,
    },
    UnitMetadata {
        unit: Unit::G,
        unit_type: UnitType::Weight,
        label: "Gram",
        conversion_factor: 0.001,
    },
    UnitMetadata {
        unit: Unit::L,
        unit_type: UnitType::Volume,
        label: "Liter",
        conversion_factor: 1.0,
    },
    UnitMetadata {
        unit: Unit::Ml,
        unit_type: UnitType::Volume,
        label: "Milliliter",
        conversion_factor: 0.001,
    },
    UnitMetadata {
        unit: Unit::Pcs,
        unit_type: UnitType::Quantity,
        label: "Pieces",
        conversion_factor: 1.0,
    },
];

impl Unit {
    pub const ALL: [Unit; 5] = [Unit::Kg, Unit::G, Unit::L, Unit::Ml, Unit::Pcs];

    /// Metadata row for this unit.
    pub fn metadata(self) -> &'static UnitMetadata {
        let index = match self {
            Unit::Kg => 0,
            Unit::G => 1,
            Unit::L => 2,
            Unit::Ml => 3,
            Unit::Pcs => 4,
        };
        &UNIT_METADATA[index]
    }

    #[inline]
    pub fn unit_type(self) -> UnitType {
        self.metadata().unit_type
    }

    #[inline]
    pub fn conversion_factor(self) -> f64 {
        self.metadata().conversion_factor
    }

    #[inline]
    pub fn label(self) -> &'static str {
        self.metadata().label
    }

    /// Short symbol, as stored and typed by users.
    pub fn symbol(self) -> &'static str {
        match self {
            Unit::Kg => "kg",
            Unit::G => "g",
            Unit::L => "l",
            Unit::Ml => "ml",
            Unit::Pcs => "pcs",
        }
    }

    /// True when both units measure the same family.
    #[inline]
    pub fn is_compatible_with(self, other: Unit) -> bool {
        self.unit_type() == other.unit_type()
    }

    /// Reference unit of a family (factor 1).
    pub fn base_unit(unit_type: UnitType) -> Unit {
        match unit_type {
            UnitType::Weight => Unit::Kg,
            UnitType::Volume => Unit::L,
            UnitType::Quantity => Unit::Pcs,
        }
    }

    /// All units of one family, in table order.
    pub fn units_of(unit_type: UnitType) -> Vec<Unit> {
        Unit::ALL
            .into_iter()
            .filter(|u| u.unit_type() == unit_type)
            .collect()
    }
}

/// Free-function form of [`Unit::is_compatible_with`].
pub fn are_compatible(a: Unit, b: Unit) -> bool {
    a.is_compatible_with(b)
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Unit::ALL
            .into_iter()
            .find(|u| u.symbol() == needle)
            .ok_or_else(|| format!("unknown unit '{}' (expected kg, g, l, ml or pcs)", s.trim()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_units_have_factor_one() {
        for unit_type in [UnitType::Weight, UnitType::Volume, UnitType::Quantity] {
            let base = Unit::base_unit(unit_type);
            assert_eq!(base.conversion_factor(), 1.0);
            assert_eq!(base.unit_type(), unit_type);
        }
    }

    #[test]
    fn test_metadata_matches_unit() {
        for unit in Unit::ALL {
            assert_eq!(unit.metadata().unit, unit);
        }
        assert_eq!(Unit::G.conversion_factor(), 0.001);
        assert_eq!(Unit::Ml.label(), "Milliliter");
    }

    #[test]
    fn test_compatibility() {
        assert!(are_compatible(Unit::Kg, Unit::G));
        assert!(are_compatible(Unit::Ml, Unit::L));
        assert!(are_compatible(Unit::Pcs, Unit::Pcs));
        assert!(!are_compatible(Unit::Kg, Unit::L));
        assert!(!Unit::Ml.is_compatible_with(Unit::Pcs));
    }

    #[test]
    fn test_units_of_family() {
        assert_eq!(Unit::units_of(UnitType::Weight), vec![Unit::Kg, Unit::G]);
        assert_eq!(Unit::units_of(UnitType::Quantity), vec![Unit::Pcs]);
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(" KG ".parse::<Unit>().unwrap(), Unit::Kg);
        assert_eq!("ml".parse::<Unit>().unwrap(), Unit::Ml);
        assert!("cup".parse::<Unit>().is_err());
        assert_eq!(Unit::Pcs.to_string(), "pcs");
    }

    #[test]
    fn test_serde_uses_symbols() {
        let json = serde_json::to_string(&Unit::Ml).unwrap();
        assert_eq!(json, "\"ml\"");
        let back: Unit = serde_json::from_str("\"pcs\"").unwrap();
        assert_eq!(back, Unit::Pcs);
        assert_eq!(serde_json::to_string(&UnitType::Quantity).unwrap(), "\"quantity\"");
    }
}
