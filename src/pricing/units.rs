//! Canonical units and measurement families

use serde::{Deserialize, Serialize};

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Milliliters per liter
pub const ML_PER_LITER: f64 = 1000.0;

/// Metric unit used for consolidation math and prices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CanonicalUnit {
    #[serde(rename = "g", alias = "gram", alias = "grams")]
    Gram,
    #[serde(rename = "kg", alias = "kilogram", alias = "kilograms")]
    Kilogram,
    #[serde(rename = "ml", alias = "milliliter", alias = "milliliters")]
    Milliliter,
    #[serde(rename = "l", alias = "liter", alias = "liters")]
    Liter,
    /// Discrete items (eggs, cans)
    #[serde(rename = "unidades", alias = "unit", alias = "units", alias = "count")]
    Unit,
}

/// Group of mutually convertible units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementFamily {
    Mass,
    Volume,
    Count,
}

impl MeasurementFamily {
    /// The unit every member of the family is normalized to
    pub fn smallest_unit(&self) -> CanonicalUnit {
        match self {
            MeasurementFamily::Mass => CanonicalUnit::Gram,
            MeasurementFamily::Volume => CanonicalUnit::Milliliter,
            MeasurementFamily::Count => CanonicalUnit::Unit,
        }
    }
}

impl CanonicalUnit {
    pub const ALL: [CanonicalUnit; 5] = [
        CanonicalUnit::Gram,
        CanonicalUnit::Kilogram,
        CanonicalUnit::Milliliter,
        CanonicalUnit::Liter,
        CanonicalUnit::Unit,
    ];

    /// Label used in catalogs, storage and display
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalUnit::Gram => "g",
            CanonicalUnit::Kilogram => "kg",
            CanonicalUnit::Milliliter => "ml",
            CanonicalUnit::Liter => "l",
            CanonicalUnit::Unit => "unidades",
        }
    }

    /// Parse from string
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Some(CanonicalUnit::Gram),
            "kg" | "kilogram" | "kilograms" => Some(CanonicalUnit::Kilogram),
            "ml" | "milliliter" | "milliliters" => Some(CanonicalUnit::Milliliter),
            "l" | "liter" | "liters" => Some(CanonicalUnit::Liter),
            "unidades" | "unidad" | "unit" | "units" | "count" => Some(CanonicalUnit::Unit),
            _ => None,
        }
    }

    pub fn family(&self) -> MeasurementFamily {
        match self {
            CanonicalUnit::Gram | CanonicalUnit::Kilogram => MeasurementFamily::Mass,
            CanonicalUnit::Milliliter | CanonicalUnit::Liter => MeasurementFamily::Volume,
            CanonicalUnit::Unit => MeasurementFamily::Count,
        }
    }

    /// How many of the family's smallest unit one of this unit holds
    pub fn factor_to_smallest(&self) -> f64 {
        match self {
            CanonicalUnit::Kilogram => G_PER_KG,
            CanonicalUnit::Liter => ML_PER_LITER,
            CanonicalUnit::Gram | CanonicalUnit::Milliliter | CanonicalUnit::Unit => 1.0,
        }
    }
}

impl std::fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Same measurement family, regardless of the specific unit
pub fn are_compatible(a: CanonicalUnit, b: CanonicalUnit) -> bool {
    a.family() == b.family()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_families() {
        assert_eq!(CanonicalUnit::Gram.family(), MeasurementFamily::Mass);
        assert_eq!(CanonicalUnit::Kilogram.family(), MeasurementFamily::Mass);
        assert_eq!(CanonicalUnit::Milliliter.family(), MeasurementFamily::Volume);
        assert_eq!(CanonicalUnit::Liter.family(), MeasurementFamily::Volume);
        assert_eq!(CanonicalUnit::Unit.family(), MeasurementFamily::Count);
    }

    #[test]
    fn test_compatibility_is_by_family() {
        assert!(are_compatible(CanonicalUnit::Gram, CanonicalUnit::Kilogram));
        assert!(are_compatible(CanonicalUnit::Liter, CanonicalUnit::Milliliter));
        assert!(are_compatible(CanonicalUnit::Unit, CanonicalUnit::Unit));
        assert!(!are_compatible(CanonicalUnit::Gram, CanonicalUnit::Liter));
        assert!(!are_compatible(CanonicalUnit::Unit, CanonicalUnit::Gram));
    }

    #[test]
    fn test_from_str_round_trips_labels() {
        for unit in CanonicalUnit::ALL {
            assert_eq!(CanonicalUnit::from_str(unit.as_str()), Some(unit));
        }
        assert_eq!(CanonicalUnit::from_str(" KG "), Some(CanonicalUnit::Kilogram));
        assert_eq!(CanonicalUnit::from_str("taza"), None);
    }

    #[test]
    fn test_catalog_labels_deserialize() {
        let unit: CanonicalUnit = serde_json::from_str("\"unidades\"").unwrap();
        assert_eq!(unit, CanonicalUnit::Unit);
        assert!(serde_json::from_str::<CanonicalUnit>("\"taza\"").is_err());
    }

    #[test]
    fn test_smallest_unit() {
        for unit in CanonicalUnit::ALL {
            assert_eq!(unit.family().smallest_unit().factor_to_smallest(), 1.0);
        }
    }
}
