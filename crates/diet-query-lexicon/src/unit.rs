//! Measurement units attached to numeric constraints.

use std::fmt;
use std::str::FromStr;

use crate::NutrientScale;

/// Unit written next to a number in a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    /// Grams.
    Gram,
    /// Milligrams.
    Milligram,
    /// Micrograms.
    Microgram,
    /// Kilocalories.
    Kilocalorie,
    /// Percent (of daily value or of weight); never converted.
    Percent,
}

impl Unit {
    /// Canonical short spelling.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gram => "g",
            Self::Milligram => "mg",
            Self::Microgram => "mcg",
            Self::Kilocalorie => "kcal",
            Self::Percent => "%",
        }
    }

    /// Micrograms per unit for mass units.
    const fn micrograms(self) -> Option<f64> {
        match self {
            Self::Gram => Some(1_000_000.0),
            Self::Milligram => Some(1_000.0),
            Self::Microgram => Some(1.0),
            Self::Kilocalorie | Self::Percent => None,
        }
    }

    /// Convert `value` expressed in this unit into the storage unit of
    /// `scale`.
    ///
    /// Returns `value` unchanged when either side is not a mass unit.
    ///
    /// # Examples
    /// ```
    /// use diet_query_lexicon::{NutrientScale, Unit};
    /// assert_eq!(Unit::Gram.convert(2.0, NutrientScale::Milligram), 2000.0);
    /// assert_eq!(Unit::Percent.convert(5.0, NutrientScale::Gram), 5.0);
    /// ```
    #[must_use]
    pub fn convert(self, value: f64, scale: NutrientScale) -> f64 {
        let target = match scale {
            NutrientScale::Gram => Self::Gram,
            NutrientScale::Milligram => Self::Milligram,
            NutrientScale::Microgram => Self::Microgram,
            NutrientScale::Energy => return value,
        };
        match (self.micrograms(), target.micrograms()) {
            (Some(from), Some(to)) => value * from / to,
            _ => value,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a [`Unit`] from a string fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParseError(pub String);

impl fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid unit: {}", self.0)
    }
}

impl std::error::Error for UnitParseError {}

impl FromStr for Unit {
    type Err = UnitParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "g" | "gr" | "gram" | "grams" => Ok(Self::Gram),
            "mg" | "milligram" | "milligrams" => Ok(Self::Milligram),
            "mcg" | "ug" | "µg" | "microgram" | "micrograms" => Ok(Self::Microgram),
            "kcal" | "cal" | "cals" | "calorie" | "calories" => Ok(Self::Kilocalorie),
            "%" | "percent" | "_percent" | "pct" => Ok(Self::Percent),
            other => Err(UnitParseError(other.to_owned())),
        }
    }
}
