//! Identifier newtypes and nutrient metadata.

use derive_more::{Deref, From};
use std::fmt;

/// Canonical identifier of a nutrient, e.g. `vitamin_c` or `sodium`.
///
/// # Examples
/// ```
/// use diet_query_lexicon::NutrientId;
/// let id = NutrientId::from("sodium");
/// assert_eq!(id.as_str(), "sodium");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct NutrientId(String);

impl NutrientId {
    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NutrientId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for NutrientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Canonical identifier of an allergen, e.g. `peanut`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Deref, From)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct AllergenId(String);

impl AllergenId {
    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AllergenId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for AllergenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Magnitude class of a nutrient as stored in a food catalog.
///
/// The scale decides how a textual negation such as "no sugar" is turned
/// into a numeric bound: a food database rarely holds an exact zero, so the
/// bound is a small scale-dependent amount instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub enum NutrientScale {
    /// Macronutrients measured in grams (protein, fat, sugar).
    Gram,
    /// Minerals and sodium measured in milligrams.
    Milligram,
    /// Vitamins measured in micrograms.
    Microgram,
    /// Energy measured in kilocalories.
    Energy,
}

impl NutrientScale {
    /// Amount treated as "effectively none" on this scale.
    ///
    /// # Examples
    /// ```
    /// use diet_query_lexicon::NutrientScale;
    /// assert_eq!(NutrientScale::Gram.soft_zero(), 0.5);
    /// assert_eq!(NutrientScale::Milligram.soft_zero(), 5.0);
    /// ```
    #[must_use]
    pub const fn soft_zero(self) -> f64 {
        match self {
            Self::Gram => 0.5,
            Self::Milligram | Self::Energy => 5.0,
            Self::Microgram => 50.0,
        }
    }
}

/// A nutrient known to the lexicon.
#[derive(Debug, Clone, PartialEq)]
pub struct Nutrient {
    /// Canonical identifier.
    pub id: NutrientId,
    /// Storage scale used for soft-zero thresholds and unit conversion.
    pub scale: NutrientScale,
}

impl Nutrient {
    /// Create a nutrient entry.
    #[must_use]
    pub fn new(id: impl Into<NutrientId>, scale: NutrientScale) -> Self {
        Self {
            id: id.into(),
            scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_display_their_text() {
        assert_eq!(NutrientId::from("vitamin_c").to_string(), "vitamin_c");
        assert_eq!(AllergenId::from("peanut").to_string(), "peanut");
    }

    #[test]
    fn ids_deref_to_string() {
        let id = NutrientId::from("fat");
        assert_eq!(id.len(), 3);
    }

    #[test]
    fn microgram_scale_has_widest_soft_zero() {
        assert!(NutrientScale::Microgram.soft_zero() > NutrientScale::Milligram.soft_zero());
        assert!(NutrientScale::Milligram.soft_zero() > NutrientScale::Gram.soft_zero());
    }
}
