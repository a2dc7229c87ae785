//! Resolved scoring and filtering rules.

use std::fmt;

use diet_query_lexicon::NutrientId;

use crate::constraint::ComparisonOperator;

/// Rule applied to one nutrient, or to pH, by the food catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "kind", content = "value", rename_all = "camelCase")
)]
pub enum ConstraintValue {
    /// Prefer more, no hard cutoff.
    High,
    /// Prefer less, no hard cutoff.
    Low,
    /// Inclusive lower bound.
    Min(f64),
    /// Inclusive upper bound.
    Max(f64),
    /// Exclusive lower bound.
    StrictMin(f64),
    /// Exclusive upper bound.
    StrictMax(f64),
    /// Inclusive range.
    Range(f64, f64),
    /// Anything but this value.
    NotEqual(f64),
    /// Sort ascending over the whole domain.
    Lowest,
    /// Sort descending over the whole domain.
    Highest,
}

impl ConstraintValue {
    /// Whether a catalog value passes the hard part of this rule.
    ///
    /// Qualitative rules only bias ranking, so they admit every value.
    ///
    /// # Examples
    /// ```
    /// use diet_query::ConstraintValue;
    /// assert!(ConstraintValue::Range(5.0, 10.0).admits(10.0));
    /// assert!(!ConstraintValue::StrictMax(0.5).admits(0.5));
    /// assert!(ConstraintValue::High.admits(0.0));
    /// ```
    #[must_use]
    pub fn admits(self, value: f64) -> bool {
        match self {
            Self::High | Self::Low | Self::Lowest | Self::Highest => true,
            Self::Min(min) => value >= min,
            Self::Max(max) => value <= max,
            Self::StrictMin(min) => value > min,
            Self::StrictMax(max) => value < max,
            Self::Range(low, high) => value >= low && value <= high,
            Self::NotEqual(other) => (value - other).abs() > f64::EPSILON,
        }
    }

    /// Rule for a numeric comparison, `value2` closing a range.
    ///
    /// `>=` with a second value and `=` become ranges. Returns `None` for
    /// [`ComparisonOperator::Unknown`].
    ///
    /// # Examples
    /// ```
    /// use diet_query::{ComparisonOperator, ConstraintValue};
    /// assert_eq!(
    ///     ConstraintValue::from_comparison(ComparisonOperator::GreaterThanOrEqual, 5.0, Some(10.0)),
    ///     Some(ConstraintValue::Range(5.0, 10.0))
    /// );
    /// assert_eq!(
    ///     ConstraintValue::from_comparison(ComparisonOperator::LessThan, 5.0, None),
    ///     Some(ConstraintValue::StrictMax(5.0))
    /// );
    /// ```
    #[must_use]
    pub fn from_comparison(op: ComparisonOperator, value: f64, value2: Option<f64>) -> Option<Self> {
        Some(match op {
            ComparisonOperator::GreaterThan => Self::StrictMin(value),
            ComparisonOperator::GreaterThanOrEqual => {
                value2.map_or(Self::Min(value), |high| Self::Range(value, high))
            }
            ComparisonOperator::LessThan => Self::StrictMax(value),
            ComparisonOperator::LessThanOrEqual => Self::Max(value),
            ComparisonOperator::Equal => Self::Range(value, value2.unwrap_or(value)),
            ComparisonOperator::NotEqual => Self::NotEqual(value),
            ComparisonOperator::Unknown => return None,
        })
    }

    /// Whether the rule excludes values rather than only ranking them.
    #[must_use]
    pub const fn is_bound(self) -> bool {
        !matches!(self, Self::High | Self::Low | Self::Lowest | Self::Highest)
    }
}

impl fmt::Display for ConstraintValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => f.write_str("high"),
            Self::Low => f.write_str("low"),
            Self::Min(v) => write!(f, ">= {v}"),
            Self::Max(v) => write!(f, "<= {v}"),
            Self::StrictMin(v) => write!(f, "> {v}"),
            Self::StrictMax(v) => write!(f, "< {v}"),
            Self::Range(a, b) => write!(f, "{a}..{b}"),
            Self::NotEqual(v) => write!(f, "!= {v}"),
            Self::Lowest => f.write_str("lowest"),
            Self::Highest => f.write_str("highest"),
        }
    }
}

/// A rule attached to one nutrient.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct NutrientGoal {
    /// Nutrient the rule applies to.
    pub nutrient: NutrientId,
    /// The rule.
    pub value: ConstraintValue,
}

impl NutrientGoal {
    /// Create a goal.
    #[must_use]
    pub fn new(nutrient: impl Into<NutrientId>, value: ConstraintValue) -> Self {
        Self {
            nutrient: nutrient.into(),
            value,
        }
    }
}

impl fmt::Display for NutrientGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.nutrient, self.value)
    }
}
