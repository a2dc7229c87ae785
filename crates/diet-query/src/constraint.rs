//! Canonical constraint records produced by the constraint parser.

use std::fmt;

use diet_query_lexicon::OperatorMarker;

/// Comparison a constraint applies to its subject.
///
/// Each variant is an independent predicate tag; no ordering between the
/// variants is implied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub enum ComparisonOperator {
    /// `<`
    LessThan,
    /// `<=`
    LessThanOrEqual,
    /// `>`
    GreaterThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `=`
    Equal,
    /// `!=`
    NotEqual,
    /// No operator could be resolved.
    Unknown,
}

impl ComparisonOperator {
    /// Return the operator as a symbol.
    ///
    /// # Examples
    ///
    /// ```
    /// use diet_query::ComparisonOperator;
    ///
    /// assert_eq!(ComparisonOperator::GreaterThanOrEqual.as_str(), ">=");
    /// assert_eq!(ComparisonOperator::Unknown.as_str(), "?");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::Unknown => "?",
        }
    }

    /// Swap the direction of an ordering comparison.
    ///
    /// Used for subjects measured on the inverse scale of their target, such
    /// as "acid" against pH. Equality tags are returned unchanged.
    #[must_use]
    pub const fn inverted(self) -> Self {
        match self {
            Self::LessThan => Self::GreaterThan,
            Self::LessThanOrEqual => Self::GreaterThanOrEqual,
            Self::GreaterThan => Self::LessThan,
            Self::GreaterThanOrEqual => Self::LessThanOrEqual,
            Self::Equal | Self::NotEqual | Self::Unknown => self,
        }
    }

    /// Whether the operator asks for more of the subject.
    #[must_use]
    pub const fn is_upward(self) -> bool {
        matches!(self, Self::GreaterThan | Self::GreaterThanOrEqual)
    }

    /// Whether the operator asks for less of the subject.
    #[must_use]
    pub const fn is_downward(self) -> bool {
        matches!(self, Self::LessThan | Self::LessThanOrEqual)
    }
}

impl From<OperatorMarker> for ComparisonOperator {
    fn from(marker: OperatorMarker) -> Self {
        match marker {
            OperatorMarker::Lt => Self::LessThan,
            OperatorMarker::Lte => Self::LessThanOrEqual,
            OperatorMarker::Gt => Self::GreaterThan,
            OperatorMarker::Gte => Self::GreaterThanOrEqual,
            OperatorMarker::Eq => Self::Equal,
            OperatorMarker::Neq => Self::NotEqual,
        }
    }
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One resolved constraint on a subject.
///
/// A constraint without a `value` is *abstract*: it came from a qualitative
/// word such as "high" or "low" and its numeric default is chosen by the
/// mapper from the subject kind.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct DietaryConstraint {
    /// Matched text the constraint was read from.
    pub original_text: String,
    /// Normalised subject, e.g. `sodium`, `vegan` or `ph`.
    pub subject: String,
    /// Comparison applied to the subject.
    pub comparison: ComparisonOperator,
    /// Primary value, absent for abstract constraints.
    pub value: Option<f64>,
    /// Upper value of a range.
    pub value2: Option<f64>,
    /// Unit written next to the value.
    pub unit: Option<String>,
}

impl DietaryConstraint {
    /// Create a constraint with no value.
    #[must_use]
    pub fn new(
        original_text: impl Into<String>,
        subject: impl Into<String>,
        comparison: ComparisonOperator,
    ) -> Self {
        Self {
            original_text: original_text.into(),
            subject: subject.into(),
            comparison,
            value: None,
            value2: None,
            unit: None,
        }
    }

    /// Attach a primary value.
    #[must_use]
    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    /// Attach the upper value of a range.
    #[must_use]
    pub fn with_value2(mut self, value2: f64) -> Self {
        self.value2 = Some(value2);
        self
    }

    /// Attach a unit.
    #[must_use]
    pub fn with_unit(mut self, unit: Option<String>) -> Self {
        self.unit = unit;
        self
    }

    /// Whether the constraint carries no number.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(OperatorMarker::Lt, ComparisonOperator::LessThan)]
    #[case(OperatorMarker::Lte, ComparisonOperator::LessThanOrEqual)]
    #[case(OperatorMarker::Gt, ComparisonOperator::GreaterThan)]
    #[case(OperatorMarker::Gte, ComparisonOperator::GreaterThanOrEqual)]
    #[case(OperatorMarker::Eq, ComparisonOperator::Equal)]
    #[case(OperatorMarker::Neq, ComparisonOperator::NotEqual)]
    fn converts_markers(#[case] marker: OperatorMarker, #[case] expected: ComparisonOperator) {
        assert_eq!(ComparisonOperator::from(marker), expected);
    }

    #[test]
    fn inversion_swaps_direction_only() {
        assert_eq!(
            ComparisonOperator::LessThan.inverted(),
            ComparisonOperator::GreaterThan
        );
        assert_eq!(
            ComparisonOperator::GreaterThanOrEqual.inverted(),
            ComparisonOperator::LessThanOrEqual
        );
        assert_eq!(ComparisonOperator::Equal.inverted(), ComparisonOperator::Equal);
    }

    #[test]
    fn abstract_constraints_have_no_value() {
        let c = DietaryConstraint::new("high protein", "protein", ComparisonOperator::GreaterThan);
        assert!(c.is_abstract());
        assert!(!c.with_value(5.0).is_abstract());
    }
}
