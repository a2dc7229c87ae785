//! Inline marker vocabulary shared by the normalizer and the tokenizer.
//!
//! Operator phrases and pH idioms are folded into fixed marker tokens such
//! as `_op_gte_` or `_ph_acidic_`. The markers contain no whitespace and are
//! wrapped in underscores so no word-boundary rewrite can match inside them.

use std::fmt;
use std::str::FromStr;

/// Comparison marker emitted by operator rewriting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorMarker {
    /// Strictly less than.
    Lt,
    /// Less than or equal.
    Lte,
    /// Strictly greater than.
    Gt,
    /// Greater than or equal.
    Gte,
    /// Equal.
    Eq,
    /// Not equal.
    Neq,
}

impl OperatorMarker {
    /// All markers in a stable order.
    pub const ALL: [Self; 6] = [Self::Lt, Self::Lte, Self::Gt, Self::Gte, Self::Eq, Self::Neq];

    /// Return the inline token for this marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use diet_query_lexicon::OperatorMarker;
    ///
    /// assert_eq!(OperatorMarker::Gte.as_str(), "_op_gte_");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lt => "_op_lt_",
            Self::Lte => "_op_lte_",
            Self::Gt => "_op_gt_",
            Self::Gte => "_op_gte_",
            Self::Eq => "_op_eq_",
            Self::Neq => "_op_neq_",
        }
    }

    /// Map a comparison symbol (`<`, `>=`, `!=`, …) to its marker.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "<" => Some(Self::Lt),
            "<=" => Some(Self::Lte),
            ">" => Some(Self::Gt),
            ">=" => Some(Self::Gte),
            "=" | "==" => Some(Self::Eq),
            "!=" | "<>" => Some(Self::Neq),
            _ => None,
        }
    }
}

impl fmt::Display for OperatorMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a token is not a known inline marker.
///
/// Contains the unrecognised token for diagnostic purposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerParseError(pub String);

impl fmt::Display for MarkerParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid inline marker: {}", self.0)
    }
}

impl std::error::Error for MarkerParseError {}

impl FromStr for OperatorMarker {
    type Err = MarkerParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|marker| marker.as_str() == value)
            .ok_or_else(|| MarkerParseError(value.to_owned()))
    }
}

/// Pre-resolved acidity idiom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhMarker {
    /// Acidic food, pH at most 6.0.
    Acidic,
    /// Low-acid or alkaline food, pH at least 7.0.
    Alkaline,
    /// Neutral food, pH within 6.8..=7.2.
    Neutral,
}

impl PhMarker {
    /// All markers in a stable order.
    pub const ALL: [Self; 3] = [Self::Acidic, Self::Alkaline, Self::Neutral];

    /// Return the inline token for this marker.
    ///
    /// # Examples
    ///
    /// ```
    /// use diet_query_lexicon::PhMarker;
    ///
    /// assert_eq!(PhMarker::Neutral.as_str(), "_ph_neutral_");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Acidic => "_ph_acidic_",
            Self::Alkaline => "_ph_alkaline_",
            Self::Neutral => "_ph_neutral_",
        }
    }
}

impl fmt::Display for PhMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PhMarker {
    type Err = MarkerParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|marker| marker.as_str() == value)
            .ok_or_else(|| MarkerParseError(value.to_owned()))
    }
}

/// Role of a word that refers to acidity.
///
/// pH and "acid" run on inverse scales: "low acid" means a high pH.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PhTerm {
    /// The pH scale itself (`ph`).
    Scale,
    /// Acid content (`acid`, `acidity`), inverse of pH.
    Acidity,
    /// Alkalinity (`alkalinity`), same direction as pH.
    Alkalinity,
    /// The adjective `acidic`: inverse of pH, and acidic when bare.
    Acidic,
    /// The adjective `alkaline`: same direction as pH, and alkaline when bare.
    Alkaline,
    /// The adjective `neutral`.
    Neutral,
}

impl PhTerm {
    /// Whether comparisons on this term must be flipped to read as pH.
    ///
    /// # Examples
    ///
    /// ```
    /// use diet_query_lexicon::PhTerm;
    ///
    /// assert!(PhTerm::Acidity.is_inverted());
    /// assert!(!PhTerm::Scale.is_inverted());
    /// ```
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        matches!(self, Self::Acidity | Self::Acidic)
    }

    /// Marker implied by the word on its own, without any qualifier.
    #[must_use]
    pub const fn bare_marker(self) -> Option<PhMarker> {
        match self {
            Self::Acidic => Some(PhMarker::Acidic),
            Self::Alkaline => Some(PhMarker::Alkaline),
            Self::Neutral => Some(PhMarker::Neutral),
            Self::Scale | Self::Acidity | Self::Alkalinity => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("_op_lt_", OperatorMarker::Lt)]
    #[case("_op_lte_", OperatorMarker::Lte)]
    #[case("_op_gt_", OperatorMarker::Gt)]
    #[case("_op_gte_", OperatorMarker::Gte)]
    #[case("_op_eq_", OperatorMarker::Eq)]
    #[case("_op_neq_", OperatorMarker::Neq)]
    fn parses_operator_markers(#[case] input: &str, #[case] expected: OperatorMarker) {
        assert_eq!(input.parse::<OperatorMarker>(), Ok(expected));
        assert_eq!(expected.as_str(), input);
    }

    #[test]
    fn rejects_unknown_marker() {
        let Err(err) = "_op_about_".parse::<OperatorMarker>() else {
            panic!("expected parse error for unknown marker");
        };
        assert_eq!(err.0, "_op_about_");
        assert_eq!(err.to_string(), "invalid inline marker: _op_about_");
    }

    #[rstest]
    #[case("<", OperatorMarker::Lt)]
    #[case("<=", OperatorMarker::Lte)]
    #[case(">=", OperatorMarker::Gte)]
    #[case("<>", OperatorMarker::Neq)]
    #[case("==", OperatorMarker::Eq)]
    fn maps_symbols(#[case] symbol: &str, #[case] expected: OperatorMarker) {
        assert_eq!(OperatorMarker::from_symbol(symbol), Some(expected));
    }

    #[test]
    fn ph_markers_round_trip_through_text() {
        for marker in PhMarker::ALL {
            assert_eq!(marker.as_str().parse::<PhMarker>(), Ok(marker));
        }
    }

    #[test]
    fn only_adjectives_carry_a_bare_marker() {
        assert_eq!(PhTerm::Acidic.bare_marker(), Some(PhMarker::Acidic));
        assert_eq!(PhTerm::Acidity.bare_marker(), None);
        assert_eq!(PhTerm::Scale.bare_marker(), None);
    }
}
