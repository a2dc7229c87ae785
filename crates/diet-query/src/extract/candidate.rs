//! Unvalidated matches produced by the pattern families.

use std::fmt;
use std::ops::Range;

/// Pattern family a candidate was matched by, in priority order.
///
/// Earlier families win: a span already claimed by an earlier family
/// suppresses any overlapping match of a later one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub enum PatternFamily {
    /// `between 5 and 10 g fat`, `fat between 5 and 10`.
    Range,
    /// `more than 10 vitamin c`, `5 g sugar or less`.
    ValueFirst,
    /// `sodium < 5 g`, `sugar 5 max`.
    SubjectFirst,
    /// `sugar free`, `iron rich`.
    AbstractSubjectFirst,
    /// `high protein`, `no peanuts`, `vegan`.
    AbstractOperatorFirst,
    /// `more of the fiber`, `limit sugar`.
    DanglingOperator,
}

impl PatternFamily {
    /// All families, most specific first.
    pub const ORDER: [Self; 6] = [
        Self::Range,
        Self::ValueFirst,
        Self::SubjectFirst,
        Self::AbstractSubjectFirst,
        Self::AbstractOperatorFirst,
        Self::DanglingOperator,
    ];

    /// Short name used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::ValueFirst => "value-first",
            Self::SubjectFirst => "subject-first",
            Self::AbstractSubjectFirst => "abstract-subject-first",
            Self::AbstractOperatorFirst => "abstract-operator-first",
            Self::DanglingOperator => "dangling-operator",
        }
    }
}

impl fmt::Display for PatternFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pattern match whose subject the lexicon recognises.
///
/// Operators are kept as written; the constraint parser resolves them.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "camelCase"))]
pub struct ExtractionCandidate {
    /// Cleaned subject, e.g. `vitamin c`.
    pub subject: String,
    /// Comparator text next to a number, e.g. `more than` or `<=`.
    pub operator: Option<String>,
    /// First number.
    pub value: Option<f64>,
    /// Second number of a range.
    pub value2: Option<f64>,
    /// Unit written next to a number.
    pub unit: Option<String>,
    /// Qualitative word such as `high` or `free`.
    pub abstract_operator: Option<String>,
    /// Byte span of the match in the light-normalised text.
    pub span: Range<usize>,
    /// Family that produced the match.
    pub family: PatternFamily,
    /// Matched text.
    pub text: String,
}

impl ExtractionCandidate {
    /// Whether no number was captured.
    #[must_use]
    pub const fn is_abstract(&self) -> bool {
        self.value.is_none()
    }

    /// Operator text to resolve: the comparator if present, else the
    /// qualitative word.
    #[must_use]
    pub fn operator_text(&self) -> Option<&str> {
        self.operator
            .as_deref()
            .or(self.abstract_operator.as_deref())
    }

    pub(crate) fn overlaps(&self, span: &Range<usize>) -> bool {
        self.span.start < span.end && span.start < self.span.end
    }
}
