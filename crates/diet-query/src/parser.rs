//! Constraint parser: extraction candidates to [`DietaryConstraint`]s.
//!
//! Operator text is resolved in three steps: comparison symbols, then the
//! exact compound phrases, then whole-word containment in fixed priority
//! order (negation, low, max, min, high, equality, between). Abstract
//! candidates keep `value = None` unless the subject kind fixes a value:
//! negation is `= 0`, a diet or allergen mention is `>= 1`. Acidity words
//! are rewritten onto the pH scale here so downstream stages only ever see
//! the subject `ph`.

use diet_query_lexicon::{Lexicon, OperatorMarker, PhMarker, PhTerm, SubjectKind};

use crate::constraint::{ComparisonOperator, DietaryConstraint};
use crate::extract::ExtractionCandidate;
use crate::pattern::squash_whitespace;

/// Subject emitted for every acidity constraint.
pub const PH_SUBJECT: &str = "ph";
/// pH at or above which a food counts as low-acid.
pub const PH_ALKALINE_MIN: f64 = 7.0;
/// pH at or below which a food counts as acidic.
pub const PH_ACIDIC_MAX: f64 = 6.0;
/// Lower edge of the neutral pH band.
pub const PH_NEUTRAL_LOW: f64 = 6.8;
/// Upper edge of the neutral pH band.
pub const PH_NEUTRAL_HIGH: f64 = 7.2;

/// Phrases resolved before word containment, so `no more than` is not
/// read as a negation.
const COMPOUND_OPERATORS: &[(&str, ComparisonOperator)] = &[
    ("no more than", ComparisonOperator::LessThanOrEqual),
    ("not more than", ComparisonOperator::LessThanOrEqual),
    ("at most", ComparisonOperator::LessThanOrEqual),
    ("up to", ComparisonOperator::LessThanOrEqual),
    ("or less", ComparisonOperator::LessThanOrEqual),
    ("or fewer", ComparisonOperator::LessThanOrEqual),
    ("or lower", ComparisonOperator::LessThanOrEqual),
    ("no less than", ComparisonOperator::GreaterThanOrEqual),
    ("not less than", ComparisonOperator::GreaterThanOrEqual),
    ("at least", ComparisonOperator::GreaterThanOrEqual),
    ("or more", ComparisonOperator::GreaterThanOrEqual),
    ("or higher", ComparisonOperator::GreaterThanOrEqual),
    ("not equal", ComparisonOperator::NotEqual),
    ("not equal to", ComparisonOperator::NotEqual),
];

/// Qualitative class of an operator word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OperatorClass {
    Negation,
    Low,
    Max,
    Min,
    High,
    Equality,
    Between,
}

/// Containment table, highest priority first.
const OPERATOR_WORDS: &[(OperatorClass, &[&str])] = &[
    (
        OperatorClass::Negation,
        &["no", "zero", "without", "free", "none", "non", "not", "avoid"],
    ),
    (
        OperatorClass::Low,
        &[
            "low", "lower", "less", "fewer", "under", "below", "reduced", "reduce", "light",
            "lite", "little", "least", "lowest", "cut", "minimize",
        ],
    ),
    (
        OperatorClass::Max,
        &["max", "maximum", "cap", "limit", "tops"],
    ),
    (OperatorClass::Min, &["min", "minimum"]),
    (
        OperatorClass::High,
        &[
            "high", "higher", "more", "over", "above", "greater", "rich", "lots", "plenty",
            "extra", "packed", "loaded", "increased", "increase", "boost", "maximize", "most",
            "highest",
        ],
    ),
    (OperatorClass::Equality, &["equal", "exactly", "is"]),
    (OperatorClass::Between, &["between", "from"]),
];

impl OperatorClass {
    fn of(text: &str) -> Option<Self> {
        let words: Vec<&str> = text.split_whitespace().collect();
        OPERATOR_WORDS
            .iter()
            .find(|(_, table)| words.iter().any(|w| table.contains(w)))
            .map(|(class, _)| *class)
    }

    const fn operator(self) -> ComparisonOperator {
        match self {
            Self::Negation | Self::Equality => ComparisonOperator::Equal,
            Self::Low => ComparisonOperator::LessThan,
            Self::Max => ComparisonOperator::LessThanOrEqual,
            Self::Min | Self::Between => ComparisonOperator::GreaterThanOrEqual,
            Self::High => ComparisonOperator::GreaterThan,
        }
    }
}

/// Resolve operator text to a comparison.
///
/// # Examples
/// ```
/// use diet_query::{ComparisonOperator, resolve_operator};
/// assert_eq!(resolve_operator("no more than"), ComparisonOperator::LessThanOrEqual);
/// assert_eq!(resolve_operator("no"), ComparisonOperator::Equal);
/// assert_eq!(resolve_operator(">="), ComparisonOperator::GreaterThanOrEqual);
/// assert_eq!(resolve_operator("whatever"), ComparisonOperator::Unknown);
/// ```
#[must_use]
pub fn resolve_operator(text: &str) -> ComparisonOperator {
    let key = squash_whitespace(&text.to_lowercase());
    if let Some(marker) = OperatorMarker::from_symbol(&key) {
        return marker.into();
    }
    COMPOUND_OPERATORS
        .iter()
        .find(|(phrase, _)| *phrase == key)
        .map(|(_, op)| *op)
        .or_else(|| OperatorClass::of(&key).map(OperatorClass::operator))
        .unwrap_or(ComparisonOperator::Unknown)
}

/// Turns candidates into constraints against one lexicon.
pub struct ConstraintParser<'a> {
    lexicon: &'a dyn Lexicon,
}

impl<'a> ConstraintParser<'a> {
    /// Create a parser over `lexicon`.
    #[must_use]
    pub fn new(lexicon: &'a dyn Lexicon) -> Self {
        Self { lexicon }
    }

    /// Parse every candidate, keeping input order.
    #[must_use]
    pub fn parse_all(&self, candidates: &[ExtractionCandidate]) -> Vec<DietaryConstraint> {
        candidates.iter().flat_map(|c| self.parse(c)).collect()
    }

    /// Parse one candidate into zero, one or two constraints.
    #[must_use]
    pub fn parse(&self, candidate: &ExtractionCandidate) -> Vec<DietaryConstraint> {
        let constraints = match self.lexicon.classify(&candidate.subject) {
            SubjectKind::Ph => self.parse_ph(candidate),
            SubjectKind::Unknown => Vec::new(),
            kind => parse_subject(candidate, &kind),
        };
        if constraints.is_empty() {
            log::debug!("no constraint for candidate {:?}", candidate.text);
        }
        constraints
    }

    fn parse_ph(&self, candidate: &ExtractionCandidate) -> Vec<DietaryConstraint> {
        let Some(term) = self.lexicon.ph_term(&candidate.subject) else {
            return Vec::new();
        };
        let base = |op| DietaryConstraint::new(&*candidate.text, PH_SUBJECT, op);
        let class = candidate.operator_text().and_then(OperatorClass::of);

        if term == PhTerm::Neutral
            || candidate
                .abstract_operator
                .as_deref()
                .is_some_and(|w| matches!(w, "neutral" | "balanced"))
        {
            return vec![neutral(base(ComparisonOperator::Equal))];
        }

        if let Some(value) = candidate.value {
            return numeric(candidate, value, term.is_inverted())
                .into_iter()
                .map(|(op, value, value2)| with_values(base(op), value, value2))
                .collect();
        }

        let upward = match class {
            Some(OperatorClass::High | OperatorClass::Min) => Some(!term.is_inverted()),
            Some(OperatorClass::Low | OperatorClass::Max | OperatorClass::Negation) => {
                Some(term.is_inverted())
            }
            Some(OperatorClass::Equality | OperatorClass::Between) => None,
            None => match term.bare_marker() {
                Some(PhMarker::Alkaline) => Some(true),
                Some(PhMarker::Acidic) => Some(false),
                Some(PhMarker::Neutral) | None => None,
            },
        };
        match upward {
            Some(true) => vec![
                base(ComparisonOperator::GreaterThanOrEqual).with_value(PH_ALKALINE_MIN),
            ],
            Some(false) => {
                vec![base(ComparisonOperator::LessThanOrEqual).with_value(PH_ACIDIC_MAX)]
            }
            None => Vec::new(),
        }
    }
}

fn with_values(constraint: DietaryConstraint, value: f64, value2: Option<f64>) -> DietaryConstraint {
    DietaryConstraint {
        value: Some(value),
        value2,
        ..constraint
    }
}

fn neutral(constraint: DietaryConstraint) -> DietaryConstraint {
    constraint
        .with_value(PH_NEUTRAL_LOW)
        .with_value2(PH_NEUTRAL_HIGH)
}

/// Operator/value triples for a numeric candidate.
fn numeric(
    candidate: &ExtractionCandidate,
    value: f64,
    invert: bool,
) -> Vec<(ComparisonOperator, f64, Option<f64>)> {
    let text = candidate.operator_text().unwrap_or_default();
    if let Some(value2) = candidate.value2 {
        let (low, high) = if value <= value2 {
            (value, value2)
        } else {
            (value2, value)
        };
        if text.split_whitespace().any(|w| w == "strictly") {
            return vec![
                (ComparisonOperator::GreaterThan, low, None),
                (ComparisonOperator::LessThan, high, None),
            ];
        }
        return vec![(ComparisonOperator::GreaterThanOrEqual, low, Some(high))];
    }
    let op = match resolve_operator(text) {
        ComparisonOperator::Unknown => ComparisonOperator::Equal,
        op if invert => op.inverted(),
        op => op,
    };
    vec![(op, value, None)]
}

fn parse_subject(candidate: &ExtractionCandidate, kind: &SubjectKind) -> Vec<DietaryConstraint> {
    let base = |op| {
        DietaryConstraint::new(&*candidate.text, &*candidate.subject, op)
            .with_unit(candidate.unit.clone())
    };
    if let Some(value) = candidate.value {
        return numeric(candidate, value, false)
            .into_iter()
            .map(|(op, value, value2)| with_values(base(op), value, value2))
            .collect();
    }

    let class = candidate.operator_text().and_then(OperatorClass::of);
    match (class, kind) {
        (Some(OperatorClass::Negation), _) => {
            vec![base(ComparisonOperator::Equal).with_value(0.0)]
        }
        (_, SubjectKind::Diet(_) | SubjectKind::Allergen(_)) => {
            vec![base(ComparisonOperator::GreaterThanOrEqual).with_value(1.0)]
        }
        (Some(class), SubjectKind::Nutrient(_)) => vec![base(class.operator())],
        _ => Vec::new(),
    }
}
