//! Consumer-age extraction.

use std::sync::LazyLock;

use diet_query_lexicon::OperatorMarker;
use regex::{Captures, Regex};

use crate::capture::{named, parse_number};
use crate::pattern::squash_whitespace;

/// Shift applied to an exclusive bound on the continuous age scale.
pub(crate) const EXCLUSIVE_AGE_NUDGE: f64 = 0.1;

const MONTHS_PER_YEAR: f64 = 12.0;
const WEEKS_PER_YEAR: f64 = 52.0;

static AGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:(?P<op>_op_[a-z]+_)\s+)?\b(?P<n>\d+(?:\.\d+)?)\s*-?\s*(?P<unit>months?|mos?|m|years?|yrs?|yr|y|weeks?|wks?|wk)\b(?:[\s-]+old\b)?",
    )
    .unwrap_or_else(|_| unreachable!())
});

fn to_months(value: f64, unit: &str) -> f64 {
    if unit.starts_with('y') {
        value * MONTHS_PER_YEAR
    } else if unit.starts_with('w') {
        value * MONTHS_PER_YEAR / WEEKS_PER_YEAR
    } else {
        value
    }
}

fn age_from(caps: &Captures<'_>) -> Option<f64> {
    let value = parse_number(named(caps, "n")?)?;
    let months = to_months(value, named(caps, "unit")?);
    let nudge = match named(caps, "op").and_then(|op| op.parse::<OperatorMarker>().ok()) {
        Some(OperatorMarker::Gt) => EXCLUSIVE_AGE_NUDGE,
        Some(OperatorMarker::Lt) => -EXCLUSIVE_AGE_NUDGE,
        _ => 0.0,
    };
    Some(months + nudge)
}

/// Remove age expressions from `text`, returning the remaining text and
/// the first age found, in months.
///
/// Only the first expression supplies the age; any later ones are removed
/// as well so the result never carries an age token.
pub(crate) fn extract_age(text: &str) -> (String, Option<f64>) {
    let mut age = None;
    let stripped = AGE.replace_all(text, |caps: &Captures<'_>| {
        if age.is_none() {
            age = age_from(caps);
        }
        " "
    });
    (squash_whitespace(&stripped), age)
}
