//! Vocabulary-independent rewrites: cleanup, percentages, ranges and
//! comparison symbols.

use std::borrow::Cow;
use std::sync::LazyLock;

use diet_query_lexicon::OperatorMarker;
use regex::{Captures, Regex};

use crate::pattern::squash_whitespace;

/// Number as it may appear inside a range, optionally with a unit suffix.
const RANGE_NUMBER: &str = r"\d+(?:\.\d+)?(?:_percent|mcg|mg|g|kcal)?";

static HYPHENATED_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])-([a-z])").unwrap_or_else(|_| unreachable!()));

static THOUSANDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d),(\d{3})\b").unwrap_or_else(|_| unreachable!()));

static PERCENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+(?:\.\d+)?)\s*%").unwrap_or_else(|_| unreachable!()));

static STRICT_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\bstrictly\s+between\s+(?P<low>{RANGE_NUMBER})\s+and\s+(?P<high>{RANGE_NUMBER})"
    ))
    .unwrap_or_else(|_| unreachable!())
});

static RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"\b(?:between|from)\s+(?P<low>{RANGE_NUMBER})\s+(?:and|to)\s+(?P<high>{RANGE_NUMBER})"
    ))
    .unwrap_or_else(|_| unreachable!())
});

static SYMBOLS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<=|>=|!=|<>|==|<|>|=").unwrap_or_else(|_| unreachable!()));

/// Lowercase, drop thousands separators, split hyphenated words and
/// collapse whitespace.
pub(crate) fn cleanup(text: &str) -> String {
    let lowered = text.to_lowercase();
    let joined = THOUSANDS.replace_all(&lowered, "$1$2");
    let split = HYPHENATED_WORDS.replace_all(&joined, "$1 $2");
    // A second pass catches single letters between hyphens ("a-b-c").
    let split = HYPHENATED_WORDS.replace_all(&split, "$1 $2");
    squash_whitespace(&split)
}

/// `5%` becomes `5_percent` so the symbol survives word splitting.
pub(crate) fn rewrite_percentages(text: &str) -> Cow<'_, str> {
    PERCENT.replace_all(text, "${1}_percent")
}

/// Fold `between X and Y` style ranges into paired operator markers.
pub(crate) fn rewrite_ranges(text: &str) -> String {
    let strict = STRICT_RANGE.replace_all(text, |caps: &Captures<'_>| {
        range_markers(caps, OperatorMarker::Gt, OperatorMarker::Lt)
    });
    RANGE
        .replace_all(&strict, |caps: &Captures<'_>| {
            range_markers(caps, OperatorMarker::Gte, OperatorMarker::Lte)
        })
        .into_owned()
}

fn range_markers(caps: &Captures<'_>, low_op: OperatorMarker, high_op: OperatorMarker) -> String {
    let low = caps.name("low").map_or("", |m| m.as_str());
    let high = caps.name("high").map_or("", |m| m.as_str());
    format!("{low_op} {low} {high_op} {high}")
}

/// Replace comparison symbols with operator markers.
pub(crate) fn rewrite_symbols(text: &str) -> Cow<'_, str> {
    SYMBOLS.replace_all(text, |caps: &Captures<'_>| {
        let symbol = caps.get(0).map_or("", |m| m.as_str());
        OperatorMarker::from_symbol(symbol)
            .map_or_else(String::new, |marker| format!(" {marker} "))
    })
}
