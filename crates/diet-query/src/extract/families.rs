//! Regular expressions for the six pattern families.
//!
//! Every pattern names its groups the same way: `subject`, `op`,
//! `abstract`, `value`, `value2`, `unit`, `unit2` and `trail`. A subject is
//! a single token; multi-word nutrients arrive already joined with `_`, so
//! a subject can never swallow the next comparator in a chain such as
//! `more than 10 vitamin_c more than 14 fat`.

use regex::Regex;

use super::PatternFamily;
use crate::errors::CompileError;
use crate::pattern::build_phrase_pattern;

const NUMBER: &str = r"\d+(?:\.\d+)?";
const UNIT: &str = r"(?:(?:milligrams?|micrograms?|grams?|mcg|µg|ug|mg|kcal|percent|g)\b|%)";
const SUBJECT: &str = r"[a-z][a-z0-9_]*";
const SYMBOLS: &str = r"<=|>=|!=|<>|==|<|>|=";
const RANGE_OPERATOR: &str = r"(?:strictly\s+)?(?:between|from)";
const RANGE_JOINER: &str = r"(?:and|to|-)";
const LINKING_VERB: &str = r"(?:(?:is|are|should\s+be|of)\s+)";
const POSTFIX: &str =
    r"(?:or\s+(?:less|more|fewer|lower|higher)|max(?:imum)?|min(?:imum)?|at\s+most|at\s+least|tops)\b";
const SUFFIX_ADJECTIVE: &str = r"(?:free|rich|packed|loaded|neutral|balanced)";
const PREFIX_QUALIFIER: &str = r"(?:free\s+of|free\s+from|rich\s+in|high\s+in|low\s+in|lots\s+of|plenty\s+of|highest|lowest|higher|lower|least|most|high|low|no|zero|without|not|non|reduced|extra|less|more|fewer|balanced|neutral|little|light|lite|increased)";
const PREFIX_FILLER: &str = r"(?:(?:added|artificial|extra|refined|any)\s+)?";
const DANGLING: &str = r"(?:lots\s+of|plenty\s+of|at\s+least|at\s+most|cut\s+down\s+on|cut\s+back\s+on|more|less|fewer|limit|reduce|cut|increase|boost|avoid|minimize|maximize|max|min)";
const DANGLING_NOISE: &str = r"(?:(?:of|the|a|an|some|my|any|added|artificial|in)\s+){0,3}";

/// Compiled patterns of one family, tried in order.
#[derive(Debug)]
pub(crate) struct Family {
    pub(crate) kind: PatternFamily,
    pub(crate) patterns: Vec<Regex>,
}

fn comparator(operator_phrases: &[String]) -> String {
    build_phrase_pattern(operator_phrases.iter().map(String::as_str))
        .map_or_else(|| format!("(?:{SYMBOLS})"), |words| format!("(?:{words}|{SYMBOLS})"))
}

fn sources(kind: PatternFamily, ops: &str) -> Vec<String> {
    match kind {
        PatternFamily::Range => vec![
            format!(
                r"\b(?P<op>{RANGE_OPERATOR})\s+(?P<value>{NUMBER})\s*(?P<unit>{UNIT})?\s*{RANGE_JOINER}\s*(?P<value2>{NUMBER})\s*(?P<unit2>{UNIT})?\s+(?:of\s+)?(?P<subject>{SUBJECT})"
            ),
            format!(
                r"\b(?P<subject>{SUBJECT})\s+{LINKING_VERB}?(?P<op>{RANGE_OPERATOR})\s+(?P<value>{NUMBER})\s*(?P<unit>{UNIT})?\s*{RANGE_JOINER}\s*(?P<value2>{NUMBER})\s*(?P<unit2>{UNIT})?"
            ),
        ],
        PatternFamily::ValueFirst => vec![
            format!(
                r"(?P<op>{ops})\s*(?P<value>{NUMBER})\s*(?P<unit>{UNIT})?\s+(?:of\s+)?(?P<subject>{SUBJECT})"
            ),
            format!(
                r"\b(?P<value>{NUMBER})\s*(?P<unit>{UNIT})?\s+(?:of\s+)?(?P<subject>{SUBJECT})\s+(?P<op>{POSTFIX})"
            ),
        ],
        PatternFamily::SubjectFirst => vec![
            format!(
                r"\b(?P<subject>{SUBJECT})\s*{LINKING_VERB}?(?P<op>{ops})\s*(?P<value>{NUMBER})\s*(?P<unit>{UNIT})?"
            ),
            format!(
                r"\b(?P<subject>{SUBJECT})\s+(?P<value>{NUMBER})\s*(?P<unit>{UNIT})?\s+(?P<op>{POSTFIX})"
            ),
        ],
        PatternFamily::AbstractSubjectFirst => vec![format!(
            r"\b(?P<subject>{SUBJECT})\s+(?P<abstract>{SUFFIX_ADJECTIVE})\b(?P<trail>\s+(?:of|from)\b)?"
        )],
        PatternFamily::AbstractOperatorFirst => vec![format!(
            r"\b(?:(?P<abstract>{PREFIX_QUALIFIER})\s+{PREFIX_FILLER})?(?P<subject>{SUBJECT})\b"
        )],
        PatternFamily::DanglingOperator => vec![format!(
            r"\b(?P<abstract>{DANGLING})\s+{DANGLING_NOISE}(?P<subject>{SUBJECT})\b"
        )],
    }
}

/// Compile every family in priority order.
///
/// Comparators are the lexicon's operator phrases plus the comparison
/// symbols.
pub(crate) fn compile(operator_phrases: &[String]) -> Result<Vec<Family>, CompileError> {
    let ops = comparator(operator_phrases);
    PatternFamily::ORDER
        .into_iter()
        .map(|kind| {
            let patterns = sources(kind, &ops)
                .iter()
                .map(|source| Regex::new(source))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Family { kind, patterns })
        })
        .collect()
}
