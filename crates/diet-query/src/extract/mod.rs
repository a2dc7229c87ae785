//! Candidate extractor.
//!
//! Runs the pattern families over light-normalised text, most specific
//! first, and keeps every match whose subject the lexicon recognises and
//! whose span is not already claimed by an earlier family or an earlier
//! pattern of the same family. Candidates come out in text order.
//!
//! Family order decides which reading wins on ambiguous input, e.g. in
//! `vegan between 5 and 10 vitamin_c` the value-first range claims the
//! numbers before the subject-first range can attach them to `vegan`.

mod candidate;
mod families;
mod subject;

use diet_query_lexicon::{Lexicon, SubjectKind};
use regex::Captures;

pub use candidate::{ExtractionCandidate, PatternFamily};

use crate::capture::{named, parse_number};
use crate::errors::CompileError;
use crate::pattern::squash_whitespace;
use families::Family;
use subject::clean_subject;

/// Compiled pattern families.
#[derive(Debug)]
pub struct Extractor {
    families: Vec<Family>,
}

impl Extractor {
    /// Compile the families, using the lexicon's operator phrases as
    /// comparators.
    ///
    /// # Errors
    /// Returns [`CompileError::Regex`] if a pattern fails to compile.
    pub fn new(lexicon: &dyn Lexicon) -> Result<Self, CompileError> {
        let phrases: Vec<String> = lexicon
            .operator_phrases()
            .iter()
            .map(|(phrase, _)| phrase.clone())
            .collect();
        Ok(Self {
            families: families::compile(&phrases)?,
        })
    }

    /// Extract candidates from light-normalised `text`.
    #[must_use]
    pub fn extract(&self, lexicon: &dyn Lexicon, text: &str) -> Vec<ExtractionCandidate> {
        let mut accepted: Vec<ExtractionCandidate> = Vec::new();
        for family in &self.families {
            for regex in &family.patterns {
                let mut pos = 0;
                while pos <= text.len() {
                    let Some(caps) = regex.captures_at(text, pos) else {
                        break;
                    };
                    let Some(whole) = caps.get(0) else {
                        break;
                    };
                    let span = whole.range();
                    let claimed = accepted.iter().any(|c| c.overlaps(&span));
                    match candidate(family.kind, &caps, lexicon) {
                        Some(found) if !claimed => {
                            log::trace!("{} matched {:?}", family.kind, found.text);
                            accepted.push(found);
                            pos = span.end.max(span.start + 1);
                        }
                        _ => pos = next_char(text, span.start),
                    }
                }
            }
        }
        accepted.sort_by_key(|c| c.span.start);
        log::debug!("extracted {} candidates from {text:?}", accepted.len());
        accepted
    }
}

fn next_char(text: &str, at: usize) -> usize {
    text.get(at..)
        .and_then(|rest| rest.chars().next())
        .map_or(text.len() + 1, |c| at + c.len_utf8())
}

fn candidate(
    family: PatternFamily,
    caps: &Captures<'_>,
    lexicon: &dyn Lexicon,
) -> Option<ExtractionCandidate> {
    let whole = caps.get(0)?;
    if named(caps, "trail").is_some() {
        log::trace!("{family} match {:?} belongs to the next subject", whole.as_str());
        return None;
    }
    let subject = clean_subject(named(caps, "subject")?, lexicon)?;
    let abstract_operator = named(caps, "abstract").map(squash_whitespace);
    if family == PatternFamily::AbstractOperatorFirst
        && abstract_operator.is_none()
        && matches!(lexicon.classify(&subject), SubjectKind::Nutrient(_))
    {
        return None;
    }
    Some(ExtractionCandidate {
        subject,
        operator: named(caps, "op").map(squash_whitespace),
        value: named(caps, "value").and_then(parse_number),
        value2: named(caps, "value2").and_then(parse_number),
        unit: named(caps, "unit")
            .or_else(|| named(caps, "unit2"))
            .map(str::to_owned),
        abstract_operator,
        span: whole.range(),
        family,
        text: whole.as_str().to_owned(),
    })
}
