//! Lexical normalizer.
//!
//! Rewrites surface forms into a canonical intermediate text before word
//! splitting or pattern extraction. The rewrites run in a fixed order:
//!
//! 1. cleanup (case, hyphens, thousands separators, whitespace)
//! 2. percentages (`5%` → `5_percent`)
//! 3. ranges (`between 5 and 10` → `_op_gte_ 5 _op_lte_ 10`)
//! 4. pH idioms (`low acid` → `_ph_alkaline_`)
//! 5. operators: symbols, then lexicon phrases, then comparatives before a
//!    digit (`cheaper 5` → `_op_lt_ 5`)
//! 6. multi-word phrase protection (`vitamin c` → `vitamin_c`)
//! 7. age extraction
//!
//! Ranges run before operators so `between … and …` is never split at
//! `and`; pH idioms run before operators so `low acid` is not read as a
//! generic "low"; phrase protection runs after operators so operator
//! phrases are never glued together. Running [`Normalizer::normalize`] on
//! its own output changes nothing.

mod age;
mod rewrite;

use diet_query_lexicon::{Lexicon, OperatorMarker, PhMarker};
use regex::{Captures, Regex};

use crate::errors::CompileError;
use crate::pattern::{compile_phrase_regex, squash_whitespace};

/// Output of [`Normalizer::normalize`].
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedQuery {
    /// Canonical text with inline markers and protected phrases.
    pub text: String,
    /// Consumer age in months, removed from `text`.
    pub age_months: Option<f64>,
}

/// A phrase table compiled into one alternation plus its marker lookup.
#[derive(Debug)]
struct MarkerTable<M> {
    regex: Option<Regex>,
    entries: Vec<(String, M)>,
}

impl<M: Copy> MarkerTable<M> {
    fn new(entries: &[(String, M)]) -> Result<Self, CompileError> {
        Ok(Self {
            regex: compile_phrase_regex(entries.iter().map(|(p, _)| p.as_str()))?,
            entries: entries.to_vec(),
        })
    }

    fn lookup(&self, matched: &str) -> Option<M> {
        let key = squash_whitespace(matched);
        self.entries
            .iter()
            .find(|(phrase, _)| *phrase == key)
            .map(|(_, marker)| *marker)
    }

    fn rewrite(&self, text: &str, render: impl Fn(M) -> &'static str) -> String {
        let Some(regex) = &self.regex else {
            return text.to_owned();
        };
        regex
            .replace_all(text, |caps: &Captures<'_>| {
                let matched = caps.get(0).map_or("", |m| m.as_str());
                self.lookup(matched)
                    .map_or_else(|| matched.to_owned(), |marker| format!(" {} ", render(marker)))
            })
            .into_owned()
    }
}

/// Comparative adjectives directly followed by a digit.
#[derive(Debug)]
struct ComparativeTable {
    regex: Option<Regex>,
    entries: Vec<(String, OperatorMarker)>,
}

impl ComparativeTable {
    fn new(entries: &[(String, OperatorMarker)]) -> Result<Self, CompileError> {
        let words: Vec<String> = entries.iter().map(|(w, _)| regex::escape(w)).collect();
        let regex = if words.is_empty() {
            None
        } else {
            let source = format!(r"\b(?P<word>{})\s+(?P<digit>\d)", words.join("|"));
            Some(Regex::new(&source)?)
        };
        Ok(Self {
            regex,
            entries: entries.to_vec(),
        })
    }

    fn rewrite(&self, text: &str) -> String {
        let Some(regex) = &self.regex else {
            return text.to_owned();
        };
        regex
            .replace_all(text, |caps: &Captures<'_>| {
                let word = caps.name("word").map_or("", |m| m.as_str());
                let digit = caps.name("digit").map_or("", |m| m.as_str());
                self.entries
                    .iter()
                    .find(|(w, _)| w == word)
                    .map_or_else(
                        || format!("{word} {digit}"),
                        |(_, marker)| format!("{marker} {digit}"),
                    )
            })
            .into_owned()
    }
}

/// Lexicon-driven text normalizer.
///
/// Built once per lexicon; normalising is then pure and infallible.
#[derive(Debug)]
pub struct Normalizer {
    ph_phrases: MarkerTable<PhMarker>,
    operator_phrases: MarkerTable<OperatorMarker>,
    comparatives: ComparativeTable,
    nutrient_phrases: Option<Regex>,
    all_phrases: Option<Regex>,
}

fn protect(regex: Option<&Regex>, text: &str) -> String {
    let Some(regex) = regex else {
        return text.to_owned();
    };
    regex
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = caps.get(0).map_or("", |m| m.as_str());
            matched.split_whitespace().collect::<Vec<_>>().join("_")
        })
        .into_owned()
}

impl Normalizer {
    /// Compile the lexicon's phrase tables.
    ///
    /// # Errors
    /// Returns [`CompileError::Regex`] if a phrase alternation cannot be
    /// compiled.
    pub fn new(lexicon: &dyn Lexicon) -> Result<Self, CompileError> {
        let mut phrases: Vec<&str> = lexicon
            .nutrient_phrases()
            .iter()
            .chain(lexicon.diet_phrases())
            .map(String::as_str)
            .collect();
        phrases.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        phrases.dedup();

        Ok(Self {
            ph_phrases: MarkerTable::new(lexicon.ph_phrases())?,
            operator_phrases: MarkerTable::new(lexicon.operator_phrases())?,
            comparatives: ComparativeTable::new(lexicon.comparative_adjectives())?,
            nutrient_phrases: compile_phrase_regex(
                lexicon.nutrient_phrases().iter().map(String::as_str),
            )?,
            all_phrases: compile_phrase_regex(phrases)?,
        })
    }

    /// Run the full normalisation pipeline.
    #[must_use]
    pub fn normalize(&self, text: &str) -> NormalizedQuery {
        let text = rewrite::cleanup(text);
        let text = rewrite::rewrite_percentages(&text);
        let text = rewrite::rewrite_ranges(&text);
        let text = self.rewrite_ph_idioms(&text);
        let text = self.rewrite_operators(&text);
        let text = protect(self.all_phrases.as_ref(), &text);
        let (text, age_months) = age::extract_age(&squash_whitespace(&text));
        log::trace!("normalized query to {text:?} (age {age_months:?})");
        NormalizedQuery { text, age_months }
    }

    /// Light normalisation used by the candidate extractor: cleanup and
    /// nutrient phrase protection only.
    #[must_use]
    pub fn normalize_light(&self, text: &str) -> String {
        protect(self.nutrient_phrases.as_ref(), &rewrite::cleanup(text))
    }

    fn rewrite_ph_idioms(&self, text: &str) -> String {
        self.ph_phrases.rewrite(text, PhMarker::as_str)
    }

    fn rewrite_operators(&self, text: &str) -> String {
        let text = rewrite::rewrite_symbols(text);
        let text = self
            .operator_phrases
            .rewrite(&text, OperatorMarker::as_str);
        self.comparatives.rewrite(&text)
    }
}
