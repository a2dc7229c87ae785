//! Stateful tokenizer: the keyword path from text to [`SearchIntent`].
//!
//! A single left-to-right pass over the normalised words. Pending
//! comparisons wait in [`PendingState`] until a subject arrives; free text
//! is a hard boundary that clears them. Each word is tried as, in order: a
//! diet keyword, a persona, a pH marker, a pH adjective, a pH trigger, an
//! operator marker, a number, a nutrient, a negation trigger, a qualifier,
//! a stop word and finally free text.

mod words;

use std::collections::BTreeSet;
use std::mem;

use diet_query_lexicon::{Lexicon, Nutrient, OperatorMarker, PhMarker, Unit};

use crate::constraint::ComparisonOperator;
use crate::intent::SearchIntent;
use crate::normalize::Normalizer;
use crate::parser::{PH_ACIDIC_MAX, PH_ALKALINE_MIN, PH_NEUTRAL_HIGH, PH_NEUTRAL_LOW};
use crate::value::{ConstraintValue, NutrientGoal};
use words::{NEGATION_FILLERS, NEGATION_TRIGGERS, QUALIFIERS, Quantity};

/// Half-width of the range implied by a bare number after a nutrient.
pub const NUTRIENT_TOLERANCE: f64 = 0.5;
/// Half-width of the range implied by a bare number after `ph`.
pub const PH_TOLERANCE: f64 = 0.2;
/// Upper bound for a negated nutrient on the keyword path.
pub const NEGATED_NUTRIENT_MAX: f64 = 0.5;

/// Subject the next number applies to.
#[derive(Debug, Clone, Default, PartialEq)]
enum Context {
    #[default]
    None,
    Nutrient(Nutrient),
    Ph {
        inverted: bool,
    },
}

/// Comparisons waiting for a number or a subject.
#[derive(Debug, Default)]
struct PendingState {
    active_operator: Option<OperatorMarker>,
    context: Context,
    implicit_value: Option<Quantity>,
    queue: Vec<(OperatorMarker, Quantity)>,
}

fn ph_value(marker: PhMarker) -> ConstraintValue {
    match marker {
        PhMarker::Acidic => ConstraintValue::Max(PH_ACIDIC_MAX),
        PhMarker::Alkaline => ConstraintValue::Min(PH_ALKALINE_MIN),
        PhMarker::Neutral => ConstraintValue::Range(PH_NEUTRAL_LOW, PH_NEUTRAL_HIGH),
    }
}

fn around(value: f64, tolerance: f64) -> ConstraintValue {
    ConstraintValue::Range(value - tolerance, value + tolerance)
}

fn qualifier_value(word: &str) -> Option<ConstraintValue> {
    match word {
        "lowest" | "least" => Some(ConstraintValue::Lowest),
        "highest" | "most" => Some(ConstraintValue::Highest),
        "low" | "lower" | "less" | "fewer" | "reduced" | "light" | "lite" | "little" => {
            Some(ConstraintValue::Low)
        }
        w if QUALIFIERS.contains(&w) => Some(ConstraintValue::High),
        _ => None,
    }
}

fn comparison(marker: OperatorMarker, inverted: bool) -> ComparisonOperator {
    let op = ComparisonOperator::from(marker);
    if inverted { op.inverted() } else { op }
}

/// Resolve queued comparisons: a `>=`/`<=` pair closes into one range,
/// anything else stays separate.
fn drain_queue(queue: &[(OperatorMarker, f64)], inverted: bool) -> Vec<ConstraintValue> {
    if let [(first, a), (second, b)] = queue {
        let pair = (*first, *second);
        if !inverted
            && matches!(
                pair,
                (OperatorMarker::Gte, OperatorMarker::Lte) | (OperatorMarker::Lte, OperatorMarker::Gte)
            )
        {
            return vec![ConstraintValue::Range(a.min(*b), a.max(*b))];
        }
    }
    queue
        .iter()
        .filter_map(|(marker, value)| {
            ConstraintValue::from_comparison(comparison(*marker, inverted), *value, None)
        })
        .collect()
}

fn resolve_queue(
    queue: Vec<(OperatorMarker, Quantity)>,
    value: impl Fn(Quantity) -> f64,
) -> Vec<(OperatorMarker, f64)> {
    queue.into_iter().map(|(marker, q)| (marker, value(q))).collect()
}

/// Builds a [`SearchIntent`] from raw text.
pub struct Tokenizer<'a> {
    lexicon: &'a dyn Lexicon,
    normalizer: &'a Normalizer,
}

impl<'a> Tokenizer<'a> {
    /// Create a tokenizer sharing `normalizer`, which must have been built
    /// from the same lexicon.
    #[must_use]
    pub fn new(lexicon: &'a dyn Lexicon, normalizer: &'a Normalizer) -> Self {
        Self { lexicon, normalizer }
    }

    /// Normalise `text` and walk its words once.
    ///
    /// `dynamic_diets` holds `<Word>-Free` diet names known only at call
    /// time, e.g. `Nightshade-Free`.
    #[must_use]
    pub fn intent(&self, text: &str, dynamic_diets: &BTreeSet<String>) -> SearchIntent {
        let normalized = self.normalizer.normalize(text);
        let words = words::split_words(&normalized.text);
        let mut walk = Walk {
            lexicon: self.lexicon,
            dynamic_diets,
            intent: SearchIntent {
                target_age_months: normalized.age_months,
                ..SearchIntent::default()
            },
            state: PendingState::default(),
            previous: None,
        };
        let mut idx = 0;
        while let Some(word) = words.get(idx) {
            idx += walk.step(&words, idx, word);
            if !self.lexicon.is_stop_word(word) {
                walk.previous = Some(word.clone());
            }
        }
        log::debug!("built intent for {text:?}: {:?}", walk.intent);
        walk.intent
    }
}

struct Walk<'a> {
    lexicon: &'a dyn Lexicon,
    dynamic_diets: &'a BTreeSet<String>,
    intent: SearchIntent,
    state: PendingState,
    previous: Option<String>,
}

impl Walk<'_> {
    fn reset(&mut self) {
        self.state = PendingState::default();
    }

    /// Handle the word at `idx`, returning how many words it consumed.
    fn step(&mut self, words: &[String], idx: usize, word: &str) -> usize {
        let next = words.get(idx + 1).map(String::as_str);

        if let Some(name) = self.lexicon.diet(word) {
            self.reset();
            if matches!(next, Some("free" | "less")) {
                self.intent.excluded_diets.insert(name.to_owned());
                return 2;
            }
            self.intent.add_diet(name);
            return 1;
        }
        if let Some(months) = self.lexicon.persona_age_months(word) {
            if self.intent.target_age_months.is_none() {
                self.intent.target_age_months = Some(months);
            }
            return 1;
        }
        if let Ok(marker) = word.parse::<PhMarker>() {
            self.intent.ph_goal = Some(ph_value(marker));
            self.reset();
            return 1;
        }
        if let Some(term) = self.lexicon.ph_term(word) {
            let Some(marker) = term.bare_marker() else {
                self.enter_ph(term.is_inverted());
                return 1;
            };
            self.intent.ph_goal = Some(ph_value(marker));
            self.reset();
            return 1;
        }
        if let Ok(marker) = word.parse::<OperatorMarker>() {
            match self.state.implicit_value.take() {
                Some(quantity) => self.state.queue.push((marker, quantity)),
                None => self.state.active_operator = Some(marker),
            }
            return 1;
        }
        if let Some(quantity) = words::number(word) {
            return self.number(quantity, words, idx);
        }
        if let Some(nutrient) = self.lexicon.nutrient(word) {
            return self.nutrient(nutrient.clone(), words, idx);
        }
        if NEGATION_TRIGGERS.contains(&word) {
            return self.negation(words, idx);
        }
        if QUALIFIERS.contains(&word) || self.lexicon.is_stop_word(word) {
            return 1;
        }
        if next == Some("free") && self.exclude_postfix(word) {
            self.reset();
            return 2;
        }
        let token = words::free_text_token(self.lexicon, word);
        log::trace!("free text {token:?}");
        self.intent.text_tokens.insert(token);
        self.reset();
        1
    }

    fn enter_ph(&mut self, inverted: bool) {
        let queued = resolve_queue(mem::take(&mut self.state.queue), |q| q.value);
        if queued.is_empty() {
            if let Some(quantity) = self.state.implicit_value.take() {
                self.intent.ph_goal = Some(around(quantity.value, PH_TOLERANCE));
            }
        } else {
            self.intent.ph_goal = drain_queue(&queued, inverted).pop().or(self.intent.ph_goal);
        }
        self.state.context = Context::Ph { inverted };
    }

    /// A unit written as its own word after a number, e.g. `1 g`.
    fn unit_word(&self, word: &str) -> Option<Unit> {
        if self.lexicon.nutrient(word).is_some() {
            return None;
        }
        word.parse::<Unit>().ok()
    }

    fn number(&mut self, mut quantity: Quantity, words: &[String], idx: usize) -> usize {
        let mut consumed = 1;
        if quantity.unit.is_none() {
            if let Some(unit) = words.get(idx + 1).and_then(|w| self.unit_word(w)) {
                quantity.unit = Some(unit);
                consumed += 1;
            }
        }
        let postfix = words
            .get(idx + consumed)
            .and_then(|w| w.parse::<OperatorMarker>().ok());
        let (value, inverted, tolerance) = match &self.state.context {
            Context::Nutrient(nutrient) => {
                (quantity.in_scale(nutrient.scale), false, NUTRIENT_TOLERANCE)
            }
            Context::Ph { inverted } => (quantity.value, *inverted, PH_TOLERANCE),
            Context::None => {
                match self.state.active_operator.take() {
                    Some(marker) => self.state.queue.push((marker, quantity)),
                    None => self.state.implicit_value = Some(quantity),
                }
                return consumed;
            }
        };
        let rule = match (self.state.active_operator.take(), postfix) {
            (Some(marker), _) => {
                ConstraintValue::from_comparison(comparison(marker, inverted), value, None)
            }
            (None, Some(marker)) => {
                consumed += 1;
                ConstraintValue::from_comparison(comparison(marker, inverted), value, None)
            }
            (None, None) => Some(around(value, tolerance)),
        };
        // The subject has its value; later numbers belong to the next one.
        match mem::take(&mut self.state.context) {
            Context::Nutrient(nutrient) => {
                if let Some(rule) = rule {
                    self.intent.add_goal(NutrientGoal::new(nutrient.id, rule));
                }
            }
            Context::Ph { .. } => self.intent.ph_goal = rule.or(self.intent.ph_goal),
            Context::None => {}
        }
        consumed
    }

    fn nutrient(&mut self, nutrient: Nutrient, words: &[String], idx: usize) -> usize {
        let next = words.get(idx + 1).map(String::as_str);
        let queued = resolve_queue(mem::take(&mut self.state.queue), |q| {
            q.in_scale(nutrient.scale)
        });
        if !queued.is_empty() {
            self.state.implicit_value = None;
            for rule in drain_queue(&queued, false) {
                self.intent
                    .add_goal(NutrientGoal::new(nutrient.id.clone(), rule));
            }
            return 1;
        }
        if let Some(quantity) = self.state.implicit_value.take() {
            let value = quantity.in_scale(nutrient.scale);
            self.intent
                .add_goal(NutrientGoal::new(nutrient.id, around(value, NUTRIENT_TOLERANCE)));
            return 1;
        }
        if let Some(rule) = self.previous.as_deref().and_then(qualifier_value) {
            self.intent.add_goal(NutrientGoal::new(nutrient.id, rule));
            return 1;
        }
        let following = words
            .get(idx + 1..)
            .unwrap_or_default()
            .iter()
            .find(|w| !self.lexicon.is_stop_word(w));
        if following
            .is_some_and(|w| words::number(w).is_some() || w.parse::<OperatorMarker>().is_ok())
        {
            self.state.context = Context::Nutrient(nutrient);
            return 1;
        }
        if matches!(next, Some("free" | "less")) {
            self.intent.add_goal(NutrientGoal::new(
                nutrient.id,
                ConstraintValue::StrictMax(NEGATED_NUTRIENT_MAX),
            ));
            return 2;
        }
        self.intent
            .add_goal(NutrientGoal::new(nutrient.id, ConstraintValue::High));
        1
    }

    fn negation(&mut self, words: &[String], idx: usize) -> usize {
        let mut target = idx + 1;
        while words
            .get(target)
            .is_some_and(|w| NEGATION_FILLERS.contains(&w.as_str()))
        {
            target += 1;
        }
        self.reset();
        let Some(word) = words.get(target) else {
            return target - idx;
        };
        self.exclude(word);
        target - idx + 1
    }

    fn dynamic_free_diet(&self, word: &str) -> Option<&'_ str> {
        let name = words::free_diet_name(word);
        self.dynamic_diets
            .iter()
            .find(|diet| diet.eq_ignore_ascii_case(&name))
            .map(String::as_str)
    }

    /// Exclusions shared by `no S` and `S free`.
    fn exclude_postfix(&mut self, word: &str) -> bool {
        if matches!(word, "allergen" | "allergens") {
            self.intent.exclude_all_allergens = true;
            return true;
        }
        if let Some(id) = self.lexicon.allergen(word) {
            self.intent.excluded_allergens.insert(id.clone());
            return true;
        }
        if let Some(name) = self.lexicon.ingredient_diet(word) {
            self.intent.add_diet(name);
            return true;
        }
        if let Some(name) = self.dynamic_free_diet(word).map(ToOwned::to_owned) {
            self.intent.add_diet(&name);
            return true;
        }
        false
    }

    fn exclude(&mut self, word: &str) {
        if matches!(word, "allergen" | "allergens") || self.lexicon.allergen(word).is_some() {
            self.exclude_postfix(word);
            return;
        }
        if let Some(name) = self.lexicon.diet(word) {
            self.intent.excluded_diets.insert(name.to_owned());
            return;
        }
        if self.exclude_postfix(word) {
            return;
        }
        if let Some(nutrient) = self.lexicon.nutrient(word) {
            let goal = NutrientGoal::new(
                nutrient.id.clone(),
                ConstraintValue::StrictMax(NEGATED_NUTRIENT_MAX),
            );
            self.intent.add_goal(goal);
            return;
        }
        let token = words::free_text_token(self.lexicon, word);
        log::trace!("negative token {token:?}");
        self.intent.negative_tokens.insert(token);
    }
}
