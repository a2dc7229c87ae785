//! Table-backed [`Lexicon`] implementation and its builder.

use hashbrown::{HashMap, HashSet};

use crate::{
    AllergenId, Lexicon, LexiconError, Nutrient, NutrientScale, OperatorMarker, PhMarker, PhTerm,
};

/// Normalise a lookup key: lowercase, `_`/`-` as spaces, single spaces.
///
/// # Examples
/// ```
/// use diet_query_lexicon::normalize_key;
/// assert_eq!(normalize_key("Vitamin_C"), "vitamin c");
/// assert_eq!(normalize_key("  gluten-free "), "gluten free");
/// ```
#[must_use]
pub fn normalize_key(word: &str) -> String {
    word.to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Immutable vocabulary produced by [`VocabularyBuilder`].
#[derive(Debug, Clone, Default)]
pub struct Vocabulary {
    nutrients: HashMap<String, Nutrient>,
    nutrient_phrases: Vec<String>,
    diets: HashMap<String, String>,
    ingredient_diets: HashMap<String, String>,
    diet_phrases: Vec<String>,
    allergens: HashMap<String, AllergenId>,
    ph_terms: HashMap<String, PhTerm>,
    ph_phrases: Vec<(String, PhMarker)>,
    operator_phrases: Vec<(String, OperatorMarker)>,
    comparatives: Vec<(String, OperatorMarker)>,
    stop_words: HashSet<String>,
    personas: HashMap<String, f64>,
    stems: HashMap<String, String>,
    synonyms: HashMap<String, String>,
    aliases: HashMap<String, String>,
}

impl Vocabulary {
    /// Start an empty builder.
    #[must_use]
    pub fn builder() -> VocabularyBuilder {
        VocabularyBuilder::default()
    }

    /// Number of nutrient keys (words and phrases).
    #[must_use]
    pub fn nutrient_key_count(&self) -> usize {
        self.nutrients.len()
    }
}

/// Incremental builder for a [`Vocabulary`].
///
/// Every method normalises its keys with [`normalize_key`]. The first
/// conflicting or empty key is remembered and reported by
/// [`build`](Self::build).
///
/// # Examples
/// ```
/// use diet_query_lexicon::{Lexicon, NutrientScale, Vocabulary};
///
/// let vocab = Vocabulary::builder()
///     .nutrient("protein", NutrientScale::Gram, &["protein", "proteins"])
///     .diet("Vegan", &["vegan", "plant based"])
///     .build()
///     .expect("example vocabulary is consistent");
/// assert_eq!(vocab.diet("plant_based"), Some("Vegan"));
/// assert_eq!(vocab.diet_phrases(), ["plant based".to_owned()]);
/// ```
#[derive(Debug, Default)]
pub struct VocabularyBuilder {
    vocab: Vocabulary,
    error: Option<LexiconError>,
}

fn insert_unique<V: Clone + PartialEq>(
    map: &mut HashMap<String, V>,
    table: &'static str,
    key: String,
    value: V,
    describe: impl Fn(&V) -> String,
) -> Result<(), LexiconError> {
    if key.is_empty() {
        return Err(LexiconError::EmptyKey { table });
    }
    match map.get(&key) {
        Some(existing) if *existing != value => Err(LexiconError::ConflictingKey {
            table,
            existing: describe(existing),
            incoming: describe(&value),
            key,
        }),
        Some(_) => Ok(()),
        None => {
            map.insert(key, value);
            Ok(())
        }
    }
}

fn push_phrase(phrases: &mut Vec<String>, key: &str) {
    if key.contains(' ') && !phrases.iter().any(|p| p == key) {
        phrases.push(key.to_owned());
    }
}

/// Longest phrases first so alternations prefer the most specific match.
fn sort_longest_first<T>(items: &mut [T], key: impl Fn(&T) -> &str) {
    items.sort_by(|a, b| {
        let (a, b) = (key(a), key(b));
        b.split(' ')
            .count()
            .cmp(&a.split(' ').count())
            .then_with(|| b.len().cmp(&a.len()))
            .then_with(|| a.cmp(b))
    });
}

impl VocabularyBuilder {
    fn record(&mut self, result: Result<(), LexiconError>) {
        if let Err(err) = result {
            if self.error.is_none() {
                self.error = Some(err);
            }
        }
    }

    /// Register a nutrient under each of `words`.
    #[must_use]
    pub fn nutrient(mut self, id: &str, scale: NutrientScale, words: &[&str]) -> Self {
        for word in words {
            let key = normalize_key(word);
            push_phrase(&mut self.vocab.nutrient_phrases, &key);
            let result = insert_unique(
                &mut self.vocab.nutrients,
                "nutrient",
                key,
                Nutrient::new(id, scale),
                |n| n.id.to_string(),
            );
            self.record(result);
        }
        self
    }

    /// Register a diet display name under each keyword or synonym.
    #[must_use]
    pub fn diet(mut self, name: &str, words: &[&str]) -> Self {
        for word in words {
            let key = normalize_key(word);
            push_phrase(&mut self.vocab.diet_phrases, &key);
            let result = insert_unique(
                &mut self.vocab.diets,
                "diet",
                key,
                name.to_owned(),
                Clone::clone,
            );
            self.record(result);
        }
        self
    }

    /// Register ingredients whose exclusion implies the diet `name`.
    #[must_use]
    pub fn ingredient_diet(mut self, name: &str, ingredients: &[&str]) -> Self {
        for word in ingredients {
            let result = insert_unique(
                &mut self.vocab.ingredient_diets,
                "ingredient diet",
                normalize_key(word),
                name.to_owned(),
                Clone::clone,
            );
            self.record(result);
        }
        self
    }

    /// Register an allergen under each alias.
    #[must_use]
    pub fn allergen(mut self, id: &str, aliases: &[&str]) -> Self {
        for word in aliases {
            let result = insert_unique(
                &mut self.vocab.allergens,
                "allergen",
                normalize_key(word),
                AllergenId::from(id),
                ToString::to_string,
            );
            self.record(result);
        }
        self
    }

    /// Register acidity words with their role.
    #[must_use]
    pub fn ph_term(mut self, term: PhTerm, words: &[&str]) -> Self {
        for word in words {
            let result = insert_unique(
                &mut self.vocab.ph_terms,
                "ph term",
                normalize_key(word),
                term,
                |t| format!("{t:?}"),
            );
            self.record(result);
        }
        self
    }

    /// Register multi-word acidity idioms resolving to `marker`.
    #[must_use]
    pub fn ph_phrase(mut self, marker: PhMarker, phrases: &[&str]) -> Self {
        for phrase in phrases {
            let key = normalize_key(phrase);
            if key.is_empty() {
                self.record(Err(LexiconError::EmptyKey { table: "ph phrase" }));
                continue;
            }
            self.vocab.ph_phrases.push((key, marker));
        }
        self
    }

    /// Register operator phrases resolving to `marker`.
    #[must_use]
    pub fn operator_phrase(mut self, marker: OperatorMarker, phrases: &[&str]) -> Self {
        for phrase in phrases {
            let key = normalize_key(phrase);
            if key.is_empty() {
                self.record(Err(LexiconError::EmptyKey {
                    table: "operator phrase",
                }));
                continue;
            }
            self.vocab.operator_phrases.push((key, marker));
        }
        self
    }

    /// Register comparative adjectives that act as `marker` before a number.
    #[must_use]
    pub fn comparative(mut self, marker: OperatorMarker, words: &[&str]) -> Self {
        for word in words {
            let key = normalize_key(word);
            if key.is_empty() {
                self.record(Err(LexiconError::EmptyKey {
                    table: "comparative",
                }));
                continue;
            }
            self.vocab.comparatives.push((key, marker));
        }
        self
    }

    /// Register stop words.
    #[must_use]
    pub fn stop_words(mut self, words: &[&str]) -> Self {
        self.vocab
            .stop_words
            .extend(words.iter().map(|w| normalize_key(w)));
        self
    }

    /// Register a persona word implying a consumer age in months.
    #[must_use]
    pub fn persona(mut self, word: &str, months: f64) -> Self {
        let result = insert_unique(
            &mut self.vocab.personas,
            "persona",
            normalize_key(word),
            months,
            ToString::to_string,
        );
        self.record(result);
        self
    }

    /// Register an irregular stem.
    #[must_use]
    pub fn stem_exception(mut self, word: &str, stem: &str) -> Self {
        let result = insert_unique(
            &mut self.vocab.stems,
            "stem",
            normalize_key(word),
            stem.to_owned(),
            Clone::clone,
        );
        self.record(result);
        self
    }

    /// Register a free-text synonym.
    #[must_use]
    pub fn synonym(mut self, word: &str, preferred: &str) -> Self {
        let result = insert_unique(
            &mut self.vocab.synonyms,
            "synonym",
            normalize_key(word),
            preferred.to_owned(),
            Clone::clone,
        );
        self.record(result);
        self
    }

    /// Register a subject alias such as `b12` → `vitamin b12`.
    #[must_use]
    pub fn subject_alias(mut self, alias: &str, canonical: &str) -> Self {
        let result = insert_unique(
            &mut self.vocab.aliases,
            "subject alias",
            normalize_key(alias),
            normalize_key(canonical),
            Clone::clone,
        );
        self.record(result);
        self
    }

    /// Finish the vocabulary.
    ///
    /// # Errors
    /// Returns the first [`LexiconError`] recorded while adding entries.
    pub fn build(self) -> Result<Vocabulary, LexiconError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut vocab = self.vocab;
        sort_longest_first(&mut vocab.nutrient_phrases, String::as_str);
        sort_longest_first(&mut vocab.diet_phrases, String::as_str);
        sort_longest_first(&mut vocab.ph_phrases, |(p, _)| p.as_str());
        sort_longest_first(&mut vocab.operator_phrases, |(p, _)| p.as_str());
        sort_longest_first(&mut vocab.comparatives, |(p, _)| p.as_str());
        log::debug!(
            "built vocabulary with {} nutrient keys, {} diet keys, {} allergen keys",
            vocab.nutrients.len(),
            vocab.diets.len(),
            vocab.allergens.len()
        );
        Ok(vocab)
    }
}

impl Lexicon for Vocabulary {
    fn nutrient(&self, word: &str) -> Option<&Nutrient> {
        self.nutrients.get(&normalize_key(word))
    }

    fn nutrient_phrases(&self) -> &[String] {
        &self.nutrient_phrases
    }

    fn diet(&self, word: &str) -> Option<&str> {
        self.diets.get(&normalize_key(word)).map(String::as_str)
    }

    fn ingredient_diet(&self, word: &str) -> Option<&str> {
        self.ingredient_diets
            .get(&normalize_key(word))
            .map(String::as_str)
    }

    fn diet_phrases(&self) -> &[String] {
        &self.diet_phrases
    }

    fn allergen(&self, word: &str) -> Option<&AllergenId> {
        self.allergens.get(&normalize_key(word))
    }

    fn ph_term(&self, word: &str) -> Option<PhTerm> {
        self.ph_terms.get(&normalize_key(word)).copied()
    }

    fn ph_phrases(&self) -> &[(String, PhMarker)] {
        &self.ph_phrases
    }

    fn operator_phrases(&self) -> &[(String, OperatorMarker)] {
        &self.operator_phrases
    }

    fn comparative_adjectives(&self) -> &[(String, OperatorMarker)] {
        &self.comparatives
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(&normalize_key(word))
    }

    fn persona_age_months(&self, word: &str) -> Option<f64> {
        self.personas.get(&normalize_key(word)).copied()
    }

    fn stem_exception(&self, word: &str) -> Option<&str> {
        self.stems.get(&normalize_key(word)).map(String::as_str)
    }

    fn synonym(&self, word: &str) -> Option<&str> {
        self.synonyms.get(&normalize_key(word)).map(String::as_str)
    }

    fn subject_alias(&self, word: &str) -> Option<&str> {
        self.aliases.get(&normalize_key(word)).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SubjectKind;

    fn build(builder: VocabularyBuilder) -> Vocabulary {
        builder
            .build()
            .unwrap_or_else(|err| panic!("vocabulary should build: {err}"))
    }

    #[test]
    fn lookups_ignore_case_and_separators() {
        let vocab = build(Vocabulary::builder().nutrient(
            "vitamin_c",
            NutrientScale::Milligram,
            &["vitamin c"],
        ));
        assert!(vocab.nutrient("Vitamin_C").is_some());
        assert!(vocab.nutrient("vitamin-c").is_some());
        assert_eq!(vocab.nutrient_phrases(), ["vitamin c".to_owned()]);
    }

    #[test]
    fn reports_conflicting_keys() {
        let result = Vocabulary::builder()
            .allergen("milk", &["dairy"])
            .allergen("lactose", &["dairy"])
            .build();
        let Err(err) = result else {
            panic!("conflicting allergen aliases should fail");
        };
        assert_eq!(
            err,
            LexiconError::ConflictingKey {
                table: "allergen",
                key: "dairy".into(),
                existing: "milk".into(),
                incoming: "lactose".into(),
            }
        );
    }

    #[test]
    fn repeated_identical_entries_are_accepted() {
        let vocab = build(
            Vocabulary::builder()
                .diet("Vegan", &["vegan"])
                .diet("Vegan", &["vegan"]),
        );
        assert_eq!(vocab.diet("vegan"), Some("Vegan"));
    }

    #[test]
    fn reports_empty_keys() {
        let result = Vocabulary::builder().diet("Vegan", &[" - "]).build();
        assert_eq!(result.err(), Some(LexiconError::EmptyKey { table: "diet" }));
    }

    #[test]
    fn phrases_are_sorted_longest_first() {
        let vocab = build(
            Vocabulary::builder()
                .operator_phrase(OperatorMarker::Gt, &["more than"])
                .operator_phrase(OperatorMarker::Lte, &["no more than", "max"]),
        );
        let phrases: Vec<&str> = vocab
            .operator_phrases()
            .iter()
            .map(|(p, _)| p.as_str())
            .collect();
        assert_eq!(phrases, ["no more than", "more than", "max"]);
    }

    #[test]
    fn classify_prefers_nutrients_over_allergens() {
        let vocab = build(
            Vocabulary::builder()
                .nutrient("sugar", NutrientScale::Gram, &["sugar"])
                .allergen("sugar", &["sugar"])
                .ph_term(PhTerm::Acidity, &["acid"])
                .diet("Vegan", &["vegan"]),
        );
        assert_eq!(
            vocab.classify("sugar"),
            SubjectKind::Nutrient("sugar".into())
        );
        assert_eq!(vocab.classify("acid"), SubjectKind::Ph);
        assert_eq!(vocab.classify("vegan"), SubjectKind::Diet("Vegan".into()));
        assert_eq!(vocab.classify("tomato"), SubjectKind::Unknown);
        assert!(!vocab.is_recognized_subject("tomato"));
    }
}
