//! Word-level helpers for the tokenizer.

use diet_query_lexicon::{Lexicon, NutrientScale, Unit};

use crate::capture::split_number;

/// Words that resolve the nutrient right after them to a qualitative goal.
pub(crate) const QUALIFIERS: &[&str] = &[
    "low", "lower", "less", "fewer", "reduced", "light", "lite", "little", "lowest", "least",
    "high", "higher", "more", "rich", "extra", "lots", "plenty", "increased", "highest", "most",
];

/// Words that negate the next meaningful word.
pub(crate) const NEGATION_TRIGGERS: &[&str] = &[
    "no", "without", "free", "exclude", "excluding", "avoid", "non", "not", "zero",
];

/// Words skipped between a negation trigger and its target.
pub(crate) const NEGATION_FILLERS: &[&str] = &["of", "from", "any", "added", "the"];

/// Split normalised text into words over `[a-z0-9_.]`, trimming edge dots.
pub(crate) fn split_words(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '.'))
        .map(|w| w.trim_matches('.'))
        .filter(|w| !w.is_empty())
        .map(str::to_owned)
        .collect()
}

/// A number read from the query together with the unit written after it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Quantity {
    pub(crate) value: f64,
    pub(crate) unit: Option<Unit>,
}

impl Quantity {
    /// The value expressed in the storage unit of `scale`.
    pub(crate) fn in_scale(self, scale: NutrientScale) -> f64 {
        self.unit
            .map_or(self.value, |unit| unit.convert(self.value, scale))
    }
}

/// A number with an optional unit or `_percent` suffix.
pub(crate) fn number(word: &str) -> Option<Quantity> {
    let (value, suffix) = split_number(word)?;
    if suffix.is_empty() {
        return Some(Quantity { value, unit: None });
    }
    let unit = suffix.parse::<Unit>().ok()?;
    Some(Quantity {
        value,
        unit: Some(unit),
    })
}

fn light_stem(word: &str) -> String {
    if word.len() > 4 {
        if let Some(base) = word.strip_suffix("ies") {
            return format!("{base}y");
        }
    }
    if let Some(base) = word.strip_suffix("oes") {
        return format!("{base}o");
    }
    let keeps_s = ["ss", "us", "is"].iter().any(|end| word.ends_with(end));
    if word.len() > 3 && !keeps_s {
        if let Some(base) = word.strip_suffix('s') {
            return base.to_owned();
        }
    }
    word.to_owned()
}

/// Stem a free-text word and apply the preferred spelling.
pub(crate) fn free_text_token(lexicon: &dyn Lexicon, word: &str) -> String {
    let stem = lexicon
        .stem_exception(word)
        .map_or_else(|| light_stem(word), ToOwned::to_owned);
    lexicon.synonym(&stem).map_or(stem, ToOwned::to_owned)
}

/// Capitalised `<Word>-Free` diet name, e.g. `nightshade` → `Nightshade-Free`.
pub(crate) fn free_diet_name(word: &str) -> String {
    let mut chars = word.chars();
    let capitalised: String = chars
        .next()
        .map(|first| first.to_uppercase().chain(chars).collect())
        .unwrap_or_default();
    format!("{capitalised}-Free")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::english;
    use rstest::rstest;

    #[test]
    fn splits_on_restricted_characters() {
        assert_eq!(
            split_words("sugar, _op_lte_ 5.5 vitamin_c. (e.g.)"),
            ["sugar", "_op_lte_", "5.5", "vitamin_c", "e.g"]
        );
    }

    #[rstest]
    #[case("5", Some((5.0, None)))]
    #[case("2.5g", Some((2.5, Some(Unit::Gram))))]
    #[case("10_percent", Some((10.0, Some(Unit::Percent))))]
    #[case("300mg", Some((300.0, Some(Unit::Milligram))))]
    #[case("3d", None)]
    #[case("b12", None)]
    fn reads_numbers_with_units(#[case] word: &str, #[case] expected: Option<(f64, Option<Unit>)>) {
        assert_eq!(number(word).map(|q| (q.value, q.unit)), expected);
    }

    #[test]
    fn quantities_convert_into_the_nutrient_scale() {
        let grams = number("1g").unwrap_or_else(|| panic!("1g is a quantity"));
        assert!((grams.in_scale(NutrientScale::Milligram) - 1000.0).abs() < 1e-9);
        let bare = number("1").unwrap_or_else(|| panic!("1 is a quantity"));
        assert!((bare.in_scale(NutrientScale::Milligram) - 1.0).abs() < 1e-9);
    }

    #[rstest]
    #[case("berries", "berry")]
    #[case("candies", "candy")]
    #[case("mangoes", "mango")]
    #[case("apples", "apple")]
    #[case("hummus", "hummus")]
    #[case("glass", "glass")]
    #[case("yoghurts", "yogurt")]
    #[case("oats", "oat")]
    fn stems_free_text(#[case] word: &str, #[case] expected: &str) {
        assert_eq!(free_text_token(&english(), word), expected);
    }

    #[test]
    fn builds_free_diet_names() {
        assert_eq!(free_diet_name("nightshade"), "Nightshade-Free");
    }
}
