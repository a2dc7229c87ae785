//! Negation scope for the constraint mapper.
//!
//! Decides whether a subject is negated within the text its constraint was
//! read from. This is a phrase table plus one proximity rule, not a parse:
//! every accepted phrasing is listed in [`NEGATION_FORMS`], so extending it
//! never touches the mapper.

/// Accepted negated phrasings; `{s}` stands for the subject.
pub const NEGATION_FORMS: &[&str] = &[
    "no {s}",
    "no {s}s",
    "without {s}",
    "{s} free",
    "{s}-free",
    "{s}free",
    "free of {s}",
    "free from {s}",
    "not {s}",
    "non {s}",
    "non-{s}",
];

/// How far before the subject a bare `no` may sit.
pub const PROXIMITY_WINDOW: usize = 12;

/// Words that end the reach of a preceding `no`.
const SCOPE_BREAKERS: &[&str] = &["but", "and", "or", "with", "yet", "plus", "high", "rich", "more"];

fn words_of(text: &str) -> Vec<String> {
    text.to_lowercase()
        .chars()
        .map(|c| match c {
            '_' => ' ',
            c if c.is_alphanumeric() || c == '-' || c == '.' => c,
            _ => ' ',
        })
        .collect::<String>()
        .split_whitespace()
        .map(|w| w.trim_matches('.').to_owned())
        .filter(|w| !w.is_empty())
        .collect()
}

fn is_number(word: &str) -> bool {
    word.starts_with(|c: char| c.is_ascii_digit())
}

fn contains_words(haystack: &[String], needle: &[&str]) -> bool {
    !needle.is_empty()
        && haystack
            .windows(needle.len())
            .any(|window| window.iter().zip(needle).all(|(a, b)| a == b))
}

fn proximity_negated(words: &[String], subject: &[&str]) -> bool {
    let Some(first) = subject.first() else {
        return false;
    };
    words.iter().enumerate().any(|(idx, word)| {
        let starts_subject = word == first
            && words
                .get(idx..idx + subject.len())
                .is_some_and(|window| window.iter().zip(subject).all(|(a, b)| a == b));
        if !starts_subject {
            return false;
        }
        words
            .get(idx.saturating_sub(PROXIMITY_WINDOW)..idx)
            .unwrap_or_default()
            .iter()
            .rev()
            .take_while(|w| !SCOPE_BREAKERS.contains(&w.as_str()) && !is_number(w))
            .any(|w| w == "no")
    })
}

/// Whether `subject` is negated in `text`.
///
/// Each form in [`NEGATION_FORMS`] is tried as a whole-word phrase. Failing
/// those, a `no` up to [`PROXIMITY_WINDOW`] words before the subject counts
/// when only filler words separate the two; a scope breaker such as `but`
/// or `high`, or a number, in between cancels it.
///
/// # Examples
/// ```
/// use diet_query::is_negated;
/// assert!(is_negated("no added sugar", "sugar"));
/// assert!(is_negated("gluten-free", "gluten"));
/// assert!(!is_negated("no sugar but salt", "salt"));
/// ```
#[must_use]
pub fn is_negated(text: &str, subject: &str) -> bool {
    let words = words_of(text);
    let subject = words_of(subject).join(" ");
    if subject.is_empty() {
        return false;
    }
    let matched_form = NEGATION_FORMS.iter().any(|form| {
        let phrase = form.replace("{s}", &subject);
        let needle: Vec<&str> = phrase.split(' ').collect();
        contains_words(&words, &needle)
    });
    if matched_form {
        return true;
    }
    let subject_words: Vec<&str> = subject.split(' ').collect();
    proximity_negated(&words, &subject_words)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("no sugar", "sugar")]
    #[case("no peanuts", "peanut")]
    #[case("without sodium", "sodium")]
    #[case("sugar free", "sugar")]
    #[case("sugar-free", "sugar")]
    #[case("sugarfree", "sugar")]
    #[case("free of sugar", "sugar")]
    #[case("free from gluten", "gluten")]
    #[case("not vegan", "vegan")]
    #[case("non dairy", "dairy")]
    #[case("non-dairy", "dairy")]
    #[case("no vitamin_c", "vitamin c")]
    #[case("no added refined sugar", "sugar")]
    #[case("No, really, no sugar.", "sugar")]
    fn accepts_negated_phrasings(#[case] text: &str, #[case] subject: &str) {
        assert!(is_negated(text, subject), "{text:?} should negate {subject:?}");
    }

    #[rstest]
    #[case("sugar", "sugar")]
    #[case("high sugar", "sugar")]
    #[case("sugar no", "sugar")]
    #[case("no sugar but salt", "salt")]
    #[case("no fat and sodium", "sodium")]
    #[case("no sugar high protein", "protein")]
    #[case("no 5 sugar", "sugar")]
    #[case("nonsense sugar", "sugar")]
    #[case("notable sugar", "sugar")]
    #[case("free sugar", "sugar")]
    fn rejects_unnegated_phrasings(#[case] text: &str, #[case] subject: &str) {
        assert!(!is_negated(text, subject), "{text:?} should not negate {subject:?}");
    }

    #[test]
    fn proximity_window_is_bounded() {
        let filler = ["x"; PROXIMITY_WINDOW].join(" ");
        assert!(is_negated(&format!("no {filler} sugar").replace(" x sugar", " sugar"), "sugar"));
        assert!(!is_negated(&format!("no {filler} sugar"), "sugar"));
    }
}
