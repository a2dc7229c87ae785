//! Built-in English vocabulary.

use crate::{LexiconError, NutrientScale, OperatorMarker, PhMarker, PhTerm, Vocabulary};

impl Vocabulary {
    /// The built-in English vocabulary used by default.
    ///
    /// # Errors
    /// Returns [`LexiconError`] only if the built-in tables are inconsistent.
    ///
    /// # Examples
    /// ```
    /// use diet_query_lexicon::{Lexicon, Vocabulary};
    /// let vocab = Vocabulary::english().expect("built-in tables are consistent");
    /// assert_eq!(vocab.subject_alias("b12"), Some("vitamin b12"));
    /// ```
    pub fn english() -> Result<Self, LexiconError> {
        use NutrientScale::{Energy, Gram, Microgram, Milligram};
        use OperatorMarker::{Eq, Gt, Gte, Lt, Lte, Neq};

        Self::builder()
            .nutrient("protein", Gram, &["protein", "proteins"])
            .nutrient("fat", Gram, &["fat", "fats", "total fat"])
            .nutrient("saturated_fat", Gram, &["saturated fat", "sat fat"])
            .nutrient("trans_fat", Gram, &["trans fat"])
            .nutrient(
                "carbohydrates",
                Gram,
                &["carbohydrates", "carbohydrate", "carbs", "carb", "total carbohydrates"],
            )
            .nutrient("sugar", Gram, &["sugar", "sugars", "added sugar"])
            .nutrient("fiber", Gram, &["fiber", "fibre", "dietary fiber"])
            .nutrient("sodium", Milligram, &["sodium", "salt"])
            .nutrient("potassium", Milligram, &["potassium"])
            .nutrient("calcium", Milligram, &["calcium"])
            .nutrient("iron", Milligram, &["iron"])
            .nutrient("magnesium", Milligram, &["magnesium"])
            .nutrient("zinc", Milligram, &["zinc"])
            .nutrient("cholesterol", Milligram, &["cholesterol"])
            .nutrient("vitamin_c", Milligram, &["vitamin c"])
            .nutrient("vitamin_e", Milligram, &["vitamin e"])
            .nutrient("vitamin_b6", Milligram, &["vitamin b6"])
            .nutrient("vitamin_a", Microgram, &["vitamin a"])
            .nutrient("vitamin_d", Microgram, &["vitamin d"])
            .nutrient("vitamin_k", Microgram, &["vitamin k"])
            .nutrient("vitamin_b12", Microgram, &["vitamin b12"])
            .nutrient("folate", Microgram, &["folate", "folic acid"])
            .nutrient("calories", Energy, &["calories", "calorie", "kcal", "energy"])
            .subject_alias("b12", "vitamin b12")
            .subject_alias("b 12", "vitamin b12")
            .subject_alias("vit c", "vitamin c")
            .subject_alias("vit d", "vitamin d")
            .subject_alias("b6", "vitamin b6")
            .subject_alias("cals", "calories")
            .diet("Vegan", &["vegan", "plant based"])
            .diet("Vegetarian", &["vegetarian", "veggie"])
            .diet("Pescatarian", &["pescatarian", "pescetarian"])
            .diet("Keto", &["keto", "ketogenic"])
            .diet("Paleo", &["paleo"])
            .diet("Halal", &["halal"])
            .diet("Kosher", &["kosher"])
            .diet("Low-Carb", &["low carb", "low carbohydrate"])
            .diet("Gluten-Free", &["gluten free", "coeliac", "celiac"])
            .diet("Dairy-Free", &["dairy free", "lactose free"])
            .diet("Nut-Free", &["nut free"])
            .ingredient_diet("Vegetarian", &["meat", "beef", "pork", "chicken"])
            .ingredient_diet("Vegan", &["animal products"])
            .ingredient_diet("Dairy-Free", &["lactose"])
            .allergen("peanut", &["peanut", "peanuts"])
            .allergen("tree_nut", &["tree nut", "tree nuts", "nut", "nuts", "almond", "almonds"])
            .allergen("milk", &["milk", "dairy"])
            .allergen("egg", &["egg", "eggs"])
            .allergen("soy", &["soy", "soya"])
            .allergen("wheat", &["wheat", "gluten"])
            .allergen("fish", &["fish"])
            .allergen("shellfish", &["shellfish", "shrimp", "crab", "lobster"])
            .allergen("sesame", &["sesame"])
            .ph_term(PhTerm::Scale, &["ph"])
            .ph_term(PhTerm::Acidity, &["acid", "acidity"])
            .ph_term(PhTerm::Alkalinity, &["alkalinity"])
            .ph_term(PhTerm::Acidic, &["acidic"])
            .ph_term(PhTerm::Alkaline, &["alkaline", "alkalizing"])
            .ph_term(PhTerm::Neutral, &["neutral"])
            .ph_phrase(
                PhMarker::Alkaline,
                &[
                    "low acid",
                    "low acidity",
                    "no acid",
                    "acid free",
                    "non acidic",
                    "less acidic",
                    "high alkaline",
                    "high alkalinity",
                    "high ph",
                ],
            )
            .ph_phrase(
                PhMarker::Acidic,
                &[
                    "high acid",
                    "high acidity",
                    "very acidic",
                    "low alkaline",
                    "low alkalinity",
                    "low ph",
                ],
            )
            .ph_phrase(
                PhMarker::Neutral,
                &["neutral ph", "ph neutral", "balanced ph", "ph balanced"],
            )
            .operator_phrase(Neq, &["not equal to", "not equal"])
            .operator_phrase(
                Lte,
                &[
                    "no more than",
                    "not more than",
                    "at most",
                    "up to",
                    "or less",
                    "maximum",
                    "max",
                ],
            )
            .operator_phrase(
                Gte,
                &[
                    "no less than",
                    "not less than",
                    "at least",
                    "or more",
                    "minimum",
                    "min",
                ],
            )
            .operator_phrase(
                Gt,
                &["greater than", "more than", "higher than", "over", "above"],
            )
            .operator_phrase(
                Lt,
                &["less than", "fewer than", "lower than", "under", "below"],
            )
            .operator_phrase(Eq, &["equal to", "exactly"])
            .comparative(
                Lt,
                &["cheaper", "lighter", "smaller", "lower", "less", "fewer"],
            )
            .comparative(Gt, &["bigger", "larger", "heavier", "higher", "more", "greater"])
            .stop_words(&[
                "a", "an", "the", "and", "or", "but", "yet", "plus", "with", "for", "in", "of",
                "to", "is", "are", "some", "any", "my", "me", "i", "want", "need", "please",
                "food", "foods", "meal", "meals", "snack", "snacks", "content", "diet", "old",
                "g", "mg", "mcg", "ug", "gram", "grams", "percent", "_percent", "per", "serving",
                "that", "than",
            ])
            .persona("newborn", 1.0)
            .persona("infant", 6.0)
            .persona("baby", 9.0)
            .persona("toddler", 24.0)
            .persona("preschooler", 48.0)
            .persona("kid", 96.0)
            .persona("child", 96.0)
            .stem_exception("berries", "berry")
            .stem_exception("cherries", "cherry")
            .stem_exception("tomatoes", "tomato")
            .stem_exception("potatoes", "potato")
            .stem_exception("leaves", "leaf")
            .stem_exception("hummus", "hummus")
            .stem_exception("couscous", "couscous")
            .stem_exception("asparagus", "asparagus")
            .synonym("yoghurt", "yogurt")
            .synonym("aubergine", "eggplant")
            .synonym("courgette", "zucchini")
            .synonym("soda", "soft drink")
            .synonym("crisp", "chip")
            .build()
    }
}
