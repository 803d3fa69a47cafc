//! Ingredient text canonicalization.
//!
//! Every piece of text that enters the search index and every query string
//! must pass through the same [`TextNormalizer`], otherwise index-side and
//! query-side vocabularies drift apart and matching silently degrades.

pub mod lemma;
pub mod synonyms;

pub use synonyms::load_synonyms;

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Whole-string plural forms folded to their singular before lemmatization.
const PLURAL_MAP: &[(&str, &str)] = &[
    ("tomatoes", "tomato"),
    ("potatoes", "potato"),
    ("onions", "onion"),
    ("peppers", "pepper"),
    ("mushrooms", "mushroom"),
    ("beans", "bean"),
    ("peas", "pea"),
    ("carrots", "carrot"),
    ("eggs", "egg"),
    ("noodles", "noodle"),
];

/// Domain stopwords that carry no matching signal in recipes.
const DEFAULT_STOPWORDS: &[&str] = &[
    "water", "salt", "pepper", "oil", "optional", "to", "taste", "fresh", "dried", "ground",
];

/// Canonicalizes free-form ingredient and title text into the token
/// vocabulary the index is built over.
///
/// Construction compiles the regexes and loads the synonym table once; the
/// normalizer is immutable afterwards, so normalization is a pure function
/// of its input for the lifetime of the process.
pub struct TextNormalizer {
    synonyms: HashMap<String, String>,
    stopwords: HashSet<String>,
    plurals: HashMap<&'static str, &'static str>,
    punctuation: Regex,
    quantity: Regex,
    fraction: Regex,
    number: Regex,
}

impl TextNormalizer {
    /// Create a normalizer from an explicit synonym table.
    ///
    /// `stopwords` overrides the default ingredient stopword set when given.
    pub fn new(synonyms: HashMap<String, String>, stopwords: Option<HashSet<String>>) -> Self {
        let stopwords = stopwords
            .unwrap_or_else(|| DEFAULT_STOPWORDS.iter().map(|s| s.to_string()).collect());

        Self {
            synonyms,
            stopwords,
            plurals: PLURAL_MAP.iter().copied().collect(),
            // Everything except word chars, whitespace and hyphens becomes a
            // space; hyphens keep compounds like "stir-fry" intact.
            punctuation: Regex::new(r"[^\w\s-]").unwrap(),
            quantity: Regex::new(r"(?i)\d+(\.\d+)?\s*(cup|tbsp|tsp|oz|lb|g|kg|ml|l)s?\b").unwrap(),
            fraction: Regex::new(r"\d+/\d+").unwrap(),
            number: Regex::new(r"\d+").unwrap(),
        }
    }

    /// Create a normalizer with synonyms loaded from a JSON file.
    ///
    /// A missing synonyms file degrades to an empty table (see
    /// [`synonyms::load_synonyms`]).
    pub fn from_synonyms_file(path: impl AsRef<Path>) -> Self {
        Self::new(load_synonyms(path), None)
    }

    /// Normalize a single text string to its canonical form.
    ///
    /// Lowercases, strips punctuation (keeping hyphens), collapses
    /// whitespace, applies whole-phrase synonym and plural substitution,
    /// lemmatizes word by word and optionally drops stopwords. Returns an
    /// empty string for empty or fully-stopword input.
    pub fn normalize(&self, text: &str, remove_stopwords: bool) -> String {
        let text = text.to_lowercase();
        let text = self.punctuation.replace_all(&text, " ");
        let mut text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        // Whole-phrase substitutions only: "scallion" -> "green onion" must
        // not fire inside a longer phrase.
        if let Some(replacement) = self.synonyms.get(&text) {
            text = replacement.clone();
        }

        if let Some(singular) = self.plurals.get(text.as_str()) {
            text = (*singular).to_string();
        }

        let words = text
            .split_whitespace()
            .map(lemma::lemmatize)
            .filter(|w| !remove_stopwords || !self.stopwords.contains(w))
            .collect::<Vec<_>>();

        words.join(" ")
    }

    /// Normalize each item independently, preserving order and count.
    ///
    /// Items that normalize to empty stay in the output as empty strings;
    /// callers that need alignment with the input rely on this.
    pub fn normalize_list(&self, items: &[String], remove_stopwords: bool) -> Vec<String> {
        items
            .iter()
            .map(|item| self.normalize(item, remove_stopwords))
            .collect()
    }

    /// Tokenize a comma-separated ingredients string for indexing.
    ///
    /// Each segment is stripped of quantity/unit patterns ("2 cups",
    /// "200g"), bare fractions ("1/2") and leftover bare numbers before
    /// normalization with stopword removal. Segments that normalize to
    /// empty are discarded; the surviving segments' words are flattened
    /// into one token sequence.
    pub fn tokenize_ingredients(&self, ingredients: &str) -> Vec<String> {
        let mut tokens = Vec::new();

        for segment in ingredients.split(',') {
            let segment = self.quantity.replace_all(segment.trim(), "");
            let segment = self.fraction.replace_all(&segment, "");
            let segment = self.number.replace_all(&segment, "");

            let normalized = self.normalize(&segment, true);
            if !normalized.is_empty() {
                tokens.extend(normalized.split_whitespace().map(str::to_string));
            }
        }

        tokens
    }

    /// Extract key terms from running text (titles), dropping tokens of
    /// length two or less.
    pub fn extract_key_terms(&self, text: &str) -> Vec<String> {
        self.normalize(text, true)
            .split_whitespace()
            .filter(|w| w.len() > 2)
            .map(str::to_string)
            .collect()
    }
}
