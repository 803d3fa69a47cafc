//! Ranked lexical search over the recipe corpus.

use crate::error::Result;
use crate::index::bm25::Bm25;
use crate::index::corpus::{self, Recipe};
use crate::normalizer::TextNormalizer;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// The recipe search index.
///
/// Built once from the corpus, immutable afterwards: the recipes, the
/// tokenized corpus and the BM25 statistics are all read-only shared state,
/// so concurrent `search`/`get_by_id` callers need no coordination. Picking
/// up a changed corpus means building a fresh index and swapping the
/// reference, never mutating this one in place.
pub struct RecipeIndex {
    normalizer: TextNormalizer,
    recipes: Vec<Recipe>,
    bm25: Bm25,
    by_id: HashMap<i64, usize>,
    skipped: usize,
}

impl RecipeIndex {
    /// Load the corpus from a CSV file and build the index.
    ///
    /// Fails when the corpus file is unreadable; malformed rows are skipped
    /// and reported via [`RecipeIndex::skipped`].
    pub fn load(path: impl AsRef<Path>, normalizer: TextNormalizer) -> Result<Self> {
        let load = corpus::load_corpus(path)?;
        Ok(Self::build(load.recipes, load.skipped, normalizer))
    }

    /// Build the index from an already-parsed recipe collection.
    pub fn from_recipes(recipes: Vec<Recipe>, normalizer: TextNormalizer) -> Self {
        Self::build(recipes, 0, normalizer)
    }

    fn build(recipes: Vec<Recipe>, skipped: usize, normalizer: TextNormalizer) -> Self {
        // One tokenized entry per recipe, positionally aligned: ingredient
        // tokens plus key terms from the title.
        let tokenized: Vec<Vec<String>> = recipes
            .iter()
            .map(|recipe| {
                let mut tokens = normalizer.tokenize_ingredients(&recipe.ingredients.join(", "));
                tokens.extend(normalizer.extract_key_terms(&recipe.title));
                tokens
            })
            .collect();

        let bm25 = Bm25::build(&tokenized);

        let mut by_id = HashMap::with_capacity(recipes.len());
        for (position, recipe) in recipes.iter().enumerate() {
            by_id.entry(recipe.id).or_insert(position);
        }

        info!("Built search index over {} recipes", recipes.len());

        Self {
            normalizer,
            recipes,
            bm25,
            by_id,
            skipped,
        }
    }

    /// Search for recipes matching the given ingredients.
    ///
    /// The query passes through the same normalizer as the corpus; the
    /// resulting tokens are deduplicated preserving first occurrence. An
    /// empty token set yields an empty result by policy. Otherwise every
    /// document is scored, sorted by descending score with ties keeping
    /// corpus order, and the top `k` are returned as copies with `score`
    /// populated. Zero-score entries are not filtered here; that policy
    /// belongs to the caller.
    pub fn search(&self, ingredients: &[String], k: usize) -> Vec<Recipe> {
        let normalized = self.normalizer.normalize_list(ingredients, true);

        let mut seen = HashSet::new();
        let query_tokens: Vec<String> = normalized
            .iter()
            .flat_map(|phrase| phrase.split_whitespace())
            .filter(|token| seen.insert(token.to_string()))
            .map(str::to_string)
            .collect();

        debug!("Query tokens: {:?}", query_tokens);

        if query_tokens.is_empty() {
            return Vec::new();
        }

        let scores = self.bm25.scores(&query_tokens);

        let mut order: Vec<usize> = (0..scores.len()).collect();
        // Stable sort: equal scores keep corpus insertion order
        order.sort_by(|&a, &b| {
            scores[b]
                .partial_cmp(&scores[a])
                .unwrap_or(Ordering::Equal)
        });
        order.truncate(k);

        order
            .into_iter()
            .map(|position| {
                let mut recipe = self.recipes[position].clone();
                recipe.score = Some(scores[position]);
                recipe
            })
            .collect()
    }

    /// Look up the stored recipe by id. The returned copy never carries a
    /// score.
    pub fn get_by_id(&self, id: i64) -> Option<&Recipe> {
        self.by_id.get(&id).map(|&position| &self.recipes[position])
    }

    /// Number of indexed recipes.
    pub fn count(&self) -> usize {
        self.recipes.len()
    }

    /// Number of corpus rows rejected at load time.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: i64, title: &str, ingredients: &[&str]) -> Recipe {
        Recipe {
            id,
            title: title.to_string(),
            ingredients: ingredients.iter().map(|i| i.to_string()).collect(),
            instructions: String::new(),
            cuisine: String::new(),
            tags: Vec::new(),
            time_minutes: None,
            score: None,
        }
    }

    fn sample_index() -> RecipeIndex {
        let normalizer = TextNormalizer::new(HashMap::new(), None);
        RecipeIndex::from_recipes(
            vec![
                recipe(1, "Chicken Rice", &["chicken breast", "rice", "soy sauce"]),
                recipe(2, "Tomato Pasta", &["tomato", "pasta", "basil"]),
            ],
            normalizer,
        )
    }

    #[test]
    fn test_search_ranks_by_overlap() {
        let index = sample_index();
        let query = vec!["chicken".to_string(), "rice".to_string()];

        let results = index.search(&query, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, 1);
        assert!(results[0].score.unwrap() > results[1].score.unwrap());
    }

    #[test]
    fn test_search_does_not_mutate_stored_recipes() {
        let index = sample_index();
        let results = index.search(&["chicken".to_string()], 10);
        assert!(results[0].score.is_some());

        // The stored copy is untouched
        assert!(index.get_by_id(1).unwrap().score.is_none());
    }

    #[test]
    fn test_search_empty_query_policy() {
        let index = sample_index();
        assert!(index.search(&[], 10).is_empty());
        assert!(index
            .search(&["".to_string(), "   ".to_string()], 10)
            .is_empty());
        // Fully-stopword queries carry no signal either
        assert!(index.search(&["salt to taste".to_string()], 10).is_empty());
    }

    #[test]
    fn test_search_top_k_bound() {
        let index = sample_index();
        let query = vec!["chicken".to_string()];

        assert!(index.search(&query, 0).is_empty());
        assert_eq!(index.search(&query, 1).len(), 1);
        assert_eq!(index.search(&query, 100).len(), 2);
    }

    #[test]
    fn test_search_deterministic() {
        let index = sample_index();
        let query = vec!["chicken".to_string(), "basil".to_string()];

        let first = index.search(&query, 10);
        let second = index.search(&query, 10);
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_ties_keep_corpus_order() {
        let normalizer = TextNormalizer::new(HashMap::new(), None);
        let index = RecipeIndex::from_recipes(
            vec![
                recipe(10, "Lentil Soup", &["lentil", "carrot"]),
                recipe(11, "Lentil Salad", &["lentil", "cucumber"]),
                recipe(12, "Carrot Cake", &["carrot", "flour"]),
            ],
            normalizer,
        );

        // Both lentil recipes have identical token statistics for this query
        let results = index.search(&["lentil".to_string()], 10);
        assert_eq!(results[0].id, 10);
        assert_eq!(results[1].id, 11);
    }

    #[test]
    fn test_search_includes_zero_score_documents() {
        let index = sample_index();
        let results = index.search(&["chicken".to_string()], 10);

        // The pasta recipe has no overlap but still appears with score 0
        assert_eq!(results.len(), 2);
        assert_eq!(results[1].id, 2);
        assert_eq!(results[1].score, Some(0.0));
    }

    #[test]
    fn test_title_terms_are_indexed() {
        let normalizer = TextNormalizer::new(HashMap::new(), None);
        let index = RecipeIndex::from_recipes(
            vec![
                recipe(1, "Shakshuka", &["egg", "tomato"]),
                recipe(2, "Omelette", &["egg", "butter"]),
            ],
            normalizer,
        );

        let results = index.search(&["shakshuka".to_string()], 10);
        assert_eq!(results[0].id, 1);
        assert!(results[0].score.unwrap() > 0.0);
    }

    #[test]
    fn test_get_by_id() {
        let index = sample_index();
        assert_eq!(index.get_by_id(1).unwrap().title, "Chicken Rice");
        assert!(index.get_by_id(999).is_none());
    }

    #[test]
    fn test_empty_index_search() {
        let normalizer = TextNormalizer::new(HashMap::new(), None);
        let index = RecipeIndex::from_recipes(Vec::new(), normalizer);

        assert_eq!(index.count(), 0);
        assert!(index.search(&["chicken".to_string()], 10).is_empty());
    }

    #[test]
    fn test_query_matches_quantified_ingredients() {
        let normalizer = TextNormalizer::new(HashMap::new(), None);
        let index = RecipeIndex::from_recipes(
            vec![recipe(1, "Tomato Soup", &["2 cups tomatoes", "1 onion"])],
            normalizer,
        );

        // Plural query form matches the quantity-stripped corpus tokens
        let results = index.search(&["Tomatoes".to_string()], 10);
        assert!(results[0].score.unwrap() > 0.0);
    }
}
