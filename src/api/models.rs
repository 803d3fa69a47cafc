use crate::index::Recipe;
use serde::{Deserialize, Serialize};

/// Search request parameters
#[derive(Debug, Clone, Deserialize)]
pub struct SearchParams {
    /// Comma-separated ingredient names
    #[serde(default)]
    pub ingredients: String,
    pub limit: Option<usize>,
}

/// Search response
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub recipes: Vec<Recipe>,
    pub query_ingredients: Vec<String>,
    pub total_results: usize,
}

/// Suggestion request body
#[derive(Debug, Clone, Deserialize)]
pub struct SuggestRequest {
    pub ingredients: Vec<String>,
    pub max_results: Option<usize>,
}

/// Where a suggestion response came from: the generator, the local index,
/// or nowhere (both stages came up empty).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestionSource {
    Generated,
    Index,
    None,
}

/// Suggestion response, tagged with its source so callers can apply their
/// own merge policy.
#[derive(Debug, Clone, Serialize)]
pub struct SuggestResponse {
    pub source: SuggestionSource,
    pub recipes: Vec<Recipe>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub recipes_loaded: usize,
    pub skipped_records: usize,
    pub generator_enabled: bool,
}
