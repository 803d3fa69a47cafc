use axum::{
    extract::{Path, Query, State},
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    api::models::*,
    generate::RecipeGenerator,
    index::{Recipe, RecipeIndex},
    Error, Result,
};

/// Shared application state
///
/// The index is behind an `Arc` and read-only after startup; rebuilding it
/// means constructing a new `RecipeIndex` and swapping the reference.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<RecipeIndex>,
    pub generator: Option<RecipeGenerator>,
    pub settings: crate::config::Settings,
}

/// GET /api/search - Rank recipes from the local index
pub async fn search_recipes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>> {
    debug!("Search request: {:?}", params);

    let ingredients: Vec<String> = params
        .ingredients
        .split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect();

    let limit = params
        .limit
        .unwrap_or(state.settings.search.default_limit)
        .min(state.settings.search.max_limit);

    // An empty or fully-stopword query yields an empty result, not an error
    let recipes = state.index.search(&ingredients, limit);
    let total_results = recipes.len();

    Ok(Json(SearchResponse {
        recipes,
        query_ingredients: ingredients,
        total_results,
    }))
}

/// POST /api/suggest - Two-stage suggestion pipeline
///
/// Stage one asks the generator (when configured); a non-empty result wins.
/// Stage two falls back to the local index with the configured score floor.
/// The response is tagged with the stage that produced it.
pub async fn suggest_recipes(
    State(state): State<AppState>,
    Json(request): Json<SuggestRequest>,
) -> Result<Json<SuggestResponse>> {
    if request.ingredients.iter().all(|item| item.trim().is_empty()) {
        return Err(Error::Validation("No ingredients provided".to_string()));
    }

    let limit = request
        .max_results
        .unwrap_or(state.settings.search.default_limit)
        .min(state.settings.search.max_limit);

    let (source, recipes) = resolve_suggestion(&state, &request.ingredients, limit).await;

    let total_results = recipes.len();
    Ok(Json(SuggestResponse {
        source,
        recipes,
        total_results,
    }))
}

async fn resolve_suggestion(
    state: &AppState,
    ingredients: &[String],
    limit: usize,
) -> (SuggestionSource, Vec<Recipe>) {
    if let Some(generator) = &state.generator {
        match generator.generate(ingredients, limit).await {
            Ok(recipes) if !recipes.is_empty() => {
                return (SuggestionSource::Generated, recipes);
            }
            Ok(_) => debug!("Generator returned no recipes, falling back to index"),
            Err(e) => warn!("Generator failed, falling back to index: {e}"),
        }
    }

    let min_score = state.settings.search.min_score;
    let recipes: Vec<Recipe> = state
        .index
        .search(ingredients, limit)
        .into_iter()
        .filter(|recipe| recipe.score.unwrap_or(0.0) >= min_score)
        .collect();

    if recipes.is_empty() {
        (SuggestionSource::None, recipes)
    } else {
        (SuggestionSource::Index, recipes)
    }
}

/// GET /api/recipes/:id - Get recipe details
pub async fn get_recipe(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Recipe>> {
    debug!("Get recipe request: {}", id);

    state
        .index
        .get_by_id(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| Error::NotFound(format!("Recipe {id} not found")))
}

/// GET /health - Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Result<Json<HealthResponse>> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        recipes_loaded: state.index.count(),
        skipped_records: state.index.skipped(),
        generator_enabled: state.generator.is_some(),
    }))
}
