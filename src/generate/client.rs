use crate::generate::config::GeneratorConfig;
use crate::generate::models::{
    ChatMessage, ChatRequest, ChatResponse, GeneratedRecipe, GeneratedRecipes, ResponseFormat,
};
use crate::index::Recipe;
use crate::{Error, Result};
use reqwest::{header, Client, StatusCode};
use tracing::{debug, warn};

/// Ids for generated recipes start well above the corpus range so the two
/// never collide in caller-side merges.
const GENERATED_ID_OFFSET: i64 = 1000;

/// Client for the external recipe generation API.
#[derive(Clone)]
pub struct RecipeGenerator {
    client: Client,
    config: GeneratorConfig,
}

impl RecipeGenerator {
    /// Create a new generator client. Fails when no API key is configured.
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Config("Generator API key not configured".to_string()))?;

        let mut headers = header::HeaderMap::new();
        let auth_value = format!("Bearer {api_key}");
        let mut auth_header = header::HeaderValue::from_str(&auth_value)
            .map_err(|e| Error::Config(format!("Invalid generator API key: {e}")))?;
        auth_header.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth_header);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    /// Generate up to `max_recipes` recipes featuring the given ingredients.
    ///
    /// Transport failures and unusable payloads surface as errors; the
    /// caller owns the fallback decision.
    pub async fn generate(&self, ingredients: &[String], max_recipes: usize) -> Result<Vec<Recipe>> {
        if ingredients.is_empty() {
            return Ok(Vec::new());
        }

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: "You are a professional chef and recipe creator. \
                              Generate practical, delicious recipes in JSON format."
                        .to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: build_prompt(ingredients, max_recipes),
                },
            ],
            temperature: 0.8,
            max_tokens: 2000,
            response_format: ResponseFormat {
                format: "json_object".to_string(),
            },
        };

        let url = format!("{}/chat/completions", self.config.api_url);
        debug!("Generator request: POST {} (model {})", url, self.config.model);

        let response = self.client.post(&url).json(&request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unreadable error body".to_string());
            return Err(match status {
                StatusCode::UNAUTHORIZED => {
                    Error::Generate("Generator authentication failed".to_string())
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    Error::Generate("Generator rate limit exceeded".to_string())
                }
                _ => Error::Generate(format!("Generator API error {status}: {body}")),
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| Error::Generate("Generator returned no choices".to_string()))?;

        let generated = parse_generated(content)?;

        let recipes = generated
            .into_iter()
            .take(max_recipes)
            .enumerate()
            .map(|(idx, entry)| into_recipe(entry, idx, ingredients))
            .collect::<Vec<_>>();

        debug!("Generator produced {} recipes", recipes.len());
        Ok(recipes)
    }
}

fn build_prompt(ingredients: &[String], max_recipes: usize) -> String {
    format!(
        "Generate {max_recipes} delicious recipes using these ingredients: {}\n\n\
         For each recipe, provide:\n\
         1. A creative title\n\
         2. Full list of ingredients (including the ones provided plus any additional needed)\n\
         3. Step-by-step cooking instructions\n\
         4. Cuisine type\n\
         5. Relevant tags (e.g. quick, vegetarian, healthy, comfort)\n\
         6. Estimated cooking time in minutes\n\n\
         Format your response as a JSON object with a \"recipes\" array, where each \
         entry has the keys \"title\", \"ingredients\", \"instructions\", \"cuisine\", \
         \"tags\" and \"time_minutes\".\n\n\
         Make the recipes practical and ensure they prominently feature the provided \
         ingredients.",
        ingredients.join(", ")
    )
}

/// Parse the model's JSON payload leniently: a `{\"recipes\": [..]}` object,
/// a bare array, or a single recipe object all work.
fn parse_generated(content: &str) -> Result<Vec<GeneratedRecipe>> {
    if let Ok(wrapped) = serde_json::from_str::<GeneratedRecipes>(content) {
        return Ok(wrapped.recipes);
    }
    if let Ok(list) = serde_json::from_str::<Vec<GeneratedRecipe>>(content) {
        return Ok(list);
    }
    if let Ok(single) = serde_json::from_str::<GeneratedRecipe>(content) {
        return Ok(vec![single]);
    }

    warn!("Unparsable generator payload: {content}");
    Err(Error::Generate(
        "Generator returned unparsable recipe payload".to_string(),
    ))
}

fn into_recipe(entry: GeneratedRecipe, idx: usize, query_ingredients: &[String]) -> Recipe {
    Recipe {
        id: GENERATED_ID_OFFSET + idx as i64,
        title: entry.title.unwrap_or_else(|| "Untitled Recipe".to_string()),
        ingredients: entry
            .ingredients
            .unwrap_or_else(|| query_ingredients.to_vec()),
        instructions: entry.instructions.unwrap_or_default(),
        cuisine: entry.cuisine.unwrap_or_else(|| "International".to_string()),
        tags: entry.tags.unwrap_or_default(),
        time_minutes: entry.time_minutes,
        // Generated recipes are purpose-built for the query
        score: Some(1.0),
    }
}
