/// Configuration for the external recipe generation service.
///
/// The generator is optional: without an API key the service runs on the
/// local index alone.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub api_key: Option<String>,
    pub api_url: String,
    pub model: String,
    pub timeout_seconds: u64,
}

impl GeneratorConfig {
    /// Load generator configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GENERATOR_API_KEY").ok().filter(|k| !k.is_empty()),
            api_url: std::env::var("GENERATOR_API_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            model: std::env::var("GENERATOR_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            timeout_seconds: std::env::var("GENERATOR_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(30),
        }
    }

    /// The generator is enabled only when an API key is configured.
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }
}
