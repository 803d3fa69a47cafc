use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    pub recipes_path: PathBuf,
    pub synonyms_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    /// Score floor applied by the suggestion pipeline to local fallback
    /// results. The index itself never filters.
    pub min_score: f64,
}

impl Settings {
    /// Load settings from environment variables
    pub fn from_env() -> Result<Self> {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid PORT value".to_string()))?;

        let max_request_body_size = std::env::var("MAX_REQUEST_BODY_SIZE")
            .unwrap_or_else(|_| "1048576".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_REQUEST_BODY_SIZE value".to_string()))?;

        let recipes_path = std::env::var("RECIPES_PATH")
            .unwrap_or_else(|_| "./data/recipes.csv".to_string())
            .into();

        let synonyms_path = std::env::var("SYNONYMS_PATH")
            .unwrap_or_else(|_| "./data/synonyms.json".to_string())
            .into();

        let default_limit = std::env::var("DEFAULT_LIMIT")
            .unwrap_or_else(|_| "20".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid DEFAULT_LIMIT value".to_string()))?;

        let max_limit = std::env::var("MAX_LIMIT")
            .unwrap_or_else(|_| "100".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MAX_LIMIT value".to_string()))?;

        let min_score = std::env::var("MIN_SCORE")
            .unwrap_or_else(|_| "0.5".to_string())
            .parse()
            .map_err(|_| Error::Config("Invalid MIN_SCORE value".to_string()))?;

        Ok(Settings {
            server: ServerConfig {
                host,
                port,
                max_request_body_size,
            },
            data: DataConfig {
                recipes_path,
                synonyms_path,
            },
            search: SearchConfig {
                default_limit,
                max_limit,
                min_score,
            },
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(Error::Config("Port must be non-zero".to_string()));
        }

        if self.search.max_limit == 0 {
            return Err(Error::Config("MAX_LIMIT must be non-zero".to_string()));
        }

        if self.search.default_limit > self.search.max_limit {
            return Err(Error::Config(
                "DEFAULT_LIMIT must not exceed MAX_LIMIT".to_string(),
            ));
        }

        if self.search.min_score < 0.0 {
            return Err(Error::Config("MIN_SCORE must be non-negative".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_settings() -> Settings {
        Settings {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
                max_request_body_size: 1048576,
            },
            data: DataConfig {
                recipes_path: "/tmp/recipes.csv".into(),
                synonyms_path: "/tmp/synonyms.json".into(),
            },
            search: SearchConfig {
                default_limit: 20,
                max_limit: 100,
                min_score: 0.5,
            },
        }
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = test_settings();
        assert!(settings.validate().is_ok());

        settings.server.port = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_limit_validation() {
        let mut settings = test_settings();
        settings.search.default_limit = 500;
        assert!(settings.validate().is_err());

        let mut settings = test_settings();
        settings.search.min_score = -1.0;
        assert!(settings.validate().is_err());
    }
}
