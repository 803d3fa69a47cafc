pub mod config;
pub mod error;

// Normalization and search core
pub mod index;
pub mod normalizer;

// External recipe generation
pub mod generate;

// HTTP API
pub mod api;

// CLI
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
pub use index::{Recipe, RecipeIndex};
pub use normalizer::TextNormalizer;
