//! Recipe corpus loading.
//!
//! The corpus is a CSV file with the columns `id`, `title`, `ingredients`,
//! `instructions`, `cuisine`, `tags` and `time_minutes`. Ingredient and tag
//! cells hold comma-separated lists. A missing file is fatal; a malformed
//! row is skipped with a warning and counted, never fatal.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// A recipe as stored in the corpus.
///
/// `score` is populated only on search results; stored recipes never carry
/// it and search never mutates the stored copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: i64,
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub cuisine: String,
    pub tags: Vec<String>,
    pub time_minutes: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// Why a corpus row was rejected. Rows failing with any of these are
/// skipped and counted; the rest of the corpus still loads.
#[derive(Error, Debug)]
pub enum RecordError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid id: {0:?}")]
    InvalidId(String),

    #[error("unreadable row: {0}")]
    Unreadable(#[from] csv::Error),
}

/// Raw CSV row before strict validation. Every field is optional here so
/// that validation can name exactly what is missing.
#[derive(Debug, Deserialize)]
struct RecipeRow {
    id: Option<String>,
    title: Option<String>,
    ingredients: Option<String>,
    instructions: Option<String>,
    cuisine: Option<String>,
    tags: Option<String>,
    time_minutes: Option<String>,
}

/// Result of loading a corpus: the parsed recipes plus the number of rows
/// that were rejected along the way.
#[derive(Debug)]
pub struct CorpusLoad {
    pub recipes: Vec<Recipe>,
    pub skipped: usize,
}

fn required<'a>(field: &'a Option<String>, name: &'static str) -> std::result::Result<&'a str, RecordError> {
    match field.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RecordError::MissingField(name)),
    }
}

fn split_list(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

impl RecipeRow {
    /// Strict parse of one row into a [`Recipe`].
    ///
    /// `id`, `title` and `ingredients` are required; `instructions`,
    /// `cuisine` and `tags` default to empty; `time_minutes` is parsed
    /// leniently, with unparsable values becoming `None` rather than
    /// rejecting the row.
    fn parse(self) -> std::result::Result<Recipe, RecordError> {
        let id_raw = required(&self.id, "id")?;
        let id = id_raw
            .parse::<i64>()
            .map_err(|_| RecordError::InvalidId(id_raw.to_string()))?;

        let title = required(&self.title, "title")?.to_string();
        let ingredients = split_list(required(&self.ingredients, "ingredients")?);
        if ingredients.is_empty() {
            return Err(RecordError::MissingField("ingredients"));
        }

        let instructions = self.instructions.unwrap_or_default().trim().to_string();
        let cuisine = self.cuisine.unwrap_or_default().trim().to_string();
        let tags = self.tags.as_deref().map(split_list).unwrap_or_default();
        let time_minutes = self
            .time_minutes
            .as_deref()
            .and_then(|value| value.trim().parse::<u32>().ok());

        Ok(Recipe {
            id,
            title,
            ingredients,
            instructions,
            cuisine,
            tags,
            time_minutes,
            score: None,
        })
    }
}

/// Load all recipes from a CSV file.
///
/// Fails with [`crate::Error::CorpusNotFound`] when the file cannot be opened.
/// Malformed rows are logged and counted in [`CorpusLoad::skipped`].
pub fn load_corpus(path: impl AsRef<Path>) -> Result<CorpusLoad> {
    let path = path.as_ref();

    let reader = std::fs::File::open(path)
        .map_err(|_| crate::Error::CorpusNotFound(path.to_path_buf()))?;
    let mut reader = csv::Reader::from_reader(reader);

    let mut recipes = Vec::new();
    let mut skipped = 0usize;

    for (row, result) in reader.deserialize::<RecipeRow>().enumerate() {
        let parsed = result
            .map_err(RecordError::from)
            .and_then(RecipeRow::parse);

        match parsed {
            Ok(recipe) => recipes.push(recipe),
            Err(e) => {
                warn!("Skipping corpus row {}: {e}", row + 1);
                skipped += 1;
            }
        }
    }

    info!("Loaded {} recipes from {:?} ({skipped} skipped)", recipes.len(), path);

    Ok(CorpusLoad { recipes, skipped })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "id,title,ingredients,instructions,cuisine,tags,time_minutes\n";

    fn write_corpus(rows: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{HEADER}{rows}").unwrap();
        file
    }

    #[test]
    fn test_load_valid_corpus() {
        let file = write_corpus(
            "1,Chicken Rice,\"chicken breast, rice, soy sauce\",Cook it.,asian,\"dinner, quick\",30\n\
             2,Tomato Pasta,\"tomato, pasta, basil\",Boil it.,italian,dinner,25\n",
        );

        let load = load_corpus(file.path()).unwrap();
        assert_eq!(load.recipes.len(), 2);
        assert_eq!(load.skipped, 0);

        let first = &load.recipes[0];
        assert_eq!(first.id, 1);
        assert_eq!(first.ingredients, vec!["chicken breast", "rice", "soy sauce"]);
        assert_eq!(first.tags, vec!["dinner", "quick"]);
        assert_eq!(first.time_minutes, Some(30));
        assert!(first.score.is_none());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let result = load_corpus("/nonexistent/recipes.csv");
        assert!(matches!(result, Err(crate::Error::CorpusNotFound(_))));
    }

    #[test]
    fn test_malformed_rows_are_skipped() {
        let file = write_corpus(
            "1,Chicken Rice,\"chicken, rice\",Cook.,asian,dinner,30\n\
             not-a-number,Bad Row,\"flour\",Mix.,,,\n\
             2,Tomato Pasta,\"tomato, pasta\",Boil.,italian,dinner,25\n",
        );

        let load = load_corpus(file.path()).unwrap();
        assert_eq!(load.recipes.len(), 2);
        assert_eq!(load.skipped, 1);
        assert_eq!(load.recipes[1].id, 2);
    }

    #[test]
    fn test_missing_title_is_skipped() {
        let file = write_corpus("1,,\"rice\",Cook.,,,\n");

        let load = load_corpus(file.path()).unwrap();
        assert!(load.recipes.is_empty());
        assert_eq!(load.skipped, 1);
    }

    #[test]
    fn test_unparsable_time_is_lenient() {
        let file = write_corpus("1,Soup,\"leek, potato\",Simmer.,french,,about an hour\n");

        let load = load_corpus(file.path()).unwrap();
        assert_eq!(load.recipes.len(), 1);
        assert_eq!(load.recipes[0].time_minutes, None);
    }

    #[test]
    fn test_empty_optional_fields_default() {
        let file = write_corpus("7,Plain Rice,rice,,,,\n");

        let load = load_corpus(file.path()).unwrap();
        let recipe = &load.recipes[0];
        assert_eq!(recipe.instructions, "");
        assert_eq!(recipe.cuisine, "");
        assert!(recipe.tags.is_empty());
        assert!(recipe.time_minutes.is_none());
    }
}
