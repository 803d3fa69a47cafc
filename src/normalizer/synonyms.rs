use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

/// Load the synonym table from a JSON object file (phrase -> replacement).
///
/// A missing or unreadable file is not fatal: matching still works without
/// synonyms, so we log a warning and return an empty table. Keys are
/// lowercased on load because lookups happen after lowercasing.
pub fn load_synonyms(path: impl AsRef<Path>) -> HashMap<String, String> {
    let path = path.as_ref();

    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Synonyms file not found at {:?}: {e}", path);
            return HashMap::new();
        }
    };

    match serde_json::from_str::<HashMap<String, String>>(&contents) {
        Ok(table) => {
            let table: HashMap<String, String> = table
                .into_iter()
                .map(|(k, v)| (k.to_lowercase(), v.to_lowercase()))
                .collect();
            info!("Loaded {} synonym mappings from {:?}", table.len(), path);
            table
        }
        Err(e) => {
            warn!("Failed to parse synonyms file {:?}: {e}", path);
            HashMap::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_synonyms() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Scallion": "green onion", "capsicum": "bell pepper"}}"#).unwrap();

        let table = load_synonyms(file.path());
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("scallion").unwrap(), "green onion");
    }

    #[test]
    fn test_missing_file_is_empty_table() {
        let table = load_synonyms("/nonexistent/synonyms.json");
        assert!(table.is_empty());
    }

    #[test]
    fn test_malformed_file_is_empty_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let table = load_synonyms(file.path());
        assert!(table.is_empty());
    }
}
