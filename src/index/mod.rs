// Recipe corpus loading, BM25 statistics and ranked search

pub mod bm25;
pub mod corpus;
pub mod search;

// Re-exports
pub use bm25::Bm25;
pub use corpus::{load_corpus, CorpusLoad, Recipe, RecordError};
pub use search::RecipeIndex;
