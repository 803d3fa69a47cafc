use crate::config::Settings;
use crate::index::RecipeIndex;
use crate::normalizer::TextNormalizer;
use crate::Result;

/// Build the index from the configured corpus.
fn build_index(settings: &Settings) -> Result<RecipeIndex> {
    let normalizer = TextNormalizer::from_synonyms_file(&settings.data.synonyms_path);
    RecipeIndex::load(&settings.data.recipes_path, normalizer)
}

/// Run one query against the corpus and print the ranked results.
pub fn search(settings: &Settings, ingredients: &[String], limit: Option<usize>) -> Result<()> {
    let limit = limit
        .unwrap_or(settings.search.default_limit)
        .min(settings.search.max_limit);

    let index = build_index(settings)?;
    let results = index.search(ingredients, limit);

    if results.is_empty() {
        println!("No matching recipes for: {}", ingredients.join(", "));
        return Ok(());
    }

    println!("Results for: {}\n", ingredients.join(", "));
    for (rank, recipe) in results.iter().enumerate() {
        println!(
            "{:>3}. [{:>6.3}] {} ({})",
            rank + 1,
            recipe.score.unwrap_or(0.0),
            recipe.title,
            if recipe.cuisine.is_empty() {
                "unknown cuisine"
            } else {
                recipe.cuisine.as_str()
            }
        );
        if let Some(time) = recipe.time_minutes {
            println!("     {} minutes", time);
        }
    }

    Ok(())
}

/// Print corpus statistics.
pub fn stats(settings: &Settings) -> Result<()> {
    let index = build_index(settings)?;

    println!("Corpus: {:?}", settings.data.recipes_path);
    println!("  Recipes indexed: {}", index.count());
    println!("  Rows skipped:    {}", index.skipped());

    Ok(())
}
