//! Noun-oriented lemmatization for ingredient tokens.
//!
//! Reduces plural forms to their singular dictionary base form using an
//! irregular table plus suffix substitution rules. Verb suffixes are left
//! alone: ingredient vocabulary is overwhelmingly nominal, and stripping
//! -ing/-ed produces non-words ("dressing" -> "dress").

/// Irregular plurals that the suffix rules would mangle.
const IRREGULAR: &[(&str, &str)] = &[
    ("tomatoes", "tomato"),
    ("potatoes", "potato"),
    ("heroes", "hero"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("halves", "half"),
    ("knives", "knife"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("geese", "goose"),
];

fn is_vowel(b: u8) -> bool {
    matches!(b, b'a' | b'e' | b'i' | b'o' | b'u')
}

fn has_vowel(s: &str) -> bool {
    s.bytes().any(is_vowel)
}

/// Lemmatize a single lowercase word.
///
/// Rules, in order:
/// - irregular table lookup
/// - "-sses" -> "-ss" (glasses -> glass)
/// - "-shes" -> "-sh" (radishes -> radish), "-ches" -> "-ch" (peaches -> peach)
/// - "-xes" -> "-x", "-zes" -> "-z" (boxes -> box)
/// - "-ies" -> "-y" for words longer than four chars (berries -> berry,
///   but pies -> pie via the plain -s rule)
/// - plain "-s" unless the word ends in "-ss", "-us" or "-is"
///   (couscous, hummus and friends keep their s)
///
/// The output of every rule is a fixed point of the function, so repeated
/// application never drifts.
pub fn lemmatize(word: &str) -> String {
    if word.len() < 3 {
        return word.to_string();
    }

    if let Some((_, singular)) = IRREGULAR.iter().find(|(plural, _)| *plural == word) {
        return (*singular).to_string();
    }

    let len = word.len();

    if len > 4 && word.ends_with("sses") {
        return word[..len - 2].to_string();
    }

    if len > 4 && (word.ends_with("shes") || word.ends_with("ches")) {
        return word[..len - 2].to_string();
    }

    if len > 3 && (word.ends_with("xes") || word.ends_with("zes")) {
        return word[..len - 2].to_string();
    }

    if len > 4 && word.ends_with("ies") {
        return format!("{}y", &word[..len - 3]);
    }

    if word.ends_with('s')
        && !word.ends_with("ss")
        && !word.ends_with("us")
        && !word.ends_with("is")
    {
        let stem = &word[..len - 1];
        if has_vowel(stem) {
            return stem.to_string();
        }
    }

    word.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_plural() {
        assert_eq!(lemmatize("carrots"), "carrot");
        assert_eq!(lemmatize("cups"), "cup");
        assert_eq!(lemmatize("noodles"), "noodle");
    }

    #[test]
    fn test_ies_plural() {
        assert_eq!(lemmatize("berries"), "berry");
        assert_eq!(lemmatize("anchovies"), "anchovy");
        // Too short for the -ies rule, falls through to -s
        assert_eq!(lemmatize("pies"), "pie");
    }

    #[test]
    fn test_es_plurals() {
        assert_eq!(lemmatize("boxes"), "box");
        assert_eq!(lemmatize("radishes"), "radish");
        assert_eq!(lemmatize("peaches"), "peach");
        assert_eq!(lemmatize("glasses"), "glass");
    }

    #[test]
    fn test_irregulars() {
        assert_eq!(lemmatize("tomatoes"), "tomato");
        assert_eq!(lemmatize("potatoes"), "potato");
        assert_eq!(lemmatize("leaves"), "leaf");
    }

    #[test]
    fn test_protected_endings() {
        assert_eq!(lemmatize("couscous"), "couscous");
        assert_eq!(lemmatize("hummus"), "hummus");
        assert_eq!(lemmatize("asparagus"), "asparagus");
    }

    #[test]
    fn test_short_words_untouched() {
        assert_eq!(lemmatize("is"), "is");
        assert_eq!(lemmatize("a"), "a");
    }

    #[test]
    fn test_fixed_point() {
        for word in ["tomatoes", "berries", "boxes", "carrots", "rice", "egg"] {
            let once = lemmatize(word);
            assert_eq!(lemmatize(&once), once, "not a fixed point: {word}");
        }
    }
}
