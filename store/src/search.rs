use crate::types::Recipe;

/// Quick-filter tags offered next to the search box.
pub const SUGGESTED_TAGS: [&str; 10] = [
    "breakfast",
    "lunch",
    "dinner",
    "vegetarian",
    "vegan",
    "healthy",
    "quick",
    "dessert",
    "gluten-free",
    "italian",
];

/// Case-insensitive substring search over name, description, tags and
/// ingredients. A blank query returns every recipe. Results keep collection
/// order.
pub fn search_recipes<'a>(recipes: &'a [Recipe], query: &str) -> Vec<&'a Recipe> {
    if query.trim().is_empty() {
        return recipes.iter().collect();
    }
    let needle = query.to_lowercase();
    recipes.iter().filter(|r| matches(r, &needle)).collect()
}

fn matches(recipe: &Recipe, needle: &str) -> bool {
    let hit = |s: &str| s.to_lowercase().contains(needle);
    hit(&recipe.name)
        || hit(&recipe.description)
        || recipe.tags.iter().any(|t| hit(t))
        || recipe.ingredients.iter().any(|i| hit(i))
}

/// Join free text and active tag filters into one query, skipping empty parts.
pub fn compose_query<S: AsRef<str>>(text: &str, active_tags: &[S]) -> String {
    std::iter::once(text)
        .chain(active_tags.iter().map(AsRef::as_ref))
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_skips_empty_parts() {
        assert_eq!(compose_query("", &["vegan"]), "vegan");
        assert_eq!(compose_query("toast", &["quick", "healthy"]), "toast quick healthy");
        assert_eq!(compose_query::<&str>("toast", &[]), "toast");
        assert_eq!(compose_query::<&str>("", &[]), "");
    }

    #[test]
    fn whitespace_query_returns_everything() {
        let recipes = crate::sample::recipes();
        assert_eq!(search_recipes(&recipes, "   ").len(), recipes.len());
    }

    #[test]
    fn query_is_not_trimmed_for_matching() {
        let recipes = crate::sample::recipes();
        // " toast" occurs only inside "Avocado Toast".
        let hits = search_recipes(&recipes, " toast");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "1");
    }
}
