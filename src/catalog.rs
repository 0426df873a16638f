//! Catalog Filter
//!
//! Holds the static snippet list and derives the visible subset for a given
//! set of criteria. Every predicate here is a pure function of its inputs,
//! so the filter can be exercised without any terminal attached.

use crate::models::{ALL_LANGUAGES, FavoritesSet, FilterCriteria, Snippet};
use std::collections::BTreeSet;

/// Query predicate: case-insensitive substring of title, language, any tag,
/// or code. `query` must already be trimmed and lowercased.
pub fn matches_query(snippet: &Snippet, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    snippet.title.to_lowercase().contains(query)
        || snippet.language.to_lowercase().contains(query)
        || snippet.tags.iter().any(|t| t.to_lowercase().contains(query))
        || snippet.code.to_lowercase().contains(query)
}

/// Language predicate: the "All" sentinel, or an exact case-sensitive match.
pub fn matches_language(snippet: &Snippet, language: &str) -> bool {
    language == ALL_LANGUAGES || snippet.language == language
}

/// Tag predicate: every active tag must be on the snippet.
pub fn matches_tags(snippet: &Snippet, active_tags: &BTreeSet<String>) -> bool {
    active_tags.iter().all(|tag| snippet.has_tag(tag))
}

pub fn matches_favorites(snippet: &Snippet, only_favorites: bool, favorites: &FavoritesSet) -> bool {
    !only_favorites || favorites.contains(&snippet.id)
}

/// Conjunction of all four predicates.
pub fn matches(
    snippet: &Snippet,
    criteria: &FilterCriteria,
    query: &str,
    favorites: &FavoritesSet,
) -> bool {
    matches_query(snippet, query)
        && matches_language(snippet, &criteria.language)
        && matches_tags(snippet, &criteria.active_tags)
        && matches_favorites(snippet, criteria.only_favorites, favorites)
}

/// The full dataset plus the language and tag lists derived from it.
#[derive(Debug, Clone)]
pub struct Catalog {
    snippets: Vec<Snippet>,
    languages: Vec<String>,
    tags: Vec<String>,
}

impl Catalog {
    pub fn new(snippets: Vec<Snippet>) -> Self {
        let languages = derive_languages(&snippets);
        let tags = derive_tags(&snippets);
        Self {
            snippets,
            languages,
            tags,
        }
    }

    pub fn snippets(&self) -> &[Snippet] {
        &self.snippets
    }

    pub fn len(&self) -> usize {
        self.snippets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snippets.is_empty()
    }

    /// "All" followed by the sorted distinct languages.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Sorted distinct union of every snippet's tags.
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn get(&self, index: usize) -> Option<&Snippet> {
        self.snippets.get(index)
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Snippet> {
        self.snippets.iter().find(|s| s.id == id)
    }

    /// Exact id first, then a case-insensitive exact title.
    pub fn find_by_id_or_title(&self, needle: &str) -> Option<&Snippet> {
        self.find_by_id(needle).or_else(|| {
            let needle = needle.to_lowercase();
            self.snippets
                .iter()
                .find(|s| s.title.to_lowercase() == needle)
        })
    }

    /// Dataset indices of the visible snippets, in dataset order.
    pub fn filter_indices(&self, criteria: &FilterCriteria, favorites: &FavoritesSet) -> Vec<usize> {
        let query = criteria.normalized_query();
        self.snippets
            .iter()
            .enumerate()
            .filter(|(_, s)| matches(s, criteria, &query, favorites))
            .map(|(i, _)| i)
            .collect()
    }

    pub fn filter(&self, criteria: &FilterCriteria, favorites: &FavoritesSet) -> Vec<&Snippet> {
        self.filter_indices(criteria, favorites)
            .into_iter()
            .map(|i| &self.snippets[i])
            .collect()
    }
}

fn derive_languages(snippets: &[Snippet]) -> Vec<String> {
    let distinct: BTreeSet<&str> = snippets.iter().map(|s| s.language.as_str()).collect();
    std::iter::once(ALL_LANGUAGES.to_string())
        .chain(distinct.into_iter().map(str::to_string))
        .collect()
}

fn derive_tags(snippets: &[Snippet]) -> Vec<String> {
    let distinct: BTreeSet<&str> = snippets
        .iter()
        .flat_map(|s| s.tags.iter().map(String::as_str))
        .collect();
    distinct.into_iter().map(str::to_string).collect()
}

/// Remembers the last filter inputs and their result.
#[derive(Debug, Default)]
pub struct FilterMemo {
    key: Option<(FilterCriteria, FavoritesSet)>,
    indices: Vec<usize>,
    recomputations: usize,
}

impl FilterMemo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached indices, recomputing only if the inputs changed.
    pub fn get(
        &mut self,
        catalog: &Catalog,
        criteria: &FilterCriteria,
        favorites: &FavoritesSet,
    ) -> &[usize] {
        let fresh = matches!(&self.key, Some((c, f)) if c == criteria && f == favorites);
        if !fresh {
            self.indices = catalog.filter_indices(criteria, favorites);
            self.key = Some((criteria.clone(), favorites.clone()));
            self.recomputations += 1;
        }
        &self.indices
    }

    pub fn recomputations(&self) -> usize {
        self.recomputations
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Catalog {
        Catalog::new(vec![
            Snippet::new("a", "Bubble", "Python", &["sort"], "def bubble(xs): pass"),
            Snippet::new("b", "Slice sort", "Go", &["sort", "cli"], "sort.Slice(xs, less)"),
            Snippet::new("c", "Read file", "Rust", &[], "std::fs::read_to_string(p)"),
        ])
    }

    fn ids(snippets: Vec<&Snippet>) -> Vec<&str> {
        snippets.into_iter().map(|s| s.id.as_str()).collect()
    }

    #[test]
    fn default_criteria_show_everything_in_order() {
        let catalog = sample();
        let result = catalog.filter(&FilterCriteria::default(), &FavoritesSet::new());
        assert_eq!(ids(result), vec!["a", "b", "c"]);
    }

    #[test]
    fn query_matches_each_field() {
        let catalog = sample();
        let cases = [
            ("bubble", vec!["a"]),
            ("RUST", vec!["c"]),
            ("cli", vec!["b"]),
            ("read_to_string", vec!["c"]),
            ("   ", vec!["a", "b", "c"]),
        ];
        for (query, expected) in cases {
            let criteria = FilterCriteria {
                query: query.to_string(),
                ..Default::default()
            };
            let result = catalog.filter(&criteria, &FavoritesSet::new());
            assert_eq!(ids(result), expected, "query {:?}", query);
        }
    }

    #[test]
    fn language_match_is_exact_and_case_sensitive() {
        let catalog = sample();
        let criteria = FilterCriteria {
            language: "go".to_string(),
            ..Default::default()
        };
        assert!(catalog.filter(&criteria, &FavoritesSet::new()).is_empty());

        let criteria = FilterCriteria {
            language: "Go".to_string(),
            ..Default::default()
        };
        assert_eq!(ids(catalog.filter(&criteria, &FavoritesSet::new())), vec!["b"]);
    }

    #[test]
    fn active_tags_are_a_conjunction() {
        let catalog = sample();
        let mut criteria = FilterCriteria::default();
        criteria.toggle_tag("sort");
        criteria.toggle_tag("cli");
        assert_eq!(ids(catalog.filter(&criteria, &FavoritesSet::new())), vec!["b"]);
    }

    #[test]
    fn derived_lists_are_sorted_and_distinct() {
        let catalog = sample();
        assert_eq!(catalog.languages(), ["All", "Go", "Python", "Rust"]);
        assert_eq!(catalog.tags(), ["cli", "sort"]);
    }

    #[test]
    fn lookup_by_title_ignores_case() {
        let catalog = sample();
        assert_eq!(catalog.find_by_id_or_title("read FILE").map(|s| s.id.as_str()), Some("c"));
        assert_eq!(catalog.find_by_id_or_title("b").map(|s| s.id.as_str()), Some("b"));
        assert!(catalog.find_by_id_or_title("nope").is_none());
    }

    #[test]
    fn memo_recomputes_only_on_changed_inputs() {
        let catalog = sample();
        let mut memo = FilterMemo::new();
        let mut criteria = FilterCriteria::default();
        let favorites = FavoritesSet::new();

        assert_eq!(memo.get(&catalog, &criteria, &favorites).len(), 3);
        assert_eq!(memo.get(&catalog, &criteria, &favorites).len(), 3);
        assert_eq!(memo.recomputations(), 1);

        criteria.language = "Rust".to_string();
        assert_eq!(memo.get(&catalog, &criteria, &favorites), &[2]);
        assert_eq!(memo.recomputations(), 2);
    }
}
