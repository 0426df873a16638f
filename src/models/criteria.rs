use std::collections::BTreeSet;

/// Language selector value that disables the language predicate.
pub const ALL_LANGUAGES: &str = "All";

/// The combination of search and filter inputs that decides which snippets
/// are visible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    pub query: String,
    pub language: String,
    pub active_tags: BTreeSet<String>,
    pub only_favorites: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            query: String::new(),
            language: ALL_LANGUAGES.to_string(),
            active_tags: BTreeSet::new(),
            only_favorites: false,
        }
    }
}

impl FilterCriteria {
    /// Trimmed, lowercased query; empty means "match everything".
    pub fn normalized_query(&self) -> String {
        self.query.trim().to_lowercase()
    }

    pub fn is_tag_active(&self, tag: &str) -> bool {
        self.active_tags.contains(tag)
    }

    /// Adds the tag if absent, removes it if present.
    pub fn toggle_tag(&mut self, tag: &str) {
        if !self.active_tags.remove(tag) {
            self.active_tags.insert(tag.to_string());
        }
    }

    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggling_a_tag_twice_restores_the_set() {
        let mut criteria = FilterCriteria::default();
        criteria.toggle_tag("cli");
        let before = criteria.active_tags.clone();

        criteria.toggle_tag("sort");
        assert!(criteria.is_tag_active("sort"));
        criteria.toggle_tag("sort");

        assert_eq!(criteria.active_tags, before);
    }

    #[test]
    fn normalized_query_trims_and_folds_case() {
        let criteria = FilterCriteria {
            query: "  QuickSort \t".to_string(),
            ..Default::default()
        };
        assert_eq!(criteria.normalized_query(), "quicksort");
    }
}
