//! Browser state and its single update function.
//!
//! Callers never mutate a `BrowserState` in place. Every user intent is an
//! [`Action`] passed through [`update`], which returns the next state.
//! Side effects (persisting favorites) are the caller's job; see
//! [`BrowserState::favorites_changed`].

use crate::models::{FavoritesSet, FilterCriteria};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowserState {
    pub criteria: FilterCriteria,
    pub favorites: FavoritesSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetQuery(String),
    PushQueryChar(char),
    PopQueryChar,
    SetLanguage(String),
    ToggleTag(String),
    SetOnlyFavorites(bool),
    ToggleOnlyFavorites,
    ClearFilters,
    ToggleFavorite(String),
}

impl BrowserState {
    pub fn new(favorites: FavoritesSet) -> Self {
        Self {
            criteria: FilterCriteria::default(),
            favorites,
        }
    }

    pub fn favorites_changed(&self, next: &BrowserState) -> bool {
        self.favorites != next.favorites
    }
}

pub fn update(state: &BrowserState, action: Action) -> BrowserState {
    let mut next = state.clone();
    match action {
        Action::SetQuery(query) => next.criteria.query = query,
        Action::PushQueryChar(c) => next.criteria.query.push(c),
        Action::PopQueryChar => {
            next.criteria.query.pop();
        }
        Action::SetLanguage(language) => next.criteria.language = language,
        Action::ToggleTag(tag) => next.criteria.toggle_tag(&tag),
        Action::SetOnlyFavorites(on) => next.criteria.only_favorites = on,
        Action::ToggleOnlyFavorites => {
            next.criteria.only_favorites = !next.criteria.only_favorites;
        }
        // Favorites are not filter criteria and survive a clear.
        Action::ClearFilters => next.criteria = FilterCriteria::default(),
        Action::ToggleFavorite(id) => {
            next.favorites.toggle(&id);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ALL_LANGUAGES;

    fn busy_state() -> BrowserState {
        let mut state = BrowserState::default();
        for action in [
            Action::SetQuery("sort".into()),
            Action::SetLanguage("Go".into()),
            Action::ToggleTag("cli".into()),
            Action::ToggleTag("sort".into()),
            Action::SetOnlyFavorites(true),
            Action::ToggleFavorite("b".into()),
        ] {
            state = update(&state, action);
        }
        state
    }

    #[test]
    fn clear_filters_resets_criteria_but_keeps_favorites() {
        let state = update(&busy_state(), Action::ClearFilters);

        assert_eq!(state.criteria.query, "");
        assert_eq!(state.criteria.language, ALL_LANGUAGES);
        assert!(state.criteria.active_tags.is_empty());
        assert!(!state.criteria.only_favorites);
        assert!(state.favorites.contains("b"));
    }

    #[test]
    fn update_does_not_touch_the_previous_state() {
        let before = busy_state();
        let snapshot = before.clone();
        let _ = update(&before, Action::ClearFilters);
        assert_eq!(before, snapshot);
    }

    #[test]
    fn tag_and_favorite_toggles_are_self_inverse() {
        let start = busy_state();

        let twice = update(&update(&start, Action::ToggleTag("http".into())), Action::ToggleTag("http".into()));
        assert_eq!(twice, start);

        let twice = update(
            &update(&start, Action::ToggleFavorite("z".into())),
            Action::ToggleFavorite("z".into()),
        );
        assert_eq!(twice, start);
    }

    #[test]
    fn only_favorite_changes_are_flagged() {
        let start = BrowserState::default();
        let typed = update(&start, Action::PushQueryChar('g'));
        assert!(!start.favorites_changed(&typed));

        let starred = update(&typed, Action::ToggleFavorite("a".into()));
        assert!(typed.favorites_changed(&starred));
    }

    #[test]
    fn query_editing() {
        let mut state = BrowserState::default();
        for c in "gox".chars() {
            state = update(&state, Action::PushQueryChar(c));
        }
        state = update(&state, Action::PopQueryChar);
        assert_eq!(state.criteria.query, "go");

        state = update(&state, Action::ToggleOnlyFavorites);
        assert!(state.criteria.only_favorites);
    }
}
