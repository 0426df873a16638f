use crate::models::storage::KeyValueStore;
use std::collections::BTreeSet;

/// Storage key holding the serialized favorites list.
pub const FAVORITES_KEY: &str = "favorites";

/// Set of favorited snippet ids. Only membership is meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesSet {
    ids: BTreeSet<String>,
}

impl FavoritesSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Flips membership of `id`. Returns true if it is now a favorite.
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.ids.remove(id) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.ids.iter()
    }
}

impl FromIterator<String> for FavoritesSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Loads and persists the favorites set through a key-value store.
///
/// Every failure is absorbed here: a missing or malformed payload loads as an
/// empty set and a failed write is only logged.
pub struct FavoritesStore {
    backend: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for FavoritesStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "FavoritesStore {{ .. }}")
    }
}

impl FavoritesStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn load(&self) -> FavoritesSet {
        let raw = match self.backend.read(FAVORITES_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return FavoritesSet::new(),
            Err(e) => {
                log::warn!("Could not read favorites, starting empty: {:#}", e);
                return FavoritesSet::new();
            }
        };

        match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => {
                log::debug!("Loaded {} favorites", ids.len());
                ids.into_iter().collect()
            }
            Err(e) => {
                log::warn!("Ignoring malformed favorites payload: {}", e);
                FavoritesSet::new()
            }
        }
    }

    /// Best-effort write; no retry and nothing is reported to the caller.
    pub fn persist(&self, favorites: &FavoritesSet) {
        let ids: Vec<&String> = favorites.iter().collect();
        let payload = match serde_json::to_string(&ids) {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("Failed to serialize favorites: {}", e);
                return;
            }
        };

        if let Err(e) = self.backend.write(FAVORITES_KEY, &payload) {
            log::warn!("Failed to persist favorites: {:#}", e);
        }
    }
}
