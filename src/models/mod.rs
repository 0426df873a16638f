pub mod criteria;
pub mod favorites;
pub mod language;
pub mod snippet;
pub mod storage;

pub use criteria::{ALL_LANGUAGES, FilterCriteria};
pub use favorites::{FavoritesSet, FavoritesStore};
pub use snippet::Snippet;
pub use storage::{FileStore, KeyValueStore, MemoryStore};
