//! Persistence of the set of favorite spots.

use std::{collections::BTreeSet, sync::Arc};

use crate::{domain::SpotId, storage::KeyValueStore};

/// Storage key the favorites record lives under.
pub const STORAGE_KEY: &str = "favorite_spot_ids";

/// Where the ids of favorite spots are kept.
pub trait FavoritesStore: Send + Sync {
    /// The stored ids. Missing or unreadable data yields an empty set.
    fn load(&self) -> BTreeSet<SpotId>;

    /// Replaces the stored ids. Best-effort.
    fn save(&self, ids: &BTreeSet<SpotId>);
}

/// A [`FavoritesStore`] persisting a JSON array of id strings into a
/// [`KeyValueStore`].
#[derive(Clone)]
pub struct KeyValueFavoritesStore {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueFavoritesStore {
    /// Creates a favorites store over the given substrate.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl FavoritesStore for KeyValueFavoritesStore {
    fn load(&self) -> BTreeSet<SpotId> {
        let bytes = match self.store.get(STORAGE_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return BTreeSet::new(),
            Err(e) => {
                tracing::debug!("Failed to read favorites: {e}");
                return BTreeSet::new();
            }
        };

        let raw: Vec<String> = match serde_json::from_slice(&bytes) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Ignoring malformed favorites: {e}");
                return BTreeSet::new();
            }
        };

        raw.iter()
            .filter_map(|id| match id.parse() {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::debug!("Skipping favorite entry: {e}");
                    None
                }
            })
            .collect()
    }

    fn save(&self, ids: &BTreeSet<SpotId>) {
        let raw: Vec<String> = ids.iter().map(ToString::to_string).collect();
        let result = serde_json::to_vec(&raw)
            .map_err(std::io::Error::from)
            .and_then(|bytes| self.store.set(STORAGE_KEY, &bytes));

        if let Err(e) = result {
            tracing::warn!("Failed to save favorites: {e}");
        }
    }
}
