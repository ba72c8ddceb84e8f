//! Persistence of per-spot notes and checklists.

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use crate::{
    domain::{SpotId, UserSpotContent},
    storage::KeyValueStore,
};

/// Storage key the user-content blob lives under.
pub const STORAGE_KEY: &str = "user_spot_content";

/// Where per-spot user content is kept.
pub trait UserContentStore: Send + Sync {
    /// Every stored record, keyed by spot. Malformed data yields an empty map.
    fn load_all(&self) -> HashMap<SpotId, UserSpotContent>;

    /// Stores `content` for `spot`, replacing any previous record for it.
    /// Best-effort.
    fn save(&self, content: &UserSpotContent, spot: SpotId);
}

/// A [`UserContentStore`] persisting a single JSON object, keyed by spot id
/// string, into a [`KeyValueStore`].
#[derive(Clone)]
pub struct KeyValueUserContentStore {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueUserContentStore {
    /// Creates a user-content store over the given substrate.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl UserContentStore for KeyValueUserContentStore {
    fn load_all(&self) -> HashMap<SpotId, UserSpotContent> {
        let bytes = match self.store.get(STORAGE_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return HashMap::new(),
            Err(e) => {
                tracing::debug!("Failed to read user content: {e}");
                return HashMap::new();
            }
        };

        let raw: HashMap<String, UserSpotContent> = match serde_json::from_slice(&bytes) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::debug!("Ignoring malformed user content: {e}");
                return HashMap::new();
            }
        };

        raw.into_iter()
            .filter_map(|(key, content)| match key.parse() {
                Ok(id) => Some((id, content)),
                Err(e) => {
                    tracing::debug!("Skipping user content entry: {e}");
                    None
                }
            })
            .collect()
    }

    fn save(&self, content: &UserSpotContent, spot: SpotId) {
        let mut all = self.load_all();
        all.insert(spot, content.clone());

        // sorted by id
        let raw: BTreeMap<String, &UserSpotContent> = all
            .iter()
            .map(|(id, content)| (id.to_string(), content))
            .collect();

        let result = serde_json::to_vec(&raw)
            .map_err(std::io::Error::from)
            .and_then(|bytes| self.store.set(STORAGE_KEY, &bytes));

        if let Err(e) = result {
            tracing::warn!("Failed to save user content for {spot}: {e}");
        }
    }
}
