//! Persistence of the display preferences.

use std::sync::Arc;

use crate::{domain::ThemeSettings, storage::KeyValueStore};

/// Storage key the theme record lives under.
pub const STORAGE_KEY: &str = "theme_settings";

/// Where the theme settings are kept.
///
/// Loading never fails and saving is best-effort: problems are logged and
/// absorbed here so callers never branch on them.
pub trait ThemeStore: Send + Sync {
    /// The stored settings, or the defaults if none are stored or the record
    /// cannot be read.
    fn load(&self) -> ThemeSettings;

    /// Replaces the stored settings.
    fn save(&self, settings: &ThemeSettings);
}

/// A [`ThemeStore`] persisting JSON into a [`KeyValueStore`].
#[derive(Clone)]
pub struct KeyValueThemeStore {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueThemeStore {
    /// Creates a theme store over the given substrate.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

impl ThemeStore for KeyValueThemeStore {
    fn load(&self) -> ThemeSettings {
        let bytes = match self.store.get(STORAGE_KEY) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return ThemeSettings::default(),
            Err(e) => {
                tracing::debug!("Failed to read theme settings: {e}");
                return ThemeSettings::default();
            }
        };

        serde_json::from_slice(&bytes).unwrap_or_else(|e| {
            tracing::debug!("Ignoring malformed theme settings: {e}");
            ThemeSettings::default()
        })
    }

    fn save(&self, settings: &ThemeSettings) {
        let result = serde_json::to_vec(settings)
            .map_err(std::io::Error::from)
            .and_then(|bytes| self.store.set(STORAGE_KEY, &bytes));

        if let Err(e) = result {
            tracing::warn!("Failed to save theme settings: {e}");
        }
    }
}
