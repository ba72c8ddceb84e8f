//! Persistence ports and their concrete backings.
//!
//! Each port is a small capability trait the intent handler is injected with.
//! The key-value implementations here all sit on top of a [`KeyValueStore`],
//! which is either a directory of JSON files or an in-memory map.

pub mod favorites;
pub mod key_value;
mod seed;
pub mod spot_source;
pub mod theme;
pub mod user_content;

pub use favorites::{FavoritesStore, KeyValueFavoritesStore};
pub use key_value::{FileStore, KeyValueStore, MemoryStore};
pub use seed::seed_spots;
pub use spot_source::{BundledSpotSource, FetchError, SpotSource};
pub use theme::{KeyValueThemeStore, ThemeStore};
pub use user_content::{KeyValueUserContentStore, UserContentStore};
