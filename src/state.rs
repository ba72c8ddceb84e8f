//! The state the intent handler owns and the effects it emits.

use std::collections::{BTreeSet, HashMap};

use chrono::{DateTime, Utc};

use crate::domain::{Spot, SpotId, ThemeSettings, UserSpotContent};

/// Everything the presentation layer renders from.
///
/// Owned and mutated exclusively by the [`IntentHandler`](crate::IntentHandler);
/// everyone else sees snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    /// The loaded spots, in source order.
    pub spots: Vec<Spot>,
    /// Whether a load is in flight.
    pub is_loading: bool,
    /// The spot whose details are open, if any.
    pub selected_spot: Option<Spot>,
    /// The message of the last failed load, until dismissed.
    pub error_message: Option<String>,
    /// When spots were last loaded successfully.
    pub last_updated: Option<DateTime<Utc>>,
    /// Display preferences.
    pub theme_settings: ThemeSettings,
    /// Notes and checklists, keyed by spot.
    pub user_contents: HashMap<SpotId, UserSpotContent>,
}

impl State {
    /// Whether any spots are loaded.
    #[must_use]
    pub fn has_content(&self) -> bool {
        !self.spots.is_empty()
    }

    /// Number of spots marked as favorite.
    #[must_use]
    pub fn favorites_count(&self) -> usize {
        self.spots.iter().filter(|spot| spot.is_favorite()).count()
    }

    /// Ids of the spots marked as favorite.
    #[must_use]
    pub fn favorite_ids(&self) -> BTreeSet<SpotId> {
        self.spots
            .iter()
            .filter(|spot| spot.is_favorite())
            .map(Spot::id)
            .collect()
    }

    /// Looks up a loaded spot by id.
    #[must_use]
    pub fn spot(&self, id: SpotId) -> Option<&Spot> {
        self.spots.iter().find(|spot| spot.id() == id)
    }

    /// The user's content for `spot`, or a fresh template if they have none.
    #[must_use]
    pub fn content_for(&self, spot: &Spot) -> UserSpotContent {
        self.user_contents
            .get(&spot.id())
            .cloned()
            .unwrap_or_else(|| UserSpotContent::template(spot))
    }
}

/// A one-shot notification for the presentation layer.
///
/// Effects are not part of [`State`]; they are shown once and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// A spot's favorite flag changed.
    FavoriteStatusChanged {
        /// Name of the spot.
        name: String,
        /// The new flag.
        is_favorite: bool,
    },
}

impl Effect {
    /// The toast text for this effect.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::FavoriteStatusChanged {
                name,
                is_favorite: true,
            } => format!("Added {name} to favorites"),
            Self::FavoriteStatusChanged {
                name,
                is_favorite: false,
            } => format!("Removed {name} from favorites"),
        }
    }
}
