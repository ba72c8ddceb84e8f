//! State core for a curated tourist-spot guide.
//!
//! Data flows one way: an [`Intent`] goes to the [`IntentHandler`], which
//! fetches and persists through its [`Ports`] and feeds [`Action`]s to the
//! pure [`reduce`] function. Observers read [`State`] snapshots and consume
//! one-shot [`Effect`]s.

pub mod domain;
pub use domain::{
    ChecklistItem, Config, FontScale, Review, Spot, SpotId, ThemeColorStyle, ThemeSettings,
    UserSpotContent,
};

/// Persistence ports and their file-backed and in-memory implementations.
pub mod storage;

pub mod state;
pub use state::{Effect, State};

pub mod reducer;
pub use reducer::{Action, reduce};

pub mod intent;
pub use intent::{FALLBACK_LOAD_ERROR, Intent, IntentHandler, Ports};
