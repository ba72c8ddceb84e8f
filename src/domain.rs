//! Domain models for the tour guide.
//!
//! This module contains the value records the rest of the crate moves around:
//! spots and their reviews, display preferences, per-spot user content, and
//! the on-disk configuration.

/// Tourist spot records and their identifiers.
pub mod spot;
pub use spot::{ParseSpotIdError, Spot, SpotId};

/// Reviews attached to spots.
pub mod review;
pub use review::Review;

/// Display theme preferences.
pub mod theme;
pub use theme::{FontScale, ParseThemeError, ThemeColorStyle, ThemeSettings};

/// Notes and checklists the user keeps per spot.
pub mod user_content;
pub use user_content::{ChecklistItem, UserSpotContent};

mod config;
pub use config::Config;
