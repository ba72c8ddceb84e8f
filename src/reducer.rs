//! The pure state-transition function.
//!
//! [`reduce`] applies exactly one [`Action`] to a [`State`] and returns the
//! effects the transition produced. It performs no I/O and never suspends.

use chrono::{DateTime, Utc};

use crate::{
    domain::{Spot, SpotId, ThemeSettings, UserSpotContent},
    state::{Effect, State},
};

/// A reducer-level state transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Sets the loading flag.
    SetLoading(bool),
    /// Replaces the spots, stamps the load time and clears any error.
    SpotsLoaded(Vec<Spot>, DateTime<Utc>),
    /// Flips the favorite flag of a spot. Unknown ids are ignored.
    ToggleFavorite(SpotId),
    /// Opens or closes a spot's details.
    SelectSpot(Option<Spot>),
    /// Sets or clears the error message.
    SetError(Option<String>),
    /// Replaces the display preferences.
    SetTheme(ThemeSettings),
    /// Stores the user's content for a spot.
    SetUserContent(SpotId, UserSpotContent),
}

/// Applies `action` to `state`.
///
/// Returns the effects of the transition; at most one in practice.
pub fn reduce(state: &mut State, action: Action) -> Vec<Effect> {
    match action {
        Action::SetLoading(is_loading) => {
            state.is_loading = is_loading;
            Vec::new()
        }
        Action::SpotsLoaded(spots, timestamp) => {
            state.spots = spots;
            state.last_updated = Some(timestamp);
            state.error_message = None;
            Vec::new()
        }
        Action::ToggleFavorite(id) => {
            let Some(spot) = state.spots.iter_mut().find(|spot| spot.id() == id) else {
                return Vec::new();
            };
            spot.toggle_favorite();
            let spot = spot.clone();

            if state.selected_spot.as_ref().is_some_and(|s| s.id() == id) {
                state.selected_spot = Some(spot.clone());
            }

            vec![Effect::FavoriteStatusChanged {
                is_favorite: spot.is_favorite(),
                name: spot.name,
            }]
        }
        Action::SelectSpot(spot) => {
            state.selected_spot = spot;
            Vec::new()
        }
        Action::SetError(message) => {
            state.error_message = message;
            Vec::new()
        }
        Action::SetTheme(settings) => {
            state.theme_settings = settings;
            Vec::new()
        }
        Action::SetUserContent(id, content) => {
            state.user_contents.insert(id, content);
            if state.selected_spot.as_ref().is_some_and(|s| s.id() == id) {
                state.selected_spot = state.spot(id).cloned();
            }
            Vec::new()
        }
    }
}
