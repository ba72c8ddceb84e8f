//! The intent handler: the single asynchronous coordinator.
//!
//! The [`IntentHandler`] owns the [`State`], turns user [`Intent`]s into
//! sequences of reducer [`Action`]s, and is the only component that talks to
//! the persistence ports.
//!
//! # Ordering
//!
//! - A load clears the loading flag only after the spots or the error message
//!   have been set.
//! - Favorites are written after the reducer has flipped the flag.
//! - Theme settings are written before the reducer sees them.
//!
//! # Concurrency
//!
//! State lives behind an async mutex and every dispatch runs under it. The
//! one exception to "an intent holds the mutex from start to finish" is the
//! fetch: a load releases the mutex while the spot source is working, so
//! other intents may run in between. The stored favorites are read only once
//! the mutex is held again, so a toggle made during the fetch is kept. If a
//! newer load starts in the meantime, the older load's result is discarded.

use std::{path::Path, sync::Arc};

use chrono::Utc;
use tokio::sync::{Mutex, watch};
use tracing::instrument;
use uuid::Uuid;

use crate::{
    domain::{
        Config, FontScale, Review, Spot, SpotId, ThemeColorStyle, ThemeSettings, UserSpotContent,
    },
    reducer::{Action, reduce},
    state::{Effect, State},
    storage::{
        BundledSpotSource, FavoritesStore, FileStore, KeyValueFavoritesStore, KeyValueStore,
        KeyValueThemeStore, KeyValueUserContentStore, MemoryStore, SpotSource, ThemeStore,
        UserContentStore,
    },
};

#[cfg(test)]
mod tests;

/// Message shown when a load fails without describing why.
pub const FALLBACK_LOAD_ERROR: &str = "Unable to load tour spots.";

/// A user-originated request.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Load the spots, merging in stored favorites.
    LoadSpots,
    /// Run the load again after a failure.
    Retry,
    /// Flip a spot's favorite flag and persist the favorites.
    ToggleFavorite(SpotId),
    /// Open or close a spot's details.
    SelectSpot(Option<Spot>),
    /// Clear the error message without retrying.
    DismissError,
    /// Change the colour style.
    SetThemeStyle(ThemeColorStyle),
    /// Change the font scale.
    SetFontScale(FontScale),
    /// Replace the note of a spot.
    UpdateNote {
        /// The spot the note belongs to.
        spot: SpotId,
        /// The new note.
        text: String,
    },
    /// Flip the completion flag of a checklist item.
    ToggleChecklistItem {
        /// The spot the checklist belongs to.
        spot: SpotId,
        /// The item to flip.
        item: Uuid,
    },
    /// Append an item to a spot's checklist.
    AddChecklistItem {
        /// The spot the checklist belongs to.
        spot: SpotId,
        /// Title of the new item; blank titles are ignored.
        title: String,
    },
}

/// The persistence collaborators the handler is built from.
#[derive(Clone)]
pub struct Ports {
    /// Where spots are fetched from.
    pub spots: Arc<dyn SpotSource>,
    /// Where display preferences are kept.
    pub theme: Arc<dyn ThemeStore>,
    /// Where favorite ids are kept.
    pub favorites: Arc<dyn FavoritesStore>,
    /// Where notes and checklists are kept.
    pub user_content: Arc<dyn UserContentStore>,
}

impl Ports {
    /// Ports persisting into the configured data directory under `root`.
    #[must_use]
    pub fn file_backed(root: &Path, config: &Config) -> Self {
        let store = Arc::new(FileStore::new(root.join(&config.data_dir)));
        let asset = config.spots_asset.as_ref().map(|asset| root.join(asset));
        Self::with_store(
            Arc::new(BundledSpotSource::new(asset, config.fetch_latency())),
            store,
        )
    }

    /// Ports persisting into memory only.
    #[must_use]
    pub fn in_memory(spots: Arc<dyn SpotSource>) -> Self {
        Self::with_store(spots, Arc::new(MemoryStore::new()))
    }

    /// Ports persisting into the given key-value store.
    #[must_use]
    pub fn with_store(spots: Arc<dyn SpotSource>, store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            spots,
            theme: Arc::new(KeyValueThemeStore::new(Arc::clone(&store))),
            favorites: Arc::new(KeyValueFavoritesStore::new(Arc::clone(&store))),
            user_content: Arc::new(KeyValueUserContentStore::new(store)),
        }
    }
}

struct Session {
    state: State,
    latest_effect: Option<Effect>,
    load_generation: u64,
}

/// Owns the [`State`] and sequences every change to it.
pub struct IntentHandler {
    ports: Ports,
    session: Mutex<Session>,
    published: watch::Sender<State>,
}

impl IntentHandler {
    /// Creates a handler, reading the theme settings and user content from
    /// their stores.
    #[must_use]
    pub fn new(ports: Ports) -> Self {
        let state = State {
            theme_settings: ports.theme.load(),
            user_contents: ports.user_content.load_all(),
            ..State::default()
        };
        let (published, _) = watch::channel(state.clone());

        Self {
            ports,
            session: Mutex::new(Session {
                state,
                latest_effect: None,
                load_generation: 0,
            }),
            published,
        }
    }

    /// A snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> State {
        self.published.borrow().clone()
    }

    /// A receiver notified after every state transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<State> {
        self.published.subscribe()
    }

    /// Takes the most recent effect, if it has not been taken yet.
    ///
    /// Only the latest effect is kept; an effect is handed out once.
    pub async fn take_effect(&self) -> Option<Effect> {
        self.session.lock().await.latest_effect.take()
    }

    /// Handles one intent to completion.
    #[instrument(skip(self))]
    pub async fn handle(&self, intent: Intent) {
        match intent {
            Intent::LoadSpots | Intent::Retry => self.load_spots().await,
            Intent::ToggleFavorite(id) => {
                let mut session = self.session.lock().await;
                self.dispatch(&mut session, Action::ToggleFavorite(id));
                self.ports.favorites.save(&session.state.favorite_ids());
            }
            Intent::SelectSpot(spot) => {
                let mut session = self.session.lock().await;
                self.dispatch(&mut session, Action::SelectSpot(spot));
            }
            Intent::DismissError => {
                let mut session = self.session.lock().await;
                self.dispatch(&mut session, Action::SetError(None));
            }
            Intent::SetThemeStyle(style) => {
                self.update_theme(|settings| settings.color_style = style)
                    .await;
            }
            Intent::SetFontScale(scale) => {
                self.update_theme(|settings| settings.font_scale = scale)
                    .await;
            }
            Intent::UpdateNote { spot, text } => {
                self.update_user_content(spot, |content| content.update_note(text))
                    .await;
            }
            Intent::ToggleChecklistItem { spot, item } => {
                self.update_user_content(spot, |content| content.toggle_item(item))
                    .await;
            }
            Intent::AddChecklistItem { spot, title } => {
                self.update_user_content(spot, |content| content.append_item(&title))
                    .await;
            }
        }
    }

    async fn load_spots(&self) {
        let generation = {
            let mut session = self.session.lock().await;
            session.load_generation += 1;
            self.dispatch(&mut session, Action::SetLoading(true));
            session.load_generation
        };

        let result = self.ports.spots.fetch_spots().await;

        let mut session = self.session.lock().await;
        if session.load_generation != generation {
            tracing::debug!("Discarding result of superseded load #{generation}");
            return;
        }

        match result {
            Ok(spots) => {
                let favorites = self.ports.favorites.load();
                let spots: Vec<_> = spots
                    .into_iter()
                    .map(|mut spot| {
                        spot.is_favorite = favorites.contains(&spot.id);
                        if spot.reviews.is_empty() {
                            spot.reviews = Review::samples(&spot.name);
                        }
                        spot
                    })
                    .collect();
                tracing::info!("Loaded {} spots", spots.len());

                self.dispatch(&mut session, Action::SpotsLoaded(spots, Utc::now()));
                self.dispatch(&mut session, Action::SetLoading(false));
                self.dispatch(&mut session, Action::SetError(None));
                self.reconcile_favorites(&session.state);
            }
            Err(e) => {
                let description = e.to_string();
                let message = if description.is_empty() {
                    FALLBACK_LOAD_ERROR.to_string()
                } else {
                    description
                };
                tracing::warn!("Failed to load spots: {message}");

                self.dispatch(&mut session, Action::SetError(Some(message)));
                self.dispatch(&mut session, Action::SetLoading(false));
            }
        }
    }

    /// Writes the merged favorite set back if it no longer matches the store,
    /// e.g. because a stored id is not in the fetched collection.
    fn reconcile_favorites(&self, state: &State) {
        let stored = self.ports.favorites.load();
        let merged = state.favorite_ids();
        if stored != merged {
            tracing::debug!(
                "Reconciling favorites: {} stored, {} after merge",
                stored.len(),
                merged.len()
            );
            self.ports.favorites.save(&merged);
        }
    }

    async fn update_theme(&self, update: impl FnOnce(&mut ThemeSettings)) {
        let mut session = self.session.lock().await;
        let mut settings = session.state.theme_settings;
        update(&mut settings);

        self.ports.theme.save(&settings);
        self.dispatch(&mut session, Action::SetTheme(settings));
    }

    async fn update_user_content(&self, id: SpotId, mutation: impl FnOnce(&mut UserSpotContent)) {
        let mut session = self.session.lock().await;
        let Some(spot) = session.state.spot(id) else {
            tracing::debug!("Ignoring content change for unknown spot {id}");
            return;
        };
        let mut content = session.state.content_for(spot);
        mutation(&mut content);

        self.ports.user_content.save(&content, id);
        self.dispatch(&mut session, Action::SetUserContent(id, content));
    }

    fn dispatch(&self, session: &mut Session, action: Action) {
        tracing::trace!(?action, "dispatch");
        let effects = reduce(&mut session.state, action);
        if let Some(effect) = effects.into_iter().last() {
            session.latest_effect = Some(effect);
        }
        self.published
            .send_modify(|published| published.clone_from(&session.state));
    }
}
