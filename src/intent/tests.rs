use std::{
    collections::{BTreeSet, HashMap, VecDeque},
    sync::{
        Mutex as StdMutex,
        atomic::{AtomicUsize, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::*;
use crate::{
    domain::ChecklistItem,
    storage::{FetchError, seed_spots},
};

/// Answers every fetch with the same outcome.
struct StubSource {
    outcome: Result<Vec<Spot>, String>,
}

#[async_trait]
impl SpotSource for StubSource {
    async fn fetch_spots(&self) -> Result<Vec<Spot>, FetchError> {
        self.outcome.clone().map_err(FetchError::Other)
    }
}

/// Answers the n-th fetch with whatever is sent on the n-th channel.
struct GatedSource {
    gates: tokio::sync::Mutex<VecDeque<oneshot::Receiver<Vec<Spot>>>>,
}

impl GatedSource {
    fn new(count: usize) -> (Self, Vec<oneshot::Sender<Vec<Spot>>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..count).map(|_| oneshot::channel()).unzip();
        let source = Self {
            gates: tokio::sync::Mutex::new(receivers),
        };
        (source, senders)
    }
}

#[async_trait]
impl SpotSource for GatedSource {
    async fn fetch_spots(&self) -> Result<Vec<Spot>, FetchError> {
        let gate = self.gates.lock().await.pop_front();
        match gate {
            Some(gate) => gate
                .await
                .map_err(|_| FetchError::Other("gate closed".to_string())),
            None => Err(FetchError::MissingSeedData),
        }
    }
}

#[derive(Default)]
struct RecordingTheme {
    stored: StdMutex<ThemeSettings>,
    saves: AtomicUsize,
}

impl ThemeStore for RecordingTheme {
    fn load(&self) -> ThemeSettings {
        *self.stored.lock().unwrap()
    }

    fn save(&self, settings: &ThemeSettings) {
        self.saves.fetch_add(1, Ordering::SeqCst);
        *self.stored.lock().unwrap() = *settings;
    }
}

#[derive(Default)]
struct RecordingFavorites {
    stored: StdMutex<BTreeSet<SpotId>>,
    saves: AtomicUsize,
}

impl RecordingFavorites {
    fn with(ids: impl IntoIterator<Item = SpotId>) -> Self {
        Self {
            stored: StdMutex::new(ids.into_iter().collect()),
            saves: AtomicUsize::new(0),
        }
    }
}

impl FavoritesStore for RecordingFavorites {
    fn load(&self) -> BTreeSet<SpotId> {
        self.stored.lock().unwrap().clone()
    }

    fn save(&self, ids: &BTreeSet<SpotId>) {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.stored.lock().unwrap().clone_from(ids);
    }
}

#[derive(Default)]
struct RecordingContent {
    stored: StdMutex<HashMap<SpotId, UserSpotContent>>,
    saves: AtomicUsize,
}

impl UserContentStore for RecordingContent {
    fn load_all(&self) -> HashMap<SpotId, UserSpotContent> {
        self.stored.lock().unwrap().clone()
    }

    fn save(&self, content: &UserSpotContent, id: SpotId) {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.stored.lock().unwrap().insert(id, content.clone());
    }
}

struct Fixture {
    handler: IntentHandler,
    theme: Arc<RecordingTheme>,
    favorites: Arc<RecordingFavorites>,
    content: Arc<RecordingContent>,
}

impl Fixture {
    fn new(source: impl SpotSource + 'static) -> Self {
        Self::with_favorites(source, RecordingFavorites::default())
    }

    fn with_favorites(source: impl SpotSource + 'static, favorites: RecordingFavorites) -> Self {
        Self::build(
            Arc::new(source),
            Arc::default(),
            Arc::new(favorites),
            Arc::default(),
        )
    }

    fn build(
        source: Arc<dyn SpotSource>,
        theme: Arc<RecordingTheme>,
        favorites: Arc<RecordingFavorites>,
        content: Arc<RecordingContent>,
    ) -> Self {
        let handler = IntentHandler::new(Ports {
            spots: source,
            theme: theme.clone(),
            favorites: favorites.clone(),
            user_content: content.clone(),
        });
        Self {
            handler,
            theme,
            favorites,
            content,
        }
    }

    async fn loaded() -> Self {
        let fixture = Self::new(seeded());
        fixture.handler.handle(Intent::LoadSpots).await;
        fixture
    }
}

fn seeded() -> StubSource {
    StubSource {
        outcome: Ok(seed_spots()),
    }
}

fn failing(message: &str) -> StubSource {
    StubSource {
        outcome: Err(message.to_string()),
    }
}

fn abc() -> Vec<Spot> {
    ["A", "B", "C"]
        .into_iter()
        .map(|name| Spot::new(SpotId::new_v4(), name).with_highlights(["Gate", "Garden"]))
        .collect()
}

#[tokio::test]
async fn load_populates_state() {
    let fixture = Fixture::loaded().await;
    let state = fixture.handler.state();

    assert_eq!(state.spots.len(), seed_spots().len());
    assert!(!state.is_loading);
    assert_eq!(state.error_message, None);
    assert!(state.last_updated.is_some());
}

#[tokio::test]
async fn load_merges_favorites_by_membership() {
    let spots = abc();
    let b = spots[1].id();
    let source = StubSource {
        outcome: Ok(spots
            .into_iter()
            .map(|spot| spot.with_favorite(true))
            .collect()),
    };
    let fixture = Fixture::with_favorites(source, RecordingFavorites::with([b]));

    fixture.handler.handle(Intent::LoadSpots).await;

    let state = fixture.handler.state();
    let flags: Vec<_> = state.spots.iter().map(Spot::is_favorite).collect();
    assert_eq!(flags, [false, true, false]);
    assert_eq!(state.favorite_ids(), BTreeSet::from([b]));
    assert_eq!(fixture.favorites.saves.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn load_prunes_stale_favorites() {
    let spots = abc();
    let a = spots[0].id();
    let stale = SpotId::new_v4();
    let source = StubSource { outcome: Ok(spots) };
    let fixture = Fixture::with_favorites(source, RecordingFavorites::with([a, stale]));

    fixture.handler.handle(Intent::LoadSpots).await;

    assert_eq!(fixture.favorites.saves.load(Ordering::SeqCst), 1);
    assert_eq!(fixture.favorites.load(), BTreeSet::from([a]));
}

#[tokio::test]
async fn load_attaches_sample_reviews_only_when_missing() {
    let spots = abc();
    let reviewed = spots[0]
        .clone()
        .with_reviews(Review::samples("elsewhere")[..1].to_vec());
    let source = StubSource {
        outcome: Ok(vec![reviewed.clone(), spots[1].clone()]),
    };
    let fixture = Fixture::new(source);

    fixture.handler.handle(Intent::LoadSpots).await;

    let state = fixture.handler.state();
    assert_eq!(state.spots[0].reviews(), reviewed.reviews());
    assert_eq!(state.spots[1].reviews(), Review::samples("B"));
}

#[tokio::test]
async fn load_failure_sets_error() {
    let fixture = Fixture::new(failing("The network is unreachable"));

    fixture.handler.handle(Intent::LoadSpots).await;

    let state = fixture.handler.state();
    assert_eq!(
        state.error_message.as_deref(),
        Some("The network is unreachable")
    );
    assert!(!state.is_loading);
    assert!(state.spots.is_empty());
    assert_eq!(state.last_updated, None);
}

#[tokio::test]
async fn load_failure_without_description_uses_fallback() {
    let fixture = Fixture::new(failing(""));

    fixture.handler.handle(Intent::LoadSpots).await;

    let state = fixture.handler.state();
    assert_eq!(state.error_message.as_deref(), Some(FALLBACK_LOAD_ERROR));
    assert!(!state.is_loading);
    assert!(state.spots.is_empty());
}

#[tokio::test]
async fn fetch_errors_surface_their_description() {
    let (source, senders) = GatedSource::new(1);
    let fixture = Fixture::new(source);
    drop(senders);

    fixture.handler.handle(Intent::LoadSpots).await;
    assert_eq!(
        fixture.handler.state().error_message.as_deref(),
        Some("gate closed")
    );

    fixture.handler.handle(Intent::Retry).await;
    assert_eq!(
        fixture.handler.state().error_message.as_deref(),
        Some("No local spot data was found.")
    );
}

#[tokio::test]
async fn malformed_asset_reports_decoding_failure() {
    let tmp = tempfile::TempDir::new().unwrap();
    let asset = tmp.path().join("tour_spots.json");
    std::fs::write(&asset, "not json").unwrap();
    let source = BundledSpotSource::new(Some(asset), std::time::Duration::ZERO);
    let handler = IntentHandler::new(Ports::in_memory(Arc::new(source)));

    handler.handle(Intent::LoadSpots).await;

    assert_eq!(
        handler.state().error_message.as_deref(),
        Some("Failed to read the tour spot data.")
    );
}

#[tokio::test]
async fn loading_is_visible_while_fetching() {
    let (source, mut senders) = GatedSource::new(1);
    let fixture = Fixture::new(source);
    let gate = senders.remove(0);
    let spots = abc();

    tokio::join!(fixture.handler.handle(Intent::LoadSpots), async {
        assert!(fixture.handler.state().is_loading);
        gate.send(spots.clone()).unwrap();
    });

    let state = fixture.handler.state();
    assert!(!state.is_loading);
    assert_eq!(state.spots.len(), spots.len());
}

#[tokio::test]
async fn superseded_load_is_discarded() {
    let (source, mut senders) = GatedSource::new(2);
    let fixture = Fixture::new(source);
    let second_gate = senders.pop().unwrap();
    let first_gate = senders.pop().unwrap();
    let newer = abc();

    tokio::join!(
        fixture.handler.handle(Intent::LoadSpots),
        fixture.handler.handle(Intent::LoadSpots),
        async {
            second_gate.send(newer.clone()).unwrap();
            tokio::task::yield_now().await;
            first_gate.send(seed_spots()).unwrap();
        },
    );

    let state = fixture.handler.state();
    assert!(!state.is_loading);
    let names: Vec<_> = state.spots.iter().map(Spot::name).collect();
    assert_eq!(names, ["A", "B", "C"]);
}

#[tokio::test]
async fn favorite_toggled_during_reload_is_kept() {
    let (source, mut senders) = GatedSource::new(2);
    let fixture = Fixture::new(source);
    let spots = abc();
    let b = spots[1].id();
    senders.remove(0).send(spots.clone()).unwrap();
    fixture.handler.handle(Intent::LoadSpots).await;
    let gate = senders.remove(0);

    tokio::join!(fixture.handler.handle(Intent::Retry), async {
        fixture.handler.handle(Intent::ToggleFavorite(b)).await;
        assert!(fixture.handler.state().spot(b).unwrap().is_favorite());
        gate.send(spots.clone()).unwrap();
    });

    let state = fixture.handler.state();
    assert!(!state.is_loading);
    assert!(state.spot(b).unwrap().is_favorite());
    assert_eq!(state.favorite_ids(), BTreeSet::from([b]));
    assert_eq!(fixture.favorites.load(), BTreeSet::from([b]));
}

#[tokio::test]
async fn retry_after_failure_clears_error() {
    let (source, mut senders) = GatedSource::new(2);
    let fixture = Fixture::new(source);
    drop(senders.remove(0));

    fixture.handler.handle(Intent::LoadSpots).await;
    assert!(fixture.handler.state().error_message.is_some());

    senders.remove(0).send(abc()).unwrap();
    fixture.handler.handle(Intent::Retry).await;

    let state = fixture.handler.state();
    assert_eq!(state.error_message, None);
    assert_eq!(state.spots.len(), 3);
}

#[tokio::test]
async fn dismiss_error_clears_message_only() {
    let fixture = Fixture::new(failing("offline"));
    fixture.handler.handle(Intent::LoadSpots).await;

    fixture.handler.handle(Intent::DismissError).await;

    let state = fixture.handler.state();
    assert_eq!(state.error_message, None);
    assert!(!state.is_loading);
    assert!(state.spots.is_empty());
}

#[tokio::test]
async fn toggle_favorite_persists_and_emits_effect() {
    let fixture = Fixture::loaded().await;
    let target = fixture.handler.state().spots[2].clone();

    fixture
        .handler
        .handle(Intent::ToggleFavorite(target.id()))
        .await;

    let state = fixture.handler.state();
    assert!(state.spot(target.id()).unwrap().is_favorite());
    assert_eq!(fixture.favorites.load(), state.favorite_ids());
    assert_eq!(fixture.favorites.saves.load(Ordering::SeqCst), 1);

    let effect = fixture.handler.take_effect().await.unwrap();
    assert_eq!(effect.message(), format!("Added {} to favorites", target.name()));
    assert_eq!(fixture.handler.take_effect().await, None);
}

#[tokio::test]
async fn latest_effect_wins() {
    let fixture = Fixture::loaded().await;
    let spots = fixture.handler.state().spots;

    fixture
        .handler
        .handle(Intent::ToggleFavorite(spots[1].id()))
        .await;
    fixture
        .handler
        .handle(Intent::ToggleFavorite(spots[2].id()))
        .await;

    assert_eq!(
        fixture.handler.take_effect().await,
        Some(Effect::FavoriteStatusChanged {
            name: spots[2].name().to_string(),
            is_favorite: true,
        })
    );
    assert_eq!(fixture.handler.take_effect().await, None);
}

#[tokio::test]
async fn select_spot_opens_and_closes() {
    let fixture = Fixture::loaded().await;
    let spot = fixture.handler.state().spots[0].clone();

    fixture
        .handler
        .handle(Intent::SelectSpot(Some(spot.clone())))
        .await;
    assert_eq!(fixture.handler.state().selected_spot, Some(spot));

    fixture.handler.handle(Intent::SelectSpot(None)).await;
    assert_eq!(fixture.handler.state().selected_spot, None);
}

#[tokio::test]
async fn theme_is_read_at_construction() {
    let stored = ThemeSettings::new(ThemeColorStyle::Dusk, FontScale::Relaxed);
    let theme = Arc::new(RecordingTheme {
        stored: StdMutex::new(stored),
        saves: AtomicUsize::new(0),
    });
    let fixture = Fixture::build(Arc::new(seeded()), theme, Arc::default(), Arc::default());

    assert_eq!(fixture.handler.state().theme_settings, stored);
    assert_eq!(fixture.theme.saves.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn theme_changes_are_persisted() {
    let fixture = Fixture::new(seeded());

    fixture
        .handler
        .handle(Intent::SetThemeStyle(ThemeColorStyle::Dark))
        .await;
    fixture
        .handler
        .handle(Intent::SetFontScale(FontScale::Large))
        .await;

    let expected = ThemeSettings::new(ThemeColorStyle::Dark, FontScale::Large);
    assert_eq!(fixture.handler.state().theme_settings, expected);
    assert_eq!(fixture.theme.saves.load(Ordering::SeqCst), 2);
    assert_eq!(fixture.theme.load(), expected);
}

#[tokio::test]
async fn user_content_is_read_at_construction() {
    let id = seed_spots()[0].id();
    let content = Arc::new(RecordingContent::default());
    content
        .stored
        .lock()
        .unwrap()
        .insert(id, UserSpotContent::new("bring cash", Vec::new()));
    let fixture = Fixture::build(Arc::new(seeded()), Arc::default(), Arc::default(), content);

    let state = fixture.handler.state();
    assert_eq!(state.user_contents[&id].note, "bring cash");
}

#[tokio::test]
async fn update_note_starts_from_template() {
    let fixture = Fixture::loaded().await;
    let spot = fixture.handler.state().spots[0].clone();

    fixture
        .handler
        .handle(Intent::UpdateNote {
            spot: spot.id(),
            text: "Go early".to_string(),
        })
        .await;

    let content = fixture.handler.state().user_contents[&spot.id()].clone();
    assert_eq!(content.note, "Go early");
    let titles: Vec<_> = content.checklist.iter().map(|item| item.title.as_str()).collect();
    assert_eq!(titles, spot.highlights());
    assert!(content.checklist.iter().all(|item| !item.completed));

    assert_eq!(fixture.content.saves.load(Ordering::SeqCst), 1);
    assert_eq!(fixture.content.load_all()[&spot.id()], content);
}

#[tokio::test]
async fn update_note_keeps_existing_checklist() {
    let id = seed_spots()[1].id();
    let existing = UserSpotContent::new("old", vec![ChecklistItem::new("Buy tickets")]);
    let content = Arc::new(RecordingContent::default());
    content.save(&existing, id);
    let fixture = Fixture::build(Arc::new(seeded()), Arc::default(), Arc::default(), content);
    fixture.handler.handle(Intent::LoadSpots).await;

    fixture
        .handler
        .handle(Intent::UpdateNote {
            spot: id,
            text: "new".to_string(),
        })
        .await;

    let content = &fixture.handler.state().user_contents[&id];
    assert_eq!(content.note, "new");
    assert_eq!(content.checklist, existing.checklist);
    assert!(content.updated_at >= existing.updated_at);
    assert_eq!(fixture.content.saves.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn toggle_checklist_item_flips_completion() {
    let fixture = Fixture::loaded().await;
    let id = fixture.handler.state().spots[0].id();
    fixture
        .handler
        .handle(Intent::AddChecklistItem {
            spot: id,
            title: "Buy omamori".to_string(),
        })
        .await;
    let item = fixture.handler.state().user_contents[&id]
        .checklist
        .last()
        .unwrap()
        .id;

    fixture
        .handler
        .handle(Intent::ToggleChecklistItem { spot: id, item })
        .await;

    let content = &fixture.handler.state().user_contents[&id];
    assert_eq!(content.completed_count(), 1);
    assert!(content.checklist.last().unwrap().completed);
    assert_eq!(fixture.content.saves.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn add_checklist_item_trims_and_ignores_blank() {
    let fixture = Fixture::loaded().await;
    let spot = fixture.handler.state().spots[0].clone();
    let id = spot.id();

    fixture
        .handler
        .handle(Intent::AddChecklistItem {
            spot: id,
            title: "  Try the kitsune udon ".to_string(),
        })
        .await;
    let before = fixture.handler.state().user_contents[&id].clone();
    assert_eq!(before.checklist.len(), spot.highlights().len() + 1);
    assert_eq!(before.checklist.last().unwrap().title, "Try the kitsune udon");

    fixture
        .handler
        .handle(Intent::AddChecklistItem {
            spot: id,
            title: "   ".to_string(),
        })
        .await;

    let after = &fixture.handler.state().user_contents[&id];
    assert_eq!(after.checklist.len(), before.checklist.len());
    assert_eq!(after.updated_at, before.updated_at);
}

#[tokio::test]
async fn content_intents_for_unknown_spot_are_ignored() {
    let fixture = Fixture::loaded().await;
    let unknown = SpotId::new_v4();
    let before = fixture.handler.state();

    fixture
        .handler
        .handle(Intent::UpdateNote {
            spot: unknown,
            text: "lost".to_string(),
        })
        .await;
    fixture
        .handler
        .handle(Intent::AddChecklistItem {
            spot: unknown,
            title: "lost".to_string(),
        })
        .await;
    fixture
        .handler
        .handle(Intent::ToggleChecklistItem {
            spot: unknown,
            item: Uuid::new_v4(),
        })
        .await;

    assert_eq!(fixture.handler.state(), before);
    assert_eq!(fixture.content.saves.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn user_content_refreshes_selected_spot() {
    let fixture = Fixture::loaded().await;
    let spot = fixture.handler.state().spots[0].clone();
    fixture
        .handler
        .handle(Intent::SelectSpot(Some(spot.clone())))
        .await;

    fixture
        .handler
        .handle(Intent::UpdateNote {
            spot: spot.id(),
            text: "memo".to_string(),
        })
        .await;

    assert_eq!(fixture.handler.state().selected_spot, Some(spot));
}

#[tokio::test]
async fn subscribers_see_transitions() {
    let fixture = Fixture::new(seeded());
    let mut updates = fixture.handler.subscribe();

    fixture.handler.handle(Intent::LoadSpots).await;

    assert!(updates.has_changed().unwrap());
    let state = updates.borrow_and_update().clone();
    assert_eq!(state, fixture.handler.state());
    assert!(state.has_content());
}

#[tokio::test]
async fn file_backed_ports_survive_restart() {
    let tmp = tempfile::TempDir::new().unwrap();
    let config = Config {
        fetch_latency_ms: 0,
        ..Config::default()
    };

    let handler = IntentHandler::new(Ports::file_backed(tmp.path(), &config));
    handler.handle(Intent::LoadSpots).await;
    let target = handler.state().spots[1].id();
    handler.handle(Intent::ToggleFavorite(target)).await;
    handler
        .handle(Intent::SetThemeStyle(ThemeColorStyle::Dusk))
        .await;
    handler
        .handle(Intent::UpdateNote {
            spot: target,
            text: "Stay overnight".to_string(),
        })
        .await;

    let reopened = IntentHandler::new(Ports::file_backed(tmp.path(), &config));
    reopened.handle(Intent::LoadSpots).await;

    let state = reopened.state();
    assert!(state.spot(target).unwrap().is_favorite());
    assert_eq!(state.theme_settings.color_style, ThemeColorStyle::Dusk);
    assert_eq!(state.user_contents[&target].note, "Stay overnight");
}
