use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Spot;

/// Checklist entries used when a spot has no highlights to template from.
pub const DEFAULT_CHECKLIST: [&str; 3] = [
    "Check photo spots",
    "Find the nearest station",
    "Note opening hours",
];

/// One entry in a spot's checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    /// Stable identifier used to toggle the item.
    pub id: Uuid,
    /// What to do.
    pub title: String,
    /// Whether it has been done.
    pub completed: bool,
}

impl ChecklistItem {
    /// Creates an uncompleted item with a fresh id.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            completed: false,
        }
    }
}

/// The note and checklist a user keeps for a single spot.
///
/// Every mutation refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSpotContent {
    /// Free-text note.
    pub note: String,
    /// Ordered checklist.
    pub checklist: Vec<ChecklistItem>,
    /// When the content last changed.
    pub updated_at: DateTime<Utc>,
}

impl Default for UserSpotContent {
    fn default() -> Self {
        Self::new(String::new(), Vec::new())
    }
}

impl UserSpotContent {
    /// Creates content stamped with the current time.
    #[must_use]
    pub fn new(note: impl Into<String>, checklist: Vec<ChecklistItem>) -> Self {
        Self {
            note: note.into(),
            checklist,
            updated_at: Utc::now(),
        }
    }

    /// The starting content for a spot the user has not touched yet.
    ///
    /// The checklist is seeded from the spot's highlights, or from
    /// [`DEFAULT_CHECKLIST`] when it has none. The note is empty.
    ///
    /// Item ids are derived from the spot id and the item's position, so the
    /// template for a given spot always carries the same ids.
    #[must_use]
    pub fn template(spot: &Spot) -> Self {
        let titles: Vec<&str> = if spot.highlights().is_empty() {
            DEFAULT_CHECKLIST.to_vec()
        } else {
            spot.highlights().iter().map(String::as_str).collect()
        };
        let namespace = spot.id().as_uuid();
        let checklist = titles
            .into_iter()
            .enumerate()
            .map(|(index, title)| ChecklistItem {
                id: Uuid::new_v5(&namespace, format!("checklist/{index}").as_bytes()),
                title: title.to_string(),
                completed: false,
            })
            .collect();
        Self::new(String::new(), checklist)
    }

    /// Replaces the note.
    pub fn update_note(&mut self, text: impl Into<String>) {
        self.note = text.into();
        self.touch();
    }

    /// Flips the completion flag of the item with the given id.
    ///
    /// Unknown ids are ignored and leave the content untouched.
    pub fn toggle_item(&mut self, id: Uuid) {
        let Some(item) = self.checklist.iter_mut().find(|item| item.id == id) else {
            return;
        };
        item.completed = !item.completed;
        self.touch();
    }

    /// Appends a new item with the trimmed title.
    ///
    /// Titles that are empty after trimming are ignored.
    pub fn append_item(&mut self, title: &str) {
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return;
        }
        self.checklist.push(ChecklistItem::new(trimmed));
        self.touch();
    }

    /// Number of completed items.
    #[must_use]
    pub fn completed_count(&self) -> usize {
        self.checklist.iter().filter(|item| item.completed).count()
    }

    fn touch(&mut self) {
        // never move backwards, even if the wall clock does
        self.updated_at = Utc::now().max(self.updated_at);
    }
}
