use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::Review;

/// Icon shown when a spot carries no icon reference of its own.
pub const DEFAULT_ICON: &str = "globe.asia.australia.fill";

/// The stable, unique identifier of a [`Spot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(Uuid);

impl SpotId {
    /// Wraps an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Generates a fresh random identifier.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for SpotId {
    type Err = ParseSpotIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| ParseSpotIdError(s.to_string()))
    }
}

/// Error returned when a string is not a valid spot identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid spot id '{0}': expected a UUID")]
pub struct ParseSpotIdError(String);

/// A point of interest shown to the user.
///
/// Everything except the favorite flag comes from the spot source and is
/// fixed for the lifetime of a load. The favorite flag is overlaid from the
/// favorites store and flipped by the reducer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spot {
    pub(crate) id: SpotId,
    pub(crate) name: String,
    pub(crate) city: String,
    pub(crate) country: String,
    pub(crate) description: String,
    #[serde(rename = "heroImageName")]
    pub(crate) icon: String,
    pub(crate) highlights: Vec<String>,
    #[serde(default)]
    pub(crate) is_favorite: bool,
    pub(crate) rating: f64,
    #[serde(default)]
    pub(crate) tags: Vec<String>,
    #[serde(default)]
    pub(crate) reviews: Vec<Review>,
}

impl Spot {
    /// Creates a spot with the given identity and name and every other field
    /// empty.
    ///
    /// Use the `with_*` methods to fill in the rest.
    #[must_use]
    pub fn new(id: SpotId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            city: String::new(),
            country: String::new(),
            description: String::new(),
            icon: String::new(),
            highlights: Vec::new(),
            is_favorite: false,
            rating: 0.0,
            tags: Vec::new(),
            reviews: Vec::new(),
        }
    }

    /// The stand-in shown when a spot cannot be resolved.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::new(SpotId::new_v4(), "Unknown spot").with_icon(DEFAULT_ICON)
    }

    /// Sets the city and country.
    #[must_use]
    pub fn with_location(mut self, city: impl Into<String>, country: impl Into<String>) -> Self {
        self.city = city.into();
        self.country = country.into();
        self
    }

    /// Sets the long-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the icon reference.
    #[must_use]
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    /// Sets the ordered highlights.
    #[must_use]
    pub fn with_highlights<I, S>(mut self, highlights: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.highlights = highlights.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the favorite flag.
    #[must_use]
    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.is_favorite = is_favorite;
        self
    }

    /// Sets the reviews.
    #[must_use]
    pub fn with_reviews(mut self, reviews: Vec<Review>) -> Self {
        self.reviews = reviews;
        self
    }

    /// The spot's identifier.
    #[must_use]
    pub const fn id(&self) -> SpotId {
        self.id
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The city the spot is in.
    #[must_use]
    pub fn city(&self) -> &str {
        &self.city
    }

    /// The country the spot is in.
    #[must_use]
    pub fn country(&self) -> &str {
        &self.country
    }

    /// The long-form description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The icon reference as stored, which may be empty.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// The icon reference, or [`DEFAULT_ICON`] when none is set.
    #[must_use]
    pub fn icon_or_default(&self) -> &str {
        if self.icon.is_empty() {
            DEFAULT_ICON
        } else {
            &self.icon
        }
    }

    /// The ordered highlights.
    #[must_use]
    pub fn highlights(&self) -> &[String] {
        &self.highlights
    }

    /// Whether the user has marked the spot as a favorite.
    #[must_use]
    pub const fn is_favorite(&self) -> bool {
        self.is_favorite
    }

    /// The average rating.
    #[must_use]
    pub const fn rating(&self) -> f64 {
        self.rating
    }

    /// The tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The reviews.
    #[must_use]
    pub fn reviews(&self) -> &[Review] {
        &self.reviews
    }

    /// `"{city}, {country}"`.
    #[must_use]
    pub fn location_description(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }

    /// The first two highlights joined with a bullet.
    #[must_use]
    pub fn short_highlights(&self) -> String {
        self.highlights
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" • ")
    }

    pub(crate) const fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }
}
