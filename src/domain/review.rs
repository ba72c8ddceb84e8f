use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A visitor review of a spot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique identifier of the review.
    pub id: Uuid,
    /// Display name of the reviewer.
    pub author: String,
    /// One-line headline.
    pub title: String,
    /// Full review text.
    pub body: String,
    /// Score given by the reviewer.
    pub rating: f64,
    /// When the reviewer visited.
    pub visit_date: DateTime<Utc>,
}

impl Review {
    /// The sample reviews attached to spots that arrive without any.
    ///
    /// The set is keyed by spot name: the same name always yields identical
    /// reviews, ids included.
    #[must_use]
    pub fn samples(spot_name: &str) -> Vec<Self> {
        vec![
            Self {
                id: sample_id(spot_name, 0),
                author: "Ayumi".to_string(),
                title: format!("{spot_name} left me feeling refreshed"),
                body: "Visiting early in the morning meant few crowds and plenty of time \
                       for photos. The multilingual signs were a big help."
                    .to_string(),
                rating: 4.8,
                visit_date: timestamp(1_706_176_800),
            },
            Self {
                id: sample_id(spot_name, 1),
                author: "Leo".to_string(),
                title: "The evening light-up is the best part".to_string(),
                body: "The night illumination event is magical. It gets busy, so book ahead."
                    .to_string(),
                rating: 4.6,
                visit_date: timestamp(1_704_672_000),
            },
        ]
    }
}

fn sample_id(spot_name: &str, index: usize) -> Uuid {
    Uuid::new_v5(
        &Uuid::NAMESPACE_OID,
        format!("tour-guide/sample-review/{spot_name}/{index}").as_bytes(),
    )
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_are_deterministic_per_name() {
        assert_eq!(Review::samples("Dogo Onsen"), Review::samples("Dogo Onsen"));
    }

    #[test]
    fn samples_differ_between_names() {
        let a = Review::samples("Dogo Onsen");
        let b = Review::samples("Shirakawa-go");
        assert_ne!(a[0].id, b[0].id);
        assert!(b[0].title.starts_with("Shirakawa-go"));
    }

    #[test]
    fn sample_visit_dates_are_fixed() {
        let samples = Review::samples("anything");
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].visit_date.to_rfc3339(), "2024-01-25T10:00:00+00:00");
        assert_eq!(samples[1].visit_date.to_rfc3339(), "2024-01-08T00:00:00+00:00");
    }

    #[test]
    fn visit_date_serializes_as_rfc3339() {
        let review = &Review::samples("Kyoto")[1];
        let json = serde_json::to_value(review).unwrap();
        assert_eq!(json["visitDate"], "2024-01-08T00:00:00Z");
        assert_eq!(json["author"], "Leo");
    }
}
