//! Where spots come from.

use std::{io, path::PathBuf, time::Duration};

use async_trait::async_trait;

use crate::{domain::Spot, storage::seed_spots};

/// A source of the spot collection.
///
/// Fetching may be slow and may fail; failures are the only errors that reach
/// the user.
#[async_trait]
pub trait SpotSource: Send + Sync {
    /// Fetches every spot.
    ///
    /// # Errors
    ///
    /// Returns an error if no spot data is available or it cannot be decoded.
    async fn fetch_spots(&self) -> Result<Vec<Spot>, FetchError>;
}

/// Why a fetch failed.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Neither an asset nor a seed is available.
    #[error("No local spot data was found.")]
    MissingSeedData,

    /// The asset exists but is not a valid spot list.
    #[error("Failed to read the tour spot data.")]
    DecodingFailed(#[source] serde_json::Error),

    /// The asset exists but could not be read.
    #[error("Failed to read the spot asset: {0}")]
    Io(#[from] io::Error),

    /// Any other failure, described by the source itself.
    ///
    /// The description may be empty.
    #[error("{0}")]
    Other(String),
}

/// The bundled spot source: a JSON asset if one is present, the built-in seed
/// otherwise.
#[derive(Debug, Clone)]
pub struct BundledSpotSource {
    asset: Option<PathBuf>,
    seed: Vec<Spot>,
    latency: Duration,
}

impl Default for BundledSpotSource {
    fn default() -> Self {
        Self::new(None, Duration::from_millis(150))
    }
}

impl BundledSpotSource {
    /// Creates a source reading `asset` when it exists, and the built-in seed
    /// otherwise. Every fetch waits `latency` first.
    #[must_use]
    pub fn new(asset: Option<PathBuf>, latency: Duration) -> Self {
        Self {
            asset,
            seed: seed_spots(),
            latency,
        }
    }

    /// Replaces the fallback seed.
    #[must_use]
    pub fn with_seed(mut self, seed: Vec<Spot>) -> Self {
        self.seed = seed;
        self
    }
}

#[async_trait]
impl SpotSource for BundledSpotSource {
    async fn fetch_spots(&self) -> Result<Vec<Spot>, FetchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(asset) = self.asset.as_ref().filter(|path| path.exists()) {
            let bytes = tokio::fs::read(asset).await?;
            let spots = serde_json::from_slice(&bytes).map_err(FetchError::DecodingFailed)?;
            tracing::debug!("Loaded spots from {}", asset.display());
            return Ok(spots);
        }

        if self.seed.is_empty() {
            return Err(FetchError::MissingSeedData);
        }

        tracing::debug!("Using {} built-in seed spots", self.seed.len());
        Ok(self.seed.clone())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn instant(asset: Option<PathBuf>) -> BundledSpotSource {
        BundledSpotSource::new(asset, Duration::ZERO)
    }

    #[tokio::test]
    async fn falls_back_to_seed_without_asset() {
        let spots = instant(None).fetch_spots().await.unwrap();
        assert_eq!(spots, seed_spots());
    }

    #[tokio::test]
    async fn falls_back_to_seed_when_asset_missing() {
        let tmp = TempDir::new().unwrap();
        let spots = instant(Some(tmp.path().join("absent.json")))
            .fetch_spots()
            .await
            .unwrap();
        assert_eq!(spots.len(), seed_spots().len());
    }

    #[tokio::test]
    async fn empty_seed_is_missing_data() {
        let error = instant(None).with_seed(Vec::new()).fetch_spots().await.unwrap_err();
        assert!(matches!(error, FetchError::MissingSeedData));
        assert_eq!(error.to_string(), "No local spot data was found.");
    }

    #[tokio::test]
    async fn reads_asset() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tour_spots.json");
        std::fs::write(
            &path,
            r#"[{
                "id": "0d0a3b0e-8f3c-4f39-9d59-1c2a5c1f0c11",
                "name": "Itsukushima Shrine",
                "city": "Hatsukaichi",
                "country": "Japan",
                "description": "The floating torii",
                "heroImageName": "torii",
                "highlights": [],
                "rating": 4.8,
                "tags": ["Shrines"]
            }]"#,
        )
        .unwrap();

        let spots = instant(Some(path)).fetch_spots().await.unwrap();

        assert_eq!(spots.len(), 1);
        assert_eq!(spots[0].name(), "Itsukushima Shrine");
        assert!(spots[0].reviews().is_empty());
    }

    #[tokio::test]
    async fn malformed_asset_is_decoding_failure() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("tour_spots.json");
        std::fs::write(&path, "[{\"id\": 7}]").unwrap();

        let error = instant(Some(path)).fetch_spots().await.unwrap_err();

        assert!(matches!(error, FetchError::DecodingFailed(_)));
        assert_eq!(error.to_string(), "Failed to read the tour spot data.");
    }

    #[tokio::test(start_paused = true)]
    async fn waits_for_latency() {
        let source = BundledSpotSource::new(None, Duration::from_millis(150));
        let started = tokio::time::Instant::now();

        source.fetch_spots().await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(150));
    }
}
