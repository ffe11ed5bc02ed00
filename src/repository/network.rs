use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::model::Photo;
use crate::repository::{NetworkError, PhotoRepository};

/// Reqwest-backed [`PhotoRepository`] talking to the photo feed API.
///
/// Holds a connection-pooled client; cheap to share behind an `Arc`.
pub struct NetworkPhotoRepository {
    client: Client,
    base_url: String,
}

impl NetworkPhotoRepository {
    /// Build a repository from configuration.
    ///
    /// The connect and total-request timeouts come from the config so that
    /// a dead server surfaces as a `Transport` error instead of hanging the
    /// fetch attempt forever.
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_seconds))
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn photos_url(&self) -> String {
        format!("{}/photos", self.base_url)
    }
}

#[async_trait]
impl PhotoRepository for NetworkPhotoRepository {
    async fn fetch_all(&self) -> Result<Vec<Photo>, NetworkError> {
        let url = self.photos_url();
        tracing::debug!(%url, "fetching photo list");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| NetworkError::Transport { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(NetworkError::Status {
                status: status.as_u16(),
            });
        }

        let photos: Vec<Photo> = response
            .json()
            .await
            .map_err(|source| NetworkError::Decode { source })?;

        tracing::debug!(count = photos.len(), "photo list fetched");
        Ok(photos)
    }
}
