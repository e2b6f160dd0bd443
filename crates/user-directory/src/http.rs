//! HTTP client for the user service.
//!
//! Users are fetched with `GET {base_url}/{userId}`. No authentication header
//! is sent and failed requests are not retried.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use common::UserId;
use reqwest::StatusCode;

use crate::{DirectoryError, User, UserDirectory};

/// User directory backed by the remote user service.
#[derive(Clone)]
pub struct HttpUserDirectory {
    inner: Arc<HttpUserDirectoryInner>,
}

struct HttpUserDirectoryInner {
    client: reqwest::Client,
    base_url: String,
}

impl HttpUserDirectory {
    /// Creates a client for the users collection at `base_url`.
    ///
    /// Every request is abandoned after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self {
            inner: Arc::new(HttpUserDirectoryInner { client, base_url }),
        })
    }

    /// Base URL of the users collection.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    async fn request(&self, user_id: UserId) -> Result<Option<User>, DirectoryError> {
        let url = format!("{}/{}", self.inner.base_url, user_id);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DirectoryError::NotFound(user_id));
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectoryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.bytes().await?;
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }

        serde_json::from_slice::<Option<User>>(&body)
            .map_err(|e| DirectoryError::Parse(format!("Failed to parse user {user_id}: {e}")))
    }
}

#[async_trait]
impl UserDirectory for HttpUserDirectory {
    #[tracing::instrument(skip(self), fields(base_url = %self.inner.base_url))]
    async fn fetch(&self, user_id: UserId) -> Result<Option<User>, DirectoryError> {
        metrics::counter!("user_directory_requests_total").increment(1);
        let start = std::time::Instant::now();

        let result = self.request(user_id).await;

        metrics::histogram!("user_directory_request_duration_seconds")
            .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(Some(_)) => tracing::debug!("User resolved"),
            Ok(None) => tracing::debug!("User directory returned an empty body"),
            Err(DirectoryError::NotFound(_)) => tracing::debug!("User not known to directory"),
            Err(e) => {
                metrics::counter!("user_directory_failures_total").increment(1);
                tracing::warn!(error = %e, "User directory request failed");
            }
        }

        result
    }
}
