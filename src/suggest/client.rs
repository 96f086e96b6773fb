//! HTTP client for the suggestion service

use super::protocol::{PredictRequest, SuggestionLists, SuggestionOutcome};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// Where the service listens when nothing else is configured
pub const DEFAULT_SERVER: &str = "http://localhost:8000";

/// Failure of a single suggestion round trip
#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("{0}")]
    Service(String),
}

/// Anything that can turn a puzzle snapshot into suggestions
///
/// The TUI and line-mode clients only see this trait, so tests can drive
/// them without a server.
pub trait Suggester: Send + Sync + 'static {
    fn suggest(&self, request: PredictRequest) -> impl Future<Output = SuggestionOutcome> + Send;
}

/// Connection settings for [`PredClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub server: String,
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            timeout: None,
        }
    }
}

/// `reqwest` client bound to one service instance
#[derive(Debug, Clone)]
pub struct PredClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PredClient {
    /// Build a client for `config.server`
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be constructed.
    pub fn new(config: &ClientConfig) -> Result<Self, SuggestError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: format!("{}/pred", config.server.trim_end_matches('/')),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post one request and return the ranked lists
    ///
    /// # Errors
    /// Network failures, non-success HTTP statuses, malformed bodies and
    /// `success: false` responses all become a [`SuggestError`].
    pub async fn fetch(&self, request: &PredictRequest) -> Result<SuggestionLists, SuggestError> {
        debug!(
            endpoint = %self.endpoint,
            rows = request.trial.len(),
            wordlen = request.wordlen,
            lang = %request.lang,
            "requesting suggestions"
        );

        let response = self.http.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = SuggestionOutcome::message_from(&body)
                .unwrap_or_else(|| format!("Request failed with status {status}"));
            return Err(SuggestError::Status { status, message });
        }

        match SuggestionOutcome::decode(&body) {
            SuggestionOutcome::Ok(lists) => Ok(lists),
            SuggestionOutcome::Err(message) => Err(SuggestError::Service(message)),
        }
    }
}

impl Suggester for PredClient {
    async fn suggest(&self, request: PredictRequest) -> SuggestionOutcome {
        match self.fetch(&request).await {
            Ok(lists) => {
                debug!(
                    exploit = lists.to_exploit.len(),
                    explore = lists.to_explore.len(),
                    "suggestions received"
                );
                SuggestionOutcome::Ok(lists)
            }
            Err(err) => {
                warn!(error = %err, "suggestion request failed");
                SuggestionOutcome::Err(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_pred() {
        let client = PredClient::new(&ClientConfig {
            server: "http://example.test:9000/".to_string(),
            timeout: None,
        })
        .unwrap();
        assert_eq!(client.endpoint(), "http://example.test:9000/pred");
    }

    #[test]
    fn default_points_at_localhost() {
        let client = PredClient::new(&ClientConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:8000/pred");
    }
}
