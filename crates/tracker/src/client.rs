//! HTTP client for a Bugzilla-style tracker.

use std::future::Future;
use std::time::Duration;

use money_shared::TrackerConfig;
use reqwest::{Client, StatusCode, Url};
use tracing::{debug, warn};

use crate::error::TrackerError;
use crate::types::{Bug, BugList};

/// Source of newly filed bugs.
pub trait BugSource {
    /// Returns the new bugs assigned to the configured account.
    ///
    /// Transient failures yield an empty list instead of an error.
    fn fetch_new_items(&self) -> impl Future<Output = Result<Vec<Bug>, TrackerError>> + Send;
}

/// REST client for `GET {server}/bugs`.
#[derive(Debug, Clone)]
pub struct BugzillaClient {
    client: Client,
    server: String,
    account: String,
    limit: u32,
}

impl BugzillaClient {
    /// Creates a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the server URL does not parse, and
    /// `Request` if the HTTP client cannot be built.
    pub fn new(config: &TrackerConfig) -> Result<Self, TrackerError> {
        let server = config.server.trim_end_matches('/').to_string();
        Url::parse(&server)
            .map_err(|e| TrackerError::InvalidConfig(format!("server {server:?}: {e}")))?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TrackerError::Request(e.to_string()))?;

        Ok(Self {
            client,
            server,
            account: config.account.clone(),
            limit: config.limit,
        })
    }

    /// Browser link for a bug.
    #[must_use]
    pub fn bug_link(&self, id: u64) -> String {
        format!("{}/show_bug.cgi?id={id}", self.server)
    }

    fn with_link(&self, mut bug: Bug) -> Bug {
        bug.link = self.bug_link(bug.id);
        bug
    }
}

/// Connection-level failures that are reported as "no bugs".
fn is_transient(err: &reqwest::Error) -> bool {
    err.is_connect() || err.is_timeout()
}

impl BugSource for BugzillaClient {
    async fn fetch_new_items(&self) -> Result<Vec<Bug>, TrackerError> {
        let url = format!("{}/bugs", self.server);
        let limit = self.limit.to_string();
        let query = [
            ("assigned_to", self.account.as_str()),
            ("status", "NEW"),
            ("limit", limit.as_str()),
        ];

        let response = match self.client.get(&url).query(&query).send().await {
            Ok(response) => response,
            Err(e) if is_transient(&e) => {
                warn!(url = %url, error = %e, "Tracker unreachable, reporting no new bugs");
                return Ok(Vec::new());
            }
            Err(e) => return Err(TrackerError::Request(e.to_string())),
        };

        let status = response.status();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            warn!(url = %url, status = status.as_u16(), "Tracker unavailable, reporting no new bugs");
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(TrackerError::Status(status.as_u16()));
        }

        let body = match response.bytes().await {
            Ok(body) => body,
            Err(e) if is_transient(&e) || e.is_body() => {
                warn!(url = %url, error = %e, "Tracker response cut off, reporting no new bugs");
                return Ok(Vec::new());
            }
            Err(e) => return Err(TrackerError::Request(e.to_string())),
        };
        let list: BugList =
            serde_json::from_slice(&body).map_err(|e| TrackerError::Decode(e.to_string()))?;
        debug!(count = list.bugs.len(), "Fetched new bugs");

        Ok(list.bugs.into_iter().map(|bug| self.with_link(bug)).collect())
    }
}
