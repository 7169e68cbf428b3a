//! Graph API HTTP client
//!
//! Thin wrapper over reqwest shared by the three real platform adapters. All
//! of them talk to the same REST host; the access token rides as a query
//! parameter on every call and payloads are JSON bodies. Non-2xx responses
//! are translated into a [`MetaError`] via [`map_api_error`].

use reqwest::Client;
use serde_json::Value as JsonValue;
use tracing::{debug, error};

use crate::error::{map_api_error, MetaError, Result};

/// Graph API host.
const GRAPH_API_URL: &str = "https://graph.facebook.com";

/// Per-request timeout in seconds.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP client bound to one access token and API version.
#[derive(Clone)]
pub struct GraphClient {
    client: Client,
    base_url: String,
    access_token: String,
}

// The token stays out of debug output.
impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("base_url", &self.base_url)
            .field("access_token", &"***REDACTED***")
            .finish_non_exhaustive()
    }
}

impl GraphClient {
    /// Create a client against the production Graph API host.
    pub fn new(access_token: &str, api_version: &str) -> Result<Self> {
        Self::with_base_url(access_token, &format!("{GRAPH_API_URL}/{api_version}"))
    }

    /// Create a client against an explicit base URL. Tests point this at a
    /// stub server.
    pub fn with_base_url(access_token: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(MetaError::from)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            access_token: access_token.to_string(),
        })
    }

    /// GET a path with extra query parameters, returning the parsed body.
    pub async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<JsonValue> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(path, "graph GET");

        let response = self
            .client
            .get(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .query(query)
            .send()
            .await
            .map_err(MetaError::from)?;

        Self::into_json(response).await
    }

    /// POST a JSON body to a path, returning the parsed body.
    pub async fn post_json(&self, path: &str, body: &JsonValue) -> Result<JsonValue> {
        let url = format!("{}/{}", self.base_url, path);
        debug!(path, "graph POST");

        let response = self
            .client
            .post(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .json(body)
            .send()
            .await
            .map_err(MetaError::from)?;

        Self::into_json(response).await
    }

    async fn into_json(response: reqwest::Response) -> Result<JsonValue> {
        let status = response.status();
        if !status.is_success() {
            let body: JsonValue = response.json().await.unwrap_or(JsonValue::Null);
            let code = map_api_error(status.as_u16(), &body);
            error!(status = status.as_u16(), code = %code, "graph API error");
            return Err(MetaError::new(
                code,
                format!("Graph API returned {status}: {body}"),
            ));
        }

        response.json().await.map_err(MetaError::from)
    }
}
