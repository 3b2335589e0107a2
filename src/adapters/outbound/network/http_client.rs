use crate::shared::error::FetchError;
use crate::shared::Result;
use serde::de::DeserializeOwned;
use std::time::Duration;

type FetchResult<T> = std::result::Result<T, FetchError>;

/// Default per-request timeout for registry calls
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Thin wrapper over the async reqwest client shared by the registry adapters
///
/// One GET per call, no retries. Transport errors, non-2xx answers and undecodable bodies are
/// mapped to [`FetchError`].
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    bearer_token: Option<String>,
}

impl HttpClient {
    pub fn new(request_timeout: Duration) -> Result<Self> {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("ots-sbom/{}", version);
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            bearer_token: None,
        })
    }

    /// Sends `Authorization: Bearer <token>` with every request
    pub fn with_bearer_token(mut self, token: Option<String>) -> Self {
        self.bearer_token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn has_bearer_token(&self) -> bool {
        self.bearer_token.is_some()
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> FetchResult<T> {
        let response = self.send(url).await?;
        let body = response.bytes().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        serde_json::from_slice(&body).map_err(|e| FetchError::Decode {
            url: url.to_string(),
            details: e.to_string(),
        })
    }

    pub async fn get_text(&self, url: &str) -> FetchResult<String> {
        let response = self.send(url).await?;
        response.text().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })
    }

    async fn send(&self, url: &str) -> FetchResult<reqwest::Response> {
        tracing::debug!(%url, "GET");

        let mut request = self.client.get(url);
        if let Some(token) = &self.bearer_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }
}
