//! HTTP backend for the platform v2 API
//!
//! Management calls present the configured token. Task creation, queries and
//! writes present the token of the authorization handed in by the caller.

mod authorizations;
mod buckets;
mod orgs;
mod query;
mod tasks;
mod users;
mod write;

use crate::config::ClientConfig;
use platdemo_core::{CoreError, Result};
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use tracing::debug;
use url::Url;

/// Platform client over HTTP
#[derive(Clone)]
pub struct HttpPlatform {
    client: reqwest::Client,
    base_url: Url,
    token: String,
}

impl fmt::Debug for HttpPlatform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpPlatform")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

/// Error body returned by the platform
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl HttpPlatform {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|e| CoreError::configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.endpoint().clone(),
            token: config.token.clone(),
        })
    }

    /// Build a request for `path` (relative, e.g. `api/v2/users`) authenticated with `token`
    fn request_with_token(&self, method: Method, path: &str, token: &str) -> Result<RequestBuilder> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| CoreError::invalid(format!("invalid API path {:?}: {}", path, e)))?;

        debug!(%method, %url, "platform request");

        Ok(self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Token {}", token)))
    }

    /// Build a request authenticated with the management token
    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        self.request_with_token(method, path, &self.token)
    }

    /// Send `builder` and require `expected` back.
    ///
    /// 404 becomes `NotFound`; any other unexpected status becomes `Api`.
    async fn send(builder: RequestBuilder, expected: StatusCode) -> Result<Response> {
        let response = builder
            .send()
            .await
            .map_err(|e| CoreError::transport(e.to_string()))?;

        let status = response.status();
        if status == expected {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);
        debug!(status = status.as_u16(), %message, "platform request failed");

        if status == StatusCode::NOT_FOUND {
            Err(CoreError::not_found(message))
        } else {
            Err(CoreError::api(status.as_u16(), message))
        }
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CoreError::transport(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Best-effort human message for a failed response
fn error_message(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody {
            code: Some(code),
            message: None,
        }) => code,
        _ if !body.trim().is_empty() => body.trim().to_string(),
        _ => status
            .canonical_reason()
            .unwrap_or("unexpected status")
            .to_string(),
    }
}
