//! HTTP dispatch primitives.

use std::time::Duration;

use kunai_core::config::Settings;
use kunai_core::constants::{DEFAULT_TIMEOUT_SECONDS, DEFAULT_USER_AGENT};

use crate::error::{TransportError, TransportResult};

/// The request-execution primitive collection entities are built over.
///
/// One method, one suspension point: POST a body to a URL with the given
/// headers. Success is whatever status range the implementation accepts;
/// response bodies are not surfaced.
pub trait Dispatcher {
    /// Posts `body` to `url` with the given headers.
    ///
    /// ## Errors
    /// Fails with a transport error on network failure or a non-success
    /// HTTP status.
    #[allow(async_fn_in_trait)]
    async fn post(&self, url: &str, headers: &[(&str, &str)], body: String) -> TransportResult<()>;
}

/// Dispatcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestDispatcher {
    client: reqwest::Client,
}

impl ReqwestDispatcher {
    /// Creates a dispatcher with the default client configuration.
    ///
    /// ## Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new() -> TransportResult<Self> {
        Self::with_options(
            Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            DEFAULT_USER_AGENT,
        )
    }

    /// Creates a dispatcher from loaded settings.
    ///
    /// ## Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn from_settings(settings: &Settings) -> TransportResult<Self> {
        Self::with_options(
            Duration::from_secs(settings.http.timeout_seconds),
            &settings.http.user_agent,
        )
    }

    fn with_options(timeout: Duration, user_agent: &str) -> TransportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

impl Dispatcher for ReqwestDispatcher {
    #[tracing::instrument(skip(self, body), fields(body_len = body.len()))]
    async fn post(&self, url: &str, headers: &[(&str, &str)], body: String) -> TransportResult<()> {
        let mut request = self.client.post(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.body(body).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            tracing::debug!(status = status.as_u16(), url, "POST rejected");
            Err(TransportError::Status {
                status: status.as_u16(),
                url: url.to_owned(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatcher_from_default_settings() {
        let dispatcher = ReqwestDispatcher::new();
        assert!(dispatcher.is_ok());
    }

    #[test]
    fn dispatcher_from_loaded_settings() {
        let settings = kunai_core::config::Settings::load().unwrap();
        let dispatcher = ReqwestDispatcher::from_settings(&settings);
        assert!(dispatcher.is_ok());
    }
}
