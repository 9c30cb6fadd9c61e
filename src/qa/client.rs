/// Question-answering HTTP client implementation.
///
/// This module provides `QaClient` for posting questions to the remote endpoint,
/// along with the error type whose messages are shown to the user.
use std::time::Duration;

use thiserror::Error;

use crate::models::{AnswerResult, EncodedPayload};

/// Endpoint used when neither the builder nor `VTA_ENDPOINT` provides one.
pub const DEFAULT_ENDPOINT: &str = "https://virtual-ta-khaki.vercel.app/query";

/// Message shown when a failure carries no message of its own.
pub const FALLBACK_ERROR_MESSAGE: &str = "Failed to fetch response";

/// Errors that can occur when talking to the question-answering endpoint.
///
/// The `Display` output of each variant is the message shown to the user.
#[derive(Debug, Error)]
pub enum QaError {
    /// Network-related errors (connection refused, DNS resolution, body read failures)
    #[error("{0}")]
    Network(#[source] reqwest::Error),

    /// Non-success HTTP status, with the endpoint's `error` message when it sent one
    #[error("{}", http_error_message(*status, message.as_deref()))]
    Http { status: u16, message: Option<String> },

    /// Success response whose body is not a valid answer
    #[error("{0}")]
    Serialization(#[source] serde_json::Error),

    /// Invalid endpoint URL configuration
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl QaError {
    /// Returns the single message to show the user for this failure.
    ///
    /// Falls back to `FALLBACK_ERROR_MESSAGE` when the error renders empty.
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            FALLBACK_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

fn http_error_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => message.to_string(),
        None => format!("HTTP error! status: {status}"),
    }
}

/// Builder for constructing `QaClient` instances.
///
/// # Examples
///
/// ```
/// use vta::qa::QaClientBuilder;
///
/// let client = QaClientBuilder::new()
///     .endpoint("http://localhost:3000/query")
///     .build()
///     .expect("Failed to create client");
/// assert_eq!(client.endpoint(), "http://localhost:3000/query");
/// ```
#[derive(Debug, Default)]
pub struct QaClientBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
}

impl QaClientBuilder {
    /// Creates a new `QaClientBuilder` with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the full URL of the query endpoint.
    ///
    /// # Arguments
    ///
    /// * `url` - The endpoint URL (e.g., "https://virtual-ta-khaki.vercel.app/query")
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Sets an overall request timeout.
    ///
    /// Requests have no timeout unless this is called.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the `QaClient` with the configured settings.
    ///
    /// # Environment Variables
    ///
    /// If `endpoint()` was not called, this method will check the `VTA_ENDPOINT`
    /// environment variable. If not set, it defaults to [`DEFAULT_ENDPOINT`].
    ///
    /// # Errors
    ///
    /// Returns `QaError::InvalidUrl` if the endpoint is not a valid URL, or
    /// `QaError::Network` if the HTTP client cannot be created.
    pub fn build(self) -> Result<QaClient, QaError> {
        // Determine endpoint: use builder value, then env var, then default
        let endpoint = if let Some(url) = self.endpoint {
            url
        } else {
            std::env::var("VTA_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string())
        };

        reqwest::Url::parse(&endpoint)
            .map_err(|e| QaError::InvalidUrl(format!("{}: {}", endpoint, e)))?;

        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(QaError::Network)?;

        Ok(QaClient { client, endpoint })
    }
}

/// Blocking HTTP client for the question-answering endpoint.
///
/// Each call to `ask` issues exactly one POST. There are no retries.
pub struct QaClient {
    client: reqwest::blocking::Client,
    endpoint: String,
}

/// Trait for question-answering operations.
///
/// This trait enables mocking the endpoint in unit tests.
pub trait QaClientTrait: Send + Sync {
    /// Sends an encoded question and returns the endpoint's answer.
    ///
    /// # Errors
    ///
    /// Returns a `QaError` for transport failures, non-success statuses, and
    /// malformed answer bodies.
    fn ask(&self, payload: &EncodedPayload) -> Result<AnswerResult, QaError>;
}

impl QaClient {
    /// Returns the endpoint URL configured for this client.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn ask_internal(&self, payload: &EncodedPayload) -> Result<AnswerResult, QaError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(payload)
            .send()
            .map_err(QaError::Network)?;

        let status = response.status();
        log::info!("endpoint responded with status {}", status.as_u16());

        if !status.is_success() {
            // An unreadable failure body still reports the status.
            let message = response
                .text()
                .ok()
                .and_then(|body| extract_error_message(&body));
            return Err(QaError::Http {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().map_err(QaError::Network)?;
        serde_json::from_str(&body).map_err(QaError::Serialization)
    }
}

impl QaClientTrait for QaClient {
    fn ask(&self, payload: &EncodedPayload) -> Result<AnswerResult, QaError> {
        self.ask_internal(payload)
    }
}

/// Pulls a non-empty `error` string out of a failure body.
fn extract_error_message(body: &str) -> Option<String> {
    let json: serde_json::Value = serde_json::from_str(body).ok()?;
    json.get("error")
        .and_then(|v| v.as_str())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}
