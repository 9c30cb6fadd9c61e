/// Question-answering endpoint client module.
///
/// This module provides a blocking HTTP client for the remote question-answering
/// endpoint, including error mapping to user-facing messages and endpoint configuration.
mod client;

pub use client::{
    DEFAULT_ENDPOINT, FALLBACK_ERROR_MESSAGE, QaClient, QaClientBuilder, QaClientTrait, QaError,
};
