//! Remote image generation.
//!
//! The rest of the crate only sees an [`ImageProvider`]: a prompt goes in,
//! encoded image bytes come out. Failures are reported once; there is no
//! retry loop.

mod client;

use std::future::Future;

pub use client::{
    validate_prompt, OpenAiImageClient, DEFAULT_IMAGE_SIZE, OPENAI_API_BASE_URL,
    OPENAI_API_KEY_ENV,
};

/// Produces encoded image bytes (PNG or similar) from a text prompt.
pub trait ImageProvider {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<Vec<u8>, ProviderError>> + Send;
}

/// Errors that can occur while requesting an image.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("API key not configured (set {})", OPENAI_API_KEY_ENV)]
    MissingApiKey,

    #[error("Empty prompt")]
    EmptyPrompt,

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited: {message}")]
    RateLimit {
        /// Human-readable rate limit message
        message: String,
        /// Retry-After header value in seconds, if provided
        retry_after_secs: Option<u64>,
    },

    #[error("Content policy violation: {message}")]
    ContentPolicyViolation {
        /// Explanation returned by the API
        message: String,
    },

    #[error("Response did not contain an image")]
    MissingImage,
}
