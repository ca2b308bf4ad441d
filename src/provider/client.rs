//! OpenAiImageClient - text-to-image over the OpenAI Images API.

use serde::{Deserialize, Serialize};

use super::{ImageProvider, ProviderError};

/// The environment variable name for the OpenAI API key.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Default base URL for the OpenAI API.
pub const OPENAI_API_BASE_URL: &str = "https://api.openai.com/v1";

/// Default generated image size.
pub const DEFAULT_IMAGE_SIZE: &str = "512x512";

/// Default timeout for HTTP requests (60 seconds, generation is slow).
const DEFAULT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(60);

/// Default connection timeout (10 seconds).
const DEFAULT_CONNECT_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// HTTP status code for rate limiting.
const HTTP_STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// HTTP status code for bad request (often content policy).
const HTTP_STATUS_BAD_REQUEST: u16 = 400;

/// HTTP status code for forbidden (content policy violation).
const HTTP_STATUS_FORBIDDEN: u16 = 403;

/// Keywords that indicate a content policy violation in error messages.
const CONTENT_POLICY_KEYWORDS: &[&str] = &[
    "content policy",
    "content_policy",
    "safety system",
    "policy violation",
    "not allowed",
    "blocked",
    "moderation",
];

/// Check if an error message indicates a content policy violation.
fn is_content_policy_error(error_text: &str) -> bool {
    let lower = error_text.to_lowercase();
    CONTENT_POLICY_KEYWORDS.iter().any(|keyword| lower.contains(keyword))
}

/// Validate a prompt before sending it to the API.
///
/// # Errors
/// `ProviderError::EmptyPrompt` for empty or whitespace-only prompts.
pub fn validate_prompt(prompt: &str) -> Result<(), ProviderError> {
    if prompt.trim().is_empty() {
        return Err(ProviderError::EmptyPrompt);
    }
    Ok(())
}

/// Request body for image generation.
#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    n: u32,
    size: &'a str,
}

/// Response from the generation endpoint.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    url: Option<String>,
}

/// Client for the OpenAI image generation endpoint.
pub struct OpenAiImageClient {
    api_key: String,
    base_url: String,
    size: String,
    http_client: reqwest::Client,
}

impl OpenAiImageClient {
    /// Create a client with the API key from `OPENAI_API_KEY`.
    ///
    /// # Errors
    /// `ProviderError::MissingApiKey` if the variable is not set.
    pub fn new() -> Result<Self, ProviderError> {
        let api_key = std::env::var(OPENAI_API_KEY_ENV).map_err(|_| ProviderError::MissingApiKey)?;
        Self::with_api_key(api_key)
    }

    /// Create a client with an explicit API key.
    pub fn with_api_key(api_key: String) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, OPENAI_API_BASE_URL.to_string())
    }

    /// Create a client against a custom base URL.
    ///
    /// Useful for compatible gateways and for testing against a mock server.
    pub fn with_base_url(api_key: String, base_url: String) -> Result<Self, ProviderError> {
        if api_key.is_empty() {
            return Err(ProviderError::MissingApiKey);
        }

        let http_client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()?;

        Ok(Self {
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            size: DEFAULT_IMAGE_SIZE.to_string(),
            http_client,
        })
    }

    /// Request a different image size, e.g. `"1024x1024"`.
    pub fn size(mut self, size: impl Into<String>) -> Self {
        self.size = size.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn image_size(&self) -> &str {
        &self.size
    }

    /// Ask the API for one image and return its URL.
    ///
    /// # Errors
    /// `EmptyPrompt` before any request is made, `RateLimit` on 429,
    /// `ContentPolicyViolation` on a 400/403 whose body mentions policy,
    /// `ApiError` on any other failure status, `MissingImage` if the response
    /// carries no URL, `HttpError` if the request itself fails.
    pub async fn request_image_url(&self, prompt: &str) -> Result<String, ProviderError> {
        validate_prompt(prompt)?;

        let url = format!("{}/images/generations", self.base_url);
        let request_body = GenerateRequest {
            prompt,
            n: 1,
            size: &self.size,
        };

        log::info!("Requesting {} image for prompt ({} chars)", self.size, prompt.len());

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();

            if status.as_u16() == HTTP_STATUS_TOO_MANY_REQUESTS {
                let retry_after_secs = parse_retry_after(&response);
                let error_text = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Rate limit exceeded".to_string());
                log::warn!(
                    "Rate limited by image API. Retry-After: {:?} seconds",
                    retry_after_secs
                );
                return Err(ProviderError::RateLimit {
                    message: error_text,
                    retry_after_secs,
                });
            }

            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            if (status.as_u16() == HTTP_STATUS_BAD_REQUEST
                || status.as_u16() == HTTP_STATUS_FORBIDDEN)
                && is_content_policy_error(&error_text)
            {
                log::warn!("Prompt rejected by content policy: {}", error_text);
                return Err(ProviderError::ContentPolicyViolation {
                    message: error_text,
                });
            }

            return Err(ProviderError::ApiError(format!(
                "Image request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: GenerateResponse = response.json().await?;
        body.data
            .into_iter()
            .find_map(|image| image.url)
            .ok_or(ProviderError::MissingImage)
    }

    /// Download the image at `url` into memory.
    pub async fn download_image(&self, url: &str) -> Result<Vec<u8>, ProviderError> {
        let response = self.http_client.get(url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ProviderError::ApiError(format!(
                "Image download failed with status {}: {}",
                status, error_text
            )));
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();

        use futures_util::StreamExt;
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result?;
            bytes.extend_from_slice(&chunk);
        }

        log::debug!("Downloaded {} image bytes", bytes.len());
        Ok(bytes)
    }
}

impl ImageProvider for OpenAiImageClient {
    async fn generate(&self, prompt: &str) -> Result<Vec<u8>, ProviderError> {
        let url = self.request_image_url(prompt).await?;
        self.download_image(&url).await
    }
}

/// Parse the Retry-After header value in whole seconds.
fn parse_retry_after(response: &reqwest::Response) -> Option<u64> {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}
