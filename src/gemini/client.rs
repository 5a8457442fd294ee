//! Google Gemini HTTP client implementation

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::errors::{HariError, Result};
use crate::gemini::{GeminiConfig, GenerateContentRequest, GenerateContentResponse};
use crate::providers::{ChatOptions, Message, Provider};

/// Rate limiting information
#[derive(Debug)]
struct RateLimit {
    requests_count: u32,
    window_start: Instant,
    window_duration: Duration,
}

impl RateLimit {
    fn new() -> Self {
        Self {
            requests_count: 0,
            window_start: Instant::now(),
            window_duration: Duration::from_secs(60),
        }
    }

    fn can_make_request(&mut self, max_rpm: u32) -> bool {
        let now = Instant::now();

        // Reset window if it has passed
        if now.duration_since(self.window_start) >= self.window_duration {
            self.requests_count = 0;
            self.window_start = now;
        }

        self.requests_count < max_rpm
    }

    fn record_request(&mut self) {
        self.requests_count += 1;
    }
}

/// Google Gemini HTTP client
pub struct GeminiClient {
    config: GeminiConfig,
    client: reqwest::Client,
    rate_limit: Arc<Mutex<RateLimit>>,
}

impl GeminiClient {
    /// Create a new Gemini client
    pub fn new(config: GeminiConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("hari/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HariError::NetworkError(format!("Failed to create HTTP client: {e}")))?;

        let rate_limit = Arc::new(Mutex::new(RateLimit::new()));

        info!("Gemini client initialized with model: {}", config.model);

        Ok(Self {
            config,
            client,
            rate_limit,
        })
    }

    /// Make a request to the Gemini API with retries
    pub async fn generate_content(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let mut last_error = None;

        for attempt in 1..=self.config.max_retries {
            // Check rate limit
            {
                let mut rate_limit = self.rate_limit.lock().await;
                if !rate_limit.can_make_request(self.config.rate_limit_rpm) {
                    warn!("Rate limit exceeded, waiting...");
                    drop(rate_limit);
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    continue;
                }
                rate_limit.record_request();
            }

            debug!("Gemini API attempt {} of {}", attempt, self.config.max_retries);

            match self.make_request(request).await {
                Ok(response) => {
                    debug!("Gemini API request successful on attempt {}", attempt);
                    return Ok(response);
                }
                Err(e) => {
                    warn!("Gemini API attempt {} failed: {}", attempt, e);
                    last_error = Some(e);

                    if attempt < self.config.max_retries {
                        let delay = Duration::from_millis(1000 * u64::from(attempt));
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| HariError::NetworkError("All Gemini API attempts failed".to_string())))
    }

    /// Make a single request to the Gemini API
    async fn make_request(
        &self,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.config.endpoint_url();

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| HariError::NetworkError(format!("Request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());

            error!("Gemini API error {}: {}", status, error_text);
            return Err(HariError::ApiError(format!(
                "Gemini API error {status}: {error_text}"
            )));
        }

        let gemini_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| HariError::ParseError(format!("Failed to parse response: {e}")))?;

        if gemini_response.is_blocked() {
            warn!("Gemini response was blocked by safety filters");
            return Err(HariError::ApiError(
                "Response blocked by Gemini safety filters".to_string(),
            ));
        }

        Ok(gemini_response)
    }
}

#[async_trait]
impl Provider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn reply(
        &self,
        history: &[Message],
        message: &str,
        options: &ChatOptions,
    ) -> Result<String> {
        let request = GenerateContentRequest::new_chat(history, message, options);

        debug!(
            model = %self.config.model,
            turns = history.len(),
            "requesting chat reply"
        );

        let response = self.generate_content(&request).await?;

        response
            .get_text()
            .ok_or_else(|| HariError::ApiError("Empty response from Gemini".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit() {
        let mut rate_limit = RateLimit::new();

        // Should allow first 5 requests
        for _ in 0..5 {
            assert!(rate_limit.can_make_request(5));
            rate_limit.record_request();
        }

        // Should deny 6th request
        assert!(!rate_limit.can_make_request(5));
    }

    #[test]
    fn test_client_creation() {
        let config = GeminiConfig {
            api_key: "AIzaTestKey".to_string(),
            ..GeminiConfig::default()
        };

        let client = GeminiClient::new(config);
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_rejects_invalid_config() {
        let client = GeminiClient::new(GeminiConfig::default());
        assert!(client.is_err());
    }
}
