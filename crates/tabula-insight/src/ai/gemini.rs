//! Google Gemini explanation provider.
//!
//! This module provides the [`GeminiProvider`] which implements the
//! [`ExplanationProvider`] trait for Google's Gemini API
//! (<https://ai.google.dev/>).

use std::time::Duration;

use super::{ExplanationProvider, ExplanationRequest};
use anyhow::{Result, anyhow};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Default Gemini API endpoint.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models/";

/// Default model for explanations.
const DEFAULT_MODEL: &str = "gemini-flash-lite-latest";

/// Default timeout for API requests in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default temperature for model responses.
const DEFAULT_TEMPERATURE: f32 = 0.4;

/// Default max tokens for responses.
const DEFAULT_MAX_TOKENS: u32 = 512;

// Gemini API request structures
#[derive(Serialize)]
struct GeminiRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

// Gemini API response structures
#[derive(Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<Part>>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate, unless it was blocked.
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates?.into_iter().next()?;
        if let Some(reason) = &candidate.finish_reason
            && (reason == "SAFETY" || reason == "BLOCKED")
        {
            return None;
        }
        let parts = candidate.content?.parts?;
        let text: String = parts.into_iter().map(|p| p.text).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

/// Configuration for the Gemini provider.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// The model to use (e.g., "gemini-2.0-flash", "gemini-flash-lite-latest").
    pub model: String,
    /// Temperature for response generation (0.0 - 2.0).
    pub temperature: f32,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Base URL for the API (useful for proxies or custom endpoints).
    pub base_url: String,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_owned(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            base_url: DEFAULT_BASE_URL.to_owned(),
        }
    }
}

impl GeminiConfig {
    /// Create a new configuration builder.
    pub fn builder() -> GeminiConfigBuilder {
        GeminiConfigBuilder::default()
    }
}

/// Builder for [`GeminiConfig`].
#[derive(Default)]
pub struct GeminiConfigBuilder {
    model: Option<String>,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
    timeout_secs: Option<u64>,
    base_url: Option<String>,
}

impl GeminiConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = Some(timeout_secs);
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn build(self) -> GeminiConfig {
        GeminiConfig {
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_owned()),
            temperature: self.temperature.unwrap_or(DEFAULT_TEMPERATURE),
            max_tokens: self.max_tokens.unwrap_or(DEFAULT_MAX_TOKENS),
            timeout_secs: self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            base_url: self.base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_owned()),
        }
    }
}

/// Google Gemini provider for feature explanations.
///
/// # Example
///
/// ```rust,ignore
/// use tabula_insight::ai::{GeminiProvider, GeminiConfig};
///
/// // Simple usage with defaults
/// let provider = GeminiProvider::new("your-api-key")?;
///
/// // With custom configuration
/// let config = GeminiConfig::builder()
///     .model("gemini-2.0-flash")
///     .temperature(0.2)
///     .build();
/// let provider = GeminiProvider::with_config("your-api-key", config)?;
/// ```
pub struct GeminiProvider {
    api_key: String,
    config: GeminiConfig,
    client: Client,
}

impl GeminiProvider {
    /// Create a new Gemini provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, GeminiConfig::default())
    }

    /// Create a provider from the `GEMINI_API_KEY` environment variable.
    ///
    /// Returns `Ok(None)` when the variable is unset or blank.
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var(API_KEY_ENV) {
            Ok(key) if !key.trim().is_empty() => Self::new(key.trim()).map(Some),
            _ => Ok(None),
        }
    }

    /// Create a new Gemini provider with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_config(api_key: impl Into<String>, config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| anyhow!("Failed to build HTTP client: {}", e))?;

        Ok(Self {
            api_key: api_key.into(),
            config,
            client,
        })
    }

    fn build_explanation_prompt(request: &ExplanationRequest) -> String {
        format!(
            "You are a data analyst explaining results to a non-technical user.\n\n\
            TARGET VARIABLE: {}\n\
            FEATURE: {}\n\
            STATISTICS: {}\n\n\
            In two or three short sentences, explain how the feature might relate \
            to the target and what the user should check next. \
            Do not invent numbers that are not in the statistics.",
            request.target, request.feature, request.statistics
        )
    }

    fn call_api(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest {
            contents: vec![Content {
                role: "user".to_owned(),
                parts: vec![Part {
                    text: prompt.to_owned(),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_tokens,
            },
        };

        // {base_url}{model}:generateContent?key={api_key}
        let url = format!(
            "{}{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.api_key
        );

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Gemini API error {}: {}",
                response.status(),
                response.text()?
            ));
        }

        let result: GeminiResponse = response.json()?;
        result
            .into_text()
            .ok_or_else(|| anyhow!("No response content from Gemini API"))
    }
}

impl ExplanationProvider for GeminiProvider {
    fn explain(&self, request: &ExplanationRequest) -> Result<String> {
        debug!(
            "Requesting explanation for '{}' vs '{}' from {}",
            request.feature, request.target, self.config.model
        );
        let prompt = Self::build_explanation_prompt(request);
        self.call_api(&prompt)
    }

    fn name(&self) -> &str {
        "Gemini"
    }

    fn model(&self) -> Option<&str> {
        Some(&self.config.model)
    }
}

// ============================================================================
// Tests
// ============================================================================
