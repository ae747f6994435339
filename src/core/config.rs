//! Client configuration and credential resolution.

use std::time::Duration;

use crate::core::error::LlmError;
use crate::prompt::ReviewTemplate;

pub const API_BASE: &str = "https://api.openai.com/v1";
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// Where the client takes its credential from.
///
/// The credential is resolved once, at construction; there is no hidden
/// process-global key state.
#[derive(Debug, Clone)]
pub enum ApiKey {
    /// Read `OPENAI_API_KEY` from the environment.
    Default,
    /// Use the given key verbatim.
    Custom(String),
}

impl ApiKey {
    pub(crate) fn resolve(self) -> Result<String, LlmError> {
        match self {
            ApiKey::Default => std::env::var(API_KEY_ENV_VAR)
                .map_err(|_| LlmError::Configuration(format!("{API_KEY_ENV_VAR} not set."))),
            ApiKey::Custom(key) => Ok(key),
        }
    }
}

/// Configuration for HTTP client resilience.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Deadline for a single attempt, connect through end of stream.
    pub timeout: Duration,
    /// Total elapsed time allowed across retries of one call.
    pub max_elapsed: Duration,
    /// Base duration for exponential backoff.
    pub initial_retry_delay: Duration,
    /// Cap on the backoff duration.
    pub max_retry_delay: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(100),
            max_elapsed: Duration::from_secs(300),
            initial_retry_delay: Duration::from_millis(500),
            max_retry_delay: Duration::from_secs(30),
        }
    }
}

/// Sampling parameters, token budget, and template selection for one client.
/// Immutable once the client is constructed.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Model identifier; `gpt-` prefixed models use the chat endpoint.
    pub model: String,
    pub temperature: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// Total token allowance shared between prompt and generation.
    pub max_tokens: u32,
    /// Floor on the generation budget left once the prompt is counted.
    pub min_tokens: u32,
    /// System instruction the client sends with every call.
    pub template: ReviewTemplate,
    pub base_url: String,
    pub http_config: HttpClientConfig,
}

impl ClientConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            temperature: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_tokens: 4000,
            min_tokens: 256,
            template: ReviewTemplate::PullRequest,
            base_url: API_BASE.to_string(),
            http_config: HttpClientConfig::default(),
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_frequency_penalty(mut self, frequency_penalty: f32) -> Self {
        self.frequency_penalty = frequency_penalty;
        self
    }

    pub fn with_presence_penalty(mut self, presence_penalty: f32) -> Self {
        self.presence_penalty = presence_penalty;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_min_tokens(mut self, min_tokens: u32) -> Self {
        self.min_tokens = min_tokens;
        self
    }

    pub fn with_template(mut self, template: ReviewTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_http_config(mut self, http_config: HttpClientConfig) -> Self {
        self.http_config = http_config;
        self
    }
}
