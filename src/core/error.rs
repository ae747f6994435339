use thiserror::Error;

/// Errors surfaced by the completion client.
#[derive(Error, Debug)]
pub enum LlmError {
    /// Connection-level failure talking to the completion service.
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The service answered with a non-success HTTP status.
    #[error("API error ({status_code}): {message}")]
    Api { message: String, status_code: u16 },

    /// The prompt leaves less than the configured generation floor.
    #[error(
        "prompt occupies {prompt_tokens} of {max_tokens} tokens, \
         leaving less than the {min_tokens}-token generation floor"
    )]
    TokenBudget {
        prompt_tokens: usize,
        max_tokens: u32,
        min_tokens: u32,
    },

    /// Construction-time problem: missing credential, bad client settings.
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LlmError {
    /// Transient failures are retried; everything else propagates at once.
    ///
    /// Transient means the service may recover on its own: rate limiting
    /// (429), temporary unavailability (503), or a connection-level error.
    pub fn is_transient(&self) -> bool {
        match self {
            LlmError::Network { .. } => true,
            LlmError::Api { status_code, .. } => *status_code == 429 || *status_code == 503,
            _ => false,
        }
    }
}
