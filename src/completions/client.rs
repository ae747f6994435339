//! Completion client for streamed review generation.

use tracing::debug;

use crate::completions::request::{ChatMessage, ChatRequest, ChatRole, TextRequest};
use crate::completions::response::{chat_chunk_content, text_chunk_content};
use crate::core::{ApiKey, ClientConfig, LlmError, TokenCounter, http::HttpClient};
use crate::prompt::{self, ReviewRequest};

pub const CHAT_ENDPOINT: &str = "/chat/completions";
pub const TEXT_ENDPOINT: &str = "/completions";

/// Client for a hosted completion service, turning review prompts into
/// streamed, aggregated review text.
///
/// One logical call per invocation; independent calls may run concurrently
/// from separate tasks, each owning its own response stream.
pub struct CompletionClient {
    config: ClientConfig,
    api_key: String,
    http: HttpClient,
    tokens: TokenCounter,
}

impl CompletionClient {
    /// Build a client from `config`, resolving the credential and
    /// initializing a token counter for the configured model.
    pub fn new(config: ClientConfig, api_key: ApiKey) -> Result<Self, LlmError> {
        let api_key = api_key.resolve()?;
        let http = HttpClient::new(config.http_config.clone())?;
        let tokens = TokenCounter::for_model(&config.model)?;

        Ok(Self {
            config,
            api_key,
            http,
            tokens,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Generate review text for `prompt`.
    ///
    /// Chat-capable (`gpt-` prefixed) models use the chat endpoint;
    /// everything else uses the legacy text endpoint. The streamed response
    /// is aggregated internally and returned as one string.
    pub async fn get_completion(&self, prompt: &str) -> Result<String, LlmError> {
        if self.config.model.starts_with("gpt-") {
            self.get_completion_chat(prompt).await
        } else {
            self.get_completion_text(prompt).await
        }
    }

    /// Chat-style call: the selected system instruction plus the user
    /// prompt, streamed.
    pub async fn get_completion_chat(&self, prompt: &str) -> Result<String, LlmError> {
        let system = self.config.template.system_prompt();
        let combined = format!("{system}\n{prompt}");
        let max_tokens = self.tokens.generation_budget(
            &combined,
            self.config.max_tokens,
            self.config.min_tokens,
        )?;

        debug!(model = %self.config.model, max_tokens, "requesting chat completion");

        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: system.to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: prompt.to_string(),
                },
            ],
            temperature: self.config.temperature,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
            max_tokens,
            stream: true,
        };

        let url = format!("{}{}", self.config.base_url, CHAT_ENDPOINT);
        self.http
            .post_sse(&url, &self.api_key, &request, chat_chunk_content)
            .await
    }

    /// Legacy text call: system instruction and user prompt concatenated
    /// into one block, streamed.
    pub async fn get_completion_text(&self, prompt: &str) -> Result<String, LlmError> {
        let combined = format!("{}\n{}", self.config.template.system_prompt(), prompt);
        let max_tokens = self.tokens.generation_budget(
            &combined,
            self.config.max_tokens,
            self.config.min_tokens,
        )?;

        debug!(model = %self.config.model, max_tokens, "requesting text completion");

        let request = TextRequest {
            model: self.config.model.clone(),
            prompt: combined,
            temperature: self.config.temperature,
            best_of: 1,
            frequency_penalty: self.config.frequency_penalty,
            presence_penalty: self.config.presence_penalty,
            max_tokens,
            stream: true,
        };

        let url = format!("{}{}", self.config.base_url, TEXT_ENDPOINT);
        self.http
            .post_sse(&url, &self.api_key, &request, text_chunk_content)
            .await
    }

    /// Format a pull-request-level review prompt. See [`prompt::pr_prompt`].
    pub fn get_pr_prompt(&self, request: &ReviewRequest) -> String {
        prompt::pr_prompt(request)
    }

    /// Format a per-file review prompt. See [`prompt::file_prompt`].
    pub fn get_file_prompt(&self, request: &ReviewRequest) -> String {
        prompt::file_prompt(request)
    }
}
