//! # diffrev
//!
//! A thin client for turning pull-request diffs into reviewer prompts and
//! streaming back generated review text from a hosted completion API.
//!
//! The client dispatches between a chat-style and a legacy text-style call
//! based on the configured model, retries transient service failures with
//! exponential backoff, and aggregates the streamed response into one
//! string; partial results are never exposed.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use diffrev::{ApiKey, ClientConfig, CompletionClient, ReviewRequest, ReviewTemplate};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("gpt-4o-mini")
//!         .with_template(ReviewTemplate::PullRequest);
//!     let client = CompletionClient::new(config, ApiKey::Default)?;
//!
//!     let request = ReviewRequest {
//!         changes: "-fn old()\n+fn renamed()".to_string(),
//!         ..Default::default()
//!     };
//!     let review = client.get_completion(&client.get_pr_prompt(&request)).await?;
//!     println!("{review}");
//!     Ok(())
//! }
//! ```

pub mod completions;
pub mod core;
pub mod prompt;

pub use completions::CompletionClient;
pub use crate::core::{ApiKey, ClientConfig, HttpClientConfig, LlmError};
pub use prompt::{ReviewRequest, ReviewTemplate, file_prompt, pr_prompt};
