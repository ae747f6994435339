pub mod config;
pub mod error;
pub mod http;
pub mod tokens;

pub use config::{ApiKey, ClientConfig, HttpClientConfig};
pub use error::LlmError;
pub use tokens::TokenCounter;
