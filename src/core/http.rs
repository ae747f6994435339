//! Shared HTTP client with retry logic and streamed response consumption.

use std::time::{Duration, Instant};

use bytes::Bytes;
use futures::StreamExt;
use serde::Serialize;
use tracing::{debug, warn};

use super::config::HttpClientConfig;
use super::error::LlmError;

/// HTTP client with exponential-backoff retries around streamed POSTs.
pub struct HttpClient {
    client: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpClient {
    pub fn new(config: HttpClientConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| {
                LlmError::Configuration(format!("Failed to build reqwest client: {e}"))
            })?;

        Ok(Self { client, config })
    }

    /// POST `body` to `url` and aggregate the event-stream response.
    ///
    /// Each `data:` payload is passed through `extract`; whatever it yields
    /// is appended to the result in arrival order. The `[DONE]` sentinel
    /// ends the stream.
    ///
    /// Transient failures (connection errors, 429, 503) are retried with
    /// exponential backoff until the elapsed-time budget runs out, then the
    /// last error propagates. Other failures propagate immediately. A retry
    /// restarts the stream from scratch; partial content from a failed
    /// attempt is discarded.
    #[tracing::instrument(name = "http_post_sse", skip(self, api_key, body, extract), fields(url = %url), err)]
    pub async fn post_sse<Req, F>(
        &self,
        url: &str,
        api_key: &str,
        body: &Req,
        extract: F,
    ) -> Result<String, LlmError>
    where
        Req: Serialize,
        F: Fn(&str) -> Option<String>,
    {
        let started = Instant::now();
        let mut attempt: u32 = 0;

        loop {
            match self.try_post_sse(url, api_key, body, &extract).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() => {
                    let delay = self.backoff_delay(attempt);
                    if started.elapsed() + delay >= self.config.max_elapsed {
                        warn!(elapsed_secs = started.elapsed().as_secs(), "retry budget exhausted");
                        return Err(err);
                    }
                    warn!(attempt, error = %err, delay_ms = delay.as_millis() as u64, "transient failure, backing off");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: send the request and drain the stream.
    async fn try_post_sse<Req, F>(
        &self,
        url: &str,
        api_key: &str,
        body: &Req,
        extract: &F,
    ) -> Result<String, LlmError>
    where
        Req: Serialize,
        F: Fn(&str) -> Option<String>,
    {
        let res = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| LlmError::Network {
                message: "Request failed".to_string(),
                source: Box::new(e),
            })?;

        let status = res.status();
        if !status.is_success() {
            warn!(status = %status, "API returned error status");
            let message = res
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Api {
                message,
                status_code: status.as_u16(),
            });
        }

        debug!(status = %status, "consuming response stream");

        let mut stream = res.bytes_stream();
        let mut lines = LineBuffer::new();
        let mut out = String::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|e| LlmError::Network {
                message: "Stream interrupted".to_string(),
                source: Box::new(e),
            })?;
            lines.push(&chunk);

            while let Some(line) = lines.next_line() {
                match event_data(&line) {
                    Some("[DONE]") => return Ok(out),
                    Some(data) => {
                        if let Some(content) = extract(data) {
                            out.push_str(&content);
                        }
                    }
                    None => {}
                }
            }
        }

        // Stream closed without a sentinel; flush whatever is buffered.
        if let Some(data) = lines.rest().as_deref().and_then(event_data) {
            if data != "[DONE]" {
                if let Some(content) = extract(data) {
                    out.push_str(&content);
                }
            }
        }

        Ok(out)
    }

    fn backoff_delay(&self, attempt: u32) -> Duration {
        let base =
            self.config.initial_retry_delay.as_millis() as f64 * 2_f64.powi(attempt as i32);

        // +/- 10% jitter (0.9 to 1.1)
        let jitter_factor = rand::random::<f64>() * 0.2 + 0.9;
        let delay_ms = (base * jitter_factor) as u64;

        Duration::from_millis(delay_ms).min(self.config.max_retry_delay)
    }
}

/// Reassembles whole lines from arbitrarily split network chunks.
struct LineBuffer {
    pending: Vec<u8>,
}

impl LineBuffer {
    fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    fn push(&mut self, chunk: &Bytes) {
        self.pending.extend_from_slice(chunk);
    }

    fn next_line(&mut self) -> Option<String> {
        let pos = self.pending.iter().position(|&b| b == b'\n')?;
        let line: Vec<u8> = self.pending.drain(..=pos).collect();
        Some(String::from_utf8_lossy(&line).trim().to_string())
    }

    /// Remaining bytes that never saw a terminating newline.
    fn rest(&self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        Some(String::from_utf8_lossy(&self.pending).trim().to_string())
    }
}

/// Strip the `data:` field prefix from an event-stream line, if present.
fn event_data(line: &str) -> Option<&str> {
    line.strip_prefix("data:").map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_data_strips_prefix_and_padding() {
        assert_eq!(event_data("data: {\"x\":1}"), Some("{\"x\":1}"));
        assert_eq!(event_data("data:[DONE]"), Some("[DONE]"));
        assert_eq!(event_data(": keep-alive comment"), None);
        assert_eq!(event_data(""), None);
    }

    #[test]
    fn line_buffer_joins_split_chunks() {
        let mut lines = LineBuffer::new();
        lines.push(&Bytes::from_static(b"data: hel"));
        assert_eq!(lines.next_line(), None);

        lines.push(&Bytes::from_static(b"lo\ndata: world\n"));
        assert_eq!(lines.next_line().as_deref(), Some("data: hello"));
        assert_eq!(lines.next_line().as_deref(), Some("data: world"));
        assert_eq!(lines.next_line(), None);
        assert_eq!(lines.rest(), None);
    }

    #[test]
    fn line_buffer_reports_unterminated_tail() {
        let mut lines = LineBuffer::new();
        lines.push(&Bytes::from_static(b"data: tail"));
        assert_eq!(lines.next_line(), None);
        assert_eq!(lines.rest().as_deref(), Some("data: tail"));
    }
}
