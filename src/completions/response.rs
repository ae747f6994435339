//! Streamed chunk shapes and content extraction.
//!
//! Chunks that fail to parse or carry no content are skipped rather than
//! failing the call; content already accumulated is preserved.

use serde::Deserialize;

/// One chunk of a streamed chat completion.
#[derive(Debug, Deserialize)]
pub struct ChatChunk {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    #[serde(default)]
    pub delta: Option<ChunkContent>,
    #[serde(default)]
    pub message: Option<ChunkContent>,
}

#[derive(Debug, Deserialize)]
pub struct ChunkContent {
    #[serde(default)]
    pub content: Option<String>,
}

/// One chunk of a streamed legacy text completion.
#[derive(Debug, Deserialize)]
pub struct TextChunk {
    #[serde(default)]
    pub choices: Vec<TextChoice>,
}

#[derive(Debug, Deserialize)]
pub struct TextChoice {
    #[serde(default)]
    pub text: Option<String>,
}

/// Pull the generated text out of one chat event payload.
///
/// A chunk's first choice may carry incremental `delta` content, full
/// `message` content, or both; they are appended in that order.
pub fn chat_chunk_content(data: &str) -> Option<String> {
    let chunk: ChatChunk = serde_json::from_str(data).ok()?;
    let choice = chunk.choices.first()?;

    let mut content = String::new();
    if let Some(delta) = choice.delta.as_ref().and_then(|d| d.content.as_deref()) {
        content.push_str(delta);
    }
    if let Some(message) = choice.message.as_ref().and_then(|m| m.content.as_deref()) {
        content.push_str(message);
    }

    (!content.is_empty()).then_some(content)
}

/// Pull the generated text out of one legacy text event payload.
pub fn text_chunk_content(data: &str) -> Option<String> {
    let chunk: TextChunk = serde_json::from_str(data).ok()?;
    chunk.choices.first()?.text.clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delta_content_is_extracted() {
        let data = r#"{"choices":[{"delta":{"content":"Looks "}}]}"#;
        assert_eq!(chat_chunk_content(data).as_deref(), Some("Looks "));
    }

    #[test]
    fn message_content_is_extracted() {
        let data = r#"{"choices":[{"message":{"content":"good."}}]}"#;
        assert_eq!(chat_chunk_content(data).as_deref(), Some("good."));
    }

    #[test]
    fn delta_and_message_concatenate_in_order() {
        let data =
            r#"{"choices":[{"delta":{"content":"a"},"message":{"content":"b"}}]}"#;
        assert_eq!(chat_chunk_content(data).as_deref(), Some("ab"));
    }

    #[test]
    fn malformed_and_empty_chunks_are_skipped() {
        assert_eq!(chat_chunk_content("{ not json"), None);
        assert_eq!(chat_chunk_content(r#"{"choices":[]}"#), None);
        assert_eq!(chat_chunk_content(r#"{"choices":[{}]}"#), None);
        assert_eq!(
            chat_chunk_content(r#"{"choices":[{"delta":{}}]}"#),
            None
        );
        assert_eq!(chat_chunk_content(r#"{"choices":null}"#), None);
    }

    #[test]
    fn text_chunks_yield_plain_text() {
        let data = r#"{"choices":[{"text":"review body"}]}"#;
        assert_eq!(text_chunk_content(data).as_deref(), Some("review body"));

        assert_eq!(text_chunk_content("{ not json"), None);
        assert_eq!(text_chunk_content(r#"{"choices":[]}"#), None);
        assert_eq!(text_chunk_content(r#"{"choices":[{}]}"#), None);
    }
}
