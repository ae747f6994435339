use serde::Serialize;

/// Chat-style completion request.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    /// Generation budget: total allowance minus prompt tokens.
    pub max_tokens: u32,
    pub stream: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
}

/// Legacy text completion request: one combined prompt block instead of a
/// message list.
#[derive(Debug, Clone, Serialize)]
pub struct TextRequest {
    pub model: String,
    pub prompt: String,
    pub temperature: f32,
    pub best_of: u32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
    pub max_tokens: u32,
    pub stream: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn chat_request_serializes_roles_snake_case() {
        let request = ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![
                ChatMessage {
                    role: ChatRole::System,
                    content: "be brief".to_string(),
                },
                ChatMessage {
                    role: ChatRole::User,
                    content: "review this".to_string(),
                },
            ],
            temperature: 0.7,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_tokens: 512,
            stream: true,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["role"], "user");
        assert_eq!(value["stream"], json!(true));
        assert_eq!(value["max_tokens"], json!(512));
    }

    #[test]
    fn text_request_carries_best_of_one() {
        let request = TextRequest {
            model: "text-davinci-003".to_string(),
            prompt: "system\nuser".to_string(),
            temperature: 0.7,
            best_of: 1,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
            max_tokens: 512,
            stream: true,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["best_of"], json!(1));
        assert_eq!(value["prompt"], "system\nuser");
        assert_eq!(value["stream"], json!(true));
    }
}
