//! Token counting and generation-budget arithmetic.

use tiktoken_rs::{CoreBPE, get_bpe_from_model, r50k_base};

use crate::core::error::LlmError;

/// Token counter matching the configured model's tokenizer.
pub struct TokenCounter {
    bpe: CoreBPE,
}

impl TokenCounter {
    /// Build a counter for `model`, falling back to the r50k base encoding
    /// for identifiers the tiktoken mapping does not know.
    pub fn for_model(model: &str) -> Result<Self, LlmError> {
        let bpe = get_bpe_from_model(model)
            .or_else(|_| r50k_base())
            .map_err(|e| LlmError::Configuration(format!("Failed to load tokenizer: {e}")))?;
        Ok(Self { bpe })
    }

    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    /// Generation budget left once `prompt` is spent.
    ///
    /// The budget handed to the service is `max_tokens` minus the prompt's
    /// token count; a prompt large enough to push it under `min_tokens`
    /// fails here, before any request is issued.
    pub fn generation_budget(
        &self,
        prompt: &str,
        max_tokens: u32,
        min_tokens: u32,
    ) -> Result<u32, LlmError> {
        let prompt_tokens = self.count(prompt);
        let budget = i64::from(max_tokens) - prompt_tokens as i64;
        if budget <= 0 || budget < i64::from(min_tokens) {
            return Err(LlmError::TokenBudget {
                prompt_tokens,
                max_tokens,
                min_tokens,
            });
        }
        Ok(budget as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_are_positive_for_nonempty_text() {
        let counter = TokenCounter::for_model("gpt-4o-mini").unwrap();
        assert_eq!(counter.count(""), 0);
        assert!(counter.count("fn main() {}") > 0);
    }

    #[test]
    fn unknown_models_fall_back_to_base_encoding() {
        let counter = TokenCounter::for_model("review-model-x").unwrap();
        assert!(counter.count("hello world") > 0);
    }

    #[test]
    fn small_prompt_leaves_positive_budget() {
        let counter = TokenCounter::for_model("gpt-4o-mini").unwrap();
        let budget = counter.generation_budget("short prompt", 4000, 256).unwrap();
        assert!(budget > 0);
        assert!(budget < 4000);
    }

    #[test]
    fn oversized_prompt_fails_before_any_request() {
        let counter = TokenCounter::for_model("gpt-4o-mini").unwrap();
        let prompt = "word ".repeat(200);

        let err = counter.generation_budget(&prompt, 100, 256).unwrap_err();
        match err {
            LlmError::TokenBudget {
                prompt_tokens,
                max_tokens,
                min_tokens,
            } => {
                assert!(prompt_tokens >= 200);
                assert_eq!(max_tokens, 100);
                assert_eq!(min_tokens, 256);
            }
            other => panic!("expected TokenBudget error, got {other:?}"),
        }
    }

    #[test]
    fn budget_floor_is_enforced_even_when_positive() {
        let counter = TokenCounter::for_model("gpt-4o-mini").unwrap();
        let prompt = "word ".repeat(200);
        let prompt_tokens = counter.count(&prompt) as u32;

        // Leaves a positive budget, but under the floor.
        let max_tokens = prompt_tokens + 10;
        let err = counter
            .generation_budget(&prompt, max_tokens, 256)
            .unwrap_err();
        assert!(matches!(err, LlmError::TokenBudget { .. }));

        // With no floor the same call succeeds.
        let budget = counter.generation_budget(&prompt, max_tokens, 0).unwrap();
        assert_eq!(budget, 10);

        // A zero budget fails even without a floor.
        let err = counter
            .generation_budget(&prompt, prompt_tokens, 0)
            .unwrap_err();
        assert!(matches!(err, LlmError::TokenBudget { .. }));
    }
}
