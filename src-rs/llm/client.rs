use std::sync::Arc;

use tracing::{debug, warn};

use super::types::{CompletionRequest, Message, ProviderAdapter, ProviderError};

pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Process-wide LLM handle. Built once at startup and shared read-only.
pub struct LlmClient {
    adapter: Arc<dyn ProviderAdapter>,
    default_model: String,
    max_tokens: u32,
}

impl LlmClient {
    pub fn new(adapter: Arc<dyn ProviderAdapter>, default_model: &str, max_tokens: u32) -> Self {
        let default_model = if default_model.is_empty() {
            DEFAULT_MODEL
        } else {
            default_model
        };
        let max_tokens = if max_tokens == 0 {
            DEFAULT_MAX_TOKENS
        } else {
            max_tokens
        };
        Self {
            adapter,
            default_model: default_model.to_string(),
            max_tokens,
        }
    }

    pub fn try_ask(&self, question: &str, model: Option<&str>) -> Result<String, ProviderError> {
        let model = model.unwrap_or(&self.default_model).to_string();
        debug!(%model, prompt_len = question.len(), "sending completion request");
        let request = CompletionRequest {
            messages: vec![Message::user(question)],
            model,
            max_tokens: self.max_tokens,
        };
        self.adapter.complete(request).map(|resp| resp.content)
    }

    /// Never fails: provider errors come back as text in place of an answer.
    pub fn ask(&self, question: &str, model: Option<&str>) -> String {
        match self.try_ask(question, model) {
            Ok(answer) => answer,
            Err(err) => {
                warn!(code = %err.code, "llm request failed: {}", err.message);
                format!("LLM error: {}", err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::{LLMResponse, MockProviderAdapter};

    #[test]
    fn ask_sends_single_user_message_with_defaults() {
        let mut adapter = MockProviderAdapter::new();
        adapter
            .expect_complete()
            .withf(|req| {
                req.model == DEFAULT_MODEL
                    && req.max_tokens == DEFAULT_MAX_TOKENS
                    && req.messages == vec![Message::user("estimate this")]
            })
            .times(1)
            .returning(|_| {
                Ok(LLMResponse {
                    content: "HOURS: 4".to_string(),
                    raw: None,
                })
            });
        let client = LlmClient::new(Arc::new(adapter), "", 0);

        assert_eq!(client.ask("estimate this", None), "HOURS: 4");
    }

    #[test]
    fn explicit_model_overrides_default() {
        let mut adapter = MockProviderAdapter::new();
        adapter
            .expect_complete()
            .withf(|req| req.model == "llama-3.1-8b-instant")
            .times(1)
            .returning(|_| {
                Ok(LLMResponse {
                    content: "ok".to_string(),
                    raw: None,
                })
            });
        let client = LlmClient::new(Arc::new(adapter), "openai/gpt-oss-20b", 500);

        assert_eq!(client.ask("q", Some("llama-3.1-8b-instant")), "ok");
    }

    #[test]
    fn provider_error_is_folded_into_text() {
        let mut adapter = MockProviderAdapter::new();
        adapter
            .expect_complete()
            .returning(|_| Err(ProviderError::new("rate_limit", "slow down")));
        let client = LlmClient::new(Arc::new(adapter), "", 0);

        assert_eq!(client.ask("q", None), "LLM error: rate_limit: slow down");
        assert!(client.try_ask("q", None).is_err());
    }
}
