use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::{json, Value};

use super::types::{CompletionRequest, LLMResponse, Message, ProviderAdapter, ProviderError};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";

pub struct GroqConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
}

/// OpenAI-compatible chat-completions adapter. Each call opens its own
/// blocking client, so it has to run off the async executor.
pub struct GroqAdapter {
    cfg: GroqConfig,
}

impl GroqAdapter {
    pub fn new(mut cfg: GroqConfig) -> Self {
        if cfg.base_url.is_empty() {
            cfg.base_url = DEFAULT_BASE_URL.to_string();
        }
        if cfg.timeout.is_zero() {
            cfg.timeout = Duration::from_secs(60);
        }
        Self { cfg }
    }
}

impl ProviderAdapter for GroqAdapter {
    fn complete(&self, request: CompletionRequest) -> Result<LLMResponse, ProviderError> {
        let key = match self.cfg.api_key.as_deref() {
            Some(key) if !key.is_empty() => key,
            _ => return Err(ProviderError::new("auth_error", "no GROQ_API_KEY configured")),
        };
        let client = Client::builder()
            .timeout(self.cfg.timeout)
            .build()
            .map_err(|err| ProviderError::new("client_error", &err.to_string()))?;
        let payload = build_payload(&request.messages, &request.model, request.max_tokens);
        send_request(&client, &self.cfg.base_url, key, &payload)
    }
}

fn build_payload(messages: &[Message], model: &str, max_tokens: u32) -> Value {
    let messages: Vec<Value> = messages
        .iter()
        .map(|msg| json!({"role": msg.role, "content": msg.content}))
        .collect();
    json!({
        "model": model,
        "messages": messages,
        "max_tokens": max_tokens,
    })
}

fn send_request(
    client: &Client,
    base_url: &str,
    api_key: &str,
    payload: &Value,
) -> Result<LLMResponse, ProviderError> {
    let endpoint = format!("{}/chat/completions", base_url.trim_end_matches('/'));
    let resp = client
        .post(endpoint)
        .bearer_auth(api_key)
        .json(payload)
        .send()
        .map_err(|err| ProviderError::new("network_error", &err.to_string()))?;

    let status = resp.status();
    let body = resp.text().unwrap_or_default();
    if let Some(err) = classify_status(status.as_u16(), &body) {
        return Err(err);
    }

    let raw: Value = serde_json::from_str(&body)
        .map_err(|_| ProviderError::new("parse_error", "invalid json"))?;
    let content = parse_response(&raw)
        .ok_or_else(|| ProviderError::new("parse_error", "response has no message content"))?;
    Ok(LLMResponse {
        content,
        raw: Some(raw),
    })
}

fn classify_status(status: u16, body: &str) -> Option<ProviderError> {
    match status {
        200..=299 => None,
        401 | 403 => Some(ProviderError::new("auth_error", body)),
        429 => Some(ProviderError::new("rate_limit", body)),
        500..=599 => Some(ProviderError::new("server_error", body)),
        _ => Some(ProviderError::new("api_error", body)),
    }
}

fn parse_response(raw: &Value) -> Option<String> {
    raw.get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(str::to_string)
}
