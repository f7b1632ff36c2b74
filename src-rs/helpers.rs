use std::env;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::ServiceConfig;
use crate::llm::{GroqAdapter, GroqConfig, LlmClient};

/// `GROQ_API_KEY` may hold a comma-separated list; only the first entry is used.
pub fn load_groq_key() -> Option<String> {
    env_opt("GROQ_API_KEY").and_then(|raw| first_entry(&raw))
}

pub fn first_entry(raw: &str) -> Option<String> {
    split_list(raw).into_iter().next()
}

pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn env_or(key: &str, fallback: String) -> String {
    env_opt(key).unwrap_or(fallback)
}

pub fn env_opt(key: &str) -> Option<String> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Some(value),
        _ => None,
    }
}

pub fn env_parse<T: FromStr>(key: &str, fallback: T) -> T {
    env_opt(key)
        .and_then(|value| value.trim().parse::<T>().ok())
        .unwrap_or(fallback)
}

pub fn env_list(key: &str) -> Option<Vec<String>> {
    env_opt(key).map(|raw| split_list(&raw))
}

pub fn build_llm_client(cfg: &ServiceConfig) -> LlmClient {
    let adapter = GroqAdapter::new(GroqConfig {
        api_key: cfg.llm_api_key.clone(),
        base_url: cfg.llm_base_url.clone(),
        timeout: cfg.llm_timeout,
    });
    LlmClient::new(Arc::new(adapter), &cfg.llm_model, cfg.llm_max_tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_list_drops_blank_entries() {
        assert_eq!(
            split_list(" http://a , ,http://b,"),
            vec!["http://a".to_string(), "http://b".to_string()]
        );
        assert!(split_list("").is_empty());
    }

    #[test]
    fn first_entry_skips_leading_blanks() {
        assert_eq!(first_entry(" , gsk_one, gsk_two"), Some("gsk_one".to_string()));
        assert_eq!(first_entry(" , "), None);
    }

    #[test]
    fn env_parse_falls_back_on_garbage() {
        assert_eq!(env_parse::<u16>("TASK_FORECAST_TEST_UNSET_PORT", 5002), 5002);
    }
}
