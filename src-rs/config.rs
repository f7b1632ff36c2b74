use std::time::Duration;

use crate::helpers::{env_list, env_opt, env_or, env_parse, load_groq_key};
use crate::llm::client::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL};
use crate::llm::groq_adapter::DEFAULT_BASE_URL;

#[derive(Clone, Debug)]
pub struct ServiceConfig {
    pub backend_url: String,
    pub backend_timeout: Duration,
    pub host: String,
    pub port: u16,
    pub llm_api_key: Option<String>,
    pub llm_base_url: String,
    pub llm_model: String,
    pub llm_max_tokens: u32,
    pub llm_timeout: Duration,
    pub cors_origins: Vec<String>,
    pub development: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            backend_url: "http://localhost:5001".to_string(),
            backend_timeout: Duration::from_secs(10),
            host: "0.0.0.0".to_string(),
            port: 5002,
            llm_api_key: None,
            llm_base_url: DEFAULT_BASE_URL.to_string(),
            llm_model: DEFAULT_MODEL.to_string(),
            llm_max_tokens: DEFAULT_MAX_TOKENS,
            llm_timeout: Duration::from_secs(60),
            cors_origins: vec![
                "http://localhost:3000".to_string(),
                "http://localhost:5173".to_string(),
            ],
            development: false,
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            backend_url: env_or("BACKEND_URL", defaults.backend_url),
            backend_timeout: Duration::from_secs(env_parse(
                "BACKEND_TIMEOUT_SECS",
                defaults.backend_timeout.as_secs(),
            )),
            host: env_or("PYTHON_SERVICE_HOST", defaults.host),
            port: env_parse("PYTHON_SERVICE_PORT", defaults.port),
            llm_api_key: load_groq_key(),
            llm_base_url: env_or("LLM_BASE_URL", defaults.llm_base_url),
            llm_model: env_or("LLM_MODEL", defaults.llm_model),
            llm_max_tokens: env_parse("LLM_MAX_TOKENS", defaults.llm_max_tokens),
            llm_timeout: Duration::from_secs(env_parse(
                "LLM_TIMEOUT_SECS",
                defaults.llm_timeout.as_secs(),
            )),
            cors_origins: env_list("CORS_ALLOW_ORIGINS").unwrap_or(defaults.cors_origins),
            development: env_opt("ENVIRONMENT").as_deref() == Some("development"),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn default_log_level(&self) -> &'static str {
        if self.development {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_local_deployment() {
        let cfg = ServiceConfig::default();
        assert_eq!(cfg.backend_url, "http://localhost:5001");
        assert_eq!(cfg.bind_addr(), "0.0.0.0:5002");
        assert_eq!(cfg.llm_model, "openai/gpt-oss-20b");
        assert_eq!(cfg.llm_max_tokens, 500);
        assert_eq!(cfg.default_log_level(), "info");
    }

    #[test]
    fn development_raises_log_level() {
        let cfg = ServiceConfig {
            development: true,
            ..ServiceConfig::default()
        };
        assert_eq!(cfg.default_log_level(), "debug");
    }
}
