pub mod client;
pub mod groq_adapter;
pub mod types;

pub use client::LlmClient;
pub use groq_adapter::{GroqAdapter, GroqConfig};
pub use types::{CompletionRequest, LLMResponse, Message, ProviderAdapter, ProviderError};
