use std::sync::Arc;

use tracing::{debug, info};

use crate::error::ServiceError;
use crate::llm::LlmClient;
use crate::result::{Confidence, ForecastResult};
use crate::task::Task;

pub const TASK_NAME_MAX_CHARS: usize = 100;
pub const FALLBACK_HOURS: f64 = 5.0;
pub const MIN_HOURS: f64 = 1.0;
pub const FALLBACK_REASONING: &str = "LLM analysis completed";

pub fn build_prompt(description: &str) -> String {
    format!(
        "Analyze this task and estimate the time needed to complete it in hours.

Task Description: {description}

Please provide:
1. Estimated hours needed (as a number)
2. Brief reasoning for the estimate
3. Confidence level (low/medium/high)

Format your response exactly as:
HOURS: [number]
REASONING: [your reasoning]
CONFIDENCE: [low/medium/high]"
    )
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedReply {
    pub estimated_hours: f64,
    pub reasoning: String,
    pub confidence: Confidence,
}

/// Reads `HOURS:`, `REASONING:` and `CONFIDENCE:` lines in any casing. Each
/// field falls back on its own when missing or unparseable; a later line
/// wins over an earlier one with the same prefix.
pub fn parse_reply(reply: &str) -> ParsedReply {
    let mut hours = None;
    let mut reasoning = String::new();
    let mut confidence = None;

    for line in reply.trim().lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let value = value.trim();
        match key.trim().to_ascii_uppercase().as_str() {
            "HOURS" => hours = Some(parse_hours(value)),
            "REASONING" => reasoning = value.to_string(),
            "CONFIDENCE" => confidence = Confidence::parse(value),
            _ => {}
        }
    }

    let mut estimated_hours = hours.unwrap_or(FALLBACK_HOURS);
    if estimated_hours <= 0.0 {
        estimated_hours = MIN_HOURS;
    }
    if reasoning.is_empty() {
        reasoning = FALLBACK_REASONING.to_string();
    }
    ParsedReply {
        estimated_hours,
        reasoning,
        confidence: confidence.unwrap_or_default(),
    }
}

fn parse_hours(raw: &str) -> f64 {
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => value,
        _ => FALLBACK_HOURS,
    }
}

pub fn task_name(text: &str) -> String {
    text.chars().take(TASK_NAME_MAX_CHARS).collect()
}

pub struct Forecaster {
    llm: Arc<LlmClient>,
}

impl Forecaster {
    pub fn new(llm: Arc<LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn forecast(&self, task: &Task) -> Result<ForecastResult, ServiceError> {
        if task.text.is_empty() {
            return Err(ServiceError::EmptyDescription);
        }

        let prompt = build_prompt(&task.text);
        let llm = self.llm.clone();
        let reply = tokio::task::spawn_blocking(move || llm.ask(&prompt, None))
            .await
            .map_err(|err| ServiceError::Unexpected(err.to_string()))?;
        debug!(task_id = task.id, reply_len = reply.len(), "llm replied");

        let parsed = parse_reply(&reply);
        info!(
            task_id = task.id,
            hours = parsed.estimated_hours,
            confidence = ?parsed.confidence,
            "forecast ready"
        );
        Ok(ForecastResult {
            task_name: task_name(&task.text),
            estimated_hours: parsed.estimated_hours,
            reasoning: parsed.reasoning,
            confidence: parsed.confidence,
        })
    }
}
