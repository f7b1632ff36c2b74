use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct CLIConfig {
    pub base_url: String,
    pub debug: bool,
}

#[derive(Debug, Serialize)]
pub struct TaskIdRequest {
    pub task_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub task_name: String,
    pub estimated_hours: f64,
    pub reasoning: String,
    pub confidence: String,
}

#[derive(Debug, Deserialize)]
pub struct ActiveTimeResponse {
    pub active_hours: f64,
    pub status: String,
    pub created_at: String,
    pub completed_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: Value,
}
