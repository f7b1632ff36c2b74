use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use mockable::Clock;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::active_time::active_time;
use crate::error::ApiError;
use crate::forecast::Forecaster;
use crate::result::{ActiveTimeResult, ForecastResult};
use crate::task::{resolve_task, TaskSource};

pub const SERVICE_NAME: &str = "Task Forecast Service";

#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<dyn TaskSource>,
    pub forecaster: Arc<Forecaster>,
    pub clock: Arc<dyn Clock + Send + Sync>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskIdRequest {
    pub task_id: i64,
}

fn require_task_id(payload: Result<Json<TaskIdRequest>, JsonRejection>) -> Result<i64, ApiError> {
    let Json(req) = payload.map_err(|rej| ApiError::validation(&rej.body_text()))?;
    if req.task_id <= 0 {
        return Err(ApiError::validation("task_id must be greater than 0"));
    }
    Ok(req.task_id)
}

pub async fn handle_root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "status": "running",
        "health": "/health",
    }))
}

pub async fn handle_health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": state.clock.utc().to_rfc3339(),
    }))
}

pub async fn handle_favicon() -> Json<Value> {
    Json(json!({"message": "No favicon"}))
}

pub async fn handle_forecast(
    State(state): State<AppState>,
    payload: Result<Json<TaskIdRequest>, JsonRejection>,
) -> Result<Json<ForecastResult>, ApiError> {
    const CONTEXT: &str = "Forecast error";
    let task_id = require_task_id(payload)?;

    let task = resolve_task(state.tasks.as_ref(), task_id)
        .await
        .map_err(|err| err.into_api(CONTEXT))?;
    let result = state
        .forecaster
        .forecast(&task)
        .await
        .map_err(|err| err.into_api(CONTEXT))?;
    Ok(Json(result))
}

pub async fn handle_active_time(
    State(state): State<AppState>,
    payload: Result<Json<TaskIdRequest>, JsonRejection>,
) -> Result<Json<ActiveTimeResult>, ApiError> {
    const CONTEXT: &str = "Active time calculation error";
    let task_id = require_task_id(payload)?;

    let task = resolve_task(state.tasks.as_ref(), task_id)
        .await
        .map_err(|err| err.into_api(CONTEXT))?;
    let result = active_time(&task, state.clock.as_ref()).map_err(|err| err.into_api(CONTEXT))?;
    Ok(Json(result))
}
