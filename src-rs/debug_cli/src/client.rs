use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::models::{ActiveTimeResponse, ErrorBody, ForecastResponse, TaskIdRequest};

pub struct HTTPClient {
    pub base_url: String,
    client: Client,
}

impl HTTPClient {
    pub fn new(base_url: &str) -> Result<Self, String> {
        let client = Client::builder()
            // forecasts wait on the LLM
            .timeout(std::time::Duration::from_secs(90))
            .build()
            .map_err(|err| err.to_string())?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn forecast(&self, task_id: i64) -> Result<(ForecastResponse, Value), String> {
        self.post_task("/api/tasks/forecast-time", task_id)
    }

    pub fn active_time(&self, task_id: i64) -> Result<(ActiveTimeResponse, Value), String> {
        self.post_task("/api/tasks/active-time", task_id)
    }

    pub fn health(&self) -> Result<Value, String> {
        let url = format!("{}/health", self.base_url);
        let resp = self.client.get(url).send().map_err(|err| err.to_string())?;
        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(format!("http {}: {}", status.as_u16(), body));
        }
        serde_json::from_str(&body).map_err(|err| err.to_string())
    }

    fn post_task<T: DeserializeOwned>(&self, path: &str, task_id: i64) -> Result<(T, Value), String> {
        let url = format!("{}{}", self.base_url, path);
        let resp = self
            .client
            .post(url)
            .json(&TaskIdRequest { task_id })
            .send()
            .map_err(|err| err.to_string())?;

        let status = resp.status();
        let body = resp.text().unwrap_or_default();
        if !status.is_success() {
            return Err(format!("http {}: {}", status.as_u16(), error_detail(&body)));
        }
        let raw: Value = serde_json::from_str(&body).map_err(|err| err.to_string())?;
        let parsed = serde_json::from_value::<T>(raw.clone()).map_err(|err| err.to_string())?;
        Ok((parsed, raw))
    }
}

fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody { detail: Value::String(text) }) => text,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}
