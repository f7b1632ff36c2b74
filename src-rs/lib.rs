pub mod active_time;
pub mod config;
pub mod error;
pub mod forecast;
pub mod helpers;
pub mod result;

#[path = "llm/lib.rs"]
pub mod llm;
#[path = "task/lib.rs"]
pub mod task;
#[path = "api/lib.rs"]
pub mod api;

pub use config::ServiceConfig;
pub use error::{ApiError, ServiceError};
pub use forecast::Forecaster;
pub use result::{ActiveTimeResult, Confidence, ForecastResult};
