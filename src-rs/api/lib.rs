pub use crate::config::ServiceConfig;
pub use crate::error::{ApiError, ServiceError};
pub use crate::forecast::Forecaster;
pub use crate::llm::{LlmClient, ProviderAdapter};
pub use crate::result::{ActiveTimeResult, ForecastResult};
pub use crate::task::{HttpTaskSource, Task, TaskSource};

pub mod handlers;
pub mod server;
