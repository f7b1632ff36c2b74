pub mod source;
pub mod types;

pub use source::{find_task, resolve_task, HttpTaskSource, TaskSource, FETCH_LIMIT};
pub use types::{Task, TasksEnvelope};
