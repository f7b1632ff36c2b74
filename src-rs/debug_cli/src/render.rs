use std::io::{self, Write};

use serde_json::Value;

use crate::models::{ActiveTimeResponse, CLIConfig, ForecastResponse};

pub fn banner(cfg: &CLIConfig) {
    println!("Task Forecast Debug CLI");
    println!("API: {}", cfg.base_url);
    println!("Type /help for commands.");
}

pub fn prompt() {
    print!("> ");
    let _ = io::stdout().flush();
}

pub fn help() {
    println!("Commands:");
    println!("  /help                 Show commands");
    println!("  /exit | /quit         Exit");
    println!("  /forecast <id>        Estimate hours for a task");
    println!("  /active <id>          Show elapsed hours for a task");
    println!("  <id>                  Both of the above");
    println!("  /health               Check service health");
    println!("  /debug [on|off]       Toggle raw JSON output");
    println!("  /config               Show current config");
    println!("  /base <url>           Update base URL");
}

pub fn forecast(resp: &ForecastResponse) {
    println!("task: {}", resp.task_name);
    println!(
        "estimate: {:.1}h ({} confidence)",
        resp.estimated_hours, resp.confidence
    );
    println!("reasoning: {}", resp.reasoning);
}

pub fn active_time(resp: &ActiveTimeResponse) {
    println!("status: {}  active: {:.2}h", resp.status, resp.active_hours);
    println!("created: {}", resp.created_at);
    if let Some(done) = &resp.completed_at {
        println!("completed: {}", done);
    }
}

pub fn raw(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", value),
    }
}

pub fn config(cfg: &CLIConfig) {
    println!("config:");
    println!("  base: {}", cfg.base_url);
    println!("  debug: {}", cfg.debug);
}

pub fn info(msg: &str) {
    println!("{}", msg);
}

pub fn error(msg: &str) {
    eprintln!("error: {}", msg);
}
