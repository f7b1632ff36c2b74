use std::io;

use crate::client::HTTPClient;
use crate::models::CLIConfig;
use crate::render;

pub struct REPL {
    pub config: CLIConfig,
    pub client: HTTPClient,
}

impl REPL {
    pub fn new(config: CLIConfig, client: HTTPClient) -> Self {
        Self { config, client }
    }

    pub fn run(&mut self) {
        render::banner(&self.config);
        loop {
            render::prompt();
            let mut line = String::new();
            match io::stdin().read_line(&mut line) {
                Ok(0) | Err(_) => break,
                Ok(_) => {}
            }
            let line = line.trim().to_string();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('/') {
                if self.handle_command(&line) {
                    break;
                }
                continue;
            }
            match parse_task_id(&line) {
                Some(id) => {
                    self.forecast(id);
                    self.active_time(id);
                }
                None => render::info("unknown input, type /help"),
            }
        }
    }

    fn handle_command(&mut self, line: &str) -> bool {
        let mut parts = line.splitn(2, ' ');
        let cmd = parts.next().unwrap_or("").trim_start_matches('/');
        let rest = parts.next().unwrap_or("").trim();
        match cmd {
            "exit" | "quit" => return true,
            "help" => render::help(),
            "forecast" => match parse_task_id(rest) {
                Some(id) => self.forecast(id),
                None => render::error("usage: /forecast <positive task id>"),
            },
            "active" => match parse_task_id(rest) {
                Some(id) => self.active_time(id),
                None => render::error("usage: /active <positive task id>"),
            },
            "health" => match self.client.health() {
                Ok(value) => render::raw(&value),
                Err(err) => render::error(&err),
            },
            "debug" => {
                if rest.is_empty() {
                    self.config.debug = !self.config.debug;
                    render::info(&format!("debug: {}", self.config.debug));
                } else if let Some(flag) = parse_on_off(rest) {
                    self.config.debug = flag;
                    render::info(&format!("debug: {}", self.config.debug));
                } else {
                    render::error("invalid debug flag");
                }
            }
            "config" => render::config(&self.config),
            "base" => {
                if rest.is_empty() {
                    render::info(&format!("base: {}", self.config.base_url));
                } else {
                    match HTTPClient::new(rest) {
                        Ok(client) => {
                            self.config.base_url = rest.to_string();
                            self.client = client;
                            render::info("base url updated");
                        }
                        Err(err) => render::error(&err),
                    }
                }
            }
            _ => render::info("unknown command, type /help"),
        }
        false
    }

    fn forecast(&self, id: i64) {
        match self.client.forecast(id) {
            Ok((resp, raw)) => {
                render::forecast(&resp);
                if self.config.debug {
                    render::raw(&raw);
                }
            }
            Err(err) => render::error(&err),
        }
    }

    fn active_time(&self, id: i64) {
        match self.client.active_time(id) {
            Ok((resp, raw)) => {
                render::active_time(&resp);
                if self.config.debug {
                    render::raw(&raw);
                }
            }
            Err(err) => render::error(&err),
        }
    }
}

fn parse_task_id(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

fn parse_on_off(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "1" | "yes" => Some(true),
        "off" | "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn task_ids_must_be_positive_integers() {
        assert_eq!(parse_task_id(" 12 "), Some(12));
        assert_eq!(parse_task_id("0"), None);
        assert_eq!(parse_task_id("-1"), None);
        assert_eq!(parse_task_id("abc"), None);
    }

    #[test]
    fn on_off_flags() {
        assert_eq!(parse_on_off("ON"), Some(true));
        assert_eq!(parse_on_off("no"), Some(false));
        assert_eq!(parse_on_off("maybe"), None);
    }
}
