use std::env;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub const ENV_WORKSPACE: &str = "RECORDBOOKD_WORKSPACE";
pub const ENV_LOG: &str = "RECORDBOOKD_LOG";
pub const ENV_LOG_JSON: &str = "RECORDBOOKD_LOG_JSON";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub workspace: Option<PathBuf>,
    pub log_filter: String,
    pub log_json: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            workspace: env::var_os(ENV_WORKSPACE)
                .filter(|v| !v.is_empty())
                .map(PathBuf::from),
            log_filter: env::var(ENV_LOG).unwrap_or_else(|_| "info".to_string()),
            log_json: env_bool(ENV_LOG_JSON, false),
        }
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| parse_bool(&v))
        .unwrap_or(default)
}

fn parse_bool(v: &str) -> Option<bool> {
    match v {
        "1" | "true" | "TRUE" | "yes" | "YES" => Some(true),
        "0" | "false" | "FALSE" | "no" | "NO" => Some(false),
        _ => None,
    }
}

// Logs go to stderr; stdout carries the IPC responses.
pub fn init_tracing(cfg: &Config) {
    let filter = EnvFilter::try_new(&cfg.log_filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);
    if cfg.log_json {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_ansi(false))
            .init();
    }
}
