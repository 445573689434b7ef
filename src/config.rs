// src/config.rs

use std::env;
use std::net::SocketAddr;

use dotenvy::dotenv;
use url::Url;

/// How many people the "members to focus on" list keeps.
pub const FOCUS_MEMBER_LIMIT: usize = 5;

/// Sessions idle for longer than this are dropped (one hour).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the memory backend, always ending with `/`.
    pub backend_url: Url,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub rust_log: String,
    pub log_dir: String,
    /// Report every recorded answer to `/submit-answer` as well.
    pub answer_telemetry: bool,
    /// Fixed seed for the shuffling / token RNG.
    pub quiz_seed: Option<u64>,
    /// Idle time after which an unfinished or unread session is dropped.
    pub session_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let backend_url = env::var("BACKEND_URL")
            .unwrap_or_else(|_| "http://localhost:8000/".to_string());
        let backend_url = parse_backend_url(&backend_url).expect("BACKEND_URL must be a valid URL");

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3001".to_string())
            .parse()
            .expect("BIND_ADDR must be a socket address");

        let cors_origin =
            env::var("CORS_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".to_string());

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let answer_telemetry = env::var("ANSWER_TELEMETRY")
            .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let quiz_seed = env::var("QUIZ_SEED")
            .ok()
            .map(|v| v.parse().expect("QUIZ_SEED must be an unsigned integer"));

        let session_ttl_secs = env::var("SESSION_TTL_SECS")
            .ok()
            .map(|v| v.parse().expect("SESSION_TTL_SECS must be an unsigned integer"))
            .unwrap_or(DEFAULT_SESSION_TTL_SECS);

        Self {
            backend_url,
            bind_addr,
            cors_origin,
            rust_log,
            log_dir,
            answer_telemetry,
            quiz_seed,
            session_ttl_secs,
        }
    }
}

/// Parses the backend base URL, appending a trailing slash so that
/// `Url::join` keeps any path prefix.
pub fn parse_backend_url(raw: &str) -> Result<Url, url::ParseError> {
    if raw.ends_with('/') {
        Url::parse(raw)
    } else {
        Url::parse(&format!("{}/", raw))
    }
}
