use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::stats::CountMode;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_SESSION_FILE: &str = ".volunteer-session.json";

/// Client configuration loaded from environment variables (and `.env` when present).
/// Every value has a default; only malformed values are rejected.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: String,
    pub session_file: PathBuf,
    pub http_timeout_secs: u64,
    pub job_fetch_limit: u32,
    pub job_retrieve_limit: u32,
    pub skill_gap_limit: u32,
    pub stats_count_mode: CountMode,
    pub rust_log: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            session_file: PathBuf::from(DEFAULT_SESSION_FILE),
            http_timeout_secs: 30,
            job_fetch_limit: 100,
            job_retrieve_limit: 50,
            skill_gap_limit: 10,
            stats_count_mode: CountMode::EveryOccurrence,
            rust_log: "info".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        let dedup = env_flag("STATS_DEDUP_PER_RECORD", false)?;

        Ok(Config {
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.api_base_url),
            session_file: std::env::var("SESSION_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.session_file),
            http_timeout_secs: env_or("HTTP_TIMEOUT_SECS", defaults.http_timeout_secs)?,
            job_fetch_limit: env_or("JOB_FETCH_LIMIT", defaults.job_fetch_limit)?,
            job_retrieve_limit: env_or("JOB_RETRIEVE_LIMIT", defaults.job_retrieve_limit)?,
            skill_gap_limit: env_or("SKILL_GAP_LIMIT", defaults.skill_gap_limit)?,
            stats_count_mode: if dedup {
                CountMode::PerRecord
            } else {
                CountMode::EveryOccurrence
            },
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn env_flag(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_flag(&raw).with_context(|| format!("{key} must be a boolean")),
        Err(_) => Ok(default),
    }
}

fn parse_flag(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("unrecognised boolean '{other}'"),
    }
}
