use std::env;
use std::path::PathBuf;

use crate::error::PlannerError;

const DEFAULT_API_PORT: u16 = 5000;
const DEFAULT_WEB_PORT: u16 = 8501;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Storage
    pub database_url: Option<String>,
    pub data_file: PathBuf,
    pub seed_defaults: bool,

    // Web server
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
}

impl Config {
    /// Config for the JSON API. Without `DATABASE_URL` the plan lives in
    /// `DATA_FILE` on disk.
    pub fn api_from_env() -> Result<Self, PlannerError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(DEFAULT_API_PORT, |key| env::var(key).ok())
    }

    /// Config for the events table UI, which always needs a database.
    pub fn web_from_env() -> Result<Self, PlannerError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(DEFAULT_WEB_PORT, |key| env::var(key).ok())?;
        if config.database_url.is_none() {
            return Err(PlannerError::Config(
                "DATABASE_URL environment variable is required".to_string(),
            ));
        }
        Ok(config)
    }

    pub fn from_lookup<F>(default_port: u16, lookup: F) -> Result<Self, PlannerError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| PlannerError::Config(format!("PORT must be a number, got `{raw}`")))?,
            None => default_port,
        };

        let seed_defaults = match lookup("SEED_DEFAULTS") {
            Some(raw) => parse_flag(&raw).ok_or_else(|| {
                PlannerError::Config(format!("SEED_DEFAULTS must be true or false, got `{raw}`"))
            })?,
            None => true,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            data_file: lookup("DATA_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("plan_data.json")),
            seed_defaults,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            static_dir: lookup("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("static")),
        })
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
