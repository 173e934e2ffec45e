use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every value has a default; missing credentials route the matching
/// collaborator to its synthetic data instead of failing startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub default_location: String,
    pub outbound_timeout: Duration,
    pub max_upload_bytes: usize,
    pub directory_path: Option<PathBuf>,
    pub zeroentropy_api_key: Option<String>,
    pub arcade_api_key: Option<String>,
    pub arcade_user_id: String,
    pub datalog_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub google_cse_id: Option<String>,
    /// Endpoint overrides for proxies and staging; `None` keeps the built-in URLs.
    pub zeroentropy_endpoints: Option<Vec<String>>,
    pub datalog_endpoints: Option<Vec<String>>,
    pub arcade_base_url: Option<String>,
    pub google_search_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 5001,
            rust_log: "info".to_string(),
            default_location: "San Francisco, CA".to_string(),
            outbound_timeout: Duration::from_secs(15),
            max_upload_bytes: 10 * 1024 * 1024,
            directory_path: None,
            zeroentropy_api_key: None,
            arcade_api_key: None,
            arcade_user_id: "smart-marketplace-user".to_string(),
            datalog_api_key: None,
            google_api_key: None,
            google_cse_id: None,
            zeroentropy_endpoints: None,
            datalog_endpoints: None,
            arcade_base_url: None,
            google_search_url: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            default_location: std::env::var("DEFAULT_LOCATION")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.default_location),
            outbound_timeout: Duration::from_secs(parse_env(
                "OUTBOUND_TIMEOUT_SECS",
                defaults.outbound_timeout.as_secs(),
            )?),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)?,
            directory_path: std::env::var("DIRECTORY_PATH").ok().map(PathBuf::from),
            zeroentropy_api_key: credential(std::env::var("ZEROENTROPY_API_KEY").ok()),
            arcade_api_key: credential(std::env::var("ARCADE_API_KEY").ok()),
            arcade_user_id: std::env::var("ARCADE_USER_ID").unwrap_or(defaults.arcade_user_id),
            datalog_api_key: credential(std::env::var("DATALOG_API_KEY").ok()),
            google_api_key: credential(std::env::var("GOOGLE_API_KEY").ok()),
            google_cse_id: credential(std::env::var("GOOGLE_CSE_ID").ok()),
            zeroentropy_endpoints: url_list(std::env::var("ZEROENTROPY_ENDPOINTS").ok()),
            datalog_endpoints: url_list(std::env::var("DATALOG_ENDPOINTS").ok()),
            arcade_base_url: non_blank(std::env::var("ARCADE_BASE_URL").ok()),
            google_search_url: non_blank(std::env::var("GOOGLE_SEARCH_URL").ok()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Comma-separated URLs, in priority order.
fn url_list(value: Option<String>) -> Option<Vec<String>> {
    let urls: Vec<String> = value?
        .split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(String::from)
        .collect();
    (!urls.is_empty()).then_some(urls)
}

/// Filters out empty values and unfilled `.env` template placeholders
/// such as `your_google_api_key_here`.
pub fn credential(value: Option<String>) -> Option<String> {
    non_blank(value).filter(|v| !(v.starts_with("your_") && v.ends_with("_here")))
}
