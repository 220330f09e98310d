use std::env;
use std::path::Path;
use std::time::Duration;

use crate::api::{ApiClient, ApiError};

// Default configuration constants
pub const DEFAULT_API_BASE_URL: &str = "https://api.digitalocean.com";
pub const DEFAULT_API_TOKEN: &str = "";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

pub const TOKEN_ENV_VARS: [&str; 2] = ["DIGITALOCEAN_TOKEN", "DIGITALOCEAN_ACCESS_TOKEN"];
pub const API_URL_ENV_VAR: &str = "DIGITALOCEAN_API_URL";
pub const HTTP_TIMEOUT_ENV_VAR: &str = "DIGITALOCEAN_HTTP_TIMEOUT";

pub fn load_env_file(env_file: Option<&str>) {
    if let Some(path) = env_file {
        dotenvy::from_path(Path::new(path)).ok();
    } else {
        dotenvy::dotenv().ok();
    }
}

pub fn get_api_base_url() -> String {
    sanitize_base_url(&env::var(API_URL_ENV_VAR).unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()))
}

/// First non-blank token among `DIGITALOCEAN_TOKEN` and `DIGITALOCEAN_ACCESS_TOKEN`.
pub fn get_api_token() -> String {
    TOKEN_ENV_VARS
        .iter()
        .filter_map(|name| env::var(name).ok())
        .map(|v| v.trim().to_string())
        .find(|v| !v.is_empty())
        .unwrap_or_else(|| DEFAULT_API_TOKEN.to_string())
}

pub fn get_http_timeout() -> Duration {
    let secs = env::var(HTTP_TIMEOUT_ENV_VAR)
        .ok()
        .and_then(|raw| raw.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0)
        .unwrap_or(DEFAULT_HTTP_TIMEOUT_SECS);
    Duration::from_secs(secs)
}

pub fn sanitize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        DEFAULT_API_BASE_URL.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Settings needed to build one API client.
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub api_token: String,
    pub http_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_base_url: get_api_base_url(),
            api_token: get_api_token(),
            http_timeout: get_http_timeout(),
        }
    }

    pub fn client(&self) -> Result<ApiClient, ApiError> {
        ApiClient::new(&self.api_base_url, &self.api_token, self.http_timeout)
    }
}
