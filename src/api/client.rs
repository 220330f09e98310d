use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use yansi::Paint;

use super::error::ApiError;

static SILENT: AtomicBool = AtomicBool::new(false);

pub fn set_silent(silent: bool) {
    SILENT.store(silent, Ordering::Relaxed);
}

fn log_output(msg: String) {
    if !SILENT.load(Ordering::Relaxed) {
        eprintln!("{}", msg);
    }
}

/// Error body the API sends with non-2xx responses
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ErrorBody {
    id: String,
    message: String,
    request_id: String,
}

/// Authenticated handle on the DigitalOcean API.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl ApiClient {
    /// Build a client with the crate's user agent and the given request timeout.
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .user_agent(format!("droplets/{}", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self::with_http_client(http, base_url, token))
    }

    pub fn with_http_client(http: reqwest::Client, base_url: &str, token: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn headers(&self) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if !self.token.is_empty() {
            let value = HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|e| ApiError::Client(format!("invalid API token: {}", e)))?;
            headers.insert(AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// GET `endpoint` with query `params` and decode the JSON body into `T`.
    pub async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(String, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        self.log_request("GET", &url, params);

        let response = self
            .http
            .get(&url)
            .headers(self.headers()?)
            .query(params)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        let final_url = response.url().to_string();
        let header_request_id = response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        log_output(format!(
            "Response:\n{}",
            Paint::new(format!("HTTP {}", status.as_u16())).rgb(100, 100, 100)
        ));
        tracing::debug!(%status, bytes = text.len(), "GET {}", endpoint);

        if !status.is_success() {
            let body: ErrorBody = serde_json::from_str(&text).unwrap_or_default();
            let message = if body.message.is_empty() {
                text.trim().to_string()
            } else {
                body.message
            };
            let request_id = if body.request_id.is_empty() {
                header_request_id
            } else {
                body.request_id
            };
            tracing::warn!(status = status.as_u16(), error_id = %body.id, "API request failed");
            return Err(ApiError::Http {
                method: "GET".to_string(),
                url: final_url,
                status: status.as_u16(),
                request_id,
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Echo the request as a curl command line, token masked.
    fn log_request(&self, method: &str, url: &str, params: &[(String, String)]) {
        if SILENT.load(Ordering::Relaxed) {
            return;
        }
        let mut url_for_log = url.to_string();
        if !params.is_empty() {
            let query_string = params
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect::<Vec<String>>()
                .join("&");
            url_for_log = format!("{}?{}", url_for_log, query_string);
        }

        let mut parts = Vec::new();
        parts.push(Paint::new("curl").fg(yansi::Color::Green).bold().to_string());
        parts.push(format!("-X {}", Paint::new(method).fg(yansi::Color::Yellow).bold()));
        parts.push(format!("'{}'", Paint::new(&url_for_log).fg(yansi::Color::Cyan)));
        if !self.token.is_empty() {
            parts.push(format!(
                "{} {}",
                Paint::new("-H").fg(yansi::Color::Magenta),
                Paint::new(format!("'Authorization: Bearer {}'", mask_token(&self.token)))
                    .fg(yansi::Color::Magenta)
            ));
        }
        log_output(format!("Request:\n{}", parts.join(" ")));
    }
}

/// Keep the last four characters of a token for log lines.
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
