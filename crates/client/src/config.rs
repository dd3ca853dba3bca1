use std::time::Duration;

/// Default base URL of the edit service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Default per-request transport timeout.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Connection settings for the edit service.
#[derive(Debug, Clone)]
pub struct EditServiceConfig {
    /// Base URL; endpoint paths are appended to it.
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when present.
    pub api_token: Option<String>,
    /// Transport-level timeout for a single HTTP request.
    pub timeout: Duration,
}

impl Default for EditServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl EditServiceConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default                      |
    /// |-----------------------------|------------------------------|
    /// | `EDIT_SERVICE_URL`          | `http://localhost:8080/api`  |
    /// | `EDIT_SERVICE_TOKEN`        | unset                        |
    /// | `EDIT_SERVICE_TIMEOUT_SECS` | `60`                         |
    pub fn from_env() -> Self {
        let base_url = std::env::var("EDIT_SERVICE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let api_token = std::env::var("EDIT_SERVICE_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        let timeout_secs: u64 = std::env::var("EDIT_SERVICE_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("EDIT_SERVICE_TIMEOUT_SECS must be a valid u64");

        Self {
            base_url,
            api_token,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}
