//! Client configuration, loaded from environment variables.

/// Default model identifier; override with `AURA_MODEL`.
pub const DEFAULT_MODEL: &str = "gemini-3-pro-preview";
/// Default REST base URL; override with `AURA_API_BASE`.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Remote endpoint configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API key sent with every request.
    pub api_key: String,
    /// Model identifier interpolated into the endpoint path.
    pub model: String,
    /// REST base URL, without a trailing slash.
    pub api_base: String,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: DEFAULT_MODEL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ClientConfig {
    /// Load configuration from `GEMINI_API_KEY` / `AURA_*` environment
    /// variables, falling back to defaults. An absent key is tolerated
    /// here; the remote rejects the request instead.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
            model: std::env::var("AURA_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_base: std::env::var("AURA_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            timeout_secs: env_u64("AURA_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
