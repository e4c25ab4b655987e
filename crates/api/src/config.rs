//! Application configuration loaded from environment variables.

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` — bind address (default: `"0.0.0.0"`)
/// - `PORT` — listen port (default: `3000`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
/// - `JWT_SECRET` — checkout token signing secret
/// - `PAYREX_BASE_URL` / `PAYREX_API_KEY` — gateway credentials; when
///   the key is absent the in-memory provider is wired instead
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub jwt_secret: String,
    pub payrex_base_url: String,
    pub payrex_api_key: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables, falling back to
    /// defaults.
    pub fn from_env() -> Self {
        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            jwt_secret: std::env::var("JWT_SECRET")
                .unwrap_or_else(|_| "insecure-dev-secret".to_string()),
            payrex_base_url: std::env::var("PAYREX_BASE_URL")
                .unwrap_or_else(|_| "https://gate.payrex.example".to_string()),
            payrex_api_key: std::env::var("PAYREX_API_KEY").ok(),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            log_level: "info".to_string(),
            jwt_secret: "insecure-dev-secret".to_string(),
            payrex_base_url: "https://gate.payrex.example".to_string(),
            payrex_api_key: None,
        }
    }
}
