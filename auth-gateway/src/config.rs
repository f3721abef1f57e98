use crate::error::ConfigError;
use std::env;
use std::str::FromStr;

/// What happens to a request whose `Origin` matches none of the allowed patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OriginMode {
    /// Serve the request, but without any CORS headers
    Permissive,
    /// Answer 403 before the request reaches the route table
    Strict,
}

impl FromStr for OriginMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(OriginMode::Permissive),
            "strict" => Ok(OriginMode::Strict),
            other => Err(ConfigError::InvalidOriginMode(other.to_string())),
        }
    }
}

/// Raw cross-origin settings, compiled into a `CorsPolicy` at startup
#[derive(Debug, Clone)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    pub exposed_headers: Vec<String>,
    pub allow_credentials: bool,
    pub max_age_secs: u64,
    pub origin_mode: OriginMode,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: split_list("http://*,https://*"),
            allowed_methods: split_list("GET,POST,PUT,OPTIONS,DELETE"),
            allowed_headers: split_list("Accept,Authorization,Content-Type,X-CSRF-Token"),
            exposed_headers: split_list("Link"),
            allow_credentials: true,
            max_age_secs: 300,
            origin_mode: OriginMode::Permissive,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub upstream_timeout_secs: u64,
    pub cors: CorsConfig,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            upstream_url: env::var("AUTH_UPSTREAM_URL").unwrap_or_else(|_| {
                "http://authentication-handler:8080/authenticate".to_string()
            }),
            upstream_timeout_secs: env::var("UPSTREAM_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()?,
            cors: CorsConfig {
                allowed_origins: split_list(
                    &env::var("CORS_ALLOWED_ORIGINS")
                        .unwrap_or_else(|_| "http://*,https://*".to_string()),
                ),
                allowed_methods: split_list(
                    &env::var("CORS_ALLOWED_METHODS")
                        .unwrap_or_else(|_| "GET,POST,PUT,OPTIONS,DELETE".to_string()),
                ),
                allowed_headers: split_list(&env::var("CORS_ALLOWED_HEADERS").unwrap_or_else(
                    |_| "Accept,Authorization,Content-Type,X-CSRF-Token".to_string(),
                )),
                exposed_headers: split_list(
                    &env::var("CORS_EXPOSED_HEADERS").unwrap_or_else(|_| "Link".to_string()),
                ),
                allow_credentials: env::var("CORS_ALLOW_CREDENTIALS")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()?,
                max_age_secs: env::var("CORS_MAX_AGE")
                    .unwrap_or_else(|_| "300".to_string())
                    .parse()?,
                origin_mode: env::var("CORS_ORIGIN_MODE")
                    .unwrap_or_else(|_| "permissive".to_string())
                    .parse()?,
            },
            log_level: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

// "a, b,,c" -> ["a", "b", "c"]
fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
