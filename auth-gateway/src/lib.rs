pub mod auth;
pub mod config;
pub mod cors;
pub mod error;
pub mod handlers;
pub mod heartbeat;
pub mod server;
pub mod state;

// Re-exports for convenience
pub use config::{Config, CorsConfig, OriginMode};
pub use error::{ApiError, ApiResult, ConfigError};
pub use state::AppState;
