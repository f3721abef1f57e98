// Module declarations for cross-origin handling
pub mod middleware;
pub mod policy;

// Re-exports for convenience
pub use middleware::cors_middleware;
pub use policy::CorsPolicy;
