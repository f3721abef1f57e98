// Module declarations for the authenticate handler seam
pub mod client;
pub mod mock;
pub mod traits;

// Re-exports for convenience
pub use client::HttpAuthenticator;
pub use mock::MockAuthenticator;
pub use traits::{AuthCall, AuthReply, Authenticator};
