use crate::auth::Authenticator;
use std::sync::Arc;

/// Application state shared across all handlers
///
/// Holds the authenticate capability behind a trait object so tests can swap
/// in a mock. Nothing in here is mutated after startup.
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<dyn Authenticator>,
}

impl AppState {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}
