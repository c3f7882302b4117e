//! Application state.

use std::sync::Arc;

use canvas_store::DataApiClient;

use crate::auth::TokenService;
use crate::config::ApiConfig;

/// Shared application state.
///
/// Created once at startup; the store client owns the only long-lived
/// connection pool and is shared by reference into every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<DataApiClient>,
    pub tokens: TokenService,
}

impl AppState {
    /// Create application state, connecting the store client from env.
    pub fn new(config: ApiConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let store = DataApiClient::from_env()?;
        Ok(Self::with_store(config, store))
    }

    /// Create state around an existing store client (used by tests).
    pub fn with_store(config: ApiConfig, store: DataApiClient) -> Self {
        let tokens = TokenService::from_config(&config);
        Self {
            config,
            store: Arc::new(store),
            tokens,
        }
    }
}
