// Application state management
// Wraps the subscription store that every handler shares

use crate::config::Config;
use crate::state::store::SubscriptionStore;
use std::sync::Arc;

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    /// Token → subscription list table
    pub store: SubscriptionStore,
}

/// State handle passed to all API handlers
pub type SharedState = Arc<AppState>;

impl AppState {
    /// Create an application state with an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an application state around an existing store
    pub fn with_store(store: SubscriptionStore) -> Self {
        Self { store }
    }

    /// Build the state described by `config`, seeding sample tokens if enabled
    pub async fn from_config(config: &Config) -> Self {
        let state = Self::new();
        if config.store.seed_sample_data {
            state.store.seed_sample_data().await;
        }
        state
    }

    /// Wrap into the shared handle used by the router
    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_state_is_empty() {
        let state = AppState::new();
        assert!(state.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_from_config_seeds_samples() {
        let config = Config::default();
        let state = AppState::from_config(&config).await;
        assert_eq!(state.store.len().await, 2);
        assert!(state.store.contains("ABCDEF").await);
        assert!(state.store.contains("XYZ789").await);
    }

    #[tokio::test]
    async fn test_from_config_without_samples() {
        let mut config = Config::default();
        config.store.seed_sample_data = false;
        let state = AppState::from_config(&config).await;
        assert!(state.store.is_empty().await);
    }
}
