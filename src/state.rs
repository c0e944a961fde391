//! Application state management.

use crate::config::{Config, ConfigError};
use crate::daily_log::DailyLogAppender;
use crate::store::{self, MemoryStore, ObjectStore, StoreError};
use std::sync::Arc;
use tracing::info;

/// State errors raised while wiring the application.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    /// Configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Store could not be opened.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Application state shared across all handlers.
///
/// Holds the store client created once per process; handlers keep no other
/// state between requests.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The daily log appender.
    pub appender: DailyLogAppender,
}

impl AppState {
    /// Creates a new application state around an existing store.
    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, timezone: chrono_tz::Tz) -> Self {
        Self {
            appender: DailyLogAppender::new(store, timezone),
        }
    }

    /// Creates an in-memory application state using the default timezone.
    #[must_use]
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self::new(store, chrono_tz::America::New_York)
    }

    /// Creates a new application state from configuration.
    ///
    /// # Errors
    /// Returns error if the timezone is invalid or the store cannot be opened.
    pub async fn from_config(config: &Config) -> Result<Self, StateError> {
        let timezone = config.log.tz()?;
        let store = store::connect(&config.storage).await?;
        info!(
            "Daily logs on {} store, day boundary in {}",
            store.backend_tag(),
            timezone
        );
        Ok(Self::new(store, timezone))
    }
}
