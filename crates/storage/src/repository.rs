use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use quiz_core::model::ThemePreference;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for client-side settings.
///
/// The only persisted client state is the theme preference; everything else
/// lives for a single session and is deliberately not stored.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch the persisted theme, if one was ever saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures. A missing row is `Ok(None)`.
    async fn get_theme(&self) -> Result<Option<ThemePreference>, StorageError>;

    /// Persist the theme, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be stored.
    async fn save_theme(&self, theme: ThemePreference) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    theme: Arc<Mutex<Option<ThemePreference>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_theme(&self) -> Result<Option<ThemePreference>, StorageError> {
        let guard = self
            .theme
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(*guard)
    }

    async fn save_theme(&self, theme: ThemePreference) -> Result<(), StorageError> {
        let mut guard = self
            .theme
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(theme);
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            settings: Arc::new(InMemoryRepository::new()),
        }
    }
}
