use std::sync::Arc;

use quiz_core::model::ThemePreference;
use storage::repository::SettingsRepository;

use crate::error::SettingsServiceError;

/// Injected persistent-settings collaborator for the theme preference.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load the persisted theme (or the default if never saved).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load_theme(&self) -> Result<ThemePreference, SettingsServiceError> {
        let theme = self.repo.get_theme().await?;
        Ok(theme.unwrap_or_default())
    }

    /// Persist the theme.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn save_theme(&self, theme: ThemePreference) -> Result<(), SettingsServiceError> {
        self.repo.save_theme(theme).await?;
        Ok(())
    }
}
