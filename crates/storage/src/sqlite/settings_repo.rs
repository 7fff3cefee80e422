use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{SettingsRepository, StorageError};
use quiz_core::model::ThemePreference;

use super::SqliteRepository;

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn get_theme(&self) -> Result<Option<ThemePreference>, StorageError> {
        let row = sqlx::query("SELECT theme FROM client_settings WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let raw: String = row
            .try_get("theme")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;
        let theme = raw
            .parse::<ThemePreference>()
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        Ok(Some(theme))
    }

    async fn save_theme(&self, theme: ThemePreference) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO client_settings (id, theme, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(id) DO UPDATE SET
                theme = excluded.theme,
                updated_at = excluded.updated_at
            ",
        )
        .bind(1_i64)
        .bind(theme.as_str())
        .bind(chrono::Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
