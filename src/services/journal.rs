//! Journal service
//!
//! Journal entries, daily mood logs and gratitude entries.

use crate::config;
use crate::database::{
    CreateJournalEntryRequest, GratitudeEntry, JournalEntry, MoodLog, Repository,
    UpdateJournalEntryRequest,
};
use crate::error::{AppError, Result};
use chrono::{NaiveDate, Utc};

/// Service for journaling, mood logging and gratitude entries
#[derive(Clone)]
pub struct JournalService {
    repo: Repository,
}

impl JournalService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    // ===== Journal Entries =====

    /// Create a journal entry
    pub async fn create_entry(
        &self,
        user_id: &str,
        title: Option<String>,
        content: String,
    ) -> Result<JournalEntry> {
        if content.trim().is_empty() {
            return Err(AppError::Validation(
                "Journal content cannot be empty".to_string(),
            ));
        }

        tracing::info!("Creating journal entry for user {}", user_id);

        self.repo
            .create_journal_entry(user_id, CreateJournalEntryRequest { title, content })
            .await
    }

    /// Get a journal entry by ID
    pub async fn get_entry(&self, user_id: &str, id: &str) -> Result<JournalEntry> {
        self.repo.get_journal_entry(user_id, id).await
    }

    /// List all journal entries, newest first
    pub async fn list_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        self.repo.list_journal_entries(user_id).await
    }

    /// Update a journal entry
    pub async fn update_entry(
        &self,
        user_id: &str,
        id: String,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<JournalEntry> {
        if let Some(content) = &content {
            if content.trim().is_empty() {
                return Err(AppError::Validation(
                    "Journal content cannot be empty".to_string(),
                ));
            }
        }

        self.repo
            .update_journal_entry(user_id, UpdateJournalEntryRequest { id, title, content })
            .await
    }

    /// Delete a journal entry
    pub async fn delete_entry(&self, user_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting journal entry: {}", id);
        self.repo.delete_journal_entry(user_id, id).await
    }

    // ===== Mood Logs =====

    /// Log today's mood, replacing any earlier log for the same day
    pub async fn log_mood(
        &self,
        user_id: &str,
        mood_value: i64,
        note: Option<String>,
        log_date: Option<NaiveDate>,
    ) -> Result<MoodLog> {
        if !(config::MIN_MOOD_VALUE..=config::MAX_MOOD_VALUE).contains(&mood_value) {
            return Err(AppError::Validation(format!(
                "Mood value must be between {} and {}",
                config::MIN_MOOD_VALUE,
                config::MAX_MOOD_VALUE
            )));
        }

        let log_date = log_date.unwrap_or_else(|| Utc::now().date_naive());

        self.repo
            .upsert_mood_log(user_id, mood_value, note.as_deref(), log_date)
            .await
    }

    /// Most recent mood logs, newest day first
    pub async fn recent_moods(&self, user_id: &str) -> Result<Vec<MoodLog>> {
        self.repo
            .list_mood_logs(user_id, config::MOOD_WINDOW as i64)
            .await
    }

    // ===== Gratitude =====

    /// Record a gratitude entry
    pub async fn add_gratitude(
        &self,
        user_id: &str,
        items: Vec<String>,
    ) -> Result<GratitudeEntry> {
        let items: Vec<String> = items
            .into_iter()
            .map(|i| i.trim().to_string())
            .filter(|i| !i.is_empty())
            .collect();

        if items.is_empty() {
            return Err(AppError::Validation(
                "Gratitude entry needs at least one item".to_string(),
            ));
        }
        if items.len() > config::MAX_GRATITUDE_ITEMS {
            return Err(AppError::Validation(format!(
                "Gratitude entry exceeds {} items",
                config::MAX_GRATITUDE_ITEMS
            )));
        }

        let items_json = serde_json::to_string(&items)?;
        let row = self.repo.create_gratitude_entry(user_id, &items_json).await?;

        Ok(row.into_entry())
    }

    /// List all gratitude entries, newest first
    pub async fn list_gratitude(&self, user_id: &str) -> Result<Vec<GratitudeEntry>> {
        let rows = self.repo.list_gratitude_rows(user_id).await?;
        Ok(rows.into_iter().map(|row| row.into_entry()).collect())
    }

    /// Delete a gratitude entry
    pub async fn delete_gratitude(&self, user_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting gratitude entry: {}", id);
        self.repo.delete_gratitude_entry(user_id, id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Repository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> JournalService {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        JournalService::new(Repository::new(pool))
    }

    #[tokio::test]
    async fn test_mood_out_of_range_is_rejected() {
        let service = create_test_service().await;

        assert!(matches!(
            service.log_mood("u1", 0, None, None).await,
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            service.log_mood("u1", 6, None, None).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_relogging_mood_replaces_todays_value() {
        let service = create_test_service().await;

        service.log_mood("u1", 2, None, None).await.unwrap();
        service
            .log_mood("u1", 4, Some("better now".to_string()), None)
            .await
            .unwrap();

        let moods = service.recent_moods("u1").await.unwrap();
        assert_eq!(moods.len(), 1);
        assert_eq!(moods[0].mood_value, 4);
    }

    #[tokio::test]
    async fn test_gratitude_items_are_trimmed_and_filtered() {
        let service = create_test_service().await;

        let entry = service
            .add_gratitude(
                "u1",
                vec![
                    "  family ".to_string(),
                    "".to_string(),
                    "coffee".to_string(),
                ],
            )
            .await
            .unwrap();

        assert_eq!(entry.items, vec!["family", "coffee"]);
    }

    #[tokio::test]
    async fn test_gratitude_requires_an_item() {
        let service = create_test_service().await;

        let result = service.add_gratitude("u1", vec!["  ".to_string()]).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_journal_entry_lifecycle() {
        let service = create_test_service().await;

        let entry = service
            .create_entry("u1", None, "Started strong today.".to_string())
            .await
            .unwrap();

        let updated = service
            .update_entry(
                "u1",
                entry.id.clone(),
                Some("Morning pages".to_string()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(updated.title.as_deref(), Some("Morning pages"));

        service.delete_entry("u1", &entry.id).await.unwrap();
        assert!(service.get_entry("u1", &entry.id).await.is_err());
    }
}
