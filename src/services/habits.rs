//! Habits service
//!
//! Habit lifecycle and completion toggling. The current streak is derived
//! from the completion set on every read; no stored copy exists to drift
//! out of sync.

use crate::config;
use crate::database::{Habit, Repository};
use crate::error::{AppError, Result};
use chrono::{NaiveDate, Utc};

/// Service for managing habits
#[derive(Clone)]
pub struct HabitsService {
    repo: Repository,
}

impl HabitsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a new habit
    pub async fn create_habit(&self, user_id: &str, name: String, module: String) -> Result<Habit> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Habit name cannot be empty".to_string()));
        }
        if name.len() > config::MAX_TITLE_LENGTH {
            return Err(AppError::Validation(format!(
                "Habit name exceeds {} characters",
                config::MAX_TITLE_LENGTH
            )));
        }

        tracing::info!("Creating habit for user {}: {}", user_id, name);

        let row = self.repo.create_habit(user_id, &name, &module).await?;

        Ok(row.into_habit(today()))
    }

    /// Get a habit with its computed streak
    pub async fn get_habit(&self, user_id: &str, id: &str) -> Result<Habit> {
        let row = self.repo.get_habit_row(user_id, id).await?;
        Ok(row.into_habit(today()))
    }

    /// List all habits with their computed streaks
    pub async fn list_habits(&self, user_id: &str) -> Result<Vec<Habit>> {
        let rows = self.repo.list_habit_rows(user_id).await?;
        let today = today();

        Ok(rows.into_iter().map(|row| row.into_habit(today)).collect())
    }

    /// Toggle a completion date.
    ///
    /// A date already present is removed, otherwise it is added; either
    /// way the persisted set stays de-duplicated and the returned habit
    /// carries the streak recomputed from the new set.
    pub async fn toggle_completion(
        &self,
        user_id: &str,
        id: &str,
        date: NaiveDate,
    ) -> Result<Habit> {
        let row = self.repo.get_habit_row(user_id, id).await?;

        let mut completions = row.completion_dates();
        completions.sort();
        completions.dedup();

        match completions.binary_search(&date) {
            Ok(pos) => {
                completions.remove(pos);
                tracing::debug!("Unmarked {} for habit {}", date, id);
            }
            Err(pos) => {
                completions.insert(pos, date);
                tracing::debug!("Marked {} for habit {}", date, id);
            }
        }

        let completions_json = serde_json::to_string(&completions)?;
        let updated = self
            .repo
            .update_habit_completions(user_id, id, &completions_json)
            .await?;

        Ok(updated.into_habit(today()))
    }

    /// Delete a habit
    pub async fn delete_habit(&self, user_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting habit: {}", id);
        self.repo.delete_habit(user_id, id).await
    }
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
