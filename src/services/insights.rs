//! Insights service
//!
//! Fetches every record set for a user concurrently and runs the growth
//! analytics engine once over the joined result. A failed fetch degrades
//! to an empty list: that domain simply scores low, and the dashboard
//! still renders.

use crate::analytics::{GrowthSnapshot, RecordSet};
use crate::config;
use crate::database::Repository;
use crate::error::Result;
use chrono::{NaiveDate, Utc};

/// Service producing the dashboard snapshot
#[derive(Clone)]
pub struct InsightsService {
    repo: Repository,
}

impl InsightsService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Build the growth snapshot for a user as of today.
    pub async fn snapshot(&self, user_id: &str) -> GrowthSnapshot {
        self.snapshot_as_of(user_id, Utc::now().date_naive()).await
    }

    /// Build the growth snapshot for a user as of a given day.
    pub async fn snapshot_as_of(&self, user_id: &str, today: NaiveDate) -> GrowthSnapshot {
        let (tasks, habit_rows, transactions, goals, workouts, journal_entries, mood_logs, gratitude_rows) = tokio::join!(
            self.repo.list_tasks(user_id),
            self.repo.list_habit_rows(user_id),
            self.repo.list_transactions(user_id),
            self.repo.list_goals(user_id),
            self.repo.list_workouts(user_id),
            self.repo.list_journal_entries(user_id),
            self.repo.list_mood_logs(user_id, config::MOOD_WINDOW as i64),
            self.repo.list_gratitude_rows(user_id),
        );

        let records = RecordSet {
            tasks: or_empty(tasks, "tasks"),
            habits: or_empty(habit_rows, "habits")
                .into_iter()
                .map(|row| row.into_habit(today))
                .collect(),
            transactions: or_empty(transactions, "transactions"),
            goals: or_empty(goals, "savings_goals"),
            workouts: or_empty(workouts, "workouts"),
            journal_entries: or_empty(journal_entries, "journal_entries"),
            mood_logs: or_empty(mood_logs, "mood_logs"),
            gratitude_entries: or_empty(gratitude_rows, "gratitude_entries")
                .into_iter()
                .map(|row| row.into_entry())
                .collect(),
        };

        tracing::debug!("Building growth snapshot for user {}", user_id);

        GrowthSnapshot::build(&records, today)
    }
}

/// A failed fetch yields an empty list; the score just reflects no data.
fn or_empty<T>(result: Result<Vec<T>>, table: &str) -> Vec<T> {
    match result {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("Failed to load {}: {}; treating as empty", table, e);
            Vec::new()
        }
    }
}
