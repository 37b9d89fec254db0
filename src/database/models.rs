//! Database models
//!
//! Rust structs representing database entities.
//! All models use serde for serialization to frontend.
//!
//! List-valued columns (habit completions, gratitude items) are stored as
//! JSON text and decoded tolerantly: a malformed column degrades to an
//! empty list rather than failing the read.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Task workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "inprogress",
            TaskStatus::Done => "done",
        }
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        }
    }
}

/// Transaction direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// A tracked task
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub priority: Option<TaskPriority>,
}

/// Update task request
#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub id: String,
    pub title: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}

/// Habit row as stored; completions are a JSON array of ISO dates
#[derive(Debug, Clone, FromRow)]
pub struct HabitRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub module: String,
    pub completions_json: String,
    pub created_at: DateTime<Utc>,
}

/// A habit with its decoded completion set and computed current streak.
/// The streak is derived on read; it is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub module: String,
    pub completions: Vec<NaiveDate>,
    pub streak: u32,
    pub created_at: DateTime<Utc>,
}

impl HabitRow {
    /// Decode the completion set, skipping anything unparseable.
    pub fn completion_dates(&self) -> Vec<NaiveDate> {
        let raw: Vec<String> = match serde_json::from_str(&self.completions_json) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!("Malformed completions for habit {}: {}", self.id, e);
                return Vec::new();
            }
        };

        raw.iter()
            .filter_map(|s| match s.parse::<NaiveDate>() {
                Ok(date) => Some(date),
                Err(_) => {
                    tracing::warn!("Skipping invalid completion date for habit {}: {}", self.id, s);
                    None
                }
            })
            .collect()
    }

    /// Convert into the API model, computing the current streak as of `today`.
    pub fn into_habit(self, today: NaiveDate) -> Habit {
        let mut completions = self.completion_dates();
        completions.sort();
        completions.dedup();

        let streak = crate::analytics::streak::compute_streak(&completions, today);

        Habit {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            module: self.module,
            completions,
            streak,
            created_at: self.created_at,
        }
    }
}

/// A single income or expense record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Transaction {
    pub id: String,
    pub user_id: String,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Create transaction request
#[derive(Debug, Deserialize)]
pub struct CreateTransactionRequest {
    pub amount: f64,
    pub kind: TransactionKind,
    pub category: String,
    pub date: NaiveDate,
}

/// A savings goal; current_amount never exceeds target_amount
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavingsGoal {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub created_at: DateTime<Utc>,
}

/// A logged workout
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub kind: String,
    pub duration_minutes: Option<i64>,
    pub completed_at: DateTime<Utc>,
}

/// Create workout request
#[derive(Debug, Deserialize)]
pub struct CreateWorkoutRequest {
    pub kind: String,
    pub duration_minutes: Option<i64>,
}

/// A free-form journal entry
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: String,
    pub user_id: String,
    pub title: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create journal entry request
#[derive(Debug, Deserialize)]
pub struct CreateJournalEntryRequest {
    pub title: Option<String>,
    pub content: String,
}

/// Update journal entry request
#[derive(Debug, Deserialize)]
pub struct UpdateJournalEntryRequest {
    pub id: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

/// A mood log; one per user per calendar day
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodLog {
    pub id: String,
    pub user_id: String,
    pub mood_value: i64,
    pub note: Option<String>,
    pub log_date: NaiveDate,
    pub logged_at: DateTime<Utc>,
}

/// Upsert mood log request; omitting log_date targets today
#[derive(Debug, Deserialize)]
pub struct LogMoodRequest {
    pub mood_value: i64,
    pub note: Option<String>,
    pub log_date: Option<NaiveDate>,
}

/// Gratitude row as stored; items are a JSON array of strings
#[derive(Debug, Clone, FromRow)]
pub struct GratitudeRow {
    pub id: String,
    pub user_id: String,
    pub items_json: String,
    pub created_at: DateTime<Utc>,
}

/// A gratitude entry with its decoded item list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GratitudeEntry {
    pub id: String,
    pub user_id: String,
    pub items: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl GratitudeRow {
    pub fn into_entry(self) -> GratitudeEntry {
        let items: Vec<String> = match serde_json::from_str(&self.items_json) {
            Ok(items) => items,
            Err(e) => {
                tracing::warn!("Malformed items for gratitude entry {}: {}", self.id, e);
                Vec::new()
            }
        };

        GratitudeEntry {
            id: self.id,
            user_id: self.user_id,
            items,
            created_at: self.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn habit_row(completions_json: &str) -> HabitRow {
        HabitRow {
            id: "h1".to_string(),
            user_id: "u1".to_string(),
            name: "Meditate".to_string(),
            module: "mental".to_string(),
            completions_json: completions_json.to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_completion_dates_decodes_iso_dates() {
        let row = habit_row(r#"["2024-05-01","2024-05-02"]"#);
        let dates = row.completion_dates();

        assert_eq!(dates.len(), 2);
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
    }

    #[test]
    fn test_completion_dates_tolerates_malformed_json() {
        let row = habit_row("not json");
        assert!(row.completion_dates().is_empty());
    }

    #[test]
    fn test_completion_dates_skips_invalid_entries() {
        let row = habit_row(r#"["2024-05-01","yesterday"]"#);
        let dates = row.completion_dates();

        assert_eq!(dates.len(), 1);
    }

    #[test]
    fn test_into_habit_dedupes_completions() {
        let row = habit_row(r#"["2024-05-02","2024-05-01","2024-05-02"]"#);
        let today = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let habit = row.into_habit(today);

        assert_eq!(habit.completions.len(), 2);
        assert_eq!(habit.streak, 2);
    }

    #[test]
    fn test_gratitude_row_tolerates_malformed_items() {
        let row = GratitudeRow {
            id: "g1".to_string(),
            user_id: "u1".to_string(),
            items_json: "{broken".to_string(),
            created_at: Utc::now(),
        };

        assert!(row.into_entry().items.is_empty());
    }

    #[test]
    fn test_status_round_trips_through_serde() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, r#""inprogress""#);

        let back: TaskStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TaskStatus::InProgress);
    }
}
