//! Repository layer for database operations
//!
//! This module provides CRUD operations for all entities.
//! Every operation is scoped to the owning user's rows.

use super::models::*;
use crate::error::{AppError, Result};
use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// Repository for database operations
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // ===== Tasks =====

    /// Create a new task
    pub async fn create_task(&self, user_id: &str, req: CreateTaskRequest) -> Result<Task> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let priority = req.priority.unwrap_or(TaskPriority::Medium);

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (id, user_id, title, status, priority, created_at, updated_at)
            VALUES (?, ?, ?, 'todo', ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&req.title)
        .bind(priority.as_str())
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created task: {}", id);
        Ok(task)
    }

    /// Get a task by ID
    pub async fn get_task(&self, user_id: &str, id: &str) -> Result<Task> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::TaskNotFound(id.to_string()))?;

        Ok(task)
    }

    /// List all tasks for a user
    pub async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT * FROM tasks
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    /// Update a task
    pub async fn update_task(&self, user_id: &str, req: UpdateTaskRequest) -> Result<Task> {
        let now = Utc::now();

        // Build dynamic update query
        let mut query = "UPDATE tasks SET updated_at = ?".to_string();
        let mut params: Vec<String> = vec![now.to_rfc3339()];

        if let Some(title) = &req.title {
            query.push_str(", title = ?");
            params.push(title.clone());
        }

        if let Some(status) = req.status {
            query.push_str(", status = ?");
            params.push(status.as_str().to_string());
        }

        if let Some(priority) = req.priority {
            query.push_str(", priority = ?");
            params.push(priority.as_str().to_string());
        }

        query.push_str(" WHERE id = ? AND user_id = ?");
        params.push(req.id.clone());
        params.push(user_id.to_string());

        // Execute update
        let mut q = sqlx::query(&query);
        for param in &params {
            q = q.bind(param);
        }

        let rows_affected = q.execute(&self.pool).await?.rows_affected();

        if rows_affected == 0 {
            return Err(AppError::TaskNotFound(req.id));
        }

        // Fetch updated task
        self.get_task(user_id, &req.id).await
    }

    /// Delete a task
    pub async fn delete_task(&self, user_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM tasks WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::TaskNotFound(id.to_string()));
        }

        tracing::debug!("Deleted task: {}", id);
        Ok(())
    }

    // ===== Habits =====

    /// Create a habit
    pub async fn create_habit(&self, user_id: &str, name: &str, module: &str) -> Result<HabitRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let habit = sqlx::query_as::<_, HabitRow>(
            r#"
            INSERT INTO habits (id, user_id, name, module, completions_json, created_at)
            VALUES (?, ?, ?, ?, '[]', ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(name)
        .bind(module)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created habit: {}", id);
        Ok(habit)
    }

    /// Get a habit row by ID
    pub async fn get_habit_row(&self, user_id: &str, id: &str) -> Result<HabitRow> {
        let habit = sqlx::query_as::<_, HabitRow>(
            r#"
            SELECT * FROM habits WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::HabitNotFound(id.to_string()))?;

        Ok(habit)
    }

    /// List all habit rows for a user
    pub async fn list_habit_rows(&self, user_id: &str) -> Result<Vec<HabitRow>> {
        let habits = sqlx::query_as::<_, HabitRow>(
            r#"
            SELECT * FROM habits
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(habits)
    }

    /// Replace a habit's completion set
    pub async fn update_habit_completions(
        &self,
        user_id: &str,
        id: &str,
        completions_json: &str,
    ) -> Result<HabitRow> {
        let rows = sqlx::query(
            r#"
            UPDATE habits SET completions_json = ? WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(completions_json)
        .bind(id)
        .bind(user_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if rows == 0 {
            return Err(AppError::HabitNotFound(id.to_string()));
        }

        tracing::debug!("Updated completions for habit: {}", id);
        self.get_habit_row(user_id, id).await
    }

    /// Delete a habit
    pub async fn delete_habit(&self, user_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM habits WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::HabitNotFound(id.to_string()));
        }

        tracing::debug!("Deleted habit: {}", id);
        Ok(())
    }

    // ===== Transactions =====

    /// Record a transaction
    pub async fn create_transaction(
        &self,
        user_id: &str,
        req: CreateTransactionRequest,
    ) -> Result<Transaction> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let tx = sqlx::query_as::<_, Transaction>(
            r#"
            INSERT INTO transactions (id, user_id, amount, kind, category, date, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(req.amount)
        .bind(req.kind)
        .bind(&req.category)
        .bind(req.date)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created transaction: {}", id);
        Ok(tx)
    }

    /// List all transactions for a user, newest first
    pub async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        let txs = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT * FROM transactions
            WHERE user_id = ?
            ORDER BY date DESC, created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(txs)
    }

    /// Delete a transaction
    pub async fn delete_transaction(&self, user_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM transactions WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::RecordNotFound(id.to_string()));
        }

        tracing::debug!("Deleted transaction: {}", id);
        Ok(())
    }

    // ===== Savings Goals =====

    /// Create a savings goal
    pub async fn create_goal(
        &self,
        user_id: &str,
        name: &str,
        target_amount: f64,
    ) -> Result<SavingsGoal> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let goal = sqlx::query_as::<_, SavingsGoal>(
            r#"
            INSERT INTO savings_goals (id, user_id, name, target_amount, current_amount, created_at)
            VALUES (?, ?, ?, ?, 0, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(name)
        .bind(target_amount)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created savings goal: {}", id);
        Ok(goal)
    }

    /// Get a savings goal by ID
    pub async fn get_goal(&self, user_id: &str, id: &str) -> Result<SavingsGoal> {
        let goal = sqlx::query_as::<_, SavingsGoal>(
            r#"
            SELECT * FROM savings_goals WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::GoalNotFound(id.to_string()))?;

        Ok(goal)
    }

    /// List all savings goals for a user
    pub async fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        let goals = sqlx::query_as::<_, SavingsGoal>(
            r#"
            SELECT * FROM savings_goals
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(goals)
    }

    /// Deposit into a savings goal.
    ///
    /// current_amount is min-clamped at target_amount inside the UPDATE so
    /// an overshooting deposit lands exactly on the target.
    pub async fn deposit_to_goal(
        &self,
        user_id: &str,
        id: &str,
        amount: f64,
    ) -> Result<SavingsGoal> {
        let goal = sqlx::query_as::<_, SavingsGoal>(
            r#"
            UPDATE savings_goals
            SET current_amount = MIN(target_amount, current_amount + ?)
            WHERE id = ? AND user_id = ?
            RETURNING *
            "#,
        )
        .bind(amount)
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::GoalNotFound(id.to_string()))?;

        tracing::debug!("Deposited into goal: {}", id);
        Ok(goal)
    }

    /// Delete a savings goal
    pub async fn delete_goal(&self, user_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM savings_goals WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::GoalNotFound(id.to_string()));
        }

        tracing::debug!("Deleted savings goal: {}", id);
        Ok(())
    }

    // ===== Workouts =====

    /// Log a workout
    pub async fn create_workout(
        &self,
        user_id: &str,
        req: CreateWorkoutRequest,
    ) -> Result<Workout> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let workout = sqlx::query_as::<_, Workout>(
            r#"
            INSERT INTO workouts (id, user_id, kind, duration_minutes, completed_at)
            VALUES (?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&req.kind)
        .bind(req.duration_minutes)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created workout: {}", id);
        Ok(workout)
    }

    /// List all workouts for a user, newest first
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<Workout>> {
        let workouts = sqlx::query_as::<_, Workout>(
            r#"
            SELECT * FROM workouts
            WHERE user_id = ?
            ORDER BY completed_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(workouts)
    }

    /// Delete a workout
    pub async fn delete_workout(&self, user_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM workouts WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::RecordNotFound(id.to_string()));
        }

        tracing::debug!("Deleted workout: {}", id);
        Ok(())
    }

    // ===== Journal =====

    /// Create a journal entry
    pub async fn create_journal_entry(
        &self,
        user_id: &str,
        req: CreateJournalEntryRequest,
    ) -> Result<JournalEntry> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            INSERT INTO journal_entries (id, user_id, title, content, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&req.title)
        .bind(&req.content)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created journal entry: {}", id);
        Ok(entry)
    }

    /// Get a journal entry by ID
    pub async fn get_journal_entry(&self, user_id: &str, id: &str) -> Result<JournalEntry> {
        let entry = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::RecordNotFound(id.to_string()))?;

        Ok(entry)
    }

    /// List all journal entries for a user, newest first
    pub async fn list_journal_entries(&self, user_id: &str) -> Result<Vec<JournalEntry>> {
        let entries = sqlx::query_as::<_, JournalEntry>(
            r#"
            SELECT * FROM journal_entries
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Update a journal entry
    pub async fn update_journal_entry(
        &self,
        user_id: &str,
        req: UpdateJournalEntryRequest,
    ) -> Result<JournalEntry> {
        let now = Utc::now();

        let mut query = "UPDATE journal_entries SET updated_at = ?".to_string();
        let mut params: Vec<String> = vec![now.to_rfc3339()];

        if let Some(title) = &req.title {
            query.push_str(", title = ?");
            params.push(title.clone());
        }

        if let Some(content) = &req.content {
            query.push_str(", content = ?");
            params.push(content.clone());
        }

        query.push_str(" WHERE id = ? AND user_id = ?");
        params.push(req.id.clone());
        params.push(user_id.to_string());

        let mut q = sqlx::query(&query);
        for param in &params {
            q = q.bind(param);
        }

        let rows_affected = q.execute(&self.pool).await?.rows_affected();

        if rows_affected == 0 {
            return Err(AppError::RecordNotFound(req.id));
        }

        self.get_journal_entry(user_id, &req.id).await
    }

    /// Delete a journal entry
    pub async fn delete_journal_entry(&self, user_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM journal_entries WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::RecordNotFound(id.to_string()));
        }

        tracing::debug!("Deleted journal entry: {}", id);
        Ok(())
    }

    // ===== Mood Logs =====

    /// Upsert the mood log for a calendar day.
    ///
    /// Re-logging a mood for the same day replaces the previous value.
    pub async fn upsert_mood_log(
        &self,
        user_id: &str,
        mood_value: i64,
        note: Option<&str>,
        log_date: NaiveDate,
    ) -> Result<MoodLog> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let log = sqlx::query_as::<_, MoodLog>(
            r#"
            INSERT INTO mood_logs (id, user_id, mood_value, note, log_date, logged_at)
            VALUES (?, ?, ?, ?, ?, ?)
            ON CONFLICT(user_id, log_date) DO UPDATE SET
                mood_value = excluded.mood_value,
                note = excluded.note,
                logged_at = excluded.logged_at
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(mood_value)
        .bind(note)
        .bind(log_date)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Logged mood for {}: {}", log_date, mood_value);
        Ok(log)
    }

    /// List mood logs for a user, newest day first
    pub async fn list_mood_logs(&self, user_id: &str, limit: i64) -> Result<Vec<MoodLog>> {
        let logs = sqlx::query_as::<_, MoodLog>(
            r#"
            SELECT * FROM mood_logs
            WHERE user_id = ?
            ORDER BY log_date DESC
            LIMIT ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    // ===== Gratitude =====

    /// Create a gratitude entry
    pub async fn create_gratitude_entry(
        &self,
        user_id: &str,
        items_json: &str,
    ) -> Result<GratitudeRow> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();

        let entry = sqlx::query_as::<_, GratitudeRow>(
            r#"
            INSERT INTO gratitude_entries (id, user_id, items_json, created_at)
            VALUES (?, ?, ?, ?)
            RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(items_json)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Created gratitude entry: {}", id);
        Ok(entry)
    }

    /// List all gratitude rows for a user, newest first
    pub async fn list_gratitude_rows(&self, user_id: &str) -> Result<Vec<GratitudeRow>> {
        let entries = sqlx::query_as::<_, GratitudeRow>(
            r#"
            SELECT * FROM gratitude_entries
            WHERE user_id = ?
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }

    /// Delete a gratitude entry
    pub async fn delete_gratitude_entry(&self, user_id: &str, id: &str) -> Result<()> {
        let rows = sqlx::query("DELETE FROM gratitude_entries WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows == 0 {
            return Err(AppError::RecordNotFound(id.to_string()));
        }

        tracing::debug!("Deleted gratitude entry: {}", id);
        Ok(())
    }
}
