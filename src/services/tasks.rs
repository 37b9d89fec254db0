//! Tasks service
//!
//! High-level business logic for task operations.
//! Validation happens here; the analytics engine downstream assumes rows
//! were checked at write time.

use crate::config;
use crate::database::{
    CreateTaskRequest, Repository, Task, TaskPriority, TaskStatus, UpdateTaskRequest,
};
use crate::error::{AppError, Result};

/// Service for managing tasks
#[derive(Clone)]
pub struct TasksService {
    repo: Repository,
}

impl TasksService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Create a new task
    pub async fn create_task(
        &self,
        user_id: &str,
        title: String,
        priority: Option<TaskPriority>,
    ) -> Result<Task> {
        validate_title(&title)?;

        tracing::info!("Creating task for user {}: {}", user_id, title);

        let task = self
            .repo
            .create_task(user_id, CreateTaskRequest { title, priority })
            .await?;

        Ok(task)
    }

    /// Get a task by ID
    pub async fn get_task(&self, user_id: &str, id: &str) -> Result<Task> {
        self.repo.get_task(user_id, id).await
    }

    /// List all tasks
    pub async fn list_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        self.repo.list_tasks(user_id).await
    }

    /// Move a task to a new workflow state
    pub async fn set_status(&self, user_id: &str, id: String, status: TaskStatus) -> Result<Task> {
        tracing::debug!("Setting task {} status to {}", id, status.as_str());

        self.repo
            .update_task(
                user_id,
                UpdateTaskRequest {
                    id,
                    title: None,
                    status: Some(status),
                    priority: None,
                },
            )
            .await
    }

    /// Update a task's title and/or priority
    pub async fn update_task(
        &self,
        user_id: &str,
        id: String,
        title: Option<String>,
        priority: Option<TaskPriority>,
    ) -> Result<Task> {
        if let Some(title) = &title {
            validate_title(title)?;
        }

        self.repo
            .update_task(
                user_id,
                UpdateTaskRequest {
                    id,
                    title,
                    status: None,
                    priority,
                },
            )
            .await
    }

    /// Delete a task
    pub async fn delete_task(&self, user_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting task: {}", id);
        self.repo.delete_task(user_id, id).await
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Task title cannot be empty".to_string()));
    }
    if title.len() > config::MAX_TITLE_LENGTH {
        return Err(AppError::Validation(format!(
            "Task title exceeds {} characters",
            config::MAX_TITLE_LENGTH
        )));
    }
    Ok(())
}
