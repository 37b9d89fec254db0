//! Fitness service
//!
//! Workout logging and simple totals.

use crate::database::{CreateWorkoutRequest, Repository, Workout};
use crate::error::{AppError, Result};

/// Service for managing workouts
#[derive(Clone)]
pub struct FitnessService {
    repo: Repository,
}

impl FitnessService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Log a completed workout
    pub async fn log_workout(
        &self,
        user_id: &str,
        kind: String,
        duration_minutes: Option<i64>,
    ) -> Result<Workout> {
        if kind.trim().is_empty() {
            return Err(AppError::Validation(
                "Workout kind cannot be empty".to_string(),
            ));
        }
        if let Some(minutes) = duration_minutes {
            if minutes < 0 {
                return Err(AppError::Validation(
                    "Workout duration must be non-negative".to_string(),
                ));
            }
        }

        tracing::info!("Logging workout for user {}: {}", user_id, kind);

        self.repo
            .create_workout(
                user_id,
                CreateWorkoutRequest {
                    kind,
                    duration_minutes,
                },
            )
            .await
    }

    /// List all workouts, newest first
    pub async fn list_workouts(&self, user_id: &str) -> Result<Vec<Workout>> {
        self.repo.list_workouts(user_id).await
    }

    /// Delete a workout
    pub async fn delete_workout(&self, user_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting workout: {}", id);
        self.repo.delete_workout(user_id, id).await
    }

    /// Total minutes across all logged workouts
    pub async fn total_minutes(&self, user_id: &str) -> Result<i64> {
        let workouts = self.repo.list_workouts(user_id).await?;

        Ok(workouts
            .iter()
            .map(|w| w.duration_minutes.unwrap_or(0).max(0))
            .sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Repository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> FitnessService {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        FitnessService::new(Repository::new(pool))
    }

    #[tokio::test]
    async fn test_log_and_total_minutes() {
        let service = create_test_service().await;

        service
            .log_workout("u1", "run".to_string(), Some(30))
            .await
            .unwrap();
        service
            .log_workout("u1", "yoga".to_string(), None)
            .await
            .unwrap();
        service
            .log_workout("u1", "swim".to_string(), Some(45))
            .await
            .unwrap();

        assert_eq!(service.total_minutes("u1").await.unwrap(), 75);
        assert_eq!(service.list_workouts("u1").await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_negative_duration_is_rejected() {
        let service = create_test_service().await;

        let result = service.log_workout("u1", "run".to_string(), Some(-5)).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }
}
