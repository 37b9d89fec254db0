//! Finance service
//!
//! Transactions, savings goals and the finance summary. Deposits are
//! min-clamped at the goal target inside the database update.

use crate::analytics::{self, FinanceSummary};
use crate::config;
use crate::database::{
    CreateTransactionRequest, Repository, SavingsGoal, Transaction, TransactionKind,
};
use crate::error::{AppError, Result};
use chrono::NaiveDate;

/// Service for managing transactions and savings goals
#[derive(Clone)]
pub struct FinanceService {
    repo: Repository,
}

impl FinanceService {
    pub fn new(repo: Repository) -> Self {
        Self { repo }
    }

    /// Record an income or expense transaction
    pub async fn record_transaction(
        &self,
        user_id: &str,
        amount: f64,
        kind: TransactionKind,
        category: String,
        date: NaiveDate,
    ) -> Result<Transaction> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::Validation(
                "Transaction amount must be non-negative".to_string(),
            ));
        }

        let category = if category.trim().is_empty() {
            "other".to_string()
        } else {
            category
        };

        tracing::info!("Recording {:?} of {} for user {}", kind, amount, user_id);

        self.repo
            .create_transaction(
                user_id,
                CreateTransactionRequest {
                    amount,
                    kind,
                    category,
                    date,
                },
            )
            .await
    }

    /// List all transactions, newest first
    pub async fn list_transactions(&self, user_id: &str) -> Result<Vec<Transaction>> {
        self.repo.list_transactions(user_id).await
    }

    /// Delete a transaction
    pub async fn delete_transaction(&self, user_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting transaction: {}", id);
        self.repo.delete_transaction(user_id, id).await
    }

    /// Create a savings goal
    pub async fn create_goal(
        &self,
        user_id: &str,
        name: String,
        target_amount: f64,
    ) -> Result<SavingsGoal> {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Goal name cannot be empty".to_string()));
        }
        if !target_amount.is_finite() || target_amount <= 0.0 {
            return Err(AppError::Validation(
                "Goal target must be positive".to_string(),
            ));
        }

        tracing::info!("Creating savings goal for user {}: {}", user_id, name);

        self.repo.create_goal(user_id, &name, target_amount).await
    }

    /// List all savings goals
    pub async fn list_goals(&self, user_id: &str) -> Result<Vec<SavingsGoal>> {
        self.repo.list_goals(user_id).await
    }

    /// Deposit into a savings goal; overshooting clamps to the target.
    pub async fn deposit(&self, user_id: &str, id: &str, amount: f64) -> Result<SavingsGoal> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(AppError::Validation(
                "Deposit amount must be non-negative".to_string(),
            ));
        }

        tracing::debug!("Depositing {} into goal {}", amount, id);

        self.repo.deposit_to_goal(user_id, id, amount).await
    }

    /// Delete a savings goal
    pub async fn delete_goal(&self, user_id: &str, id: &str) -> Result<()> {
        tracing::info!("Deleting savings goal: {}", id);
        self.repo.delete_goal(user_id, id).await
    }

    /// Income/expense totals and savings rate over all transactions
    pub async fn summary(&self, user_id: &str) -> Result<FinanceSummary> {
        let transactions = self.repo.list_transactions(user_id).await?;
        Ok(analytics::finance_summary(&transactions))
    }

    /// Top spending categories, largest first
    pub async fn top_categories(&self, user_id: &str) -> Result<Vec<analytics::CategoryTotal>> {
        let transactions = self.repo.list_transactions(user_id).await?;
        Ok(analytics::top_categories(
            &transactions,
            config::TOP_CATEGORY_LIMIT,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Repository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn create_test_service() -> FinanceService {
        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        FinanceService::new(Repository::new(pool))
    }

    fn may(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    #[tokio::test]
    async fn test_summary_over_recorded_transactions() {
        let service = create_test_service().await;

        service
            .record_transaction("u1", 1000.0, TransactionKind::Income, "salary".into(), may(1))
            .await
            .unwrap();
        service
            .record_transaction("u1", 400.0, TransactionKind::Expense, "rent".into(), may(2))
            .await
            .unwrap();

        let summary = service.summary("u1").await.unwrap();

        assert_eq!(summary.income, 1000.0);
        assert_eq!(summary.expense, 400.0);
        assert_eq!(summary.net, 600.0);
        assert!((summary.savings_rate - 0.6).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_negative_amount_is_rejected() {
        let service = create_test_service().await;

        let result = service
            .record_transaction("u1", -5.0, TransactionKind::Expense, "food".into(), may(1))
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_deposit_clamp_worked_example() {
        let service = create_test_service().await;

        let goal = service
            .create_goal("u1", "Vacation".to_string(), 500.0)
            .await
            .unwrap();

        service.deposit("u1", &goal.id, 480.0).await.unwrap();
        let clamped = service.deposit("u1", &goal.id, 50.0).await.unwrap();

        // 480 + 50 would overshoot: clamps exactly to 500, not 530
        assert_eq!(clamped.current_amount, 500.0);
    }

    #[tokio::test]
    async fn test_non_positive_goal_target_is_rejected() {
        let service = create_test_service().await;

        let result = service.create_goal("u1", "Broken".to_string(), 0.0).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_blank_category_defaults_to_other() {
        let service = create_test_service().await;

        let tx = service
            .record_transaction("u1", 10.0, TransactionKind::Expense, "  ".into(), may(1))
            .await
            .unwrap();

        assert_eq!(tx.category, "other");
    }
}
