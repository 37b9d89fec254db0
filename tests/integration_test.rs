//! Integration tests for the PriMaX Hub engine
//!
//! These tests verify end-to-end functionality including:
//! - Hub wiring over a real on-disk database
//! - Dashboard snapshot derivation from seeded records
//! - Export archive creation

use chrono::{Duration, Utc};
use primax_hub::app::Hub;
use primax_hub::database::{TaskPriority, TaskStatus, TransactionKind};
use primax_hub::services::CoachConfig;
use tempfile::TempDir;

/// Helper to open a hub on a fresh temp directory
async fn open_test_hub() -> (Hub, TempDir) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "primax_hub=debug".into()),
        )
        .try_init();

    let temp_dir = TempDir::new().unwrap();
    let hub = Hub::open(temp_dir.path(), CoachConfig::default())
        .await
        .unwrap();

    (hub, temp_dir)
}

#[tokio::test]
async fn test_full_dashboard_flow() {
    let (hub, _temp) = open_test_hub().await;
    let user = "u1";
    let today = Utc::now().date_naive();

    // Tasks: two done, one open
    for (title, done) in [("Plan week", true), ("Clear inbox", true), ("Write blog", false)] {
        let task = hub
            .tasks
            .create_task(user, title.to_string(), Some(TaskPriority::Medium))
            .await
            .unwrap();
        if done {
            hub.tasks
                .set_status(user, task.id, TaskStatus::Done)
                .await
                .unwrap();
        }
    }

    // A habit with a 3-day streak
    let habit = hub
        .habits
        .create_habit(user, "Morning run".to_string(), "fitness".to_string())
        .await
        .unwrap();
    for days_ago in 0..3 {
        hub.habits
            .toggle_completion(user, &habit.id, today - Duration::days(days_ago))
            .await
            .unwrap();
    }

    // Finance: income 1000, expense 400 across three categories, two goals
    hub.finance
        .record_transaction(user, 1000.0, TransactionKind::Income, "salary".into(), today)
        .await
        .unwrap();
    for (amount, category) in [(250.0, "groceries"), (100.0, "rent"), (50.0, "fun")] {
        hub.finance
            .record_transaction(user, amount, TransactionKind::Expense, category.into(), today)
            .await
            .unwrap();
    }
    hub.finance
        .create_goal(user, "Vacation".to_string(), 500.0)
        .await
        .unwrap();
    hub.finance
        .create_goal(user, "Laptop".to_string(), 1200.0)
        .await
        .unwrap();

    // Fitness, journal, mood, gratitude
    hub.fitness
        .log_workout(user, "run".to_string(), Some(30))
        .await
        .unwrap();
    hub.journal
        .create_entry(user, None, "Good start to the week.".to_string())
        .await
        .unwrap();
    hub.journal.log_mood(user, 4, None, None).await.unwrap();
    hub.journal
        .add_gratitude(user, vec!["family".to_string(), "coffee".to_string()])
        .await
        .unwrap();

    let snapshot = hub.insights.snapshot(user).await;

    assert!(snapshot.has_any_data);

    // Finance: savings rate 0.6 -> 36 + 16 + 20 = 72
    assert_eq!(snapshot.scores.finance, 72);

    // Productivity: done 2/3 -> 40, 1 habit -> 5, streak 3/10 -> 0.3 => 45
    assert_eq!(snapshot.scores.productivity, 45);

    // Fitness: 1 workout -> 6, 1 active habit -> 5 => 11
    assert_eq!(snapshot.scores.fitness, 11);

    // Mental: mood 4 -> 48, 1 journal -> 3, 1 gratitude -> 4 => 55
    assert_eq!(snapshot.scores.mental, 55);

    // Overall: round((72 + 45 + 11 + 55) / 4) = round(45.75) = 46
    assert_eq!(snapshot.scores.overall, 46);

    assert_eq!(snapshot.max_streak, 3);
    assert_eq!(snapshot.top_categories[0].category, "groceries");
    assert_eq!(snapshot.total_workout_minutes, 30);

    // First achievements are in
    let unlocked: Vec<&str> = snapshot
        .achievements
        .unlocked
        .iter()
        .map(|a| a.id)
        .collect();
    assert!(unlocked.contains(&"first-step"));
    assert!(unlocked.contains(&"first-saver"));
    assert!(!unlocked.contains(&"week-streak"));
}

#[tokio::test]
async fn test_empty_user_scores_zero_without_errors() {
    let (hub, _temp) = open_test_hub().await;

    let snapshot = hub.insights.snapshot("nobody").await;

    assert!(!snapshot.has_any_data);
    assert_eq!(snapshot.scores.productivity, 0);
    assert_eq!(snapshot.scores.finance, 0);
    assert_eq!(snapshot.scores.fitness, 0);
    assert_eq!(snapshot.scores.mental, 0);
    assert_eq!(snapshot.scores.overall, 0);
    assert!(snapshot.achievements.unlocked.is_empty());
}

#[tokio::test]
async fn test_deposit_clamp_end_to_end() {
    let (hub, _temp) = open_test_hub().await;
    let user = "u1";

    let goal = hub
        .finance
        .create_goal(user, "Emergency fund".to_string(), 500.0)
        .await
        .unwrap();

    hub.finance.deposit(user, &goal.id, 480.0).await.unwrap();
    let clamped = hub.finance.deposit(user, &goal.id, 50.0).await.unwrap();

    assert_eq!(clamped.current_amount, 500.0);

    let snapshot = hub.insights.snapshot(user).await;
    assert_eq!(snapshot.goals_completed, 1);
}

#[tokio::test]
async fn test_streak_survives_missing_today() {
    let (hub, _temp) = open_test_hub().await;
    let user = "u1";
    let today = Utc::now().date_naive();

    let habit = hub
        .habits
        .create_habit(user, "Stretch".to_string(), "fitness".to_string())
        .await
        .unwrap();

    // Completed yesterday and the day before, not yet today
    hub.habits
        .toggle_completion(user, &habit.id, today - Duration::days(2))
        .await
        .unwrap();
    let habit = hub
        .habits
        .toggle_completion(user, &habit.id, today - Duration::days(1))
        .await
        .unwrap();

    // Still a live 2-day streak, not a reset
    assert_eq!(habit.streak, 2);
}

#[tokio::test]
async fn test_export_archive_end_to_end() {
    let (hub, _temp) = open_test_hub().await;
    let user = "u1";

    hub.tasks
        .create_task(user, "Back me up".to_string(), None)
        .await
        .unwrap();
    hub.journal
        .add_gratitude(user, vec!["safe data".to_string()])
        .await
        .unwrap();

    let archive_path = hub.export.export_archive(user).await.unwrap();

    assert!(archive_path.exists());
    assert!(archive_path.to_string_lossy().contains("export_"));

    // Archive opens and contains the document plus the manifest
    let file = std::fs::File::open(&archive_path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    assert!(archive.by_name("export.json").is_ok());
    assert!(archive.by_name("manifest.json").is_ok());
}

#[tokio::test]
async fn test_hub_reopens_existing_database() {
    let (hub, temp) = open_test_hub().await;
    let user = "u1";

    hub.tasks
        .create_task(user, "Persist me".to_string(), None)
        .await
        .unwrap();

    // Reopen over the same directory; data survives
    let reopened = Hub::open(temp.path(), CoachConfig::default())
        .await
        .unwrap();

    let tasks = reopened.tasks.list_tasks(user).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Persist me");
}
