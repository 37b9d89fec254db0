//! Growth analytics engine
//!
//! Pure functions turning raw per-user records into streaks, domain
//! scores, aggregates and the achievement partition. The engine never
//! performs I/O and never writes; it is handed already-fetched rows and
//! recomputes everything from scratch on each call.

pub mod achievements;
pub mod score;
pub mod streak;

pub use achievements::{AchievementState, AchievementSummary};
pub use score::{DomainScores, FinanceStats, FitnessStats, MentalStats, ProductivityStats};

use crate::config;
use crate::database::{
    GratitudeEntry, Habit, JournalEntry, MoodLog, SavingsGoal, Task, TaskStatus, Transaction,
    TransactionKind, Workout,
};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw per-user rows the engine consumes. A fetch failure upstream shows
/// up here as an empty list, which simply scores low.
#[derive(Debug, Clone, Default)]
pub struct RecordSet {
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<SavingsGoal>,
    pub workouts: Vec<Workout>,
    pub journal_entries: Vec<JournalEntry>,
    pub mood_logs: Vec<MoodLog>,
    pub gratitude_entries: Vec<GratitudeEntry>,
}

impl RecordSet {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
            && self.habits.is_empty()
            && self.transactions.is_empty()
            && self.goals.is_empty()
            && self.workouts.is_empty()
            && self.journal_entries.is_empty()
            && self.mood_logs.is_empty()
            && self.gratitude_entries.is_empty()
    }
}

/// Income/expense totals; negative stored amounts clamp to zero
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinanceSummary {
    pub income: f64,
    pub expense: f64,
    pub net: f64,
    pub savings_rate: f64,
    pub transaction_count: usize,
}

/// One entry of the top-spending-category ranking
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// Per-habit streak standing, ranked by current streak
#[derive(Debug, Clone, Serialize)]
pub struct HabitStreak {
    pub id: String,
    pub name: String,
    pub current: u32,
    pub longest: u32,
}

/// The one-shot derived bundle the dashboard renders.
#[derive(Debug, Clone, Serialize)]
pub struct GrowthSnapshot {
    pub generated_on: NaiveDate,
    /// False only when every raw record list is empty; the UI shows an
    /// empty-state placeholder instead of a zero dashboard.
    pub has_any_data: bool,
    pub productivity: ProductivityStats,
    pub finance: FinanceStats,
    pub fitness: FitnessStats,
    pub mental: MentalStats,
    pub scores: DomainScores,
    pub finance_summary: FinanceSummary,
    pub top_categories: Vec<CategoryTotal>,
    pub habit_streaks: Vec<HabitStreak>,
    pub max_streak: u32,
    pub goals_completed: usize,
    pub total_workout_minutes: i64,
    pub achievements: AchievementSummary,
}

impl GrowthSnapshot {
    /// Derive everything from the raw rows as of `today`.
    ///
    /// Streaks are recomputed from completion sets here; the engine never
    /// trusts a previously derived value.
    pub fn build(records: &RecordSet, today: NaiveDate) -> GrowthSnapshot {
        let habit_streaks = habit_streaks(&records.habits, today);
        let streak_sum = habit_streaks.iter().map(|h| h.current).sum();
        let max_streak = habit_streaks.iter().map(|h| h.current).max().unwrap_or(0);
        let active_habit_count = habit_streaks.iter().filter(|h| h.current > 0).count();

        let finance_summary = finance_summary(&records.transactions);

        let productivity = ProductivityStats {
            done_tasks: records
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Done)
                .count(),
            total_tasks: records.tasks.len(),
            habit_count: records.habits.len(),
            streak_sum,
        };

        let finance = FinanceStats {
            income: finance_summary.income,
            expense: finance_summary.expense,
            goal_count: records.goals.len(),
            transaction_count: records.transactions.len(),
        };

        let fitness = FitnessStats {
            workout_count: records.workouts.len(),
            active_habit_count,
        };

        let mental = MentalStats {
            mood_values: recent_mood_values(&records.mood_logs, config::MOOD_WINDOW),
            journal_count: records.journal_entries.len(),
            gratitude_count: records.gratitude_entries.len(),
        };

        let scores = DomainScores::compute(&productivity, &finance, &fitness, &mental);

        let goals_completed = records
            .goals
            .iter()
            .filter(|g| g.target_amount > 0.0 && g.current_amount >= g.target_amount)
            .count();

        let total_workout_minutes = records
            .workouts
            .iter()
            .map(|w| w.duration_minutes.unwrap_or(0).max(0))
            .sum();

        let mut snapshot = GrowthSnapshot {
            generated_on: today,
            has_any_data: !records.is_empty(),
            productivity,
            finance,
            fitness,
            mental,
            scores,
            top_categories: top_categories(&records.transactions, config::TOP_CATEGORY_LIMIT),
            finance_summary,
            habit_streaks,
            max_streak,
            goals_completed,
            total_workout_minutes,
            achievements: AchievementSummary::default(),
        };

        snapshot.achievements = achievements::evaluate(&snapshot);
        snapshot
    }
}

/// Sum income and expenses, clamping dirty negative amounts to zero.
pub fn finance_summary(transactions: &[Transaction]) -> FinanceSummary {
    let mut income = 0.0;
    let mut expense = 0.0;

    for tx in transactions {
        let amount = tx.amount.max(0.0);
        match tx.kind {
            TransactionKind::Income => income += amount,
            TransactionKind::Expense => expense += amount,
        }
    }

    let savings_rate = if income > 0.0 {
        ((income - expense) / income).max(0.0)
    } else {
        0.0
    };

    FinanceSummary {
        income,
        expense,
        net: income - expense,
        savings_rate,
        transaction_count: transactions.len(),
    }
}

/// Top-N expense categories by total spent, largest first.
/// Ties break alphabetically so the ranking is stable.
pub fn top_categories(transactions: &[Transaction], limit: usize) -> Vec<CategoryTotal> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();

    for tx in transactions {
        if tx.kind == TransactionKind::Expense {
            *totals.entry(tx.category.as_str()).or_insert(0.0) += tx.amount.max(0.0);
        }
    }

    let mut ranked: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(category, total)| CategoryTotal {
            category: category.to_string(),
            total,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    ranked.truncate(limit);
    ranked
}

/// Current and longest streak per habit, ranked by current streak.
pub fn habit_streaks(habits: &[Habit], today: NaiveDate) -> Vec<HabitStreak> {
    let mut ranked: Vec<HabitStreak> = habits
        .iter()
        .map(|h| HabitStreak {
            id: h.id.clone(),
            name: h.name.clone(),
            current: streak::compute_streak(&h.completions, today),
            longest: streak::longest_streak(&h.completions),
        })
        .collect();

    ranked.sort_by(|a, b| b.current.cmp(&a.current).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// The most recent `window` mood values, newest first.
fn recent_mood_values(mood_logs: &[MoodLog], window: usize) -> Vec<i64> {
    let mut logs: Vec<&MoodLog> = mood_logs.iter().collect();
    logs.sort_by(|a, b| b.log_date.cmp(&a.log_date));

    logs.iter().take(window).map(|l| l.mood_value).collect()
}
