//! Domain score functions
//!
//! Each life domain gets an integer score in [0, 100] from a monotonic,
//! saturating weighted sum over its stat bundle. Missing data is zero,
//! never an error; dirty values are clamped rather than rejected so a bad
//! row can never take down a dashboard.

use crate::config;
use serde::Serialize;

/// Counts feeding the productivity score
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProductivityStats {
    pub done_tasks: usize,
    pub total_tasks: usize,
    pub habit_count: usize,
    /// Sum of current streaks across all habits
    pub streak_sum: u32,
}

/// Sums and counts feeding the finance score
#[derive(Debug, Clone, Default, Serialize)]
pub struct FinanceStats {
    pub income: f64,
    pub expense: f64,
    pub goal_count: usize,
    pub transaction_count: usize,
}

/// Counts feeding the fitness score
#[derive(Debug, Clone, Default, Serialize)]
pub struct FitnessStats {
    pub workout_count: usize,
    /// Habits with a positive current streak
    pub active_habit_count: usize,
}

/// Values feeding the mental score
#[derive(Debug, Clone, Default, Serialize)]
pub struct MentalStats {
    /// Most recent mood values, at most `config::MOOD_WINDOW` of them
    pub mood_values: Vec<i64>,
    pub journal_count: usize,
    pub gratitude_count: usize,
}

/// The four domain scores plus their rounded mean
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DomainScores {
    pub productivity: u8,
    pub finance: u8,
    pub fitness: u8,
    pub mental: u8,
    pub overall: u8,
}

impl DomainScores {
    pub fn compute(
        productivity: &ProductivityStats,
        finance: &FinanceStats,
        fitness: &FitnessStats,
        mental: &MentalStats,
    ) -> Self {
        let productivity = productivity_score(productivity);
        let finance = finance_score(finance);
        let fitness = fitness_score(fitness);
        let mental = mental_score(mental);

        Self {
            productivity,
            finance,
            fitness,
            mental,
            overall: overall_score(productivity, finance, fitness, mental),
        }
    }
}

fn saturate(points: f64) -> u8 {
    points.clamp(0.0, config::MAX_SCORE).round() as u8
}

/// Productivity: done-ratio, habit count, capped streak bonus.
pub fn productivity_score(stats: &ProductivityStats) -> u8 {
    let done_ratio = if stats.total_tasks == 0 {
        0.0
    } else {
        stats.done_tasks as f64 / stats.total_tasks as f64
    };

    let streak_bonus =
        (stats.streak_sum as f64 / config::STREAK_SUM_DIVISOR).min(config::STREAK_BONUS_CAP);

    saturate(
        done_ratio * config::DONE_RATIO_WEIGHT
            + stats.habit_count as f64 * config::HABIT_COUNT_WEIGHT
            + streak_bonus,
    )
}

/// Finance: savings rate, goal count, flat activity bonus.
pub fn finance_score(stats: &FinanceStats) -> u8 {
    let income = stats.income.max(0.0);
    let expense = stats.expense.max(0.0);

    let savings_rate = if income > 0.0 {
        ((income - expense) / income).max(0.0)
    } else {
        0.0
    };

    let activity_bonus = if stats.transaction_count > 0 {
        config::ACTIVITY_BONUS
    } else {
        0.0
    };

    saturate(
        savings_rate * config::SAVINGS_RATE_WEIGHT
            + stats.goal_count as f64 * config::GOAL_COUNT_WEIGHT
            + activity_bonus,
    )
}

/// Fitness: workouts logged plus habits with a live streak.
pub fn fitness_score(stats: &FitnessStats) -> u8 {
    saturate(
        stats.workout_count as f64 * config::WORKOUT_WEIGHT
            + stats.active_habit_count as f64 * config::ACTIVE_HABIT_WEIGHT,
    )
}

/// Mental: windowed average mood, journal and gratitude counts.
///
/// Stored mood values outside 1..=5 are clamped into range before
/// averaging.
pub fn mental_score(stats: &MentalStats) -> u8 {
    let avg_mood = if stats.mood_values.is_empty() {
        0.0
    } else {
        let sum: i64 = stats
            .mood_values
            .iter()
            .map(|v| (*v).clamp(config::MIN_MOOD_VALUE, config::MAX_MOOD_VALUE))
            .sum();
        sum as f64 / stats.mood_values.len() as f64
    };

    saturate(
        avg_mood * config::MOOD_WEIGHT
            + stats.journal_count as f64 * config::JOURNAL_WEIGHT
            + stats.gratitude_count as f64 * config::GRATITUDE_WEIGHT,
    )
}

/// Overall: rounded unweighted mean of the four domain scores.
pub fn overall_score(productivity: u8, finance: u8, fitness: u8, mental: u8) -> u8 {
    let mean = (productivity as f64 + finance as f64 + fitness as f64 + mental as f64) / 4.0;
    mean.round() as u8
}
