//! Achievement unlock evaluator
//!
//! A static table of boolean predicates over the growth snapshot. Nothing
//! is persisted: the unlocked/locked partition is recomputed from current
//! data on every call, so deleting rows can re-lock an achievement.

use super::GrowthSnapshot;
use serde::Serialize;

/// A single achievement definition
struct Achievement {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    predicate: fn(&GrowthSnapshot) -> bool,
}

const ACHIEVEMENTS: &[Achievement] = &[
    Achievement {
        id: "first-step",
        title: "First Step",
        description: "Complete your first task",
        predicate: |s| s.productivity.done_tasks >= 1,
    },
    Achievement {
        id: "task-master",
        title: "Task Master",
        description: "Complete 25 tasks",
        predicate: |s| s.productivity.done_tasks >= 25,
    },
    Achievement {
        id: "habit-builder",
        title: "Habit Builder",
        description: "Track 3 habits at once",
        predicate: |s| s.productivity.habit_count >= 3,
    },
    Achievement {
        id: "week-streak",
        title: "One Week Strong",
        description: "Keep a habit streak alive for 7 days",
        predicate: |s| s.max_streak >= 7,
    },
    Achievement {
        id: "month-streak",
        title: "Unstoppable",
        description: "Keep a habit streak alive for 30 days",
        predicate: |s| s.max_streak >= 30,
    },
    Achievement {
        id: "first-saver",
        title: "First Saver",
        description: "Create a savings goal",
        predicate: |s| s.finance.goal_count >= 1,
    },
    Achievement {
        id: "goal-crusher",
        title: "Goal Crusher",
        description: "Fully fund a savings goal",
        predicate: |s| s.goals_completed >= 1,
    },
    Achievement {
        id: "money-mover",
        title: "Money Mover",
        description: "Record 10 transactions",
        predicate: |s| s.finance.transaction_count >= 10,
    },
    Achievement {
        id: "iron-will",
        title: "Iron Will",
        description: "Log 10 workouts",
        predicate: |s| s.fitness.workout_count >= 10,
    },
    Achievement {
        id: "steady-scribe",
        title: "Steady Scribe",
        description: "Write 10 journal entries",
        predicate: |s| s.mental.journal_count >= 10,
    },
    Achievement {
        id: "grateful-heart",
        title: "Grateful Heart",
        description: "Record 7 gratitude entries",
        predicate: |s| s.mental.gratitude_count >= 7,
    },
    Achievement {
        id: "well-rounded",
        title: "Well Rounded",
        description: "Reach an overall growth score of 75",
        predicate: |s| s.scores.overall >= 75,
    },
];

/// One achievement as shown to the user
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AchievementState {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// Partition of the achievement table into unlocked and locked sets
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct AchievementSummary {
    pub unlocked: Vec<AchievementState>,
    pub locked: Vec<AchievementState>,
}

/// Evaluate every predicate against the snapshot.
pub fn evaluate(snapshot: &GrowthSnapshot) -> AchievementSummary {
    let mut summary = AchievementSummary::default();

    for achievement in ACHIEVEMENTS {
        let state = AchievementState {
            id: achievement.id,
            title: achievement.title,
            description: achievement.description,
        };

        if (achievement.predicate)(snapshot) {
            summary.unlocked.push(state);
        } else {
            summary.locked.push(state);
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::RecordSet;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 3).unwrap()
    }

    #[test]
    fn test_empty_snapshot_unlocks_nothing() {
        let snapshot = GrowthSnapshot::build(&RecordSet::default(), today());

        assert!(snapshot.achievements.unlocked.is_empty());
        assert_eq!(snapshot.achievements.locked.len(), ACHIEVEMENTS.len());
    }

    #[test]
    fn test_partition_covers_whole_table() {
        let snapshot = GrowthSnapshot::build(&RecordSet::default(), today());
        let summary = evaluate(&snapshot);

        assert_eq!(
            summary.unlocked.len() + summary.locked.len(),
            ACHIEVEMENTS.len()
        );
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let snapshot = GrowthSnapshot::build(&RecordSet::default(), today());

        let first = evaluate(&snapshot);
        let second = evaluate(&snapshot);

        assert_eq!(first, second);
    }
}
