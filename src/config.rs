//! Application configuration constants
//!
//! Central location for all configuration constants, score weights,
//! and validation boundaries used throughout the engine.

// ===== Score Scale =====

/// Upper bound every domain score and the overall score saturate at
pub const MAX_SCORE: f64 = 100.0;

// ===== Productivity Score Weights =====

/// Weight applied to the done/total task ratio
pub const DONE_RATIO_WEIGHT: f64 = 60.0;
/// Points granted per tracked habit
pub const HABIT_COUNT_WEIGHT: f64 = 5.0;
/// Divisor applied to the sum of current streaks before capping
pub const STREAK_SUM_DIVISOR: f64 = 10.0;
/// Cap on the streak contribution to the productivity score
pub const STREAK_BONUS_CAP: f64 = 40.0;

// ===== Finance Score Weights =====

/// Weight applied to the savings rate (net income over gross income)
pub const SAVINGS_RATE_WEIGHT: f64 = 60.0;
/// Points granted per savings goal
pub const GOAL_COUNT_WEIGHT: f64 = 8.0;
/// Flat bonus for having recorded at least one transaction
pub const ACTIVITY_BONUS: f64 = 20.0;

// ===== Fitness Score Weights =====

/// Points granted per logged workout
pub const WORKOUT_WEIGHT: f64 = 6.0;
/// Points granted per habit with a positive current streak
pub const ACTIVE_HABIT_WEIGHT: f64 = 5.0;

// ===== Mental Score Weights =====

/// Weight applied to the average mood value (1..=5 scale)
pub const MOOD_WEIGHT: f64 = 12.0;
/// Points granted per journal entry
pub const JOURNAL_WEIGHT: f64 = 3.0;
/// Points granted per gratitude entry
pub const GRATITUDE_WEIGHT: f64 = 4.0;

/// Number of most recent mood values averaged into the mental score.
/// Fixed crate-wide; callers never pick their own window.
pub const MOOD_WINDOW: usize = 30;

// ===== Validation Boundaries =====

/// Lowest valid mood value
pub const MIN_MOOD_VALUE: i64 = 1;
/// Highest valid mood value
pub const MAX_MOOD_VALUE: i64 = 5;

/// Maximum length for titles and names.
/// Prevents excessively long values from being stored.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum number of items in a single gratitude entry
pub const MAX_GRATITUDE_ITEMS: usize = 10;

// ===== Aggregates =====

/// Number of spending categories returned by the top-category ranking
pub const TOP_CATEGORY_LIMIT: usize = 5;

// ===== Coach Defaults =====

/// Default model served by the text-generation endpoint
pub const DEFAULT_COACH_MODEL: &str = "gemini-1.5-flash";

/// Default base URL of the text-generation endpoint
pub const DEFAULT_COACH_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Request timeout for coach calls in seconds
pub const COACH_TIMEOUT_SECS: u64 = 30;

/// Maximum number of prior chat turns sent with a coach request.
/// Older turns are dropped client-side to bound request size.
pub const MAX_CHAT_HISTORY: usize = 50;

// ===== Export =====

/// Format version written into export manifests
pub const EXPORT_FORMAT_VERSION: u32 = 1;
