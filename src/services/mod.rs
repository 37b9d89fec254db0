//! Services module
//!
//! Business logic services that coordinate between callers and repository.

pub mod coach;
pub mod export;
pub mod finance;
pub mod fitness;
pub mod habits;
pub mod insights;
pub mod journal;
pub mod tasks;

pub use coach::{ChatMessage, ChatRole, CoachConfig, CoachService};
pub use export::ExportService;
pub use finance::FinanceService;
pub use fitness::FitnessService;
pub use habits::HabitsService;
pub use insights::InsightsService;
pub use journal::JournalService;
pub use tasks::TasksService;
