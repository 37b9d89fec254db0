//! Application wiring
//!
//! The Hub is the crate's composition root: it opens the database,
//! runs migrations and wires every service. A UI shell holds exactly
//! one Hub per data directory.

use crate::database::{create_pool, Repository};
use crate::error::Result;
use crate::services::{
    CoachConfig, CoachService, ExportService, FinanceService, FitnessService, HabitsService,
    InsightsService, JournalService, TasksService,
};
use std::path::Path;

/// All services wired over one shared repository
#[derive(Clone)]
pub struct Hub {
    pub tasks: TasksService,
    pub habits: HabitsService,
    pub finance: FinanceService,
    pub fitness: FitnessService,
    pub journal: JournalService,
    pub insights: InsightsService,
    pub coach: CoachService,
    pub export: ExportService,
}

impl Hub {
    /// Open the hub in a data directory, creating it if needed.
    pub async fn open(data_dir: &Path, coach_config: CoachConfig) -> Result<Hub> {
        tracing::info!("Opening hub at {:?}", data_dir);

        std::fs::create_dir_all(data_dir)?;
        std::fs::create_dir_all(data_dir.join("exports"))?;

        let pool = create_pool(&data_dir.join("hub.sqlite")).await?;
        let repo = Repository::new(pool);

        let hub = Hub {
            tasks: TasksService::new(repo.clone()),
            habits: HabitsService::new(repo.clone()),
            finance: FinanceService::new(repo.clone()),
            fitness: FitnessService::new(repo.clone()),
            journal: JournalService::new(repo.clone()),
            insights: InsightsService::new(repo.clone()),
            coach: CoachService::new(coach_config)?,
            export: ExportService::new(repo, data_dir.join("exports")),
        };

        tracing::info!("Hub opened successfully");

        Ok(hub)
    }
}
