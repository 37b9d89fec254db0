//! Export service
//!
//! Bulk read of every table for one user, serialized as a single JSON
//! document and packaged as a ZIP archive with a manifest and checksums.
//! Read errors propagate: a partial export is worse than a failed one.

use crate::config;
use crate::database::{
    GratitudeEntry, Habit, JournalEntry, MoodLog, Repository, SavingsGoal, Task, Transaction,
    Workout,
};
use crate::error::{AppError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;
use tokio::fs;
use zip::write::FileOptions;
use zip::ZipWriter;

/// The complete per-user data document
#[derive(Debug, Serialize, Deserialize)]
pub struct HubExport {
    pub format_version: u32,
    pub app_version: String,
    pub exported_at: DateTime<Utc>,
    pub user_id: String,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    pub transactions: Vec<Transaction>,
    pub savings_goals: Vec<SavingsGoal>,
    pub workouts: Vec<Workout>,
    pub journal_entries: Vec<JournalEntry>,
    pub mood_logs: Vec<MoodLog>,
    pub gratitude_entries: Vec<GratitudeEntry>,
}

/// Export archive manifest
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportManifest {
    pub format_version: u32,
    pub timestamp: String,
    pub files: Vec<FileEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FileEntry {
    pub path: String,
    pub size: u64,
    pub checksum: String,
}

/// Export service
#[derive(Clone)]
pub struct ExportService {
    repo: Repository,
    exports_dir: PathBuf,
}

impl ExportService {
    pub fn new(repo: Repository, exports_dir: PathBuf) -> Self {
        Self { repo, exports_dir }
    }

    /// Gather every table for a user into one document.
    pub async fn export_document(&self, user_id: &str) -> Result<HubExport> {
        tracing::info!("Collecting export document for user {}", user_id);

        let today = Utc::now().date_naive();

        let habits: Vec<Habit> = self
            .repo
            .list_habit_rows(user_id)
            .await?
            .into_iter()
            .map(|row| row.into_habit(today))
            .collect();

        let gratitude_entries: Vec<GratitudeEntry> = self
            .repo
            .list_gratitude_rows(user_id)
            .await?
            .into_iter()
            .map(|row| row.into_entry())
            .collect();

        Ok(HubExport {
            format_version: config::EXPORT_FORMAT_VERSION,
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            exported_at: Utc::now(),
            user_id: user_id.to_string(),
            tasks: self.repo.list_tasks(user_id).await?,
            habits,
            transactions: self.repo.list_transactions(user_id).await?,
            savings_goals: self.repo.list_goals(user_id).await?,
            workouts: self.repo.list_workouts(user_id).await?,
            journal_entries: self.repo.list_journal_entries(user_id).await?,
            mood_logs: self.repo.list_mood_logs(user_id, i64::MAX).await?,
            gratitude_entries,
        })
    }

    /// Write the export as a ZIP archive and return its path.
    pub async fn export_archive(&self, user_id: &str) -> Result<PathBuf> {
        let document = self.export_document(user_id).await?;
        let document_json = serde_json::to_string_pretty(&document)?;

        fs::create_dir_all(&self.exports_dir).await?;

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
        let archive_path = self.exports_dir.join(format!("export_{}.zip", timestamp));

        let mut manifest = ExportManifest {
            format_version: config::EXPORT_FORMAT_VERSION,
            timestamp: Utc::now().to_rfc3339(),
            files: Vec::new(),
        };

        let file = std::fs::File::create(&archive_path)?;
        let mut zip = ZipWriter::new(file);
        let options =
            FileOptions::<()>::default().compression_method(zip::CompressionMethod::Deflated);

        zip.start_file("export.json", options)?;
        std::io::Write::write_all(&mut zip, document_json.as_bytes())?;

        manifest.files.push(FileEntry {
            path: "export.json".to_string(),
            size: document_json.len() as u64,
            checksum: calculate_checksum(document_json.as_bytes()),
        });

        let manifest_json = serde_json::to_string_pretty(&manifest)?;
        zip.start_file("manifest.json", options)?;
        std::io::Write::write_all(&mut zip, manifest_json.as_bytes())?;

        zip.finish()?;

        let size = fs::metadata(&archive_path).await?.len();
        if size == 0 {
            return Err(AppError::Export("Archive came out empty".to_string()));
        }

        tracing::info!("Export created: {:?} ({} bytes)", archive_path, size);

        Ok(archive_path)
    }
}

fn calculate_checksum(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::{initialize_database, Repository};
    use crate::services::{JournalService, TasksService};
    use sqlx::sqlite::SqlitePoolOptions;
    use tempfile::TempDir;

    async fn create_test_service() -> (ExportService, Repository, TempDir) {
        let temp_dir = TempDir::new().unwrap();

        let pool = SqlitePoolOptions::new()
            .connect("sqlite::memory:")
            .await
            .unwrap();

        initialize_database(&pool).await.unwrap();

        let repo = Repository::new(pool);
        let service = ExportService::new(repo.clone(), temp_dir.path().join("exports"));

        (service, repo, temp_dir)
    }

    #[tokio::test]
    async fn test_export_document_round_trips() {
        let (service, repo, _temp) = create_test_service().await;
        let tasks = TasksService::new(repo.clone());
        let journal = JournalService::new(repo);

        tasks
            .create_task("u1", "Pack bags".to_string(), None)
            .await
            .unwrap();
        journal
            .add_gratitude("u1", vec!["sunshine".to_string()])
            .await
            .unwrap();

        let document = service.export_document("u1").await.unwrap();
        assert_eq!(document.tasks.len(), 1);
        assert_eq!(document.gratitude_entries.len(), 1);

        let json = serde_json::to_string(&document).unwrap();
        let back: HubExport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.tasks.len(), 1);
        assert_eq!(back.user_id, "u1");
    }

    #[tokio::test]
    async fn test_export_is_user_scoped() {
        let (service, repo, _temp) = create_test_service().await;
        let tasks = TasksService::new(repo);

        tasks
            .create_task("u1", "Mine".to_string(), None)
            .await
            .unwrap();
        tasks
            .create_task("u2", "Theirs".to_string(), None)
            .await
            .unwrap();

        let document = service.export_document("u1").await.unwrap();
        assert_eq!(document.tasks.len(), 1);
        assert_eq!(document.tasks[0].title, "Mine");
    }

    #[tokio::test]
    async fn test_archive_checksums_match_contents() {
        let (service, repo, _temp) = create_test_service().await;
        let tasks = TasksService::new(repo);

        tasks
            .create_task("u1", "Verify me".to_string(), None)
            .await
            .unwrap();

        let archive_path = service.export_archive("u1").await.unwrap();
        assert!(archive_path.exists());

        let data = std::fs::File::open(&archive_path).unwrap();
        let mut archive = zip::ZipArchive::new(data).unwrap();

        let manifest: ExportManifest = {
            let manifest_file = archive.by_name("manifest.json").unwrap();
            serde_json::from_reader(manifest_file).unwrap()
        };

        assert_eq!(manifest.format_version, config::EXPORT_FORMAT_VERSION);
        assert_eq!(manifest.files.len(), 1);

        let contents = {
            let mut file = archive.by_name("export.json").unwrap();
            let mut contents = Vec::new();
            std::io::Read::read_to_end(&mut file, &mut contents).unwrap();
            contents
        };

        assert_eq!(manifest.files[0].checksum, calculate_checksum(&contents));
        assert_eq!(manifest.files[0].size, contents.len() as u64);
    }

    #[tokio::test]
    async fn test_export_of_empty_user_succeeds() {
        let (service, _repo, _temp) = create_test_service().await;

        let document = service.export_document("nobody").await.unwrap();

        assert!(document.tasks.is_empty());
        assert!(document.habits.is_empty());
    }
}
