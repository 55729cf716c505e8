use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// State of a background donation import job
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ImportJobDto {
    pub id: i32,
    /// Current stage, e.g. `processing` or `complete`
    pub status: String,
    /// Completion percentage from 0 to 100
    pub progress: i32,
    pub processed_count: i32,
    pub total_count: i32,
    pub imported_count: i32,
    pub skipped_count: i32,
    pub discarded_count: i32,
    pub error: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub completed_at: Option<NaiveDateTime>,
}

impl From<entity::import_job::Model> for ImportJobDto {
    fn from(job: entity::import_job::Model) -> Self {
        Self {
            id: job.id,
            status: job.status,
            progress: job.progress,
            processed_count: job.processed_count,
            total_count: job.total_count,
            imported_count: job.imported_count,
            skipped_count: job.skipped_count,
            discarded_count: job.discarded_count,
            error: job.error,
            created_at: job.created_at,
            updated_at: job.updated_at,
            completed_at: job.completed_at,
        }
    }
}
