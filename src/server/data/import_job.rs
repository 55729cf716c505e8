use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ConnectionTrait, DbErr, EntityTrait, IntoActiveModel,
    QueryOrder,
};

use crate::server::model::import::{BatchResult, ImportProgress, ImportStage};

pub struct ImportJobRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ImportJobRepository<'a, C> {
    /// Creates a new instance of [`ImportJobRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a pending import job with all counters at zero
    pub async fn create(&self) -> Result<entity::import_job::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let job = entity::import_job::ActiveModel {
            status: ActiveValue::Set(ImportStage::Pending.as_str().to_string()),
            progress: ActiveValue::Set(0),
            processed_count: ActiveValue::Set(0),
            total_count: ActiveValue::Set(0),
            imported_count: ActiveValue::Set(0),
            skipped_count: ActiveValue::Set(0),
            discarded_count: ActiveValue::Set(0),
            error: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            completed_at: ActiveValue::Set(None),
            ..Default::default()
        };

        job.insert(self.db).await
    }

    pub async fn get_by_id(&self, job_id: i32) -> Result<Option<entity::import_job::Model>, DbErr> {
        entity::prelude::ImportJob::find_by_id(job_id)
            .one(self.db)
            .await
    }

    /// Fetches the most recently created import job, if any
    pub async fn get_latest(&self) -> Result<Option<entity::import_job::Model>, DbErr> {
        entity::prelude::ImportJob::find()
            .order_by_desc(entity::import_job::Column::Id)
            .one(self.db)
            .await
    }

    /// Records a progress snapshot
    ///
    /// Returns `Ok(None)` if the job does not exist.
    pub async fn update_progress(
        &self,
        job_id: i32,
        progress: ImportProgress,
    ) -> Result<Option<entity::import_job::Model>, DbErr> {
        let Some(job) = self.get_by_id(job_id).await? else {
            return Ok(None);
        };

        let mut job_am = job.into_active_model();
        job_am.status = ActiveValue::Set(progress.stage.as_str().to_string());
        job_am.progress = ActiveValue::Set(progress.percentage);
        job_am.processed_count = ActiveValue::Set(to_count(progress.processed));
        job_am.total_count = ActiveValue::Set(to_count(progress.total));
        job_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        Ok(Some(job_am.update(self.db).await?))
    }

    /// Marks the job as finished with the batch's final counters
    ///
    /// A failed batch keeps its last reported progress and stores the error, a successful one
    /// is set to 100%.
    ///
    /// Returns `Ok(None)` if the job does not exist.
    pub async fn finish(
        &self,
        job_id: i32,
        result: &BatchResult,
    ) -> Result<Option<entity::import_job::Model>, DbErr> {
        let Some(job) = self.get_by_id(job_id).await? else {
            return Ok(None);
        };

        let now = Utc::now().naive_utc();
        let mut job_am = job.into_active_model();
        let stage = if result.failed {
            ImportStage::Failed
        } else {
            job_am.progress = ActiveValue::Set(100);
            ImportStage::Complete
        };
        job_am.status = ActiveValue::Set(stage.as_str().to_string());
        job_am.processed_count = ActiveValue::Set(to_count(result.processed_count()));
        job_am.imported_count = ActiveValue::Set(to_count(result.imported_count));
        job_am.skipped_count = ActiveValue::Set(to_count(result.skipped_count));
        job_am.discarded_count = ActiveValue::Set(to_count(result.discarded_count));
        job_am.error = ActiveValue::Set(result.error.clone());
        job_am.updated_at = ActiveValue::Set(now);
        job_am.completed_at = ActiveValue::Set(Some(now));

        Ok(Some(job_am.update(self.db).await?))
    }
}

fn to_count(value: u64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}
