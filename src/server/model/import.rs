//! Result and stage types for the donation import pipeline.

use std::{fmt, str::FromStr};

/// Stage of a donation import, persisted as the job's status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImportStage {
    Pending,
    Downloading,
    Seeding,
    Counting,
    Processing,
    Finalizing,
    Complete,
    Failed,
}

impl ImportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Downloading => "downloading",
            Self::Seeding => "seeding",
            Self::Counting => "counting",
            Self::Processing => "processing",
            Self::Finalizing => "finalizing",
            Self::Complete => "complete",
            Self::Failed => "failed",
        }
    }

    /// Whether the import has stopped, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Failed)
    }
}

impl fmt::Display for ImportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ImportStage {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let stage = match value {
            "pending" => Self::Pending,
            "downloading" => Self::Downloading,
            "seeding" => Self::Seeding,
            "counting" => Self::Counting,
            "processing" => Self::Processing,
            "finalizing" => Self::Finalizing,
            "complete" => Self::Complete,
            "failed" => Self::Failed,
            other => return Err(format!("unknown import stage {other:?}")),
        };

        Ok(stage)
    }
}

/// What happened to a single raw record.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new donation was written.
    Imported,
    /// A donation with the same `ECRef` already exists.
    Skipped,
    /// The record is not a relevant donation and was ignored.
    Discarded,
}

/// Counters and final status of one import batch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub imported_count: u64,
    pub skipped_count: u64,
    pub discarded_count: u64,
    /// True when the batch stopped early on a fatal error.
    pub failed: bool,
    pub error: Option<String>,
}

impl BatchResult {
    /// Number of records looked at, whatever their outcome.
    pub fn processed_count(&self) -> u64 {
        self.imported_count + self.skipped_count + self.discarded_count
    }

    pub fn record(&mut self, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Imported => self.imported_count += 1,
            RecordOutcome::Skipped => self.skipped_count += 1,
            RecordOutcome::Discarded => self.discarded_count += 1,
        }
    }
}

/// Progress snapshot handed to a progress sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImportProgress {
    pub stage: ImportStage,
    /// Completion percentage from 0 to 100.
    pub percentage: i32,
    pub processed: u64,
    pub total: u64,
}
