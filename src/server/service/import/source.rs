//! Raw record sources for the import pipeline.

use std::{
    io::{Cursor, Read},
    path::PathBuf,
};

use async_trait::async_trait;
use csv::StringRecord;

use crate::server::{error::import::ImportError, service::import::normalize::RawRecord};

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Iterator over the raw records of a source in file order.
pub type RecordIter<'a> = Box<dyn Iterator<Item = Result<RawRecord, ImportError>> + Send + 'a>;

/// A source of raw donation records.
///
/// `prepare` runs once before any record is read and is where a source fetches or checks its
/// data. `records` may be called more than once and restarts from the first record each time.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Makes the source ready to be read.
    ///
    /// # Returns
    /// - `Ok(())` - Records can be read
    /// - `Err(ImportError::SourceUnavailable)` - The data could not be fetched or opened
    async fn prepare(&mut self) -> Result<(), ImportError>;

    /// Returns an iterator over every record, headers applied.
    fn records(&self) -> Result<RecordIter<'_>, ImportError>;
}

/// Reads records from a CSV file on disk.
///
/// The file is loaded asynchronously by `prepare`, so iterating records does no blocking I/O
/// on the runtime.
pub struct CsvFileSource {
    path: PathBuf,
    bytes: Option<Vec<u8>>,
}

impl CsvFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            bytes: None,
        }
    }

    fn unavailable(&self, reason: impl std::fmt::Display) -> ImportError {
        ImportError::SourceUnavailable(format!("{}: {}", self.path.display(), reason))
    }
}

#[async_trait]
impl RecordSource for CsvFileSource {
    async fn prepare(&mut self) -> Result<(), ImportError> {
        let metadata = tokio::fs::metadata(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;

        if !metadata.is_file() {
            return Err(self.unavailable("not a file"));
        }

        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| self.unavailable(e))?;
        tracing::debug!(path = %self.path.display(), "Loaded {} bytes of raw data", bytes.len());
        self.bytes = Some(bytes);

        Ok(())
    }

    fn records(&self) -> Result<RecordIter<'_>, ImportError> {
        let bytes = self
            .bytes
            .as_deref()
            .ok_or_else(|| self.unavailable("source was not prepared"))?;

        read_csv(Cursor::new(bytes))
    }
}

/// Reads records from CSV data held in memory, such as an uploaded file.
pub struct CsvBytesSource {
    bytes: Vec<u8>,
}

impl CsvBytesSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl RecordSource for CsvBytesSource {
    async fn prepare(&mut self) -> Result<(), ImportError> {
        Ok(())
    }

    fn records(&self) -> Result<RecordIter<'_>, ImportError> {
        read_csv(Cursor::new(self.bytes.as_slice()))
    }
}

/// Parses CSV with a header row, stripping a byte-order mark from the first header.
fn read_csv<'a, R: Read + Send + 'a>(input: R) -> Result<RecordIter<'a>, ImportError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(input);

    let headers: StringRecord = reader
        .headers()?
        .iter()
        .map(|header| header.trim_start_matches(BYTE_ORDER_MARK))
        .collect();
    reader.set_headers(headers);

    Ok(Box::new(
        reader
            .into_deserialize::<RawRecord>()
            .map(|record| record.map_err(ImportError::from)),
    ))
}
