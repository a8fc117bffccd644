//! CSV recipient list

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use tracing::debug;

use crate::domain::campaigns::{LoadError, RecipientRecord, RecipientSource};

/// Reads recipients from a CSV file with a header row
#[derive(Debug, Clone)]
pub struct CsvRecipientSource {
    path: PathBuf,
}

impl CsvRecipientSource {
    /// Create a source reading from `path`
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RecipientSource for CsvRecipientSource {
    fn load_recipients(&self) -> Result<Vec<RecipientRecord>, LoadError> {
        if !self.path.is_file() {
            return Err(LoadError::NotFound(self.path.clone()));
        }

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_path(&self.path)?;

        let headers = reader.headers()?.clone();
        let mut recipients: Vec<RecipientRecord> = Vec::new();

        for row in reader.records() {
            let row = row?;

            recipients.push(
                headers
                    .iter()
                    .zip(row.iter())
                    .map(|(key, value)| (key.trim_start_matches('\u{feff}'), value))
                    .collect(),
            );
        }

        debug!("read {} rows from {}", recipients.len(), self.path.display());

        Ok(recipients)
    }
}
