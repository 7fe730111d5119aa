//! Whole-store JSON persistence.
//!
//! A saved store is a single JSON object mapping each record id to the
//! record itself:
//!
//! ```json
//! {
//!   "3f0c…": { "id": "3f0c…", "name": "Mark", "level": 1, "experience": 100,
//!              "formula": { "kind": "linear" } }
//! }
//! ```
//!
//! Saving overwrites the target file in place and loading replaces the store's
//! contents wholesale. Neither step is atomic; a crash mid-write leaves a
//! truncated file behind.

use std::collections::HashMap;
use std::path::Path;
use std::time::Instant;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::error::{ExpError, Result};
use crate::store::{Record, Store};

impl<R> Store<R>
where
    R: Record + Serialize + DeserializeOwned,
    R::Id: Serialize + DeserializeOwned,
{
    /// Write every record to `path` as JSON, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::Serialization`] if encoding fails, or
    /// [`ExpError::Io`] if the file cannot be written.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let start = Instant::now();
        let path = path.as_ref();

        let json = if self.config.pretty {
            serde_json::to_vec_pretty(&self.records)
        } else {
            serde_json::to_vec(&self.records)
        }
        .map_err(|e| ExpError::Serialization(e.to_string()))?;

        std::fs::write(path, &json)?;

        info!(
            path = %path.display(),
            records = self.records.len(),
            bytes = json.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Saved store"
        );
        Ok(())
    }

    /// Replace the store's contents with the records saved at `path`.
    ///
    /// Records are keyed by their own id; a file key that disagrees with the
    /// record inside it is logged and ignored. On error the store is left
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ExpError::Io`] if the file is missing or unreadable, or if
    /// its contents are not a valid store. Every decode failure, including an
    /// empty or truncated file, is reported as
    /// [`std::io::ErrorKind::InvalidData`]. Returns
    /// [`ExpError::DuplicateKey`] if two records in the file share an id.
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let start = Instant::now();
        let path = path.as_ref();

        let data = std::fs::read(path)?;
        let loaded: HashMap<R::Id, R> = serde_json::from_slice(&data)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;

        let mut records = HashMap::with_capacity(loaded.len());
        for (key, record) in loaded {
            let id = record.key().clone();
            if key != id {
                warn!(key = %key, id = %id, "Saved key does not match record id, re-keying");
            }
            if records.insert(id.clone(), record).is_some() {
                warn!(path = %path.display(), id = %id, "Rejected store file with duplicate record id");
                return Err(ExpError::DuplicateKey(id.to_string()));
            }
        }
        self.records = records;

        info!(
            path = %path.display(),
            records = self.records.len(),
            bytes = data.len(),
            elapsed_us = start.elapsed().as_micros(),
            "Loaded store"
        );
        Ok(())
    }

    /// Save to the configured file name in the working directory.
    ///
    /// # Errors
    ///
    /// See [`Store::save_to_file`].
    pub fn save(&self) -> Result<()> {
        self.save_to_file(&self.config.file_name)
    }

    /// Load from the configured file name in the working directory.
    ///
    /// # Errors
    ///
    /// See [`Store::load_from_file`].
    pub fn load(&mut self) -> Result<()> {
        let file_name = self.config.file_name.clone();
        self.load_from_file(file_name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
