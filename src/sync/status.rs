//! Sync watermark persistence.
//!
//! The watermark is a two-line text record in the notes directory:
//!
//! ```text
//! last_synced: 2024-01-02 15:04:05.000000
//! last_synced_note_count: 37
//! ```
//!
//! Its absence is the signal for a bootstrap sync. The write is a
//! plain overwrite, not atomic; a crash mid-write can tear the record
//! (documented limitation, surfaces later as `CorruptStatus`).

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;

use crate::error::{Error, Result};
use crate::model::{format_local_timestamp, parse_local_timestamp};

/// Name of the watermark file inside the notes directory.
pub const STATUS_FILE_NAME: &str = ".flasky-status";

const LAST_SYNCED_KEY: &str = "last_synced";
const NOTE_COUNT_KEY: &str = "last_synced_note_count";

/// The persisted record of the previous successful sync.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    /// Completion time of the previous successful sync.
    pub last_synced: NaiveDateTime,
    /// Remote note count observed at that sync.
    pub note_count: usize,
}

/// Reader/writer for the watermark file.
#[derive(Debug, Clone)]
pub struct StatusFile {
    path: PathBuf,
}

impl StatusFile {
    /// Status file inside the given notes directory.
    #[must_use]
    pub fn in_dir(notes_dir: &Path) -> Self {
        Self {
            path: notes_dir.join(STATUS_FILE_NAME),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the watermark.
    ///
    /// Returns `Ok(None)` when the file does not exist (first sync).
    ///
    /// # Errors
    ///
    /// Returns `Error::CorruptStatus` when the file exists but either
    /// field is missing or fails to parse.
    pub fn read(&self) -> Result<Option<Watermark>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;
        let mut last_synced = None;
        let mut note_count = None;

        for line in content.lines() {
            if let Some(value) = line.strip_prefix(&format!("{LAST_SYNCED_KEY}: ")) {
                last_synced = Some(parse_local_timestamp(value.trim()).map_err(|_| {
                    self.corrupt(format!("bad {LAST_SYNCED_KEY} value: {}", value.trim()))
                })?);
            } else if let Some(value) = line.strip_prefix(&format!("{NOTE_COUNT_KEY}: ")) {
                note_count = Some(value.trim().parse::<usize>().map_err(|_| {
                    self.corrupt(format!("bad {NOTE_COUNT_KEY} value: {}", value.trim()))
                })?);
            }
        }

        let last_synced =
            last_synced.ok_or_else(|| self.corrupt(format!("missing {LAST_SYNCED_KEY}")))?;
        let note_count =
            note_count.ok_or_else(|| self.corrupt(format!("missing {NOTE_COUNT_KEY}")))?;

        Ok(Some(Watermark {
            last_synced,
            note_count,
        }))
    }

    /// Overwrite the watermark with a new record.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write(&self, watermark: &Watermark) -> Result<()> {
        let content = format!(
            "{LAST_SYNCED_KEY}: {}\n{NOTE_COUNT_KEY}: {}\n",
            format_local_timestamp(watermark.last_synced),
            watermark.note_count
        );
        fs::write(&self.path, content)?;
        Ok(())
    }

    fn corrupt(&self, detail: String) -> Error {
        Error::CorruptStatus {
            path: self.path.clone(),
            detail,
        }
    }
}
