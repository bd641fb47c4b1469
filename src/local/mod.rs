//! Local note repository.
//!
//! Notes live as plain Markdown files in a single directory; title
//! and id are decoded from each filename at this boundary and carried
//! as structured [`LocalNote`] values from then on. A file's mtime is
//! its `changed_at`: downloads rewrite the mtime to the server's
//! timestamp so the freshly written file does not look locally edited
//! on the next cycle.

mod filename;

pub use filename::{decode_filename, encode_filename, NOTE_EXTENSION};

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::LocalNote;

/// Repository over the notes directory.
#[derive(Debug, Clone)]
pub struct LocalNotes {
    dir: PathBuf,
}

impl LocalNotes {
    /// Create a repository rooted at `dir`. The directory is not
    /// created until [`ensure_dir`](Self::ensure_dir) or a write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The notes directory this repository reads and writes.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the notes directory if it does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Full path a note with this title and id encodes to.
    #[must_use]
    pub fn note_path(&self, title: &str, id: i64) -> PathBuf {
        self.dir.join(encode_filename(title, id))
    }

    /// Enumerate all notes in the directory, unordered.
    ///
    /// Only files with the note extension are considered; anything
    /// else (the status file, editor droppings) is skipped. A note
    /// file whose name does not decode is fatal to the whole listing,
    /// so a stray `.md` file aborts the sync cycle before any remote
    /// mutation happens.
    ///
    /// # Errors
    ///
    /// Returns `Error::Filename` for an undecodable note filename, or
    /// an I/O error if the directory or a file cannot be read.
    pub fn list(&self) -> Result<Vec<LocalNote>> {
        let mut notes = Vec::new();

        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().and_then(|e| e.to_str()) != Some(NOTE_EXTENSION) {
                continue;
            }

            let name = entry.file_name();
            let name = name.to_string_lossy();
            let (title, id) = decode_filename(&name)?;

            let content = fs::read_to_string(&path)?;
            let modified = entry.metadata()?.modified()?;
            let changed_at = system_time_to_local(modified);

            debug!(id, title = %title, %changed_at, "listed local note");
            notes.push(LocalNote {
                id,
                title,
                content,
                changed_at,
                path,
            });
        }

        Ok(notes)
    }

    /// Write (or overwrite) a note file.
    ///
    /// When `mtime` is given, both access and modification times are
    /// set to it after the write, so a downloaded note carries the
    /// server's `changed_at` instead of the write time.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or its times
    /// cannot be set.
    pub fn write(
        &self,
        title: &str,
        id: i64,
        content: &str,
        mtime: Option<NaiveDateTime>,
    ) -> Result<PathBuf> {
        self.ensure_dir()?;
        let path = self.note_path(title, id);
        fs::write(&path, content)?;

        if let Some(ts) = mtime {
            let system_time = local_to_system_time(ts)?;
            let times = fs::FileTimes::new()
                .set_accessed(system_time)
                .set_modified(system_time);
            let file = OpenOptions::new().write(true).open(&path)?;
            file.set_times(times)?;
        }

        Ok(path)
    }

    /// Re-read a note's body from disk.
    ///
    /// Uploads call this right before sending so the freshest content
    /// goes out, even if the in-memory listing is a moment stale.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn read_content(&self, title: &str, id: i64) -> Result<String> {
        Ok(fs::read_to_string(self.note_path(title, id))?)
    }
}

/// File mtime to local wall-clock time, dropping the timezone.
fn system_time_to_local(time: SystemTime) -> NaiveDateTime {
    DateTime::<Local>::from(time).naive_local()
}

/// Local wall-clock time back to a `SystemTime` for `set_times`.
///
/// `earliest()` picks the first mapping when a DST fold makes the
/// local time ambiguous; a time skipped by a DST gap is unmappable.
fn local_to_system_time(time: NaiveDateTime) -> Result<SystemTime> {
    Local
        .from_local_datetime(&time)
        .earliest()
        .map(SystemTime::from)
        .ok_or_else(|| Error::Other(format!("local time {time} has no timezone mapping")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn repo() -> (TempDir, LocalNotes) {
        let dir = TempDir::new().unwrap();
        let notes = LocalNotes::new(dir.path());
        (dir, notes)
    }

    #[test]
    fn list_skips_non_note_files() {
        let (dir, notes) = repo();
        fs::write(dir.path().join("Groceries_ID:7.md"), "eggs").unwrap();
        fs::write(dir.path().join(".flasky-status"), "last_synced: x\n").unwrap();
        fs::write(dir.path().join("readme.txt"), "not a note").unwrap();

        let listed = notes.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, 7);
        assert_eq!(listed[0].title, "Groceries");
        assert_eq!(listed[0].content, "eggs");
    }

    #[test]
    fn list_fails_on_undecodable_note_file() {
        let (dir, notes) = repo();
        fs::write(dir.path().join("scratch.md"), "no id here").unwrap();

        assert!(matches!(notes.list(), Err(Error::Filename { .. })));
    }

    #[test]
    fn write_then_list_round_trips() {
        let (_dir, notes) = repo();
        notes.write("Travel Plans", 12, "pack light", None).unwrap();

        let listed = notes.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].title, "Travel Plans");
        assert_eq!(listed[0].id, 12);
        assert_eq!(listed[0].content, "pack light");
    }

    #[test]
    fn write_with_mtime_backdates_the_file() {
        let (_dir, notes) = repo();
        let stamp = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(8, 30, 0)
            .unwrap();

        notes.write("Old Note", 3, "body", Some(stamp)).unwrap();

        let listed = notes.list().unwrap();
        // Sub-second precision can be lost by the filesystem.
        let diff = (listed[0].changed_at - stamp).num_seconds().abs();
        assert!(diff <= 1, "mtime {} != {stamp}", listed[0].changed_at);
    }

    #[test]
    fn read_content_reads_the_encoded_path() {
        let (_dir, notes) = repo();
        notes.write("Recipe", 5, "flour, water", None).unwrap();
        assert_eq!(notes.read_content("Recipe", 5).unwrap(), "flour, water");
    }

    #[test]
    fn list_on_missing_directory_is_io_error() {
        let notes = LocalNotes::new("/nonexistent/flasky-notes");
        assert!(matches!(notes.list(), Err(Error::Io(_))));
    }
}
