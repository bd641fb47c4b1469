//! Sync cycle orchestration.
//!
//! One [`Synchronizer::run`] call is one cycle:
//!
//! 1. Fetch the remote collection.
//! 2. No watermark → bootstrap: materialize every remote note
//!    locally and write the first watermark.
//! 3. Watermark present → incremental: list local notes, reconcile,
//!    apply uploads and downloads, write a new watermark.
//!
//! Failures while reading local state, the watermark, or the remote
//! listing abort the cycle before any mutation; the watermark stays
//! untouched. Failures on an individual note's remote call are
//! recorded in the [`SyncReport`] and the batch continues. The
//! watermark is written once at the end either way, so a crash
//! mid-cycle leaves the previous watermark in place and the next run
//! simply reconsiders the same notes; re-applying an upload or
//! download writes the same data again.
//!
//! Nothing locks the notes directory; two concurrent runs can
//! interleave writes.

use chrono::Local;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::local::LocalNotes;
use crate::model::{LocalNote, RemoteNote};
use crate::remote::NoteService;
use crate::sync::reconcile::reconcile;
use crate::sync::status::{StatusFile, Watermark};

/// Upper bound passed to `get-notes` during a sync cycle.
pub const SYNC_FETCH_LIMIT: usize = 10_000;

/// Direction a note moved in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncOp {
    Upload,
    Download,
}

/// Outcome of one note-level operation.
#[derive(Debug, Clone, Serialize)]
pub struct NoteOutcome {
    pub id: i64,
    pub title: String,
    pub op: SyncOp,
    /// Server-supplied reason when the operation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl NoteOutcome {
    fn ok(id: i64, title: &str, op: SyncOp) -> Self {
        Self {
            id,
            title: title.to_string(),
            op,
            error: None,
        }
    }

    fn failed(id: i64, title: &str, op: SyncOp, reason: String) -> Self {
        Self {
            id,
            title: title.to_string(),
            op,
            error: Some(reason),
        }
    }
}

/// Summary of a completed sync cycle.
#[derive(Debug, Clone, Serialize)]
pub struct SyncReport {
    /// True when this cycle was the first-ever (bootstrap) sync.
    pub bootstrap: bool,
    /// Remote notes fetched at the start of the cycle.
    pub remote_count: usize,
    /// Local notes listed (0 for bootstrap).
    pub local_count: usize,
    /// Per-note outcomes, uploads first, in application order.
    pub outcomes: Vec<NoteOutcome>,
}

impl SyncReport {
    /// Notes successfully uploaded.
    #[must_use]
    pub fn uploaded(&self) -> usize {
        self.count(SyncOp::Upload, false)
    }

    /// Notes successfully downloaded (bootstrap writes included).
    #[must_use]
    pub fn downloaded(&self) -> usize {
        self.count(SyncOp::Download, false)
    }

    /// Note-level failures in this cycle.
    #[must_use]
    pub fn failures(&self) -> Vec<&NoteOutcome> {
        self.outcomes.iter().filter(|o| o.error.is_some()).collect()
    }

    fn count(&self, op: SyncOp, failed: bool) -> usize {
        self.outcomes
            .iter()
            .filter(|o| o.op == op && o.error.is_some() == failed)
            .count()
    }
}

/// Orchestrates one sync cycle over the three collaborators.
pub struct Synchronizer<'a, R: NoteService> {
    api: &'a R,
    local: &'a LocalNotes,
    status: &'a StatusFile,
}

impl<'a, R: NoteService> Synchronizer<'a, R> {
    pub fn new(api: &'a R, local: &'a LocalNotes, status: &'a StatusFile) -> Self {
        Self { api, local, status }
    }

    /// Run one sync cycle.
    ///
    /// # Errors
    ///
    /// Returns an error on any setup failure (remote listing, local
    /// listing, watermark read) or on a local I/O failure while
    /// applying; per-note remote failures are recorded in the report
    /// instead.
    pub async fn run(&self) -> Result<SyncReport> {
        self.local.ensure_dir()?;
        let watermark = self.status.read()?;
        let remotes = self.api.fetch_all(Some(SYNC_FETCH_LIMIT)).await?;

        match watermark {
            None => {
                info!(remote_count = remotes.len(), "no watermark, bootstrapping");
                self.bootstrap(&remotes)
            }
            Some(watermark) => self.incremental(&remotes, watermark).await,
        }
    }

    /// First sync: download everything, then write the watermark.
    ///
    /// Bulk-seeded files keep their write-time mtime; only later
    /// incremental downloads pin mtime to the server timestamp.
    fn bootstrap(&self, remotes: &[RemoteNote]) -> Result<SyncReport> {
        let mut outcomes = Vec::with_capacity(remotes.len());
        for note in remotes {
            self.local.write(&note.title, note.id, &note.content, None)?;
            debug!(id = note.id, title = %note.title, "seeded local note");
            outcomes.push(NoteOutcome::ok(note.id, &note.title, SyncOp::Download));
        }

        self.status.write(&Watermark {
            last_synced: Local::now().naive_local(),
            note_count: remotes.len(),
        })?;

        Ok(SyncReport {
            bootstrap: true,
            remote_count: remotes.len(),
            local_count: 0,
            outcomes,
        })
    }

    /// Incremental sync: reconcile, apply, advance the watermark.
    async fn incremental(&self, remotes: &[RemoteNote], watermark: Watermark) -> Result<SyncReport> {
        let locals = self.local.list()?;
        let plan = reconcile(&locals, remotes, watermark.last_synced);
        info!(
            local_count = locals.len(),
            remote_count = remotes.len(),
            uploads = plan.uploads.len(),
            downloads = plan.downloads.len(),
            "reconciled"
        );

        let mut outcomes = Vec::with_capacity(plan.uploads.len() + plan.downloads.len());

        for note in &plan.uploads {
            match self.upload(note).await {
                Ok(()) => outcomes.push(NoteOutcome::ok(note.id, &note.title, SyncOp::Upload)),
                Err(Error::Remote { reason, .. }) => {
                    warn!(id = note.id, title = %note.title, %reason, "upload failed");
                    outcomes.push(NoteOutcome::failed(
                        note.id,
                        &note.title,
                        SyncOp::Upload,
                        reason,
                    ));
                }
                Err(other) => return Err(other),
            }
        }

        for note in &plan.downloads {
            match self.download(note).await {
                Ok(()) => outcomes.push(NoteOutcome::ok(note.id, &note.title, SyncOp::Download)),
                Err(Error::Remote { reason, .. }) => {
                    warn!(id = note.id, title = %note.title, %reason, "download failed");
                    outcomes.push(NoteOutcome::failed(
                        note.id,
                        &note.title,
                        SyncOp::Download,
                        reason,
                    ));
                }
                Err(other) => return Err(other),
            }
        }

        // Count from the fetch at cycle start: uploads that created
        // notes remotely are not re-counted (known staleness).
        self.status.write(&Watermark {
            last_synced: Local::now().naive_local(),
            note_count: remotes.len(),
        })?;

        Ok(SyncReport {
            bootstrap: false,
            remote_count: remotes.len(),
            local_count: locals.len(),
            outcomes,
        })
    }

    /// Push one local note, re-reading the file body first.
    ///
    /// Always `edit-note`, even for ids the server has never seen;
    /// whether such notes need `add-note` instead is an open question
    /// with the server contract.
    async fn upload(&self, note: &LocalNote) -> Result<()> {
        let content = self.local.read_content(&note.title, note.id)?;
        self.api.update(note.id, &note.title, &content).await
    }

    /// Pull one remote note, pinning the file mtime to the server's
    /// change time so the file does not look locally edited next run.
    async fn download(&self, note: &RemoteNote) -> Result<()> {
        let fresh = self.api.fetch_one(note.id).await?;
        self.local
            .write(&note.title, note.id, &fresh.content, Some(note.changed_at))?;
        Ok(())
    }
}
