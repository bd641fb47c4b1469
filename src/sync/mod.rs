//! Note synchronization.
//!
//! This module keeps the local notes directory consistent with the
//! remote collection:
//!
//! - **Status**: the persisted watermark (`last synced at` + note
//!   count) that separates bootstrap from incremental syncs
//! - **Reconcile**: pure classification of each note into upload,
//!   download, or unchanged
//! - **Engine**: the orchestration that applies a plan and advances
//!   the watermark
//!
//! # Example
//!
//! ```ignore
//! use flasky::sync::{StatusFile, Synchronizer};
//!
//! let status = StatusFile::in_dir(config.notes_dir.as_path());
//! let report = Synchronizer::new(&api, &local, &status).run().await?;
//! println!("{} up, {} down", report.uploaded(), report.downloaded());
//! ```

mod engine;
mod reconcile;
mod status;

pub use engine::{NoteOutcome, SyncOp, SyncReport, Synchronizer, SYNC_FETCH_LIMIT};
pub use reconcile::{reconcile, SyncPlan};
pub use status::{StatusFile, Watermark, STATUS_FILE_NAME};
