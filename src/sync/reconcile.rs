//! Pure reconciliation of local notes against the remote collection.
//!
//! Notes match by id only. For a matched pair the watermark gates
//! both directions:
//!
//! - upload iff the local edit is newer than the remote note *and*
//!   the remote note predates the previous sync (the remote side has
//!   not moved since we last looked);
//! - download iff the remote edit is newer than the local file *and*
//!   newer than the previous sync.
//!
//! When both sides changed after the watermark, neither condition
//! holds and the note is left alone on both sides. That silent no-op
//! is the tool's conflict behavior; it is intentional here in the
//! sense that nothing may clobber either edit, and it is not merged
//! or reported beyond the note appearing in neither set.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::model::{LocalNote, RemoteNote};

/// Classification result: what to push and what to pull.
///
/// A note in neither list is unchanged for this cycle.
#[derive(Debug, Default)]
pub struct SyncPlan<'a> {
    pub uploads: Vec<&'a LocalNote>,
    pub downloads: Vec<&'a RemoteNote>,
}

impl SyncPlan<'_> {
    /// True when there is nothing to apply.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty() && self.downloads.is_empty()
    }
}

/// Classify every note into upload, download, or unchanged.
///
/// Pure function of its inputs; both sides are indexed by id before
/// comparison, so the scan is linear in the total number of notes.
#[must_use]
pub fn reconcile<'a>(
    locals: &'a [LocalNote],
    remotes: &'a [RemoteNote],
    last_synced: NaiveDateTime,
) -> SyncPlan<'a> {
    let remote_by_id: HashMap<i64, &RemoteNote> = remotes.iter().map(|n| (n.id, n)).collect();
    let local_by_id: HashMap<i64, &LocalNote> = locals.iter().map(|n| (n.id, n)).collect();

    let mut plan = SyncPlan::default();

    for local in locals {
        match remote_by_id.get(&local.id) {
            None => plan.uploads.push(local),
            Some(remote) => {
                if local.changed_at > remote.changed_at && last_synced > remote.changed_at {
                    plan.uploads.push(local);
                }
            }
        }
    }

    for remote in remotes {
        match local_by_id.get(&remote.id) {
            None => plan.downloads.push(remote),
            Some(local) => {
                if remote.changed_at > local.changed_at && remote.changed_at > last_synced {
                    plan.downloads.push(remote);
                }
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;

    fn day(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn local(id: i64, changed: NaiveDateTime) -> LocalNote {
        LocalNote {
            id,
            title: format!("local {id}"),
            content: String::new(),
            changed_at: changed,
            path: PathBuf::from(format!("local_{id}_ID:{id}.md")),
        }
    }

    fn remote(id: i64, changed: NaiveDateTime) -> RemoteNote {
        RemoteNote {
            id,
            title: format!("remote {id}"),
            content: String::new(),
            category: None,
            changed_at: changed,
        }
    }

    fn upload_ids(plan: &SyncPlan<'_>) -> Vec<i64> {
        plan.uploads.iter().map(|n| n.id).collect()
    }

    fn download_ids(plan: &SyncPlan<'_>) -> Vec<i64> {
        plan.downloads.iter().map(|n| n.id).collect()
    }

    #[test]
    fn new_local_note_is_always_uploaded() {
        let locals = vec![local(1, day(1))];
        let plan = reconcile(&locals, &[], day(28));
        assert_eq!(upload_ids(&plan), vec![1]);
        assert!(plan.downloads.is_empty());
    }

    #[test]
    fn new_remote_note_is_always_downloaded() {
        let remotes = vec![remote(2, day(1))];
        let plan = reconcile(&[], &remotes, day(28));
        assert_eq!(download_ids(&plan), vec![2]);
        assert!(plan.uploads.is_empty());
    }

    #[test]
    fn local_edit_after_sync_uploads_when_remote_is_stale() {
        // Remote last changed before the previous sync; local edited after.
        let locals = vec![local(5, day(10))];
        let remotes = vec![remote(5, day(2))];
        let plan = reconcile(&locals, &remotes, day(5));
        assert_eq!(upload_ids(&plan), vec![5]);
        assert!(plan.downloads.is_empty());
    }

    #[test]
    fn remote_edit_after_sync_downloads_when_local_is_stale() {
        let locals = vec![local(5, day(2))];
        let remotes = vec![remote(5, day(10))];
        let plan = reconcile(&locals, &remotes, day(5));
        assert!(plan.uploads.is_empty());
        assert_eq!(download_ids(&plan), vec![5]);
    }

    #[test]
    fn newer_local_but_remote_changed_since_sync_is_a_no_op() {
        // Exact inequality regression: local day 3 beats remote day 2,
        // but the watermark (day 1) does not beat the remote change,
        // so the upload condition fails and nothing downloads either.
        let locals = vec![local(5, day(3))];
        let remotes = vec![remote(5, day(2))];
        let plan = reconcile(&locals, &remotes, day(1));
        assert!(plan.is_empty());
    }

    #[test]
    fn double_edit_since_sync_touches_neither_side() {
        let locals = vec![local(9, day(20))];
        let remotes = vec![remote(9, day(21))];
        let plan = reconcile(&locals, &remotes, day(10));
        assert!(plan.is_empty());

        // Symmetric case with local newer.
        let locals = vec![local(9, day(22))];
        let plan = reconcile(&locals, &remotes, day(10));
        assert!(plan.is_empty());
    }

    #[test]
    fn equal_timestamps_are_unchanged() {
        let locals = vec![local(4, day(3))];
        let remotes = vec![remote(4, day(3))];
        let plan = reconcile(&locals, &remotes, day(8));
        assert!(plan.is_empty());
    }

    #[test]
    fn reconcile_is_deterministic() {
        let locals = vec![local(1, day(10)), local(2, day(1)), local(3, day(10))];
        let remotes = vec![remote(2, day(9)), remote(3, day(2)), remote(4, day(4))];
        let watermark = day(5);

        let first = reconcile(&locals, &remotes, watermark);
        let second = reconcile(&locals, &remotes, watermark);
        assert_eq!(upload_ids(&first), upload_ids(&second));
        assert_eq!(download_ids(&first), download_ids(&second));

        // id 1 only local; id 3 newer local over pre-sync remote;
        // id 2 remote edit after sync; id 4 only remote.
        assert_eq!(upload_ids(&first), vec![1, 3]);
        assert_eq!(download_ids(&first), vec![2, 4]);
    }

    #[test]
    fn matching_ignores_titles() {
        // Same id, different titles: still a matched pair.
        let mut l = local(6, day(2));
        l.title = "renamed locally".to_string();
        let locals = vec![l];
        let remotes = vec![remote(6, day(1))];
        let plan = reconcile(&locals, &remotes, day(5));
        assert_eq!(upload_ids(&plan), vec![6]);
    }
}
