//! Note data types.
//!
//! A note lives in two representations that share nothing but the
//! server-assigned integer id, which is the sole join key during
//! reconciliation. Titles are never used for matching; they may
//! legitimately diverge while a rename is in flight.

use std::path::PathBuf;

use chrono::NaiveDateTime;
use serde::Serialize;

/// A note as the server returned it, with `date_last_changed` already
/// normalized to local wall-clock time.
#[derive(Debug, Clone, Serialize)]
pub struct RemoteNote {
    /// Server-assigned, immutable id.
    pub id: i64,
    pub title: String,
    pub content: String,
    /// `None` when the server sent no category or an empty one.
    pub category: Option<String>,
    /// Last modification time on the server, offset-normalized.
    pub changed_at: NaiveDateTime,
}

/// A note materialized as a file in the notes directory.
///
/// Title and id are decoded from the filename at the listing boundary;
/// nothing deeper in the logic re-derives them from paths.
#[derive(Debug, Clone, Serialize)]
pub struct LocalNote {
    pub id: i64,
    pub title: String,
    pub content: String,
    /// File modification time, local wall-clock.
    pub changed_at: NaiveDateTime,
    /// Full path the note was read from.
    pub path: PathBuf,
}

/// Collapse an empty or missing category to `None`.
#[must_use]
pub fn normalize_category(category: Option<String>) -> Option<String> {
    category.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_category_is_none() {
        assert_eq!(normalize_category(None), None);
        assert_eq!(normalize_category(Some(String::new())), None);
        assert_eq!(normalize_category(Some("  ".into())), None);
        assert_eq!(
            normalize_category(Some("recipes".into())),
            Some("recipes".into())
        );
    }
}
