//! Filename codec for notes on disk.
//!
//! A note file bakes its title and server id into the name:
//! `Shopping_List_ID:42.md`. Spaces become underscores, then the
//! `_ID:` delimiter and the integer id follow, then the `.md`
//! extension.
//!
//! The codec is only invertible for titles that contain neither the
//! delimiter sequence nor a literal underscore: `a_b` encodes the
//! same as `a b`. This collision is long-standing external behavior
//! and is kept as-is rather than escaped away.

use crate::error::{Error, Result};

/// Placeholder written in place of spaces in titles.
const SPACE_CHAR: char = '_';

/// Separates the encoded title from the id.
const ID_DELIMITER: &str = "_ID:";

/// Extension for note files.
pub const NOTE_EXTENSION: &str = "md";

/// Encode a `(title, id)` pair into a note filename.
#[must_use]
pub fn encode_filename(title: &str, id: i64) -> String {
    format!(
        "{}{}{}.{}",
        title.replace(' ', &SPACE_CHAR.to_string()),
        ID_DELIMITER,
        id,
        NOTE_EXTENSION
    )
}

/// Decode a note filename back into its `(title, id)` pair.
///
/// # Errors
///
/// Returns `Error::Filename` when the delimiter is missing or the id
/// segment is not an integer.
pub fn decode_filename(name: &str) -> Result<(String, i64)> {
    let (raw_title, rest) = name.split_once(ID_DELIMITER).ok_or_else(|| Error::Filename {
        name: name.to_string(),
    })?;

    // Everything up to the first dot is the id; the rest is extension.
    let id_segment = rest.split('.').next().unwrap_or(rest);
    let id: i64 = id_segment.parse().map_err(|_| Error::Filename {
        name: name.to_string(),
    })?;

    let title = raw_title.replace(SPACE_CHAR, " ");
    Ok((title, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_replaces_spaces_and_appends_id() {
        assert_eq!(encode_filename("Shopping List", 42), "Shopping_List_ID:42.md");
        assert_eq!(encode_filename("solo", 1), "solo_ID:1.md");
    }

    #[test]
    fn round_trip_for_delimiter_free_titles() {
        for (title, id) in [
            ("Shopping List", 42),
            ("a", 0),
            ("Meeting notes for Q3", 9_999),
            ("", 7),
        ] {
            let name = encode_filename(title, id);
            assert_eq!(decode_filename(&name).unwrap(), (title.to_string(), id));
        }
    }

    #[test]
    fn decode_rejects_missing_delimiter() {
        assert!(matches!(
            decode_filename("plain-note.md"),
            Err(Error::Filename { .. })
        ));
    }

    #[test]
    fn decode_rejects_non_integer_id() {
        assert!(matches!(
            decode_filename("note_ID:abc.md"),
            Err(Error::Filename { .. })
        ));
    }

    #[test]
    fn decode_splits_on_first_delimiter() {
        // A second delimiter ends up inside the id segment, which
        // then fails the integer parse.
        assert!(matches!(
            decode_filename("a_ID:1_ID:2.md"),
            Err(Error::Filename { .. })
        ));
    }

    #[test]
    fn underscore_in_title_collides_with_space() {
        // Documented collision: not corrected.
        let name = encode_filename("a_b", 3);
        assert_eq!(decode_filename(&name).unwrap(), ("a b".to_string(), 3));
    }
}
