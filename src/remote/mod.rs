//! Client for the Flasky external notes API.
//!
//! All four operations are JSON POST request/response with the
//! account credentials in the body, matching the server's external
//! API. Mutating and single-note calls answer with a
//! `{success, reason?}` envelope; a `success: false` answer becomes
//! [`Error::Remote`] carrying the server's reason string, which the
//! sync engine treats as a per-note, non-fatal failure.
//!
//! No retries, no backoff: a failed call is reported and the caller
//! moves on.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{normalize_category, parse_server_timestamp, RemoteNote};

/// Remote operations the sync engine depends on.
///
/// [`NotesApi`] is the production implementation; tests substitute a
/// scripted double. `create` is not part of the seam because the
/// engine issues `edit-note` even for notes the server has never
/// seen (preserved upstream behavior).
pub trait NoteService {
    /// Fetch the whole remote collection.
    fn fetch_all(
        &self,
        limit: Option<usize>,
    ) -> impl std::future::Future<Output = Result<Vec<RemoteNote>>>;

    /// Fetch one note by id.
    fn fetch_one(&self, id: i64) -> impl std::future::Future<Output = Result<RemoteNote>>;

    /// Replace a note's title and content.
    fn update(
        &self,
        id: i64,
        title: &str,
        content: &str,
    ) -> impl std::future::Future<Output = Result<()>>;
}

impl NoteService for NotesApi {
    async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<RemoteNote>> {
        Self::fetch_all(self, limit).await
    }

    async fn fetch_one(&self, id: i64) -> Result<RemoteNote> {
        Self::fetch_one(self, id).await
    }

    async fn update(&self, id: i64, title: &str, content: &str) -> Result<()> {
        Self::update(self, id, title, content).await
    }
}

/// Client for one Flasky account on one server.
#[derive(Debug, Clone)]
pub struct NotesApi {
    client: reqwest::Client,
    api_url: String,
    username: String,
    password: String,
    server_time_offset_hours: i64,
}

/// A note as it appears on the wire, timestamp still raw.
#[derive(Debug, Deserialize)]
struct NoteRecord {
    id: i64,
    title: String,
    content: String,
    category: Option<String>,
    date_last_changed: String,
}

/// Envelope for `get-note`.
#[derive(Debug, Deserialize)]
struct NoteEnvelope {
    #[serde(default)]
    success: bool,
    note: Option<NoteRecord>,
    reason: Option<String>,
}

/// Envelope for `add-note` and `edit-note`.
#[derive(Debug, Deserialize)]
struct AckEnvelope {
    #[serde(default)]
    success: bool,
    reason: Option<String>,
}

#[derive(Debug, Serialize)]
struct GetNotesRequest<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<usize>,
}

#[derive(Debug, Serialize)]
struct GetNoteRequest<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(rename = "note-id")]
    note_id: i64,
}

#[derive(Debug, Serialize)]
struct AddNoteRequest<'a> {
    username: &'a str,
    password: &'a str,
    title: &'a str,
    content: &'a str,
    category: &'a str,
}

#[derive(Debug, Serialize)]
struct EditNoteRequest<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(rename = "note-id")]
    note_id: i64,
    title: &'a str,
    content: &'a str,
}

impl NotesApi {
    /// Build a client from the resolved configuration.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: config.api_url(),
            username: config.username.clone(),
            password: config.password.clone(),
            server_time_offset_hours: config.server_time_offset_hours,
        }
    }

    /// Fetch the whole remote note collection.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-success HTTP
    /// status, or an unparsable timestamp in the response.
    pub async fn fetch_all(&self, limit: Option<usize>) -> Result<Vec<RemoteNote>> {
        let url = format!("{}get-notes", self.api_url);
        let request = GetNotesRequest {
            username: &self.username,
            password: &self.password,
            limit,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::remote("get-notes", api_failure(status, &body)));
        }

        let records = response.json::<Vec<NoteRecord>>().await?;
        debug!(count = records.len(), "fetched remote notes");
        records
            .into_iter()
            .map(|record| self.into_remote_note(record))
            .collect()
    }

    /// Fetch a single note by id.
    ///
    /// # Errors
    ///
    /// Returns `Error::Remote` with the server's reason when the
    /// envelope reports failure.
    pub async fn fetch_one(&self, id: i64) -> Result<RemoteNote> {
        let url = format!("{}get-note", self.api_url);
        let request = GetNoteRequest {
            username: &self.username,
            password: &self.password,
            note_id: id,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let envelope = response.json::<NoteEnvelope>().await?;

        if !envelope.success {
            return Err(Error::remote("get-note", unknown_reason(envelope.reason)));
        }
        let record = envelope
            .note
            .ok_or_else(|| Error::remote("get-note", "response had no note payload"))?;
        self.into_remote_note(record)
    }

    /// Create a new note on the server.
    ///
    /// # Errors
    ///
    /// Returns `Error::Remote` with the server's reason on rejection.
    pub async fn create(&self, title: &str, content: &str, category: Option<&str>) -> Result<()> {
        let url = format!("{}add-note", self.api_url);
        let request = AddNoteRequest {
            username: &self.username,
            password: &self.password,
            title,
            content,
            category: category.unwrap_or(""),
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let envelope = response.json::<AckEnvelope>().await?;
        if envelope.success {
            Ok(())
        } else {
            Err(Error::remote("add-note", unknown_reason(envelope.reason)))
        }
    }

    /// Replace a note's title and content on the server.
    ///
    /// # Errors
    ///
    /// Returns `Error::Remote` with the server's reason on rejection.
    pub async fn update(&self, id: i64, title: &str, content: &str) -> Result<()> {
        let url = format!("{}edit-note", self.api_url);
        let request = EditNoteRequest {
            username: &self.username,
            password: &self.password,
            note_id: id,
            title,
            content,
        };

        let response = self.client.post(&url).json(&request).send().await?;
        let envelope = response.json::<AckEnvelope>().await?;
        if envelope.success {
            Ok(())
        } else {
            Err(Error::remote("edit-note", unknown_reason(envelope.reason)))
        }
    }

    /// Normalize a wire record: offset-shift the timestamp, collapse
    /// empty categories.
    fn into_remote_note(&self, record: NoteRecord) -> Result<RemoteNote> {
        let changed_at =
            parse_server_timestamp(&record.date_last_changed, self.server_time_offset_hours)?;
        Ok(RemoteNote {
            id: record.id,
            title: record.title,
            content: record.content,
            category: normalize_category(record.category),
            changed_at,
        })
    }
}

fn unknown_reason(reason: Option<String>) -> String {
    reason.unwrap_or_else(|| "Unknown".to_string())
}

fn api_failure(status: reqwest::StatusCode, body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", trimmed, status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_note_request_uses_hyphenated_id_field() {
        let request = GetNoteRequest {
            username: "u",
            password: "p",
            note_id: 42,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["note-id"], 42);
        assert_eq!(json["username"], "u");
    }

    #[test]
    fn get_notes_request_omits_absent_limit() {
        let request = GetNotesRequest {
            username: "u",
            password: "p",
            limit: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("limit").is_none());

        let request = GetNotesRequest {
            limit: Some(10_000),
            ..request
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["limit"], 10_000);
    }

    #[test]
    fn failure_envelope_defaults_to_unsuccessful() {
        let envelope: AckEnvelope = serde_json::from_str(r#"{"reason": "bad password"}"#).unwrap();
        assert!(!envelope.success);
        assert_eq!(unknown_reason(envelope.reason), "bad password");

        let envelope: AckEnvelope = serde_json::from_str("{}").unwrap();
        assert_eq!(unknown_reason(envelope.reason), "Unknown");
    }

    #[test]
    fn note_record_deserializes_server_shape() {
        let record: NoteRecord = serde_json::from_str(
            r#"{
                "id": 5,
                "title": "Shopping List",
                "content": "eggs",
                "category": "",
                "date_last_changed": "Tue, 02 Jan 2024 15:00:00 GMT"
            }"#,
        )
        .unwrap();
        assert_eq!(record.id, 5);
        assert_eq!(normalize_category(record.category), None);
    }

    #[test]
    fn api_failure_formats_status_and_body() {
        let status = reqwest::StatusCode::INTERNAL_SERVER_ERROR;
        assert_eq!(api_failure(status, ""), "HTTP 500");
        assert_eq!(api_failure(status, " oops "), "oops (500)");
    }
}
