//! Error types for the Flasky Notes CLI.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=config, 3=remote, 4=local, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Flasky operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
///
/// Each code maps to a SCREAMING_SNAKE string and a category-based
/// exit code. Scripts match on the string or the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Config (exit 2)
    ConfigError,

    // Remote (exit 3)
    RemoteRejected,
    HttpError,

    // Local notes (exit 4)
    FilenameDecode,
    TimestampError,

    // Watermark (exit 5)
    CorruptStatus,

    // I/O (exit 6)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::ConfigError => "CONFIG_ERROR",
            Self::RemoteRejected => "REMOTE_REJECTED",
            Self::HttpError => "HTTP_ERROR",
            Self::FilenameDecode => "FILENAME_DECODE",
            Self::TimestampError => "TIMESTAMP_ERROR",
            Self::CorruptStatus => "CORRUPT_STATUS",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-6).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::ConfigError => 2,
            Self::RemoteRejected | Self::HttpError => 3,
            Self::FilenameDecode | Self::TimestampError => 4,
            Self::CorruptStatus => 5,
            Self::IoError | Self::JsonError => 6,
        }
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Flasky Notes CLI operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot decode note filename: {name}")]
    Filename { name: String },

    #[error("Corrupt status file {}: {detail}", path.display())]
    CorruptStatus { path: PathBuf, detail: String },

    #[error("Server rejected {operation}: {reason}")]
    Remote { operation: String, reason: String },

    #[error("Cannot parse timestamp {value:?}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Shorthand for a per-note remote failure carrying the server's reason.
    pub fn remote(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Remote {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::Filename { .. } => ErrorCode::FilenameDecode,
            Self::CorruptStatus { .. } => ErrorCode::CorruptStatus,
            Self::Remote { .. } => ErrorCode::RemoteRejected,
            Self::Timestamp { .. } => ErrorCode::TimestampError,
            Self::Http(_) => ErrorCode::HttpError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint for humans and scripts.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::Filename { name } => Some(format!(
                "Note filenames must look like `My_Title_ID:42.md`. \
                 Rename '{name}' or move it out of the notes directory."
            )),

            Self::CorruptStatus { path, .. } => Some(format!(
                "Delete {} to force a fresh bootstrap sync on the next run.",
                path.display()
            )),

            Self::Config(msg) => {
                if msg.contains("FLASKY_USERNAME") || msg.contains("FLASKY_PASSWORD") {
                    Some(
                        "Export FLASKY_USERNAME and FLASKY_PASSWORD with your \
                         Flasky API credentials."
                            .to_string(),
                    )
                } else if msg.contains("domain") {
                    Some(
                        "Pass --domain or export FLASKY_DOMAIN with your server's \
                         domain (e.g. notes.example.com)."
                            .to_string(),
                    )
                } else {
                    None
                }
            }

            Self::Http(_) => Some(
                "Check your network connection and that the server domain is reachable."
                    .to_string(),
            ),

            Self::Remote { .. }
            | Self::Timestamp { .. }
            | Self::Io(_)
            | Self::Json(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    ///
    /// Includes error code, message, exit code, and optional recovery hint.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
