//! Data models for Flasky Notes.
//!
//! This module contains the domain types and timestamp codecs:
//! - `RemoteNote` / `LocalNote`
//! - server and watermark timestamp parsing

pub mod note;
pub mod time;

pub use note::{normalize_category, LocalNote, RemoteNote};
pub use time::{format_local_timestamp, parse_local_timestamp, parse_server_timestamp};
