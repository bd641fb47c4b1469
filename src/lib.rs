//! Flasky Notes CLI - sync a directory of Markdown notes with a
//! Flasky server.
//!
//! Notes are plain `.md` files whose names encode the title and the
//! server-assigned id. A small watermark file records when the last
//! successful sync finished; each sync cycle compares local file
//! mtimes and remote change times against it to decide what to
//! upload and what to download.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Configuration resolution (flags, environment)
//! - [`model`] - Note types and timestamp codecs
//! - [`local`] - Filename codec and the local note repository
//! - [`remote`] - Client for the Flasky external API
//! - [`sync`] - Watermark store, reconciler, and sync engine
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod local;
pub mod model;
pub mod remote;
pub mod sync;

pub use error::{Error, Result};
