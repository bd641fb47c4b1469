//! Configuration resolution.
//!
//! All knobs resolve flag → environment → default, and the resolved
//! [`Config`] value is passed explicitly into the components that
//! need it. Nothing reads the environment after startup, so one CLI
//! invocation sees one consistent configuration.
//!
//! Environment variables:
//! - `FLASKY_DOMAIN` — server domain, e.g. `notes.example.com`
//! - `FLASKY_USERNAME` / `FLASKY_PASSWORD` — API credentials
//! - `FLASKY_NOTES_DIR` — local notes directory
//! - `FLASKY_SERVER_OFFSET` — hours the server clock trails local
//!   wall-clock time (default 8)

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default hours to add to server timestamps when normalizing.
pub const DEFAULT_SERVER_OFFSET_HOURS: i64 = 8;

/// Resolved configuration for one CLI invocation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server domain without scheme, e.g. `notes.example.com`.
    pub root_domain: String,
    pub username: String,
    pub password: String,
    /// Directory holding the note files and the status file.
    pub notes_dir: PathBuf,
    /// Fixed offset between the server clock and local time.
    pub server_time_offset_hours: i64,
}

impl Config {
    /// Resolve configuration from CLI flags and the environment.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` when the domain or either credential
    /// cannot be resolved, or when no notes directory can be derived.
    pub fn load(domain_flag: Option<&str>, notes_dir_flag: Option<&Path>) -> Result<Self> {
        let root_domain = domain_flag
            .map(str::to_string)
            .or_else(|| env_nonempty("FLASKY_DOMAIN"))
            .ok_or_else(|| Error::Config("server domain is not set".to_string()))?;

        let username = env_nonempty("FLASKY_USERNAME")
            .ok_or_else(|| Error::Config("FLASKY_USERNAME is not set".to_string()))?;
        let password = env_nonempty("FLASKY_PASSWORD")
            .ok_or_else(|| Error::Config("FLASKY_PASSWORD is not set".to_string()))?;

        let notes_dir = notes_dir_flag
            .map(Path::to_path_buf)
            .or_else(|| env_nonempty("FLASKY_NOTES_DIR").map(PathBuf::from))
            .or_else(default_notes_dir)
            .ok_or_else(|| Error::Config("cannot determine a notes directory".to_string()))?;

        let server_time_offset_hours = match env_nonempty("FLASKY_SERVER_OFFSET") {
            Some(raw) => raw.parse().map_err(|_| {
                Error::Config(format!("FLASKY_SERVER_OFFSET is not an integer: {raw}"))
            })?,
            None => DEFAULT_SERVER_OFFSET_HOURS,
        };

        Ok(Self {
            root_domain,
            username,
            password,
            notes_dir,
            server_time_offset_hours,
        })
    }

    /// Base URL of the external API, trailing slash included.
    #[must_use]
    pub fn api_url(&self) -> String {
        format!("https://{}/api/external/", self.root_domain)
    }

    /// Base URL of the web frontend.
    #[must_use]
    pub fn web_url(&self) -> String {
        format!("https://{}/", self.root_domain)
    }
}

/// Read an environment variable, treating empty as unset.
fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Default notes location: `~/.flasky/notes`.
fn default_notes_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".flasky").join("notes"))
}
