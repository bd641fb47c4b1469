//! Command implementations.

pub mod completions;
pub mod get;
pub mod list;
pub mod new;
pub mod sync;

use crate::error::{Error, Result};

/// Build a tokio runtime for the blocking command handlers.
///
/// The remote client is async; each command drives it to completion
/// with `block_on`, keeping the CLI itself fully sequential.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create async runtime: {e}")))
}
