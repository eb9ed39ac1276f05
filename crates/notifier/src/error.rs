//! Notifier error types.

use std::process::ExitStatus;
use thiserror::Error;

/// Notification dispatch errors.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The notification command could not be started.
    #[error("failed to run '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The notification command ran but reported failure.
    #[error("'{command}' exited with {status}")]
    ExitStatus { command: String, status: ExitStatus },
}

pub type Result<T> = std::result::Result<T, Error>;
