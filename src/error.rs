//! Error types shared by the countdown engine and the binary.

use std::{io, path::PathBuf, result};

use thiserror::Error;

/// Everything that can go wrong in this crate.
///
/// Only [`CountdownError::InvalidDuration`] can come out of the engine; it is
/// a validation failure the caller surfaces to the user, never a crash.
#[derive(Error, Debug)]
pub enum CountdownError {
    /// A start was requested with a total duration of zero.
    #[error("Please enter a duration greater than zero.")]
    InvalidDuration {
        /// The rejected total, in milliseconds.
        total_ms: u64,
    },

    /// The log destination given on the command line could not be opened.
    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        /// Path passed via `--log-file`.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Crate-wide result alias.
pub type Result<T> = result::Result<T, CountdownError>;
