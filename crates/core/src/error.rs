//! Error types for sync-core
//!
//! Provides a unified error type that can be converted to a process exit status.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for sync-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for sync-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid run configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// A local path that cannot be mapped to an object key
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Directory traversal error
    #[error("Traversal error: {0}")]
    Walk(#[from] walkdir::Error),

    /// External program could not be started
    #[error("Failed to run {}: {source}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// External program exited unsuccessfully
    #[error("Command {command} failed with {}", describe_code(*code))]
    CommandFailed { command: String, code: Option<i32> },

    /// MIME sniffing produced unusable output
    #[error("MIME detection failed: {0}")]
    MimeDetection(String),
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {code}"),
        None => "termination by signal".to_string(),
    }
}

impl Error {
    /// Get the process exit status for this error
    ///
    /// A failed external command hands its own status through; everything
    /// else, including a command killed by a signal, is a general failure.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::CommandFailed {
                code: Some(code), ..
            } if *code != 0 => *code,
            _ => 1,
        }
    }
}
