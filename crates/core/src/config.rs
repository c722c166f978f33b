//! Run configuration
//!
//! A `SyncConfig` is built once from command-line input and stays read-only
//! for the rest of the run.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::exclude::ExclusionSet;
use crate::path::RemotePath;

/// Immutable settings for one publishing run
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Source directory root
    pub source: PathBuf,

    /// Destination prefix under the bucket
    pub dest: String,

    /// Target bucket name
    pub bucket: String,

    /// Credential profile handed to the object-store client
    pub profile: String,

    /// Alternate service endpoint
    pub endpoint: Option<String>,

    /// Follow symbolic links during traversal
    pub follow_symlinks: bool,

    /// Delete the destination prefix before uploading
    pub delete: bool,

    /// Paths to skip
    pub exclude: ExclusionSet,

    /// Verbose logging
    pub debug: bool,
}

impl SyncConfig {
    /// Create a configuration with the required settings and all options off
    pub fn new(
        source: impl Into<PathBuf>,
        dest: impl Into<String>,
        bucket: impl Into<String>,
        profile: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            dest: dest.into(),
            bucket: bucket.into(),
            profile: profile.into(),
            endpoint: None,
            follow_symlinks: false,
            delete: false,
            exclude: ExclusionSet::default(),
            debug: false,
        }
    }

    /// Reject configurations that must not reach any external command
    pub fn validate(&self) -> Result<()> {
        if self.dest.starts_with('/') {
            return Err(Error::Config(
                "Destination directory should not start with /".into(),
            ));
        }
        Ok(())
    }

    /// Remote destination prefix, kept exactly as configured
    pub fn destination(&self) -> RemotePath {
        RemotePath::new(&self.bucket, &self.dest)
    }
}
