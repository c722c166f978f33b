//! Storage and content-type seams
//!
//! The publisher talks to the object store and the MIME sniffer only through
//! these traits, so the external tools can be swapped for fakes in tests.

use std::path::Path;

use async_trait::async_trait;

use crate::error::Result;
use crate::path::RemotePath;

/// Object-store operations needed to publish a directory
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Delete every object under `prefix`
    async fn delete_recursive(&self, prefix: &RemotePath) -> Result<()>;

    /// Upload a local file to `target` with the given content type
    async fn put_file(&self, local: &Path, target: &RemotePath, content_type: &str) -> Result<()>;
}

/// Content-type detection for local files
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MimeDetector: Send + Sync {
    /// Return the MIME type of the file's bytes, parameters included
    async fn detect(&self, local: &Path) -> Result<String>;
}
