//! Directory publisher
//!
//! Walks the source tree and uploads every eligible file, one at a time,
//! stopping at the first failure.

use std::path::Path;

use walkdir::WalkDir;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::path::object_key;
use crate::traits::{MimeDetector, ObjectStore};

/// Publishes a local directory tree to an object-store prefix
pub struct Publisher<'a, S, M> {
    config: &'a SyncConfig,
    store: &'a S,
    detector: &'a M,
}

impl<'a, S, M> Publisher<'a, S, M>
where
    S: ObjectStore,
    M: MimeDetector,
{
    pub fn new(config: &'a SyncConfig, store: &'a S, detector: &'a M) -> Self {
        Self {
            config,
            store,
            detector,
        }
    }

    /// Validate, optionally clear the destination, then upload the tree
    pub async fn run(&self) -> Result<()> {
        self.config.validate()?;

        if self.config.delete {
            self.pre_delete().await?;
        }

        self.sync_dir().await?;
        tracing::info!("Finished uploading to {}", self.config.destination());
        Ok(())
    }

    /// Remove everything under the destination prefix
    pub async fn pre_delete(&self) -> Result<()> {
        let target = self.config.destination();
        tracing::info!("Running pre-deletion: {target}");
        self.store.delete_recursive(&target).await
    }

    /// Walk the source tree and publish each file that is not excluded
    ///
    /// Excluded directories are pruned along with their whole subtree.
    pub async fn sync_dir(&self) -> Result<()> {
        tracing::info!("Beginning upload to {}", self.config.destination());

        let exclude = &self.config.exclude;
        let walker = WalkDir::new(&self.config.source)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_entry(|entry| {
                if !exclude.contains(entry.path()) {
                    return true;
                }
                if entry.file_type().is_dir() {
                    tracing::debug!("Skipping directory {}", entry.path().display());
                } else {
                    tracing::debug!("Skipping path {}", entry.path().display());
                }
                false
            });

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_dir() {
                tracing::info!("Entered {}", path.display());
                continue;
            }

            // Only reachable when links are not followed.
            if entry.path_is_symlink() && path.is_dir() {
                tracing::debug!("Not following symlinked directory {}", path.display());
                continue;
            }

            let key = object_key(&self.config.source, path)?;
            self.publish_file(path, &key).await?;
        }

        Ok(())
    }

    /// Detect the content type of `source` and upload it under `key`
    pub async fn publish_file(&self, source: &Path, key: &str) -> Result<()> {
        let target = self.config.destination().join(key);
        tracing::info!("Uploading {} -> {target}", source.display());

        let content_type = self.detect_content_type(source).await?;
        self.store.put_file(source, &target, &content_type).await
    }

    /// Ask the detector for the file's MIME type, passed through verbatim
    pub async fn detect_content_type(&self, source: &Path) -> Result<String> {
        let content_type = self.detector.detect(source).await?;

        if tracing::enabled!(tracing::Level::DEBUG) {
            let size = std::fs::metadata(source)
                .map(|m| humansize::format_size(m.len(), humansize::BINARY))
                .unwrap_or_else(|_| "unknown size".to_string());
            tracing::debug!(
                "Got MIME type for {} ({size}): {content_type}",
                source.display()
            );
        }

        Ok(content_type)
    }
}
