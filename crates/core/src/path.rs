//! Remote destinations and object key derivation
//!
//! Remote locations are addressed as `s3://bucket/key`. Object keys are
//! derived from a file's position under the source root and always use
//! forward slashes, whatever the host's separator is.

use std::path::{Component, Path};

use crate::error::{Error, Result};

/// URI scheme understood by the object-store client
pub const SCHEME: &str = "s3://";

/// A location inside a bucket
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePath {
    /// Bucket name
    pub bucket: String,
    /// Object key or key prefix (empty for bucket root)
    pub key: String,
}

impl RemotePath {
    /// Create a new RemotePath
    pub fn new(bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Get the full URI (s3://bucket/key)
    ///
    /// The key is kept verbatim, so a trailing slash on a prefix survives.
    pub fn to_uri(&self) -> String {
        format!("{SCHEME}{}/{}", self.bucket, self.key)
    }

    /// Join an object key onto this prefix
    pub fn join(&self, child: &str) -> Self {
        let key = if self.key.is_empty() || self.key.ends_with('/') {
            format!("{}{child}", self.key)
        } else {
            format!("{}/{child}", self.key)
        };
        Self {
            bucket: self.bucket.clone(),
            key,
        }
    }
}

impl std::fmt::Display for RemotePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_uri())
    }
}

/// Derive the object key for `path` relative to the source `root`
///
/// Files directly under the root map to their bare name; nested files get
/// their directory components joined with `/`.
pub fn object_key(root: &Path, path: &Path) -> Result<String> {
    let relative = path.strip_prefix(root).map_err(|_| {
        Error::InvalidPath(format!(
            "{} is not inside {}",
            path.display(),
            root.display()
        ))
    })?;

    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str().ok_or_else(|| {
                    Error::InvalidPath(format!("{} is not valid UTF-8", path.display()))
                })?;
                parts.push(part);
            }
            Component::CurDir => {}
            _ => {
                return Err(Error::InvalidPath(format!(
                    "{} cannot be mapped to an object key",
                    path.display()
                )));
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::InvalidPath(format!(
            "{} is the source root, not a file",
            path.display()
        )));
    }

    Ok(parts.join("/"))
}
