//! Exclusion set
//!
//! Paths are matched by filesystem identity rather than by spelling, so a
//! symlink or an alternate path to an excluded file is excluded too.
//! Identity comes from `stat` alone; nothing is opened, so FIFOs and
//! unreadable entries can be excluded.

use std::path::{Path, PathBuf};

/// Device and inode of a path, following symlinks
#[cfg(unix)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileId {
    dev: u64,
    ino: u64,
}

#[cfg(unix)]
impl FileId {
    fn of(path: &Path) -> std::io::Result<Self> {
        use std::os::unix::fs::MetadataExt;

        let meta = std::fs::metadata(path)?;
        Ok(Self {
            dev: meta.dev(),
            ino: meta.ino(),
        })
    }
}

/// Operator-supplied paths to skip during traversal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    paths: Vec<PathBuf>,
    /// Identity of each entry in `paths`, resolved when the set is built
    #[cfg(unix)]
    ids: Vec<FileId>,
}

impl ExclusionSet {
    /// Create an exclusion set, keeping the given order
    ///
    /// Entries that cannot be resolved (e.g. do not exist) never match.
    pub fn new(paths: impl IntoIterator<Item = PathBuf>) -> Self {
        let paths: Vec<PathBuf> = paths.into_iter().collect();

        #[cfg(unix)]
        let ids = paths
            .iter()
            .filter_map(|excluded| match FileId::of(excluded) {
                Ok(id) => Some(id),
                Err(e) => {
                    tracing::debug!("Exclusion {} matches nothing: {e}", excluded.display());
                    None
                }
            })
            .collect();

        Self {
            paths,
            #[cfg(unix)]
            ids,
        }
    }

    /// Excluded paths as supplied
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Check whether `path` is the same file as any excluded entry
    #[cfg(unix)]
    pub fn contains(&self, path: &Path) -> bool {
        if self.ids.is_empty() {
            return false;
        }
        match FileId::of(path) {
            Ok(id) => self.ids.contains(&id),
            Err(e) => {
                tracing::trace!("Cannot stat {}: {e}", path.display());
                false
            }
        }
    }

    /// Check whether `path` is the same file as any excluded entry
    #[cfg(not(unix))]
    pub fn contains(&self, path: &Path) -> bool {
        self.paths.iter().any(|excluded| {
            match same_file::is_same_file(path, excluded) {
                Ok(same) => same,
                Err(e) => {
                    tracing::trace!(
                        "Cannot compare {} with {}: {e}",
                        path.display(),
                        excluded.display()
                    );
                    false
                }
            }
        })
    }
}

impl FromIterator<PathBuf> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = PathBuf>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_empty_set_matches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let set = ExclusionSet::default();
        assert!(set.is_empty());
        assert!(!set.contains(dir.path()));
    }

    #[test]
    fn test_matches_alternate_spelling() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("img")).unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let set = ExclusionSet::new([dir.path().join("img")]);
        assert!(set.contains(&dir.path().join("img")));
        assert!(set.contains(&dir.path().join("img").join("..").join("img")));
        assert!(!set.contains(&dir.path().join("a.txt")));
        assert!(!set.contains(dir.path()));
    }

    #[test]
    fn test_missing_entry_never_matches() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.txt"), "a").unwrap();

        let set = ExclusionSet::new([dir.path().join("gone.txt")]);
        assert_eq!(set.paths(), [dir.path().join("gone.txt")]);
        assert!(!set.contains(&dir.path().join("a.txt")));
        assert!(!set.contains(&dir.path().join("gone.txt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_matches_through_symlink() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("real.txt"), "a").unwrap();
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();

        let set = ExclusionSet::new([dir.path().join("real.txt")]);
        assert!(set.contains(&dir.path().join("link.txt")));

        let set: ExclusionSet = [dir.path().join("link.txt")].into_iter().collect();
        assert!(set.contains(&dir.path().join("real.txt")));
    }

    #[cfg(unix)]
    #[test]
    fn test_fifo_is_matched_without_opening() {
        let dir = tempfile::tempdir().unwrap();
        let pipe = dir.path().join("pipe");
        let status = std::process::Command::new("mkfifo")
            .arg(&pipe)
            .status()
            .unwrap();
        assert!(status.success());

        let set = ExclusionSet::new([pipe.clone()]);
        assert!(set.contains(&pipe));
        assert!(!set.contains(dir.path()));

        let other = ExclusionSet::new([dir.path().to_path_buf()]);
        assert!(!other.contains(&pipe));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_entries_still_match() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let secret = dir.path().join("secret.txt");
        let private = dir.path().join("private");
        fs::write(&secret, "s").unwrap();
        fs::create_dir(&private).unwrap();
        fs::set_permissions(&secret, fs::Permissions::from_mode(0o000)).unwrap();
        fs::set_permissions(&private, fs::Permissions::from_mode(0o000)).unwrap();

        let set = ExclusionSet::new([secret.clone(), private.clone()]);
        let secret_matched = set.contains(&secret);
        let private_matched = set.contains(&private);

        fs::set_permissions(&secret, fs::Permissions::from_mode(0o644)).unwrap();
        fs::set_permissions(&private, fs::Permissions::from_mode(0o755)).unwrap();
        assert!(secret_matched);
        assert!(private_matched);
    }
}
