//! MIME type detection via `file`
//!
//! Implements the MimeDetector trait from sync-core by sniffing file bytes
//! with `file --brief --mime`. The reported type, charset included, is
//! returned as-is.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use sync_core::{Error, MimeDetector, Result};

use crate::command;

/// Default sniffing program, looked up on PATH
pub const DEFAULT_PROGRAM: &str = "file";

/// MIME detector backed by the `file` utility
#[derive(Debug, Clone)]
pub struct FileCommand {
    program: PathBuf,
}

impl FileCommand {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
        }
    }

    /// Use a specific sniffing program instead of `file` from PATH
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }
}

impl Default for FileCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MimeDetector for FileCommand {
    async fn detect(&self, local: &Path) -> Result<String> {
        let args: Vec<OsString> = vec![
            "--brief".into(),
            "--mime".into(),
            local.as_os_str().to_owned(),
        ];
        let stdout = command::output(&self.program, &args).await?;

        let mime = String::from_utf8(stdout).map_err(|e| {
            Error::MimeDetection(format!(
                "{} reported a non UTF-8 type for {}: {e}",
                self.program.display(),
                local.display()
            ))
        })?;
        Ok(mime.trim_end().to_string())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::command::{recorded_args, stub_program};
    use serial_test::serial;

    #[tokio::test]
    #[serial]
    async fn test_detect_passes_type_through() {
        let dir = tempfile::tempdir().unwrap();
        let program = stub_program(
            dir.path(),
            "file",
            r#"printf '%s\n' "$@" > "$0.args"
printf 'text/html; charset=utf-8\n'"#,
        );
        let local = dir.path().join("index.html");

        let mime = FileCommand::new()
            .with_program(&program)
            .detect(&local)
            .await
            .unwrap();

        assert_eq!(mime, "text/html; charset=utf-8");
        assert_eq!(
            recorded_args(&program),
            vec![
                "--brief".to_string(),
                "--mime".to_string(),
                local.display().to_string()
            ]
        );
    }

    #[tokio::test]
    #[serial]
    async fn test_detect_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let program = stub_program(dir.path(), "file", "exit 1");

        let err = FileCommand::new()
            .with_program(&program)
            .detect(&dir.path().join("a.txt"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::CommandFailed { code: Some(1), .. }));
    }

    #[tokio::test]
    #[serial]
    async fn test_detect_rejects_non_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let program = stub_program(dir.path(), "file", r"printf '\377\n'");

        let err = FileCommand::new()
            .with_program(&program)
            .detect(&dir.path().join("a.bin"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::MimeDetection(_)));
    }
}
