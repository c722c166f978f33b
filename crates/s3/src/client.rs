//! AWS CLI client
//!
//! Implements the ObjectStore trait from sync-core by invoking `aws s3`.
//! Credentials are resolved by the CLI itself from the named profile.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use sync_core::{ObjectStore, RemotePath, Result, SyncConfig};

use crate::command;

/// Default client program, looked up on PATH
pub const DEFAULT_PROGRAM: &str = "aws";

/// Object-store client backed by the `aws` command-line tool
#[derive(Debug, Clone)]
pub struct AwsCli {
    program: PathBuf,
    profile: String,
    endpoint: Option<String>,
}

impl AwsCli {
    /// Create a client that uses the given credential profile
    pub fn new(profile: impl Into<String>) -> Self {
        Self {
            program: PathBuf::from(DEFAULT_PROGRAM),
            profile: profile.into(),
            endpoint: None,
        }
    }

    /// Create a client from the run configuration's profile and endpoint
    pub fn from_config(config: &SyncConfig) -> Self {
        Self::new(&config.profile).with_endpoint(config.endpoint.clone())
    }

    /// Use a specific client program instead of `aws` from PATH
    pub fn with_program(mut self, program: impl Into<PathBuf>) -> Self {
        self.program = program.into();
        self
    }

    /// Send requests to an alternate service endpoint
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        self.endpoint = endpoint.filter(|e| !e.is_empty());
        self
    }

    /// Arguments for `aws s3 <command>` followed by command-specific options
    fn s3_args<I>(&self, command: &str, options: I) -> Vec<OsString>
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut args: Vec<OsString> = vec![
            "s3".into(),
            command.into(),
            "--profile".into(),
            self.profile.clone().into(),
        ];
        if let Some(endpoint) = &self.endpoint {
            args.push("--endpoint-url".into());
            args.push(endpoint.into());
        }
        args.extend(options);
        args
    }
}

#[async_trait]
impl ObjectStore for AwsCli {
    async fn delete_recursive(&self, prefix: &RemotePath) -> Result<()> {
        let args = self.s3_args("rm", ["--recursive".into(), prefix.to_uri().into()]);
        command::run(&self.program, &args).await
    }

    async fn put_file(&self, local: &Path, target: &RemotePath, content_type: &str) -> Result<()> {
        let args = self.s3_args(
            "cp",
            [
                local.as_os_str().to_owned(),
                target.to_uri().into(),
                "--no-progress".into(),
                "--content-type".into(),
                content_type.into(),
            ],
        );
        command::run(&self.program, &args).await
    }
}
