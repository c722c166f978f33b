//! CLI definition and execution
//!
//! s3-sync is a single command: parse the flags into a run configuration,
//! wire the external tool adapters into the publisher and run it.

use std::path::PathBuf;

use clap::Parser;
use sync_core::{ExclusionSet, Publisher, SyncConfig};
use sync_s3::{AwsCli, FileCommand};

use crate::exit_code::ExitCode;

/// s3-sync - publish a directory tree to S3
///
/// Recursively uploads a local directory to a bucket prefix, setting each
/// object's content type from the file's bytes.
#[derive(Parser, Debug)]
#[command(name = "s3-sync")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source directory to copy from
    #[arg(long, value_name = "DIR")]
    pub source: PathBuf,

    /// Destination directory to upload to (must not start with /)
    #[arg(long, value_name = "PREFIX")]
    pub dest: String,

    /// Name of the S3 bucket to write to
    #[arg(long)]
    pub bucket: String,

    /// AWS credential profile to use
    #[arg(long)]
    pub profile: String,

    /// If not empty, alternate AWS endpoint to use
    #[arg(long, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Follow symbolic links during directory scanning
    #[arg(long, default_value = "false")]
    pub follow_symlinks: bool,

    /// Delete the destination directory before uploading
    #[arg(long, default_value = "false")]
    pub delete: bool,

    /// Paths to exclude when synchronizing
    #[arg(long, num_args = 0.., value_name = "PATH")]
    pub exclude: Vec<PathBuf>,

    /// Emit debug logging
    #[arg(long, default_value = "false")]
    pub debug: bool,

    /// Object-store client program
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "S3_SYNC_AWS_CLI",
        default_value = sync_s3::client::DEFAULT_PROGRAM
    )]
    pub aws_cli: PathBuf,

    /// MIME sniffing program
    #[arg(
        long,
        value_name = "PROGRAM",
        env = "S3_SYNC_FILE_CLI",
        default_value = sync_s3::mime::DEFAULT_PROGRAM
    )]
    pub file_cli: PathBuf,
}

impl Cli {
    /// Build the immutable run configuration from the parsed flags
    pub fn to_config(&self) -> SyncConfig {
        SyncConfig {
            source: self.source.clone(),
            dest: self.dest.clone(),
            bucket: self.bucket.clone(),
            profile: self.profile.clone(),
            endpoint: self.endpoint.clone(),
            follow_symlinks: self.follow_symlinks,
            delete: self.delete,
            exclude: self.exclude.iter().cloned().collect::<ExclusionSet>(),
            debug: self.debug,
        }
    }
}

/// Execute the publish run and return an exit code
pub async fn execute(cli: Cli) -> ExitCode {
    let config = cli.to_config();
    tracing::debug!("Parsed argument values: {config:?}");

    let store = AwsCli::from_config(&config).with_program(&cli.aws_cli);
    let detector = FileCommand::new().with_program(&cli.file_cli);

    match Publisher::new(&config, &store, &detector).run().await {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            let code = ExitCode::from(&e);
            tracing::error!("{e}");
            tracing::debug!("Exiting: {code}");
            code
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const REQUIRED: [&str; 9] = [
        "s3-sync",
        "--source",
        "public",
        "--dest",
        "site/",
        "--bucket",
        "assets",
        "--profile",
        "deploy",
    ];

    fn parse(extra: &[&str]) -> Cli {
        Cli::try_parse_from(REQUIRED.iter().chain(extra)).unwrap()
    }

    #[test]
    fn test_required_flags() {
        let cli = parse(&[]);
        let config = cli.to_config();
        assert_eq!(config.source, PathBuf::from("public"));
        assert_eq!(config.dest, "site/");
        assert_eq!(config.bucket, "assets");
        assert_eq!(config.profile, "deploy");
        assert!(config.endpoint.is_none());
        assert!(!config.delete);
        assert!(!config.follow_symlinks);
        assert!(!config.debug);
        assert!(config.exclude.is_empty());
    }

    #[test]
    fn test_missing_required_flag() {
        let result = Cli::try_parse_from(&REQUIRED[..7]);
        assert!(result.is_err());
    }

    #[test]
    fn test_optional_flags() {
        let cli = parse(&[
            "--endpoint",
            "http://localhost:9000",
            "--follow-symlinks",
            "--delete",
            "--debug",
        ]);
        let config = cli.to_config();
        assert_eq!(config.endpoint.as_deref(), Some("http://localhost:9000"));
        assert!(config.follow_symlinks);
        assert!(config.delete);
        assert!(config.debug);
    }

    #[test]
    fn test_exclude_takes_many_values() {
        let cli = parse(&["--exclude", "public/img", "public/drafts", "--delete"]);
        assert_eq!(
            cli.exclude,
            vec![PathBuf::from("public/img"), PathBuf::from("public/drafts")]
        );
        assert!(cli.delete);

        let cli = parse(&["--exclude", "a", "--exclude", "b"]);
        assert_eq!(cli.to_config().exclude.paths(), [PathBuf::from("a"), PathBuf::from("b")]);

        let cli = parse(&["--exclude"]);
        assert!(cli.exclude.is_empty());
    }

    #[test]
    fn test_rooted_dest_parses_and_fails_validation() {
        let cli = Cli::try_parse_from([
            "s3-sync", "--source", "public", "--dest", "/site", "--bucket", "assets", "--profile",
            "deploy",
        ])
        .unwrap();
        assert!(cli.to_config().validate().is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
