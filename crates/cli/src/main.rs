//! s3-sync - publish a directory tree to S3
//!
//! One-shot uploader for CI and deploy scripts. Walks a local directory and
//! copies every file to a bucket prefix with its sniffed content type,
//! stopping at the first failure.

use clap::Parser;

mod commands;
mod exit_code;
mod logging;

use commands::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.debug);

    let args: Vec<_> = std::env::args_os().collect();
    tracing::info!("Running with arguments: {args:?}");

    let exit_code = commands::execute(cli).await;

    std::process::exit(exit_code.into());
}
