//! sync-s3: External tool adapters for s3-sync
//!
//! This crate provides implementations of the ObjectStore and MimeDetector
//! traits that shell out to the `aws` and `file` command-line tools. It is
//! the only crate that spawns processes.

mod command;

pub mod client;
pub mod mime;

pub use client::AwsCli;
pub use mime::FileCommand;
