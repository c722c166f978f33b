//! sync-core: Core library for the s3-sync directory publisher
//!
//! This crate provides the core functionality for s3-sync, including:
//! - Run configuration and validation
//! - Object key derivation and remote paths
//! - Identity-based path exclusion
//! - ObjectStore and MimeDetector traits
//! - The Publisher that walks and uploads a directory tree
//!
//! This crate never spawns processes itself, so the external tools can be
//! replaced with fakes in tests.

pub mod config;
pub mod error;
pub mod exclude;
pub mod path;
pub mod publisher;
pub mod traits;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use exclude::ExclusionSet;
pub use path::{RemotePath, object_key};
pub use publisher::Publisher;
pub use traits::{MimeDetector, ObjectStore};
