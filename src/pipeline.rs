// src/pipeline.rs
//! Capability traits for the two effects a sync run has besides reading Notion.
//!
//! Each trait describes a single capability, enabling testing the run in
//! isolation from the filesystem and the network.

use crate::error::AppError;
use std::path::Path;

/// Persists rendered text at a path, replacing whatever was there.
pub trait MarkdownSink {
    fn write(&self, path: &Path, contents: &str) -> Result<(), AppError>;
}

/// Downloads one remote file to a local destination.
#[async_trait::async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), AppError>;
}
