// src/output/writer.rs
//! Performs the actual file I/O for rendered documents.
//!
//! This module is the only place where Markdown and index files are written,
//! keeping the rest of the codebase pure and testable.

use crate::error::AppError;
use crate::pipeline::MarkdownSink;
use std::fs;
use std::path::Path;

/// Writes files under their full path, creating missing directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSink;

impl MarkdownSink for FileSink {
    fn write(&self, path: &Path, contents: &str) -> Result<(), AppError> {
        write_file(path, contents)
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(())
}
