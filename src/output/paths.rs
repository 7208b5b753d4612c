// src/output/paths.rs
//! Pure functions for path calculations.
//!
//! This module decides where every artifact of a run lands without
//! performing any I/O operations.

use crate::constants::{DOCUMENT_FILE_NAME, IMAGE_DIRECTORY, POST_INDEX_FILE};
use crate::model::DocumentKind;
use crate::types::Slug;
use std::path::{Path, PathBuf};

/// Directory layout of the blog being published into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    blog_dir: PathBuf,
    posts_dir: PathBuf,
    quotes_dir: PathBuf,
}

impl OutputLayout {
    /// `posts_dir` and `quotes_dir` are relative to `blog_dir`.
    pub fn new(
        blog_dir: impl Into<PathBuf>,
        posts_dir: impl Into<PathBuf>,
        quotes_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            blog_dir: blog_dir.into(),
            posts_dir: posts_dir.into(),
            quotes_dir: quotes_dir.into(),
        }
    }

    pub fn blog_dir(&self) -> &Path {
        &self.blog_dir
    }

    /// `{posts_dir|quotes_dir}/{slug}/index.md`, relative to the blog root.
    pub fn relative_document_path(&self, kind: DocumentKind, slug: &Slug) -> PathBuf {
        let section = match kind {
            DocumentKind::Post => &self.posts_dir,
            DocumentKind::Quote => &self.quotes_dir,
        };
        section.join(slug.as_str()).join(DOCUMENT_FILE_NAME)
    }

    pub fn document_path(&self, kind: DocumentKind, slug: &Slug) -> PathBuf {
        self.blog_dir.join(self.relative_document_path(kind, slug))
    }

    /// Where a downloaded post image is stored.
    pub fn image_path(&self, slug: &Slug, file_name: &str) -> PathBuf {
        self.blog_dir
            .join(IMAGE_DIRECTORY)
            .join(slug.as_str())
            .join(file_name)
    }

    pub fn post_index_path(&self) -> PathBuf {
        self.blog_dir.join(POST_INDEX_FILE)
    }
}

/// Public URL of a post image, as referenced from Markdown.
pub fn image_src(slug: &Slug, file_name: &str) -> String {
    format!("/{}/{}/{}", IMAGE_DIRECTORY, slug, file_name)
}
