// src/output/index.rs
//! The `posts.json` listing consumed by the blog front end.

use crate::backlinks::BacklinkGraph;
use crate::error::AppError;
use crate::model::Post;
use crate::pipeline::MarkdownSink;
use crate::types::Slug;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostIndexEntry {
    pub title: String,
    pub published: String,
    pub featured: bool,
    pub edited: String,
    pub description: String,
    pub slug: Slug,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub completeness: String,
    pub backlinks: Vec<Slug>,
}

impl PostIndexEntry {
    pub fn new(post: &Post, graph: &BacklinkGraph) -> Self {
        Self {
            title: post.title.clone(),
            published: post.published.clone(),
            featured: post.featured,
            edited: post.edited.clone(),
            description: post.description.clone(),
            slug: post.slug.clone(),
            doc_type: post.doc_type.clone(),
            completeness: post.completeness.clone(),
            backlinks: graph.backlinks_for(&post.slug),
        }
    }
}

/// One entry per post, in catalog order.
pub fn build_post_index(posts: &[Post], graph: &BacklinkGraph) -> Vec<PostIndexEntry> {
    posts
        .iter()
        .map(|post| PostIndexEntry::new(post, graph))
        .collect()
}

pub fn write_post_index(
    sink: &dyn MarkdownSink,
    path: &Path,
    entries: &[PostIndexEntry],
) -> Result<(), AppError> {
    let json = serde_json::to_string(entries).map_err(|source| AppError::JsonWrite {
        path: path.to_path_buf(),
        source,
    })?;
    sink.write(path, &json)?;
    log::info!("Indexed {} posts", entries.len());
    Ok(())
}
