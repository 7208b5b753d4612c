mod block;
mod property_value;
mod rich_text;

pub use block::{Block, BlockVisitor, ImageBlock, TextBlock, ToggleBlock};
pub use property_value::{PageRecord, PropertyValue};
pub use rich_text::{Annotations, RichTextRun};

use crate::types::{PageId, Slug};
use serde::{Deserialize, Serialize};

/// Which database a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Post,
    Quote,
}

impl std::fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentKind::Post => write!(f, "post"),
            DocumentKind::Quote => write!(f, "quote"),
        }
    }
}

/// A published blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: PageId,
    pub title: String,
    pub slug: Slug,
    /// Value of the `Type` select, empty when unset.
    pub doc_type: String,
    pub created: String,
    pub edited: String,
    /// `YYYY-MM-DD`
    pub published: String,
    pub featured: bool,
    pub description: String,
    pub completeness: String,
}

/// A saved quote, linked to the resource it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub id: PageId,
    pub title: String,
    pub slug: Slug,
    /// Value of the source's `Source Type`, empty when unset.
    pub doc_type: String,
    pub created: String,
    pub edited: String,
    pub resource: String,
    pub author: String,
    pub source_url: String,
}

/// Anything that gets rendered to its own Markdown file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Document {
    Post(Post),
    Quote(Quote),
}

impl Document {
    pub fn id(&self) -> &PageId {
        match self {
            Document::Post(p) => &p.id,
            Document::Quote(q) => &q.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Document::Post(p) => &p.title,
            Document::Quote(q) => &q.title,
        }
    }

    pub fn slug(&self) -> &Slug {
        match self {
            Document::Post(p) => &p.slug,
            Document::Quote(q) => &q.slug,
        }
    }

    pub fn kind(&self) -> DocumentKind {
        match self {
            Document::Post(_) => DocumentKind::Post,
            Document::Quote(_) => DocumentKind::Quote,
        }
    }
}
