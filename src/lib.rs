// src/lib.rs
//! notion2blog library: publishes Notion posts and quotes as Markdown.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `CommandLineInput`, `SyncConfig`
//! - **Domain model**: `Document`, `Post`, `Quote`, `Block`, `RichTextRun`
//! - **Domain types**: `PageId`, `BlockId`, `DatabaseId`, `Slug`, `ApiKey`
//! - **API client**: `NotionRepository`, `NotionHttpClient`, parsers
//! - **Rendering**: `BlockRenderer`, `MentionResolver`, `front_matter`
//! - **Run**: `SyncRun`, `SyncStatus`, `BacklinkGraph`

pub mod api;
pub mod backlinks;
pub mod catalog;
pub mod config;
pub mod constants;
pub mod error;
pub mod formatting;
pub mod model;
pub mod output;
pub mod pipeline;
pub mod sync;
pub mod types;

// --- Error Handling ---
pub use crate::error::{AppError, NotionClientError, NotionErrorCode};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{CommandLineInput, SyncConfig};

// --- Domain Model ---
pub use crate::model::{
    Annotations, Block, BlockVisitor, Document, DocumentKind, ImageBlock, PageRecord, Post,
    PropertyValue, Quote, RichTextRun, TextBlock, ToggleBlock,
};

// --- Domain Types ---
pub use crate::types::{
    slugify, ApiKey, BlockId, DatabaseId, PageId, PropertyName, RenderedMarkdown, Slug,
    ValidatedUrl,
};

// --- API Client ---
pub use crate::api::{
    client::ApiResponse,
    fetch_all_blocks, fetch_all_rows,
    parser::{parse_blocks_pagination, parse_pages_pagination},
    NotionHttpClient, NotionRepository, PaginatedResponse, PaginationResult,
};

// --- Rendering ---
pub use crate::formatting::{front_matter, BlockRenderer, MentionResolver};

// --- Catalog & Run ---
pub use crate::backlinks::{BacklinkEdge, BacklinkGraph};
pub use crate::catalog::{DocumentCatalog, SlugIndex, SlugMap};
pub use crate::output::{FileSink, HttpImageFetcher, ImageQueue, OutputLayout, PostIndexEntry};
pub use crate::sync::{SyncRun, SyncSources, SyncStatus, SyncedDocument};

// --- Pipeline Traits ---
pub use crate::pipeline::{ImageFetcher, MarkdownSink};
