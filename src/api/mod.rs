// src/api/mod.rs
//! Notion API interaction: the ability to retrieve content from a workspace.
//!
//! This module provides a data-oriented interface to the Notion API,
//! with clear separation between I/O operations, parsing, and business logic.

pub mod client;
pub mod notion_client_adapter;
pub mod pagination;
pub mod parser;
mod responses;

use crate::error::AppError;
use crate::model::{Block, PageRecord};
use crate::types::{BlockId, DatabaseId};
use serde_json::Value;

/// The ability to retrieve content from a Notion workspace.
///
/// Business logic depends on this trait, never on HTTP details. Each call
/// returns a single page of results; `pagination` walks the cursors.
#[async_trait::async_trait]
pub trait NotionRepository: Send + Sync {
    /// One page of the rows of `database_id` that match `filter`.
    async fn query_database(
        &self,
        database_id: &DatabaseId,
        filter: Option<&Value>,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<PageRecord>, AppError>;

    /// One page of the direct children of `block_id`.
    async fn list_block_children(
        &self,
        block_id: &BlockId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError>;
}

// Re-export the public interface
pub use client::NotionHttpClient;
pub use pagination::{fetch_all_blocks, fetch_all_pages, fetch_all_rows, PaginationResult};
pub use responses::{PaginatedResponse, RawPage};
