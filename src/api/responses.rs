// src/api/responses.rs
//! Wire shapes of the Notion API responses this tool reads.
//!
//! Object payloads are decoded by `notion-client`'s serde types; the envelopes
//! around them stay loose (`serde_json::Value`) so one undecodable block or
//! property never takes down a whole page of results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

pub use notion_client::objects::{
    block::Block as NotionBlock, error::Error as NotionError, page::PageProperty,
    rich_text::RichText as NotionRichText,
};

/// Generic paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    #[serde(default = "list_object")]
    pub object: String,
    pub results: Vec<T>,
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

fn list_object() -> String {
    "list".to_string()
}

impl<T> PaginatedResponse<T> {
    /// A final page holding `results`.
    pub fn last(results: Vec<T>) -> Self {
        Self {
            object: list_object(),
            results,
            next_cursor: None,
            has_more: false,
        }
    }

    /// A page followed by another at `cursor`.
    pub fn with_more(results: Vec<T>, cursor: impl Into<String>) -> Self {
        Self {
            object: list_object(),
            results,
            next_cursor: Some(cursor.into()),
            has_more: true,
        }
    }

    pub fn map_results<U, E>(
        self,
        f: impl FnMut(T) -> Result<U, E>,
    ) -> Result<PaginatedResponse<U>, E> {
        Ok(PaginatedResponse {
            object: self.object,
            results: self.results.into_iter().map(f).collect::<Result<_, _>>()?,
            next_cursor: self.next_cursor,
            has_more: self.has_more,
        })
    }
}

/// A page as returned by a database query, with properties left undecoded.
///
/// Timestamps are kept as the API's strings so front matter can reuse them
/// verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct RawPage {
    pub id: String,
    pub created_time: String,
    pub last_edited_time: String,
    #[serde(default)]
    pub properties: HashMap<String, Value>,
}

/// Block children response before per-block decoding
pub type RetrieveBlockChildrenResponse = PaginatedResponse<Value>;

/// Database query response before per-page decoding
pub type QueryDatabaseResponse = PaginatedResponse<RawPage>;
