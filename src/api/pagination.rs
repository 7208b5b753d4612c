// src/api/pagination.rs
//! Bounded cursor pagination.
//!
//! A request failure ends the listing early: what was gathered so far is
//! returned and the failure is logged, never propagated.

use super::responses::PaginatedResponse;
use super::NotionRepository;
use crate::error::AppError;
use crate::model::{Block, PageRecord};
use crate::types::{BlockId, DatabaseId};
use serde_json::Value;

/// Items gathered by a paginated listing, in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub pages_fetched: u32,
    /// The page cap was reached while the source still had more.
    pub truncated: bool,
    /// A request failed and the listing stopped early.
    pub interrupted: bool,
}

impl<T> PaginationResult<T> {
    pub fn total_fetched(&self) -> usize {
        self.items.len()
    }
}

/// Fetches pages through `fetch_fn` until the source runs out or `max_pages`
/// requests have been made.
pub async fn fetch_all_pages<T, F, Fut>(
    what: &str,
    mut fetch_fn: F,
    max_pages: u32,
) -> PaginationResult<T>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: std::future::Future<Output = Result<PaginatedResponse<T>, AppError>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages_fetched = 0u32;
    let mut truncated = false;
    let mut interrupted = false;

    loop {
        if pages_fetched >= max_pages {
            log::debug!(
                "Reached maximum page limit of {} for {}; dropping the remainder",
                max_pages,
                what
            );
            truncated = true;
            break;
        }

        let response = match fetch_fn(cursor.take()).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("Failed to fetch {} (page {}): {}", what, pages_fetched + 1, e);
                if let AppError::NotionService { code, .. } = &e {
                    if code.is_access_problem() {
                        log::error!("Check that the integration has been shared with {}", what);
                    }
                }
                interrupted = true;
                break;
            }
        };
        pages_fetched += 1;

        let has_more = response.has_more;
        cursor = response.next_cursor;
        items.extend(response.results);

        if !has_more || cursor.is_none() {
            break;
        }
    }

    PaginationResult {
        items,
        pages_fetched,
        truncated,
        interrupted,
    }
}

/// All top-level blocks of a page, flattened in order.
pub async fn fetch_all_blocks<R>(
    repo: &R,
    block_id: &BlockId,
    max_pages: u32,
) -> PaginationResult<Block>
where
    R: NotionRepository + ?Sized,
{
    let what = format!("children of block {}", block_id);
    fetch_all_pages(
        &what,
        move |cursor| repo.list_block_children(block_id, cursor),
        max_pages,
    )
    .await
}

/// Every row of a database matching `filter`.
pub async fn fetch_all_rows<R>(
    repo: &R,
    database_id: &DatabaseId,
    filter: Option<&Value>,
    max_pages: u32,
) -> PaginationResult<PageRecord>
where
    R: NotionRepository + ?Sized,
{
    let what = format!("rows of database {}", database_id);
    fetch_all_pages(
        &what,
        move |cursor| repo.query_database(database_id, filter, cursor),
        max_pages,
    )
    .await
}
