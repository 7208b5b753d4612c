// tests/common/mod.rs
//! Shared fakes for integration tests: an in-memory workspace fed from JSON
//! fixtures, an in-memory sink and a recording image fetcher.
#![allow(dead_code)]

use async_trait::async_trait;
use notion2blog::{
    parse_blocks_pagination, parse_pages_pagination, ApiResponse, AppError, Block, BlockId,
    DatabaseId, ImageFetcher, MarkdownSink, NotionRepository, PageRecord, PaginatedResponse,
};
use reqwest::StatusCode;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const POSTS_DB: &str = "11111111-1111-1111-1111-111111111111";
pub const QUOTES_DB: &str = "22222222-2222-2222-2222-222222222222";
pub const RESOURCES_DB: &str = "33333333-3333-3333-3333-333333333333";
pub const ALPHA: &str = "aaaaaaaa-0000-4000-8000-000000000001";
pub const BETA: &str = "bbbbbbbb-0000-4000-8000-000000000002";
pub const QUOTE: &str = "cccccccc-0000-4000-8000-000000000003";
pub const TOGGLE: &str = "eeeeeeee-0000-4000-8000-000000000005";
/// Cursor linking the two pages of Alpha's blocks.
pub const ALPHA_PAGE_2: &str = "a1000000-0000-4000-8000-000000000003";

pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read fixture {}: {}", path.display(), e))
}

fn ok_response(body: String, url: &str) -> ApiResponse<String> {
    ApiResponse {
        data: body,
        status: StatusCode::OK,
        url: url.to_string(),
    }
}

pub fn blocks_fixture(name: &str) -> PaginatedResponse<Block> {
    parse_blocks_pagination(ok_response(fixture(name), name)).expect("block fixture parses")
}

pub fn pages_fixture(name: &str) -> PaginatedResponse<PageRecord> {
    parse_pages_pagination(ok_response(fixture(name), name)).expect("page fixture parses")
}

/// Workspace served from memory. Listings are keyed by id and cursor;
/// anything not registered fails like an unreachable API.
#[derive(Default)]
pub struct FixtureWorkspace {
    databases: HashMap<DatabaseId, PaginatedResponse<PageRecord>>,
    children: HashMap<(BlockId, Option<String>), PaginatedResponse<Block>>,
    filters: Mutex<Vec<(DatabaseId, Option<Value>)>>,
    listings: Mutex<Vec<(BlockId, Option<String>)>>,
}

impl FixtureWorkspace {
    pub fn new() -> Self {
        Self::default()
    }

    /// The Alpha/Beta blog with one quote, all from fixtures.
    pub fn blog() -> Self {
        let mut workspace = Self::new();
        workspace.add_database(POSTS_DB, pages_fixture("posts_query.json"));
        workspace.add_database(QUOTES_DB, pages_fixture("quotes_query.json"));
        workspace.add_database(RESOURCES_DB, pages_fixture("resources_query.json"));
        workspace.add_children(ALPHA, None, blocks_fixture("alpha_blocks_page_1.json"));
        workspace.add_children(
            ALPHA,
            Some(ALPHA_PAGE_2),
            blocks_fixture("alpha_blocks_page_2.json"),
        );
        workspace.add_children(TOGGLE, None, blocks_fixture("toggle_children.json"));
        workspace.add_children(BETA, None, blocks_fixture("beta_blocks.json"));
        workspace.add_children(QUOTE, None, blocks_fixture("quote_blocks.json"));
        workspace
    }

    pub fn add_database(&mut self, id: &str, rows: PaginatedResponse<PageRecord>) {
        self.databases.insert(DatabaseId::parse(id).unwrap(), rows);
    }

    pub fn add_children(
        &mut self,
        id: &str,
        cursor: Option<&str>,
        page: PaginatedResponse<Block>,
    ) {
        self.children.insert(
            (BlockId::parse(id).unwrap(), cursor.map(str::to_string)),
            page,
        );
    }

    pub fn remove_children(&mut self, id: &str) {
        let id = BlockId::parse(id).unwrap();
        self.children.retain(|(block, _), _| block != &id);
    }

    pub fn filters(&self) -> Vec<(DatabaseId, Option<Value>)> {
        self.filters.lock().unwrap().clone()
    }

    pub fn listings(&self) -> Vec<(BlockId, Option<String>)> {
        self.listings.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotionRepository for FixtureWorkspace {
    async fn query_database(
        &self,
        database_id: &DatabaseId,
        filter: Option<&Value>,
        _cursor: Option<String>,
    ) -> Result<PaginatedResponse<PageRecord>, AppError> {
        self.filters
            .lock()
            .unwrap()
            .push((database_id.clone(), filter.cloned()));
        self.databases
            .get(database_id)
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse(format!("no database {}", database_id)))
    }

    async fn list_block_children(
        &self,
        block_id: &BlockId,
        cursor: Option<String>,
    ) -> Result<PaginatedResponse<Block>, AppError> {
        self.listings
            .lock()
            .unwrap()
            .push((block_id.clone(), cursor.clone()));
        self.children
            .get(&(block_id.clone(), cursor))
            .cloned()
            .ok_or_else(|| AppError::MalformedResponse(format!("no children for {}", block_id)))
    }
}

/// Keeps written files in memory, keyed by full path.
#[derive(Default)]
pub struct MemorySink {
    files: Mutex<BTreeMap<PathBuf, String>>,
}

impl MemorySink {
    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.lock().unwrap().get(path.as_ref()).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.lock().unwrap().keys().cloned().collect()
    }
}

impl MarkdownSink for MemorySink {
    fn write(&self, path: &Path, contents: &str) -> Result<(), AppError> {
        self.files
            .lock()
            .unwrap()
            .insert(path.to_path_buf(), contents.to_string());
        Ok(())
    }
}

/// Rejects every write.
pub struct ReadOnlySink;

impl MarkdownSink for ReadOnlySink {
    fn write(&self, path: &Path, _contents: &str) -> Result<(), AppError> {
        Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("read-only: {}", path.display()),
        )))
    }
}

/// Records every requested download.
#[derive(Default)]
pub struct RecordingFetcher {
    pub requests: Mutex<Vec<(String, PathBuf)>>,
}

#[async_trait]
impl ImageFetcher for RecordingFetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), AppError> {
        self.requests
            .lock()
            .unwrap()
            .push((url.to_string(), destination.to_path_buf()));
        Ok(())
    }
}
