// src/sync.rs
//! One publishing run, from catalog listing to image downloads.
//!
//! Documents are processed one at a time. Per document: fetch every block,
//! record its backlinks, render, write. Malformed documents are skipped and
//! fail the run status; write failures abort the run.

use crate::api::{fetch_all_blocks, NotionRepository};
use crate::backlinks::BacklinkGraph;
use crate::catalog::{CatalogListing, DocumentCatalog, SlugIndex};
use crate::config::SyncConfig;
use crate::error::AppError;
use crate::formatting::BlockRenderer;
use crate::model::{Document, Quote};
use crate::output::{
    build_post_index, dispatch_downloads, write_post_index, ImageQueue, OutputLayout,
};
use crate::pipeline::{ImageFetcher, MarkdownSink};
use crate::types::{BlockId, DatabaseId, PageId};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// State accumulated across the documents of a run.
#[derive(Debug, Default)]
pub struct RunContext {
    pub backlinks: BacklinkGraph,
    pub images: ImageQueue,
}

/// A document written during the run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncedDocument {
    pub id: PageId,
    /// Path of the written file relative to the blog root.
    pub rendered_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncStatus {
    /// False when any catalog entry or document had to be skipped.
    pub success: bool,
    pub documents: Vec<SyncedDocument>,
}

impl Default for SyncStatus {
    fn default() -> Self {
        Self {
            success: true,
            documents: Vec::new(),
        }
    }
}

/// Where documents come from.
#[derive(Debug, Clone)]
pub struct SyncSources {
    pub post_databases: Vec<DatabaseId>,
    pub quote_database: Option<DatabaseId>,
    pub resource_database: Option<DatabaseId>,
}

impl From<&SyncConfig> for SyncSources {
    fn from(config: &SyncConfig) -> Self {
        Self {
            post_databases: config.post_databases.clone(),
            quote_database: config.quote_database.clone(),
            resource_database: config.resource_database.clone(),
        }
    }
}

/// Drives a run against a repository, a sink and an optional image fetcher.
pub struct SyncRun<'a, R: NotionRepository + ?Sized> {
    repo: &'a R,
    sink: &'a dyn MarkdownSink,
    fetcher: Option<Arc<dyn ImageFetcher>>,
    sources: SyncSources,
    layout: OutputLayout,
    max_block_pages: u32,
}

impl<'a, R: NotionRepository + ?Sized> SyncRun<'a, R> {
    pub fn new(
        repo: &'a R,
        sink: &'a dyn MarkdownSink,
        sources: SyncSources,
        layout: OutputLayout,
        max_block_pages: u32,
    ) -> Self {
        Self {
            repo,
            sink,
            fetcher: None,
            sources,
            layout,
            max_block_pages,
        }
    }

    /// Downloads queued post images through `fetcher` at the end of the run.
    pub fn with_image_fetcher(mut self, fetcher: Arc<dyn ImageFetcher>) -> Self {
        self.fetcher = Some(fetcher);
        self
    }

    pub async fn execute(&self) -> Result<SyncStatus, AppError> {
        let catalog = DocumentCatalog::new(self.repo, self.max_block_pages);
        let mut status = SyncStatus::default();

        let posts = catalog.list_posts(&self.sources.post_databases).await;
        let quotes = self.list_quotes(&catalog).await;
        if posts.skipped > 0 || quotes.skipped > 0 {
            status.success = false;
        }

        let slugs = SlugIndex::build(&posts.documents, &quotes.documents);
        log::info!(
            "Publishing {} posts and {} quotes",
            slugs.posts.len(),
            slugs.quotes.len()
        );

        let renderer = BlockRenderer::new(self.repo, &slugs);
        let mut context = RunContext::default();

        let documents = posts
            .documents
            .iter()
            .cloned()
            .map(Document::Post)
            .chain(quotes.documents.into_iter().map(Document::Quote));
        for document in documents {
            self.sync_document(&document, &renderer, &slugs, &mut context, &mut status)
                .await?;
        }

        let index = build_post_index(&posts.documents, &context.backlinks);
        write_post_index(self.sink, &self.layout.post_index_path(), &index)?;

        match &self.fetcher {
            Some(fetcher) if !context.images.is_empty() => {
                dispatch_downloads(context.images, Arc::clone(fetcher), &self.layout).await;
            }
            Some(_) => {}
            None => log::info!("Skipping {} image downloads", context.images.len()),
        }

        log::info!(
            "Run finished: {} documents written, success = {}",
            status.documents.len(),
            status.success
        );
        Ok(status)
    }

    async fn list_quotes(&self, catalog: &DocumentCatalog<'_, R>) -> CatalogListing<Quote> {
        let Some(quote_database) = &self.sources.quote_database else {
            return CatalogListing::default();
        };

        let resources = match &self.sources.resource_database {
            Some(database) => catalog.list_resources(database).await,
            None => HashMap::new(),
        };
        catalog.list_quotes(quote_database, &resources).await
    }

    async fn sync_document(
        &self,
        document: &Document,
        renderer: &BlockRenderer<'_, R>,
        slugs: &SlugIndex,
        context: &mut RunContext,
        status: &mut SyncStatus,
    ) -> Result<(), AppError> {
        // A page's id doubles as the id of its top-level block list.
        let page_block: BlockId = document.id().cast();
        let blocks = fetch_all_blocks(self.repo, &page_block, self.max_block_pages).await;
        if blocks.truncated {
            log::warn!(
                "'{}' has more than {} blocks; the rest is dropped",
                document.slug(),
                blocks.total_fetched()
            );
        }

        context.backlinks.scan(&blocks.items, document.slug(), slugs);

        let markdown = match renderer
            .render_document(document, &blocks.items, &mut context.images)
            .await
        {
            Ok(markdown) => markdown,
            Err(e) => {
                log::error!("Skipping {} '{}': {}", document.kind(), document.title(), e);
                status.success = false;
                return Ok(());
            }
        };

        let relative = self
            .layout
            .relative_document_path(document.kind(), document.slug());
        self.sink
            .write(&self.layout.blog_dir().join(&relative), markdown.as_str())?;

        status.documents.push(SyncedDocument {
            id: document.id().clone(),
            rendered_name: relative.to_string_lossy().into_owned(),
        });
        Ok(())
    }
}
