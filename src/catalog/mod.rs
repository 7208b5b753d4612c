// src/catalog/mod.rs
//! Discovering what to publish.
//!
//! The catalog lists the post, quote and resource databases and builds the
//! title → slug maps mentions are resolved against. The maps are complete
//! before any document is rendered.

mod properties;

pub use properties::{post_from_record, quote_from_record, resource_name};

use crate::api::{fetch_all_rows, NotionRepository};
use crate::constants::PUBLISHED_PROPERTY;
use crate::error::AppError;
use crate::model::{PageRecord, Post, Quote};
use crate::types::{DatabaseId, PageId, Slug};
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet};

/// Title → slug for one kind of document, in catalog order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlugMap(IndexMap<String, Slug>);

impl SlugMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later titles replace earlier ones.
    pub fn insert(&mut self, title: impl Into<String>, slug: Slug) {
        let title = title.into();
        if let Some(previous) = self.0.insert(title.clone(), slug) {
            log::warn!("Duplicate title '{}' (was slug '{}')", title, previous);
        }
    }

    pub fn get(&self, title: &str) -> Option<&Slug> {
        self.0.get(title)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.0.contains_key(title)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, Slug)> for SlugMap {
    fn from_iter<I: IntoIterator<Item = (String, Slug)>>(iter: I) -> Self {
        let mut map = SlugMap::new();
        for (title, slug) in iter {
            map.insert(title, slug);
        }
        map
    }
}

/// Both slug maps, shared read-only for the whole run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlugIndex {
    pub posts: SlugMap,
    pub quotes: SlugMap,
}

impl SlugIndex {
    pub fn build(posts: &[Post], quotes: &[Quote]) -> Self {
        Self {
            posts: posts
                .iter()
                .map(|p| (p.title.clone(), p.slug.clone()))
                .collect(),
            quotes: quotes
                .iter()
                .map(|q| (q.title.clone(), q.slug.clone()))
                .collect(),
        }
    }
}

/// Documents read from one or more databases.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogListing<T> {
    pub documents: Vec<T>,
    /// Rows that could not be turned into documents.
    pub skipped: usize,
}

impl<T> Default for CatalogListing<T> {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            skipped: 0,
        }
    }
}

/// Filter selecting posts marked ready to publish.
pub fn published_filter() -> Value {
    json!({
        "property": PUBLISHED_PROPERTY,
        "checkbox": { "equals": true }
    })
}

/// Lists documents through a `NotionRepository`.
pub struct DocumentCatalog<'a, R: NotionRepository + ?Sized> {
    repo: &'a R,
    max_pages: u32,
}

impl<'a, R: NotionRepository + ?Sized> DocumentCatalog<'a, R> {
    pub fn new(repo: &'a R, max_pages: u32) -> Self {
        Self { repo, max_pages }
    }

    /// Published posts of every database, concatenated in database order.
    pub async fn list_posts(&self, databases: &[DatabaseId]) -> CatalogListing<Post> {
        let filter = published_filter();
        let mut listing = CatalogListing::default();

        for database in databases {
            let rows = fetch_all_rows(self.repo, database, Some(&filter), self.max_pages).await;
            log::info!("Found {} published posts in {}", rows.items.len(), database);
            collect(&mut listing, &rows.items, post_from_record);
        }

        drop_duplicate_slugs(&mut listing, |post: &Post| &post.slug);
        listing
    }

    /// Resource id → name.
    pub async fn list_resources(&self, database: &DatabaseId) -> HashMap<PageId, String> {
        let rows = fetch_all_rows(self.repo, database, None, self.max_pages).await;

        rows.items
            .iter()
            .filter_map(|record| match resource_name(record) {
                Ok(name) => Some((record.id.clone(), name)),
                Err(e) => {
                    log::warn!("Skipping resource: {}", e);
                    None
                }
            })
            .collect()
    }

    pub async fn list_quotes(
        &self,
        database: &DatabaseId,
        resources: &HashMap<PageId, String>,
    ) -> CatalogListing<Quote> {
        let rows = fetch_all_rows(self.repo, database, None, self.max_pages).await;
        log::info!("Found {} quotes in {}", rows.items.len(), database);

        let mut listing = CatalogListing::default();
        collect(&mut listing, &rows.items, |record| {
            quote_from_record(record, resources)
        });
        drop_duplicate_slugs(&mut listing, |quote: &Quote| &quote.slug);
        listing
    }
}

fn collect<T>(
    listing: &mut CatalogListing<T>,
    records: &[PageRecord],
    convert: impl Fn(&PageRecord) -> Result<T, AppError>,
) {
    for record in records {
        match convert(record) {
            Ok(document) => listing.documents.push(document),
            Err(e) => {
                log::error!("Skipping catalog entry: {}", e);
                listing.skipped += 1;
            }
        }
    }
}

/// Keeps the first document of each slug; later ones would overwrite its
/// file, so they are dropped and counted as skipped.
fn drop_duplicate_slugs<T>(listing: &mut CatalogListing<T>, slug_of: impl Fn(&T) -> &Slug) {
    let mut seen = HashSet::new();
    let before = listing.documents.len();
    listing.documents.retain(|document| {
        let slug = slug_of(document);
        let first = seen.insert(slug.clone());
        if !first {
            log::error!("Skipping catalog entry: slug '{}' is already taken", slug);
        }
        first
    });
    listing.skipped += before - listing.documents.len();
}
