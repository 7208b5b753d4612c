// src/output/images.rs
//! Post images: queued while rendering, downloaded once every document is
//! written.

use super::paths::OutputLayout;
use crate::error::AppError;
use crate::pipeline::ImageFetcher;
use crate::types::Slug;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinSet;

/// One image to fetch into a post's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDownload {
    pub url: String,
    pub slug: Slug,
    pub file_name: String,
}

/// Downloads requested by the renderer, in render order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageQueue {
    downloads: Vec<ImageDownload>,
}

impl ImageQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, download: ImageDownload) {
        self.downloads.push(download);
    }

    /// Moves every download of `other` to the back of this queue.
    pub fn append(&mut self, other: &mut ImageQueue) {
        self.downloads.append(&mut other.downloads);
    }

    pub fn len(&self) -> usize {
        self.downloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.downloads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ImageDownload> {
        self.downloads.iter()
    }
}

/// Outcome of dispatching an `ImageQueue`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub succeeded: usize,
    pub failed: usize,
}

/// Starts every queued download and waits for all of them.
///
/// Failures are logged at `warn` and counted; they never fail the run.
pub async fn dispatch_downloads(
    queue: ImageQueue,
    fetcher: Arc<dyn ImageFetcher>,
    layout: &OutputLayout,
) -> DownloadReport {
    let mut tasks = JoinSet::new();

    for download in queue.downloads {
        let destination = layout.image_path(&download.slug, &download.file_name);
        let fetcher = Arc::clone(&fetcher);
        tasks.spawn(async move {
            let result = fetcher.fetch(&download.url, &destination).await;
            (download, result)
        });
    }

    let mut report = DownloadReport::default();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(()))) => report.succeeded += 1,
            Ok((download, Err(e))) => {
                log::warn!(
                    "Could not download {} for '{}': {}",
                    download.file_name,
                    download.slug,
                    e
                );
                report.failed += 1;
            }
            Err(e) => {
                log::warn!("Image download task failed: {}", e);
                report.failed += 1;
            }
        }
    }

    log::info!(
        "Downloaded {} images ({} failed)",
        report.succeeded,
        report.failed
    );
    report
}

/// Fetches images over HTTP and writes them with `tokio::fs`.
#[derive(Clone, Default)]
pub struct HttpImageFetcher {
    client: reqwest::Client,
}

impl HttpImageFetcher {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ImageFetcher for HttpImageFetcher {
    async fn fetch(&self, url: &str, destination: &Path) -> Result<(), AppError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| AppError::ImageDownload {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        let bytes = response.bytes().await?;

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(destination, &bytes).await?;

        log::debug!("Saved {} bytes to {}", bytes.len(), destination.display());
        Ok(())
    }
}
