// src/output/mod.rs
//! Everything a run leaves on disk.
//!
//! Path calculation is pure (`paths`); the sink and fetcher adapters are the
//! only places where I/O happens.

mod images;
mod index;
mod paths;
mod writer;

pub use images::{dispatch_downloads, DownloadReport, HttpImageFetcher, ImageDownload, ImageQueue};
pub use index::{build_post_index, write_post_index, PostIndexEntry};
pub use paths::{image_src, OutputLayout};
pub use writer::FileSink;
