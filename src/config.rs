// src/config.rs
use crate::constants::{
    DEFAULT_ERROR_LOG, DEFAULT_MAX_BLOCK_PAGES, DEFAULT_POSTS_DIRECTORY, DEFAULT_QUOTES_DIRECTORY,
    MAX_BLOCK_PAGES_LIMIT,
};
use crate::error::AppError;
use crate::output::OutputLayout;
use crate::types::{ApiKey, DatabaseId, ValidationError};
use clap::Parser;
use std::path::PathBuf;

/// Parsed command-line input.
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Root of the blog repository (falls back to BLOG_DIRECTORY)
    #[arg(long)]
    pub blog_dir: Option<String>,

    /// Post directory relative to the blog root (falls back to POSTS_DIRECTORY, then "src/posts")
    #[arg(long)]
    pub posts_dir: Option<String>,

    /// Quote directory relative to the blog root (falls back to QUOTES_DIRECTORY, then "src/quotes")
    #[arg(long)]
    pub quotes_dir: Option<String>,

    /// Maximum number of 100-block pages fetched per document
    #[arg(long, default_value_t = DEFAULT_MAX_BLOCK_PAGES)]
    pub max_block_pages: u32,

    /// Do not download post images
    #[arg(long, default_value_t = false)]
    pub skip_images: bool,

    /// Do not publish quotes even when NOTION_QUOTE_DB is set
    #[arg(long, default_value_t = false)]
    pub skip_quotes: bool,

    /// Append-only log receiving every error of the run
    #[arg(long, default_value = DEFAULT_ERROR_LOG)]
    pub error_log: String,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Resolved run configuration, validated before anything is fetched.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub api_key: ApiKey,
    /// Post databases, listed in this order.
    pub post_databases: Vec<DatabaseId>,
    pub quote_database: Option<DatabaseId>,
    pub resource_database: Option<DatabaseId>,
    pub blog_dir: PathBuf,
    pub posts_dir: PathBuf,
    pub quotes_dir: PathBuf,
    pub max_block_pages: u32,
    pub skip_images: bool,
    pub error_log: PathBuf,
    pub verbose: bool,
}

impl SyncConfig {
    /// Resolves a complete configuration from CLI input and the process environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Like `resolve`, reading variables through `env`.
    pub fn resolve_with(
        cli: CommandLineInput,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, AppError> {
        // Blank variables count as unset.
        let var = |name: &str| env(name).filter(|value| !value.trim().is_empty());

        let api_key = var("NOTION_TOKEN").ok_or_else(|| {
            AppError::MissingConfiguration("NOTION_TOKEN environment variable not set".to_string())
        })?;
        let api_key = ApiKey::new(api_key)?;

        let post_databases = var("NOTION_DATABASE_ID")
            .ok_or_else(|| {
                AppError::MissingConfiguration(
                    "NOTION_DATABASE_ID environment variable not set".to_string(),
                )
            })
            .and_then(|ids| parse_database_list(&ids))?;

        let quote_database = if cli.skip_quotes {
            None
        } else {
            var("NOTION_QUOTE_DB")
                .map(|id| DatabaseId::parse(id.trim()))
                .transpose()?
        };
        let resource_database = var("NOTION_RESOURCE_DB")
            .map(|id| DatabaseId::parse(id.trim()))
            .transpose()?;
        if quote_database.is_some() && resource_database.is_none() {
            log::warn!("NOTION_RESOURCE_DB is not set; quotes will have no resource names");
        }

        let blog_dir = cli.blog_dir.or_else(|| var("BLOG_DIRECTORY")).ok_or_else(|| {
            AppError::MissingConfiguration(
                "blog directory not set (use --blog-dir or BLOG_DIRECTORY)".to_string(),
            )
        })?;
        let posts_dir = cli
            .posts_dir
            .or_else(|| var("POSTS_DIRECTORY"))
            .unwrap_or_else(|| DEFAULT_POSTS_DIRECTORY.to_string());
        let quotes_dir = cli
            .quotes_dir
            .or_else(|| var("QUOTES_DIRECTORY"))
            .unwrap_or_else(|| DEFAULT_QUOTES_DIRECTORY.to_string());

        if cli.max_block_pages == 0 || cli.max_block_pages > MAX_BLOCK_PAGES_LIMIT {
            return Err(ValidationError::OutOfBounds {
                value: cli.max_block_pages,
                min: 1,
                max: MAX_BLOCK_PAGES_LIMIT,
            }
            .into());
        }

        Ok(SyncConfig {
            api_key,
            post_databases,
            quote_database,
            resource_database,
            blog_dir: PathBuf::from(blog_dir),
            posts_dir: PathBuf::from(posts_dir),
            quotes_dir: PathBuf::from(quotes_dir),
            max_block_pages: cli.max_block_pages,
            skip_images: cli.skip_images,
            error_log: PathBuf::from(cli.error_log),
            verbose: cli.verbose,
        })
    }

    pub fn layout(&self) -> OutputLayout {
        OutputLayout::new(&self.blog_dir, &self.posts_dir, &self.quotes_dir)
    }
}

/// Comma-separated ids; empty entries are ignored.
fn parse_database_list(ids: &str) -> Result<Vec<DatabaseId>, AppError> {
    let databases = ids
        .split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(DatabaseId::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if databases.is_empty() {
        return Err(ValidationError::EmptyField("NOTION_DATABASE_ID").into());
    }
    Ok(databases)
}
