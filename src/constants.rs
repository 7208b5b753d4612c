// src/constants.rs
//! Domain constants that define the operational boundaries of the system.
//!
//! Each constant is named for the domain concept it constrains, not its
//! technical role.

// ---------------------------------------------------------------------------
// Notion API boundaries
// ---------------------------------------------------------------------------

/// How many objects the Notion API returns per page of results.
pub const NOTION_API_PAGE_SIZE: usize = 100;

/// Default number of block-children requests per document.
///
/// With full pages this caps a document at 2000 top-level blocks; anything
/// beyond is dropped.
pub const DEFAULT_MAX_BLOCK_PAGES: u32 = 20;

/// Upper bound accepted for `--max-block-pages`.
pub const MAX_BLOCK_PAGES_LIMIT: u32 = 1000;

// ---------------------------------------------------------------------------
// Catalog property names
// ---------------------------------------------------------------------------

/// Checkbox that marks a post as ready to publish.
pub const PUBLISHED_PROPERTY: &str = "Published";

pub const NAME_PROPERTY: &str = "Name";
pub const SLUG_PROPERTY: &str = "Slug";
pub const CUSTOM_CREATED_PROPERTY: &str = "Custom Created";
pub const FEATURED_PROPERTY: &str = "Featured";
pub const DESCRIPTION_PROPERTY: &str = "Description";
pub const TYPE_PROPERTY: &str = "Type";
pub const COMPLETENESS_PROPERTY: &str = "Completeness";

pub const RESOURCE_PROPERTY: &str = "Resource";
pub const AUTHOR_PROPERTY: &str = "Author";
pub const SOURCE_PROPERTY: &str = "Source";
pub const SOURCE_TYPE_PROPERTY: &str = "Source Type";

// ---------------------------------------------------------------------------
// Output layout
// ---------------------------------------------------------------------------

pub const DEFAULT_POSTS_DIRECTORY: &str = "src/posts";
pub const DEFAULT_QUOTES_DIRECTORY: &str = "src/quotes";

/// Where downloaded post images live, relative to the blog root.
///
/// Also the public URL prefix used in rendered `<img>` tags.
pub const IMAGE_DIRECTORY: &str = "src/posts";

/// Aggregate post index, relative to the blog root.
pub const POST_INDEX_FILE: &str = "src/posts.json";

/// File name of every rendered document inside its slug directory.
pub const DOCUMENT_FILE_NAME: &str = "index.md";

pub const DEFAULT_ERROR_LOG: &str = "error.log";

// ---------------------------------------------------------------------------
// Rendering conventions
// ---------------------------------------------------------------------------

/// A text run starting with this character becomes a Markdown block quote.
pub const QUOTE_MARKER: char = '^';

/// Toggle titles containing this token render their children as a code fence.
pub const CODE_TOGGLE_TOKEN: &str = "Code";

/// Toggle titles containing this token emit their children verbatim.
pub const SVELTE_TOGGLE_TOKEN: &str = "Svelte";

/// Separates the toggle label from the fence language, as in `Code - rust`.
pub const TOGGLE_LANGUAGE_SEPARATOR: &str = "- ";

/// Link scheme marking a mention that points at a quote.
pub const QUOTE_LINK_SCHEME: &str = "quote:";

/// Estimated characters per block, used to pre-allocate output strings.
pub const CHARS_PER_BLOCK_ESTIMATE: usize = 256;

/// Maximum characters shown when previewing error response bodies.
pub const ERROR_BODY_PREVIEW_LENGTH: usize = 500;
