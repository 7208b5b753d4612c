// src/formatting/block_renderer.rs
//! Block rendering engine: converts a document's blocks to markdown.
//!
//! Blocks are rendered in one sequential pass. Toggles are the only blocks
//! whose children are fetched, and only when they are rendered.

use super::front_matter::front_matter;
use super::mentions::MentionResolver;
use super::rich_text::style_runs;
use crate::api::NotionRepository;
use crate::catalog::SlugIndex;
use crate::constants::{
    CHARS_PER_BLOCK_ESTIMATE, CODE_TOGGLE_TOKEN, SVELTE_TOGGLE_TOKEN, TOGGLE_LANGUAGE_SEPARATOR,
};
use crate::error::AppError;
use crate::model::{Block, Document, ImageBlock, RichTextRun, TextBlock, ToggleBlock};
use crate::output::{image_src, ImageDownload, ImageQueue};
use crate::types::{RenderedMarkdown, Slug, ValidatedUrl};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt::Write;

static IMAGE_FILE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[^/]+\.(png|jpg)").unwrap_or_else(|e| panic!("invalid image file pattern: {e}"))
});

/// Renders documents, fetching toggle children through `repo`.
pub struct BlockRenderer<'a, R: NotionRepository + ?Sized> {
    repo: &'a R,
    mentions: MentionResolver<'a>,
}

impl<'a, R: NotionRepository + ?Sized> BlockRenderer<'a, R> {
    pub fn new(repo: &'a R, slugs: &'a SlugIndex) -> Self {
        Self {
            repo,
            mentions: MentionResolver::new(slugs),
        }
    }

    /// Front matter followed by the rendered body.
    ///
    /// Image downloads requested while rendering reach `images` only when
    /// the whole document renders.
    pub async fn render_document(
        &self,
        document: &Document,
        blocks: &[Block],
        images: &mut ImageQueue,
    ) -> Result<RenderedMarkdown, AppError> {
        let mut document_images = ImageQueue::new();
        let body = self
            .render_blocks(document, blocks, &mut document_images)
            .await?;
        images.append(&mut document_images);

        let mut output = front_matter(document);
        output.push_str(&body);
        Ok(RenderedMarkdown::new(output))
    }

    /// Renders `blocks` in order. The first malformed block fails the whole
    /// sequence.
    pub async fn render_blocks(
        &self,
        document: &Document,
        blocks: &[Block],
        images: &mut ImageQueue,
    ) -> Result<String, AppError> {
        let mut output = String::with_capacity(blocks.len() * CHARS_PER_BLOCK_ESTIMATE);
        let mut image_count = 0usize;

        log::debug!(
            "Rendering {} blocks of '{}'",
            blocks.len(),
            document.slug()
        );

        for block in blocks {
            match block {
                Block::Paragraph(b) => {
                    write!(output, "\n{}\n", style_runs(&b.rich_text, &self.mentions))?;
                }
                Block::Heading1(b) => output.push_str(&render_heading(b, 1)?),
                Block::Heading2(b) => output.push_str(&render_heading(b, 2)?),
                Block::Heading3(b) => output.push_str(&render_heading(b, 3)?),
                Block::BulletedListItem(b) => {
                    write!(output, "\n - {}\n", style_runs(&b.rich_text, &self.mentions))?;
                }
                Block::Toggle(toggle) => {
                    output.push('\n');
                    output.push_str(&self.render_toggle(toggle).await?);
                }
                Block::Image(image) => {
                    // Quotes never carry images.
                    if let Document::Post(post) = document {
                        output.push_str(&render_image(image, &post.slug, image_count, images)?);
                        image_count += 1;
                    }
                }
                Block::Other { block_type } => {
                    log::debug!("Skipping unsupported block type '{}'", block_type);
                }
            }
        }

        Ok(output)
    }

    /// Code and Svelte toggles emit the text of their last child paragraph;
    /// any other toggle emits nothing.
    async fn render_toggle(&self, toggle: &ToggleBlock) -> Result<String, AppError> {
        let title = first_plain_text(&toggle.title).ok_or_else(|| {
            AppError::malformed(format!("toggle block {}", toggle.id), "toggle has no title")
        })?;

        let children = match self.repo.list_block_children(&toggle.id, None).await {
            Ok(page) => page.results,
            Err(e) => {
                log::error!("Failed to fetch children of toggle {}: {}", toggle.id, e);
                return Ok(String::new());
            }
        };

        let mut content: Option<String> = None;
        for child in &children {
            let Block::Paragraph(paragraph) = child else {
                log::debug!(
                    "Skipping {} child of toggle {}",
                    child.block_type(),
                    toggle.id
                );
                continue;
            };
            let text = first_plain_text(&paragraph.rich_text).ok_or_else(|| {
                AppError::malformed(
                    format!("paragraph block {} in toggle {}", paragraph.id, toggle.id),
                    "paragraph has no text",
                )
            })?;

            if title.contains(CODE_TOGGLE_TOKEN) {
                let language = title.split(TOGGLE_LANGUAGE_SEPARATOR).nth(1).unwrap_or("");
                content = Some(format!("```{}\n{}\n```\n", language, text));
            } else if title.contains(SVELTE_TOGGLE_TOKEN) {
                content = Some(format!("{}\n", text));
            }
        }

        Ok(content.unwrap_or_default())
    }
}

fn first_plain_text(runs: &[RichTextRun]) -> Option<&str> {
    runs.first().map(RichTextRun::plain_text)
}

fn render_heading(block: &TextBlock, level: usize) -> Result<String, AppError> {
    let text = first_plain_text(&block.rich_text).ok_or_else(|| {
        AppError::malformed(
            format!("heading_{} block {}", level, block.id),
            "heading has no text",
        )
    })?;
    Ok(format!("\n{} {}\n", "#".repeat(level), text))
}

fn render_image(
    image: &ImageBlock,
    slug: &Slug,
    index: usize,
    images: &mut ImageQueue,
) -> Result<String, AppError> {
    let extension = ValidatedUrl::parse(&image.url)
        .ok()
        .and_then(|url| image_extension(url.path()).map(str::to_owned))
        .ok_or_else(|| {
            AppError::malformed(
                format!("image block {}", image.id),
                format!("'{}' is neither a png nor a jpg", image.url),
            )
        })?;
    let file_name = format!("image-{}.{}", index, extension);
    let caption = first_plain_text(&image.caption).unwrap_or("");

    let html = format!(
        "\n<img src=\"{}\" alt=\"{}\" >\n",
        image_src(slug, &file_name),
        caption
    );

    images.push(ImageDownload {
        url: image.url.clone(),
        slug: slug.clone(),
        file_name,
    });
    Ok(html)
}

/// `png` or `jpg`, taken from the first file name in `path` carrying one.
fn image_extension(path: &str) -> Option<&str> {
    IMAGE_FILE_PATTERN
        .captures(path)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::PaginatedResponse;
    use crate::catalog::SlugMap;
    use crate::model::{Annotations, PageRecord, Post, Quote};
    use crate::types::{BlockId, DatabaseId, PageId};
    use pretty_assertions::assert_eq;
    use serde_json::Value;
    use std::collections::HashMap;

    /// Serves toggle children from memory; unknown ids fail.
    #[derive(Default)]
    struct ToggleChildren {
        children: HashMap<BlockId, Vec<Block>>,
    }

    #[async_trait::async_trait]
    impl NotionRepository for ToggleChildren {
        async fn query_database(
            &self,
            _database_id: &DatabaseId,
            _filter: Option<&Value>,
            _cursor: Option<String>,
        ) -> Result<PaginatedResponse<PageRecord>, AppError> {
            Ok(PaginatedResponse::last(Vec::new()))
        }

        async fn list_block_children(
            &self,
            block_id: &BlockId,
            _cursor: Option<String>,
        ) -> Result<PaginatedResponse<Block>, AppError> {
            self.children
                .get(block_id)
                .cloned()
                .map(PaginatedResponse::last)
                .ok_or_else(|| AppError::MalformedResponse(format!("no children for {}", block_id)))
        }
    }

    fn block_id(n: u8) -> BlockId {
        BlockId::parse(&format!("{:032x}", n)).unwrap()
    }

    fn text_block(n: u8, runs: Vec<RichTextRun>) -> TextBlock {
        TextBlock {
            id: block_id(n),
            rich_text: runs,
        }
    }

    fn post() -> Document {
        Document::Post(Post {
            id: PageId::parse("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa").unwrap(),
            title: "Alpha".to_string(),
            slug: Slug::from_title("alpha"),
            doc_type: "essay".to_string(),
            created: "2023-01-01T00:00:00.000Z".to_string(),
            edited: "2023-01-02T00:00:00.000Z".to_string(),
            published: "2023-01-01".to_string(),
            featured: false,
            description: String::new(),
            completeness: String::new(),
        })
    }

    fn quote() -> Document {
        Document::Quote(Quote {
            id: PageId::parse("bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb").unwrap(),
            title: "Wisdom".to_string(),
            slug: Slug::from_title("wisdom"),
            doc_type: String::new(),
            created: String::new(),
            edited: String::new(),
            resource: String::new(),
            author: String::new(),
            source_url: String::new(),
        })
    }

    fn slugs() -> SlugIndex {
        let mut posts = SlugMap::new();
        posts.insert("Beta", Slug::from_title("beta"));
        SlugIndex {
            posts,
            quotes: SlugMap::new(),
        }
    }

    fn image(n: u8, url: &str, caption: &str) -> Block {
        Block::Image(ImageBlock {
            id: block_id(n),
            url: url.to_string(),
            caption: if caption.is_empty() {
                vec![]
            } else {
                vec![RichTextRun::text(caption)]
            },
        })
    }

    #[tokio::test]
    async fn test_text_blocks() {
        let repo = ToggleChildren::default();
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let bold = RichTextRun::Text {
            content: "loud".to_string(),
            link: None,
            annotations: Annotations {
                bold: true,
                ..Annotations::default()
            },
        };
        let blocks = vec![
            Block::Heading1(text_block(1, vec![RichTextRun::text("Top"), bold.clone()])),
            Block::Paragraph(text_block(2, vec![
                RichTextRun::text("Read"),
                RichTextRun::mention("Beta"),
                bold,
            ])),
            Block::Heading3(text_block(3, vec![RichTextRun::text("Small")])),
            Block::BulletedListItem(text_block(4, vec![RichTextRun::text("item")])),
            Block::Other {
                block_type: "divider".to_string(),
            },
        ];

        let mut images = ImageQueue::new();
        let body = renderer
            .render_blocks(&post(), &blocks, &mut images)
            .await
            .unwrap();

        assert_eq!(
            body,
            "\n# Top\n\nRead [Beta](beta) **loud**\n\n### Small\n\n - item\n"
        );
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_heading_without_text_is_malformed() {
        let repo = ToggleChildren::default();
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let blocks = vec![Block::Heading2(text_block(1, vec![]))];
        let result = renderer
            .render_blocks(&post(), &blocks, &mut ImageQueue::new())
            .await;
        assert!(matches!(result, Err(AppError::MalformedContent { .. })));
    }

    #[tokio::test]
    async fn test_code_and_svelte_toggles_use_last_paragraph() {
        let mut repo = ToggleChildren::default();
        repo.children.insert(
            block_id(10),
            vec![
                Block::Paragraph(text_block(11, vec![RichTextRun::text("fn main() {}")])),
                Block::Other {
                    block_type: "divider".to_string(),
                },
                Block::Paragraph(text_block(12, vec![RichTextRun::text("let x = 1;")])),
            ],
        );
        repo.children.insert(
            block_id(20),
            vec![Block::Paragraph(text_block(21, vec![RichTextRun::text("<Chart />")]))],
        );
        repo.children.insert(
            block_id(30),
            vec![Block::Paragraph(text_block(31, vec![RichTextRun::text("hidden")]))],
        );
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let toggle = |n: u8, title: &str| {
            Block::Toggle(ToggleBlock {
                id: block_id(n),
                title: vec![RichTextRun::text(title)],
            })
        };
        let blocks = vec![
            toggle(10, "Code - rust"),
            toggle(20, "Svelte component"),
            toggle(30, "Spoilers"),
        ];

        let body = renderer
            .render_blocks(&post(), &blocks, &mut ImageQueue::new())
            .await
            .unwrap();

        assert_eq!(
            body,
            "\n```rust\nlet x = 1;\n```\n\n<Chart />\n\n"
        );
    }

    #[tokio::test]
    async fn test_code_toggle_without_language() {
        let mut repo = ToggleChildren::default();
        repo.children.insert(
            block_id(10),
            vec![Block::Paragraph(text_block(11, vec![RichTextRun::text("ls")]))],
        );
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let blocks = vec![Block::Toggle(ToggleBlock {
            id: block_id(10),
            title: vec![RichTextRun::text("Code")],
        })];
        let body = renderer
            .render_blocks(&post(), &blocks, &mut ImageQueue::new())
            .await
            .unwrap();
        assert_eq!(body, "\n```\nls\n```\n");
    }

    #[tokio::test]
    async fn test_toggle_paragraph_without_text_is_malformed() {
        let mut repo = ToggleChildren::default();
        repo.children.insert(
            block_id(10),
            vec![
                Block::Paragraph(text_block(11, vec![])),
                Block::Paragraph(text_block(12, vec![RichTextRun::text("second")])),
            ],
        );
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let blocks = vec![Block::Toggle(ToggleBlock {
            id: block_id(10),
            title: vec![RichTextRun::text("Code - js")],
        })];
        let result = renderer
            .render_blocks(&post(), &blocks, &mut ImageQueue::new())
            .await;

        assert!(matches!(result, Err(AppError::MalformedContent { .. })));
    }

    #[tokio::test]
    async fn test_failed_toggle_listing_renders_nothing() {
        let repo = ToggleChildren::default();
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let blocks = vec![Block::Toggle(ToggleBlock {
            id: block_id(99),
            title: vec![RichTextRun::text("Code - js")],
        })];
        let body = renderer
            .render_blocks(&post(), &blocks, &mut ImageQueue::new())
            .await
            .unwrap();
        assert_eq!(body, "\n");
    }

    #[tokio::test]
    async fn test_images_are_numbered_and_queued() {
        let repo = ToggleChildren::default();
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let blocks = vec![
            image(1, "https://s3.example.com/abc/photo.png?X-Amz=1", "A photo"),
            image(2, "https://s3.example.com/abc/diagram.jpg", ""),
        ];

        let mut images = ImageQueue::new();
        let body = renderer
            .render_blocks(&post(), &blocks, &mut images)
            .await
            .unwrap();

        assert_eq!(
            body,
            "\n<img src=\"/src/posts/alpha/image-0.png\" alt=\"A photo\" >\n\
             \n<img src=\"/src/posts/alpha/image-1.jpg\" alt=\"\" >\n"
        );
        let queued: Vec<_> = images
            .iter()
            .map(|d| (d.url.as_str(), d.file_name.as_str()))
            .collect();
        assert_eq!(
            queued,
            vec![
                ("https://s3.example.com/abc/photo.png?X-Amz=1", "image-0.png"),
                ("https://s3.example.com/abc/diagram.jpg", "image-1.jpg"),
            ]
        );
    }

    #[tokio::test]
    async fn test_quotes_skip_images() {
        let repo = ToggleChildren::default();
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let mut images = ImageQueue::new();
        let body = renderer
            .render_blocks(&quote(), &[image(1, "https://cdn/a.png", "")], &mut images)
            .await
            .unwrap();
        assert_eq!(body, "");
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_failed_document_queues_no_images() {
        let repo = ToggleChildren::default();
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let blocks = vec![
            image(1, "https://cdn/a.png", ""),
            image(2, "https://cdn/animation.gif", ""),
        ];
        let mut images = ImageQueue::new();
        let result = renderer.render_document(&post(), &blocks, &mut images).await;

        assert!(matches!(result, Err(AppError::MalformedContent { .. })));
        assert!(images.is_empty());
    }

    #[tokio::test]
    async fn test_render_document_prepends_front_matter() {
        let repo = ToggleChildren::default();
        let slugs = slugs();
        let renderer = BlockRenderer::new(&repo, &slugs);

        let blocks = vec![Block::Paragraph(text_block(1, vec![RichTextRun::text("^ wise words")]))];
        let rendered = renderer
            .render_document(&quote(), &blocks, &mut ImageQueue::new())
            .await
            .unwrap();

        assert!(rendered.as_str().starts_with("---\ntitle: \"Wisdom\"\n"));
        assert!(rendered.as_str().ends_with("---\n\n\n> wise words\n"));
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension("/y/pic.png"), Some("png"));
        assert_eq!(image_extension("/secure/abc/pic.jpg"), Some("jpg"));
        assert_eq!(image_extension("/y/pic.gif"), None);
    }
}
