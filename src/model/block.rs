use super::rich_text::RichTextRun;
use crate::types::BlockId;
use serde::{Deserialize, Serialize};

/// A block whose only content is a run list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: BlockId,
    pub rich_text: Vec<RichTextRun>,
}

/// A collapsible block; its children are fetched only when rendered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToggleBlock {
    pub id: BlockId,
    pub title: Vec<RichTextRun>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub id: BlockId,
    pub url: String,
    pub caption: Vec<RichTextRun>,
}

/// The block types the renderer understands, plus a catch-all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Block {
    Paragraph(TextBlock),
    Heading1(TextBlock),
    Heading2(TextBlock),
    Heading3(TextBlock),
    BulletedListItem(TextBlock),
    Toggle(ToggleBlock),
    Image(ImageBlock),
    Other { block_type: String },
}

impl Block {
    /// Get block type name
    pub fn block_type(&self) -> &str {
        match self {
            Block::Paragraph(_) => "paragraph",
            Block::Heading1(_) => "heading_1",
            Block::Heading2(_) => "heading_2",
            Block::Heading3(_) => "heading_3",
            Block::BulletedListItem(_) => "bulleted_list_item",
            Block::Toggle(_) => "toggle",
            Block::Image(_) => "image",
            Block::Other { block_type } => block_type,
        }
    }

    /// Accept a visitor
    pub fn accept<V: BlockVisitor>(&self, visitor: &mut V) -> V::Output {
        match self {
            Block::Paragraph(b) => visitor.visit_paragraph(&b.id, &b.rich_text),
            Block::Heading1(b) => visitor.visit_heading(&b.id, 1, &b.rich_text),
            Block::Heading2(b) => visitor.visit_heading(&b.id, 2, &b.rich_text),
            Block::Heading3(b) => visitor.visit_heading(&b.id, 3, &b.rich_text),
            Block::BulletedListItem(b) => visitor.visit_bulleted_list_item(&b.id, &b.rich_text),
            Block::Toggle(b) => visitor.visit_toggle(b),
            Block::Image(b) => visitor.visit_image(b),
            Block::Other { block_type } => visitor.visit_other(block_type),
        }
    }
}

/// Visitor trait for traversing block structures.
///
/// All methods have default implementations that return `Default::default()`,
/// so implementors only need to override the methods they care about.
pub trait BlockVisitor {
    type Output: Default;

    fn visit_paragraph(&mut self, _id: &BlockId, _runs: &[RichTextRun]) -> Self::Output {
        Default::default()
    }
    fn visit_heading(&mut self, _id: &BlockId, _level: u8, _runs: &[RichTextRun]) -> Self::Output {
        Default::default()
    }
    fn visit_bulleted_list_item(&mut self, _id: &BlockId, _runs: &[RichTextRun]) -> Self::Output {
        Default::default()
    }
    fn visit_toggle(&mut self, _toggle: &ToggleBlock) -> Self::Output {
        Default::default()
    }
    fn visit_image(&mut self, _image: &ImageBlock) -> Self::Output {
        Default::default()
    }
    fn visit_other(&mut self, _block_type: &str) -> Self::Output {
        Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block_id() -> BlockId {
        BlockId::parse("11111111111111111111111111111111").unwrap()
    }

    struct HeadingCounter {
        by_level: [usize; 3],
    }

    impl BlockVisitor for HeadingCounter {
        type Output = ();

        fn visit_heading(&mut self, _id: &BlockId, level: u8, _runs: &[RichTextRun]) {
            self.by_level[usize::from(level) - 1] += 1;
        }
    }

    #[test]
    fn test_visitor_defaults_ignore_other_blocks() {
        let blocks = vec![
            Block::Heading1(TextBlock {
                id: block_id(),
                rich_text: vec![RichTextRun::text("Intro")],
            }),
            Block::Paragraph(TextBlock {
                id: block_id(),
                rich_text: vec![RichTextRun::text("body")],
            }),
            Block::Heading3(TextBlock {
                id: block_id(),
                rich_text: vec![],
            }),
            Block::Other {
                block_type: "divider".to_string(),
            },
        ];

        let mut counter = HeadingCounter { by_level: [0; 3] };
        for block in &blocks {
            block.accept(&mut counter);
        }
        assert_eq!(counter.by_level, [1, 0, 1]);
    }

    #[test]
    fn test_block_type_names() {
        let other = Block::Other {
            block_type: "callout".to_string(),
        };
        assert_eq!(other.block_type(), "callout");

        let toggle = Block::Toggle(ToggleBlock {
            id: block_id(),
            title: vec![],
        });
        assert_eq!(toggle.block_type(), "toggle");
    }
}
