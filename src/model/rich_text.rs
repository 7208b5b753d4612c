use serde::{Deserialize, Serialize};

/// The subset of Notion annotations that affect Markdown output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

/// One styled segment of a text-bearing block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RichTextRun {
    Text {
        content: String,
        link: Option<String>,
        annotations: Annotations,
    },
    /// A reference to another page; only its visible title is kept.
    Mention { plain_text: String },
}

impl RichTextRun {
    /// Unstyled text of a plain run.
    pub fn text(content: impl Into<String>) -> Self {
        RichTextRun::Text {
            content: content.into(),
            link: None,
            annotations: Annotations::default(),
        }
    }

    pub fn mention(title: impl Into<String>) -> Self {
        RichTextRun::Mention {
            plain_text: title.into(),
        }
    }

    /// The text as Notion displays it, without any styling.
    pub fn plain_text(&self) -> &str {
        match self {
            RichTextRun::Text { content, .. } => content,
            RichTextRun::Mention { plain_text } => plain_text,
        }
    }
}
