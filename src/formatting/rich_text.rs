// src/formatting/rich_text.rs
//! Inline styling of rich text runs.

use super::mentions::MentionResolver;
use crate::constants::QUOTE_MARKER;
use crate::model::{Annotations, RichTextRun};

/// Renders one run as inline Markdown.
pub fn style_run(run: &RichTextRun, mentions: &MentionResolver<'_>) -> String {
    match run {
        RichTextRun::Text {
            content,
            link,
            annotations,
        } => style_text(content, link.as_deref(), annotations),
        RichTextRun::Mention { plain_text } => mentions.resolve(plain_text),
    }
}

/// Renders a run list, separating runs with a single space.
pub fn style_runs(runs: &[RichTextRun], mentions: &MentionResolver<'_>) -> String {
    runs.iter()
        .map(|run| style_run(run, mentions))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Link first, then bold, italic, strikethrough and code, innermost to
/// outermost.
///
/// A run starting with `^` becomes a block quote: the styled string loses
/// its first two characters, any whitespace left at its front, and gains a
/// `> ` prefix. The cut happens after styling, so a styled quote run loses
/// style markers rather than the marker.
pub fn style_text(content: &str, link: Option<&str>, annotations: &Annotations) -> String {
    let mut styled = content.trim().to_string();
    let is_quote = styled.starts_with(QUOTE_MARKER);

    if let Some(url) = link {
        styled = format!("[{}]({})", styled, url);
    }

    if annotations.bold {
        styled = format!("**{}**", styled);
    }

    if annotations.italic {
        styled = format!("*{}*", styled);
    }

    if annotations.strikethrough {
        styled = format!("~~{}~~", styled);
    }

    if annotations.code {
        styled = format!("`{}`", styled);
    }

    if is_quote {
        let rest: String = styled.chars().skip(2).collect();
        styled = format!("> {}", rest.trim_start());
    }

    styled
}
