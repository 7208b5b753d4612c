// src/formatting/front_matter.rs
//! YAML-style front matter for rendered documents.

use crate::model::{Document, Post, Quote};
use std::fmt::Write;

/// Front matter block for `document`, ending with a blank line.
///
/// Values are double-quoted YAML scalars with `\` and `"` escaped.
pub fn front_matter(document: &Document) -> String {
    match document {
        Document::Post(post) => post_front_matter(post),
        Document::Quote(quote) => quote_front_matter(quote),
    }
}

fn post_front_matter(post: &Post) -> String {
    let updated: String = post.edited.chars().take(10).collect();
    let featured = post.featured.to_string();

    render(&[
        ("title", post.title.as_str()),
        ("published", post.published.as_str()),
        ("featured", featured.as_str()),
        ("updated", updated.as_str()),
        ("completeness", post.completeness.as_str()),
        ("slug", post.slug.as_str()),
        ("description", post.description.as_str()),
        ("type", post.doc_type.as_str()),
    ])
}

fn quote_front_matter(quote: &Quote) -> String {
    render(&[
        ("title", quote.title.as_str()),
        ("slug", quote.slug.as_str()),
        ("resource", quote.resource.as_str()),
        ("author", quote.author.as_str()),
        ("url", quote.source_url.as_str()),
        ("type", quote.doc_type.as_str()),
    ])
}

fn render(fields: &[(&str, &str)]) -> String {
    let mut out = String::from("---\n");
    for (key, value) in fields {
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{}: \"{}\"", key, escape(value));
    }
    out.push_str("---\n\n");
    out
}

fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
