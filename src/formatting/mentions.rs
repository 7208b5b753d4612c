// src/formatting/mentions.rs
//! Turning page mentions into links.

use crate::catalog::SlugIndex;
use crate::constants::QUOTE_LINK_SCHEME;

/// Resolves mention titles against the post and quote slug maps.
#[derive(Debug, Clone, Copy)]
pub struct MentionResolver<'a> {
    slugs: &'a SlugIndex,
}

impl<'a> MentionResolver<'a> {
    pub fn new(slugs: &'a SlugIndex) -> Self {
        Self { slugs }
    }

    /// Posts win over quotes; unknown titles stay plain text.
    pub fn resolve(&self, title: &str) -> String {
        if let Some(slug) = self.slugs.posts.get(title) {
            return format!("[{}]({})", title, slug);
        }

        if let Some(slug) = self.slugs.quotes.get(title) {
            return format!("[{}]({}{})", title, QUOTE_LINK_SCHEME, slug);
        }

        log::debug!("Mention '{}' matches no published document", title);
        title.to_string()
    }
}
