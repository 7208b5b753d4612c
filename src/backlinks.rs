// src/backlinks.rs
//! Which posts mention which.
//!
//! The graph is an append-only multiset of `(target, source)` slug pairs,
//! rebuilt from scratch on every run.

use crate::catalog::SlugIndex;
use crate::model::{Block, BlockVisitor, RichTextRun};
use crate::types::{BlockId, Slug};
use serde::Serialize;

/// `source` mentions `target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BacklinkEdge {
    pub target: Slug,
    pub source: Slug,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BacklinkGraph {
    edges: Vec<BacklinkEdge>,
}

impl BacklinkGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, edge: BacklinkEdge) {
        self.edges.push(edge);
    }

    /// Records an edge for every post mention found in the paragraphs of
    /// `blocks`. Quote mentions are not tracked.
    pub fn scan(&mut self, blocks: &[Block], source: &Slug, slugs: &SlugIndex) {
        let mut collector = MentionCollector {
            slugs,
            source,
            found: Vec::new(),
        };
        for block in blocks {
            block.accept(&mut collector);
        }

        log::debug!("'{}' mentions {} posts", source, collector.found.len());
        self.edges.extend(collector.found);
    }

    /// Sources mentioning `target`, once per mention, in discovery order.
    pub fn backlinks_for(&self, target: &Slug) -> Vec<Slug> {
        self.edges
            .iter()
            .filter(|edge| &edge.target == target)
            .map(|edge| edge.source.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

struct MentionCollector<'a> {
    slugs: &'a SlugIndex,
    source: &'a Slug,
    found: Vec<BacklinkEdge>,
}

impl BlockVisitor for MentionCollector<'_> {
    type Output = ();

    fn visit_paragraph(&mut self, _id: &BlockId, runs: &[RichTextRun]) {
        for run in runs {
            if let RichTextRun::Mention { plain_text } = run {
                if let Some(target) = self.slugs.posts.get(plain_text) {
                    self.found.push(BacklinkEdge {
                        target: target.clone(),
                        source: self.source.clone(),
                    });
                }
            }
        }
    }
}
