//! # Node Materializer
//!
//! Turns the offset-only [`ParseForest`] into owned [`ResolvedNode`]s that a
//! renderer can consume without the arena or the builder's bookkeeping.

use crate::span::Span;
use crate::tree::{ParseForest, TagId};
use crate::vocabulary::MarkupKind;

/// A finished node of the markup tree.
///
/// Text leaves carry `text`; tags carry `children`. A `PlainText` node can
/// also have children when it is a tag that was demoted after collecting
/// content. Its first child is then the demoted tag's own opening delimiter,
/// so reading the leaves in order still spells out the source.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedNode {
    pub kind: MarkupKind,
    /// From the opening delimiter through the closing one when matched.
    /// A demoted tag that kept children ends where its last child ends, so
    /// spans stay nested. A childless unmatched tag spans only its delimiter.
    pub span: Span,
    pub argument: Option<String>,
    pub text: Option<String>,
    pub children: Vec<ResolvedNode>,
}

impl ResolvedNode {
    fn text(span: Span, source: &str) -> Self {
        Self {
            kind: MarkupKind::PlainText,
            span,
            argument: None,
            text: Some(span.slice(source).to_string()),
            children: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text of every leaf below this node, markup dropped.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Materializes every root of `forest`, in order.
///
/// `source` must be the exact string the forest was built from.
pub fn materialize(forest: &ParseForest<'_>, source: &str) -> Vec<ResolvedNode> {
    forest
        .roots()
        .iter()
        .map(|&root| resolve(forest, root, source))
        .collect()
}

fn resolve(forest: &ParseForest<'_>, id: TagId, source: &str) -> ResolvedNode {
    let tag = &forest[id];

    if tag.kind == MarkupKind::PlainText && tag.children.is_empty() {
        return ResolvedNode {
            argument: tag.argument.map(str::to_string),
            ..ResolvedNode::text(tag.span, source)
        };
    }

    let mut children = Vec::with_capacity(tag.children.len() + 1);
    if tag.kind == MarkupKind::PlainText {
        children.push(ResolvedNode::text(tag.span, source));
    }
    children.extend(tag.children.iter().map(|&child| resolve(forest, child, source)));

    let end = match tag.matched_close {
        Some(close) => forest[close].span.end,
        None => children.last().map_or(tag.span.end, |last| last.span.end),
    };

    ResolvedNode {
        kind: tag.kind,
        span: Span::new(tag.span.start, end),
        argument: tag.argument.map(str::to_string),
        text: None,
        children,
    }
}

/// Rebuilds the text a tree was parsed from.
///
/// Leaves contribute their text; tags contribute the source between their
/// start and first child (the opening delimiter) and between their last child
/// and end (the closing delimiter).
pub fn reconstruct(nodes: &[ResolvedNode], source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    for node in nodes {
        push_source(node, source, &mut out);
    }
    out
}

fn push_source(node: &ResolvedNode, source: &str, out: &mut String) {
    if let Some(text) = &node.text {
        out.push_str(text);
        return;
    }

    match (node.children.first(), node.children.last()) {
        (Some(first), Some(last)) => {
            out.push_str(&source[node.span.start..first.span.start]);
            for child in &node.children {
                push_source(child, source, out);
            }
            out.push_str(&source[last.span.end..node.span.end]);
        }
        _ => out.push_str(node.span.slice(source)),
    }
}
