//! # Tree Builder
//!
//! Folds the flat token stream into a forest of [`RawTag`]s using a stack of
//! currently open tags.
//!
//! ## Storage
//!
//! Tags live in an arena and refer to each other by [`TagId`]. Links only
//! point forward: a tag knows its children and, once matched, its closing
//! tag. Parents are implied by stack position while building and are never
//! stored.
//!
//! ## Recovery rules
//!
//! Matching is by kind, not position. A closer pairs with the nearest open
//! tag of the same kind anywhere on the stack:
//!
//! - Frames above the matched one were left open inside it. They become
//!   `PlainText` but keep the children they collected.
//! - A closer with nothing to match becomes `PlainText` and is placed like any
//!   other text.
//! - Tags still open at end of input become `PlainText`, children intact.
//! - While `[noparse]` is on top, every token except `[/noparse]` is demoted
//!   to text. On close the region's children are replaced by one verbatim span.
//! - An opening tag that would nest deeper than [`MAX_DEPTH`] is demoted to
//!   text where it stands and never opened. Later passes recurse per level,
//!   so this bounds them.
//!
//! If nothing structural survives, the whole input collapses to a single text
//! tag.

use std::ops::Index;

use crate::scanner::{Token, tokenize};
use crate::span::Span;
use crate::vocabulary::MarkupKind;

/// Most tags that can be open at once.
pub const MAX_DEPTH: usize = 256;

/// Index of a tag in a [`ParseForest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TagId(usize);

/// A token or tag pair while the tree is being assembled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag<'a> {
    pub kind: MarkupKind,
    /// Delimiter span for tags, literal span for text.
    pub span: Span,
    pub argument: Option<&'a str>,
    pub closing: bool,
    /// The closer paired with this tag. Only set on opening tags.
    pub matched_close: Option<TagId>,
    pub children: Vec<TagId>,
}

impl<'a> From<Token<'a>> for RawTag<'a> {
    fn from(token: Token<'a>) -> Self {
        Self {
            kind: token.kind,
            span: token.span,
            argument: token.argument,
            closing: token.closing,
            matched_close: None,
            children: Vec::new(),
        }
    }
}

/// The finished raw tree: an arena plus the top-level tags in order.
#[derive(Debug)]
pub struct ParseForest<'a> {
    tags: Vec<RawTag<'a>>,
    roots: Vec<TagId>,
}

impl<'a> ParseForest<'a> {
    pub fn roots(&self) -> &[TagId] {
        &self.roots
    }
}

impl<'a> Index<TagId> for ParseForest<'a> {
    type Output = RawTag<'a>;

    fn index(&self, id: TagId) -> &RawTag<'a> {
        &self.tags[id.0]
    }
}

/// Stack-based builder. Feed tokens with [`push`](Self::push), then call
/// [`finish`](Self::finish).
pub struct TreeBuilder<'a> {
    source_len: usize,
    tags: Vec<RawTag<'a>>,
    stack: Vec<TagId>,
    roots: Vec<TagId>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source_len: source.len(),
            tags: Vec::new(),
            stack: Vec::new(),
            roots: Vec::new(),
        }
    }

    pub fn push(&mut self, token: Token<'a>) {
        let id = self.alloc(RawTag::from(token));

        if let Some(&top) = self.stack.last() {
            if self.tags[top.0].kind == MarkupKind::NoParse {
                if token.closing && token.kind == MarkupKind::NoParse {
                    self.close(self.stack.len() - 1, id);
                } else {
                    self.demote(id, "inside noparse");
                    self.tags[top.0].children.push(id);
                }
                return;
            }

            if token.closing {
                let matched = self
                    .stack
                    .iter()
                    .rposition(|frame| self.tags[frame.0].kind == token.kind);
                if let Some(depth) = matched {
                    self.close(depth, id);
                    return;
                }
            }
        }

        if token.closing {
            self.demote(id, "closer without opener");
        }

        match self.stack.last() {
            Some(&top) => self.tags[top.0].children.push(id),
            None => self.roots.push(id),
        }

        if !self.tags[id.0].kind.is_leaf() {
            if self.stack.len() >= MAX_DEPTH {
                self.demote(id, "nested too deep");
            } else {
                self.stack.push(id);
            }
        }
    }

    pub fn finish(mut self) -> ParseForest<'a> {
        while let Some(open) = self.stack.pop() {
            self.demote(open, "never closed");
        }

        let structural = self.roots.iter().any(|root| {
            let tag = &self.tags[root.0];
            tag.kind != MarkupKind::PlainText || !tag.children.is_empty()
        });

        if !structural {
            self.tags.clear();
            self.roots.clear();
            if self.source_len > 0 {
                let whole = Token::plain(Span::new(0, self.source_len));
                let id = self.alloc(RawTag::from(whole));
                self.roots.push(id);
            }
        }

        ParseForest {
            tags: self.tags,
            roots: self.roots,
        }
    }

    fn alloc(&mut self, tag: RawTag<'a>) -> TagId {
        let id = TagId(self.tags.len());
        self.tags.push(tag);
        id
    }

    fn demote(&mut self, id: TagId, reason: &str) {
        let tag = &mut self.tags[id.0];
        if tag.kind != MarkupKind::PlainText {
            log::trace!("demoting {:?} at {:?} to text: {reason}", tag.kind, tag.span);
            tag.kind = MarkupKind::PlainText;
        }
    }

    /// Pops the stack down through `depth` and pairs that frame with `closer`.
    fn close(&mut self, depth: usize, closer: TagId) {
        for frame in self.stack.split_off(depth + 1) {
            self.demote(frame, "left open inside a closed tag");
        }
        let Some(matched) = self.stack.pop() else {
            return;
        };

        self.tags[matched.0].matched_close = Some(closer);

        if self.tags[matched.0].kind == MarkupKind::NoParse {
            let verbatim = Span::new(self.tags[matched.0].span.end, self.tags[closer.0].span.start);
            self.tags[matched.0].children.clear();
            if !verbatim.is_empty() {
                let id = self.alloc(RawTag::from(Token::plain(verbatim)));
                self.tags[matched.0].children.push(id);
            }
        }
    }
}

/// Tokenizes `source` and builds its raw tree.
pub fn build(source: &str) -> ParseForest<'_> {
    let mut builder = TreeBuilder::new(source);
    for token in tokenize(source) {
        builder.push(token);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Renders the forest as `Kind@start..end` lines, closers as `->end`.
    fn dump(forest: &ParseForest<'_>, source: &str) -> String {
        fn walk(forest: &ParseForest<'_>, source: &str, id: TagId, depth: usize, out: &mut String) {
            let tag = &forest[id];
            out.push_str(&"  ".repeat(depth));
            out.push_str(&format!("{:?}@{}..{}", tag.kind, tag.span.start, tag.span.end));
            if let Some(close) = tag.matched_close {
                out.push_str(&format!("->{}", forest[close].span.end));
            }
            if tag.kind == MarkupKind::PlainText && tag.children.is_empty() {
                out.push_str(&format!(" {:?}", tag.span.slice(source)));
            }
            out.push('\n');
            for &child in &tag.children {
                walk(forest, source, child, depth + 1, out);
            }
        }

        let mut out = String::new();
        for &root in forest.roots() {
            walk(forest, source, root, 0, &mut out);
        }
        out
    }

    fn built(source: &str) -> String {
        dump(&build(source), source)
    }

    #[test]
    fn empty_input_has_no_roots() {
        assert!(build("").roots().is_empty());
    }

    #[test]
    fn plain_input_collapses_to_one_tag() {
        assert_eq!(built("hello world"), "PlainText@0..11 \"hello world\"\n");
    }

    #[test]
    fn simple_pair() {
        assert_eq!(
            built("a [b]bold[/b] b"),
            "PlainText@0..2 \"a \"\n\
             Bold@2..5->13\n  \
               PlainText@5..9 \"bold\"\n\
             PlainText@13..15 \" b\"\n"
        );
    }

    #[test]
    fn closer_matches_by_kind_and_demotes_frames_above() {
        assert_eq!(
            built("[i][b]x[/i]"),
            "Italic@0..3->11\n  \
               PlainText@3..6\n    \
                 PlainText@6..7 \"x\"\n"
        );
    }

    #[test]
    fn unclosed_tag_keeps_children() {
        assert_eq!(
            built("[b]runaway"),
            "PlainText@0..3\n  \
               PlainText@3..10 \"runaway\"\n"
        );
    }

    #[test]
    fn noparse_captures_verbatim() {
        assert_eq!(
            built("[noparse][b]b[/b][/noparse]"),
            "NoParse@0..9->27\n  \
               PlainText@9..17 \"[b]b[/b]\"\n"
        );
    }

    #[test]
    fn noparse_ignores_other_closers() {
        let source = "[b][noparse][/b][/noparse][/b]";
        let forest = build(source);
        let bold = &forest[forest.roots()[0]];
        assert_eq!(bold.kind, MarkupKind::Bold);
        assert_eq!(bold.matched_close.map(|c| forest[c].span.start), Some(26));
        let noparse = &forest[bold.children[0]];
        assert_eq!(noparse.kind, MarkupKind::NoParse);
        assert_eq!(forest[noparse.children[0]].span.slice(source), "[/b]");
    }

    #[test]
    fn empty_noparse_has_no_children() {
        let forest = build("[noparse][/noparse]");
        let noparse = &forest[forest.roots()[0]];
        assert_eq!(noparse.kind, MarkupKind::NoParse);
        assert!(noparse.children.is_empty());
        assert!(noparse.matched_close.is_some());
    }

    #[test]
    fn unclosed_noparse_keeps_its_text() {
        assert_eq!(
            built("[noparse][b]x"),
            "PlainText@0..9\n  \
               PlainText@9..12 \"[b]\"\n  \
               PlainText@12..13 \"x\"\n"
        );
    }

    #[test]
    fn spurious_closer_becomes_text_in_place() {
        assert_eq!(
            built("[b]x[/i][/b]"),
            "Bold@0..3->12\n  \
               PlainText@3..4 \"x\"\n  \
               PlainText@4..8 \"[/i]\"\n"
        );
    }

    #[test]
    fn spurious_top_level_closer_is_kept() {
        assert_eq!(
            built("[b]x[/b][/i]"),
            "Bold@0..3->8\n  \
               PlainText@3..4 \"x\"\n\
             PlainText@8..12 \"[/i]\"\n"
        );
    }

    #[test]
    fn only_spurious_closers_collapse_to_text() {
        assert_eq!(built("x[/b]"), "PlainText@0..5 \"x[/b]\"\n");
    }

    #[test]
    fn horizontal_rule_is_a_leaf() {
        assert_eq!(
            built("[hr]after"),
            "HorizontalRule@0..4\n\
             PlainText@4..9 \"after\"\n"
        );
    }

    #[test]
    fn nearest_same_kind_frame_is_matched() {
        assert_eq!(
            built("[b][b]x[/b]y[/b]"),
            "Bold@0..3->16\n  \
               Bold@3..6->11\n    \
                 PlainText@6..7 \"x\"\n  \
               PlainText@11..12 \"y\"\n"
        );
    }

    #[test]
    fn arguments_survive_building() {
        let forest = build("[color=red]x[/color]");
        assert_eq!(forest[forest.roots()[0]].argument, Some("red"));
    }

    #[test]
    fn tags_past_max_depth_stay_text() {
        let source = "[b]".repeat(MAX_DEPTH + 1) + "x" + &"[/b]".repeat(MAX_DEPTH + 1);
        let forest = build(&source);

        let mut id = forest.roots()[0];
        for _ in 1..MAX_DEPTH {
            assert_eq!(forest[id].kind, MarkupKind::Bold);
            id = forest[id].children[0];
        }
        let innermost = &forest[id];
        assert_eq!(innermost.kind, MarkupKind::Bold);
        let inner: Vec<_> = innermost
            .children
            .iter()
            .map(|&child| (forest[child].kind, forest[child].span.slice(&source)))
            .collect();
        assert_eq!(
            inner,
            vec![(MarkupKind::PlainText, "[b]"), (MarkupKind::PlainText, "x")]
        );

        // One closer too many is left over at the top.
        assert_eq!(forest.roots().len(), 2);
        let extra = &forest[forest.roots()[1]];
        assert_eq!(extra.kind, MarkupKind::PlainText);
        assert_eq!(extra.span.slice(&source), "[/b]");
    }
}
