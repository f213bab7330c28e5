//! # bbmark-syntax
//!
//! A fault-tolerant parser for bracket markup ("bbcode") as written in chat
//! messages: `[b]bold[/b]`, `[url=...]`, `[noparse]...[/noparse]` and friends.
//!
//! ## Pipeline
//!
//! ```text
//! text → autolink → scanner → tree builder → materializer → [ResolvedNode]
//!        (bare URLs)  (tokens)  (RawTag arena)  (owned nodes)
//! ```
//!
//! 1. [`autolink`] rewrites bare `http://`, `https://` and `ftp://` words into
//!    `[url=...]` markup.
//! 2. [`scanner`] cuts the text into tag tokens and plain text runs.
//! 3. [`tree`] matches openers with closers on a stack and demotes anything
//!    that does not pair up.
//! 4. [`node`] resolves offsets into owned text and arguments.
//!
//! ## Degrade, never fail
//!
//! [`parse`] is total. Unknown keywords, unmatched brackets, unclosed or
//! badly nested tags all end up as [`MarkupKind::PlainText`], and the tree
//! always spells out its source:
//!
//! ```
//! use bbmark_syntax::{parse_document, reconstruct, MarkupKind, ParseOptions};
//!
//! let options = ParseOptions { autolink: false };
//! let doc = parse_document("[i][b]x[/i] and [zzz]", &options);
//!
//! assert_eq!(doc.nodes[0].kind, MarkupKind::Italic);
//! assert_eq!(reconstruct(&doc.nodes, &doc.source), "[i][b]x[/i] and [zzz]");
//! ```
//!
//! Nesting is capped at [`MAX_DEPTH`] open tags. Deeper openers stay text,
//! which keeps the recursive passes over the tree within a small stack.
//!
//! ## Concurrency
//!
//! Parsing holds no shared mutable state. The keyword table is `const`, so
//! any number of threads can parse at once.
//!
//! ## Rendering
//!
//! This crate stops at the tree. Turning nodes into output, resolving user or
//! channel names and honouring disabled tags belong to the renderer.

pub mod autolink;
pub mod cursor;
pub mod node;
pub mod scanner;
pub mod span;
pub mod tree;
pub mod vocabulary;

pub use node::{ResolvedNode, materialize, reconstruct};
pub use span::Span;
pub use tree::MAX_DEPTH;
pub use vocabulary::{MarkupKind, UnknownTag, lookup};

/// Switches for [`parse_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rewrite bare URLs into `[url]` markup before scanning.
    pub autolink: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { autolink: true }
    }
}

/// A parsed message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMarkup {
    /// The text the node spans index into. Differs from the input when
    /// auto-linking rewrote it.
    pub source: String,
    pub nodes: Vec<ResolvedNode>,
}

/// Parses `text` with default options and returns the top-level nodes.
pub fn parse(text: &str) -> Vec<ResolvedNode> {
    parse_document(text, &ParseOptions::default()).nodes
}

/// Parses `text`, keeping the source the spans refer to.
pub fn parse_document(text: &str, options: &ParseOptions) -> ParsedMarkup {
    let source = if options.autolink {
        autolink::autolink(text)
    } else {
        text.to_string()
    };

    let forest = tree::build(&source);
    let nodes = materialize(&forest, &source);

    log::debug!(
        "parsed {} bytes into {} top-level nodes",
        source.len(),
        nodes.len()
    );

    ParsedMarkup { source, nodes }
}
