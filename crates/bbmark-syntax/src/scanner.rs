//! # Tag Scanner
//!
//! Splits a string into a flat run of tokens: recognized opening/closing tags
//! and the plain text between them.
//!
//! ## The Coverage Guarantee
//!
//! Tokens are contiguous. The first starts at offset 0, each next token starts
//! where the previous ended, and the last ends at the input length, so
//! concatenating every token's span gives back the input:
//!
//! ```
//! use bbmark_syntax::scanner::tokenize;
//!
//! let input = "a [b]bold[/b] ]stray[ [zzz]";
//! let rebuilt: String = tokenize(input).map(|t| t.span.slice(input)).collect();
//! assert_eq!(rebuilt, input);
//! ```
//!
//! Nothing here can fail. Unknown keywords, empty brackets and unmatched
//! brackets all come out as [`MarkupKind::PlainText`] tokens.

use crate::cursor::Cursor;
use crate::span::Span;
use crate::vocabulary::{self, MarkupKind};

/// One scanned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: MarkupKind,
    /// The bracket span for tags, the literal span for plain text.
    pub span: Span,
    /// Trimmed text after `=` inside the brackets.
    pub argument: Option<&'a str>,
    /// True for `[/keyword]`.
    pub closing: bool,
}

impl<'a> Token<'a> {
    pub fn plain(span: Span) -> Self {
        Self {
            kind: MarkupKind::PlainText,
            span,
            argument: None,
            closing: false,
        }
    }

    /// Classifies the text between a `[` and `]` pair.
    ///
    /// `span` covers both brackets.
    fn from_brackets(inner: &'a str, span: Span) -> Self {
        let (keyword, argument) = match inner.split_once('=') {
            Some((keyword, argument)) => (keyword.trim(), Some(argument.trim())),
            None => (inner, None),
        };
        let (keyword, closing) = match keyword.strip_prefix('/') {
            Some(keyword) => (keyword, true),
            None => (keyword, false),
        };

        match vocabulary::lookup(keyword) {
            Some(kind) => Self {
                kind,
                span,
                argument,
                closing,
            },
            None => {
                log::trace!("unknown tag {keyword:?} at {}, keeping as text", span.start);
                Self::plain(span)
            }
        }
    }
}

/// Left-to-right tag scanner.
///
/// Each call to `next` looks for the next `[` and the next `]` from the
/// cursor. Text before a `[` is emitted first as its own token; the bracket
/// is examined on the following call.
pub struct TagScanner<'a> {
    cur: Cursor<'a>,
}

impl<'a> TagScanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cur: Cursor::new(source),
        }
    }
}

impl<'a> Iterator for TagScanner<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        if self.cur.eof() {
            return None;
        }

        let start = self.cur.pos();
        let len = self.cur.s.len();

        let (open, close) = match (self.cur.find(b'['), self.cur.find(b']')) {
            (Some(open), Some(close)) => (open, close),
            _ => {
                // No complete bracket pair left: the rest is text.
                self.cur.advance_to(len);
                return Some(Token::plain(Span::new(start, len)));
            }
        };

        // Text before the bracket, including any stray `]`.
        if open > start {
            self.cur.advance_to(open);
            return Some(Token::plain(Span::new(start, open)));
        }

        // open == start, so the `]` found from here lies after it.
        let inner = &self.cur.s[open + 1..close];
        let span = Span::new(open, close + 1);
        self.cur.advance_to(close + 1);
        Some(Token::from_brackets(inner, span))
    }
}

/// Scans `source` into tokens.
pub fn tokenize(source: &str) -> TagScanner<'_> {
    TagScanner::new(source)
}
