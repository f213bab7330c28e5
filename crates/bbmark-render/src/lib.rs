//! # bbmark-render
//!
//! Renderers that turn a parsed message into output.
//!
//! The parser hands over typed [`ResolvedNode`]s and nothing else. This crate
//! decides what each [`MarkupKind`] looks like, looks up names through a
//! [`Resolver`], and degrades tags that are switched off in
//! [`RenderOptions`] back to their literal source text.
//!
//! - [`HtmlRenderer`]: an escaped HTML fragment.
//! - [`PlainRenderer`]: markup stripped, for notifications and logs.
//!
//! [`ResolvedNode`]: bbmark_syntax::ResolvedNode

use std::collections::BTreeSet;

use bbmark_syntax::{MarkupKind, ParsedMarkup};

pub mod html;
pub mod plain;

pub use html::HtmlRenderer;
pub use plain::PlainRenderer;

/// Lookups for the kinds that name something outside the message.
///
/// Every method has a default that finds nothing; renderers then fall back
/// to the raw text.
pub trait Resolver {
    /// Profile link for a character name (`[user]`).
    fn user_url(&self, _name: &str) -> Option<String> {
        None
    }

    /// Display title for a channel id (`[channel]`, `[session]`).
    fn channel_name(&self, _id: &str) -> Option<String> {
        None
    }

    /// Avatar image for a character name (`[icon]`).
    fn icon_url(&self, _name: &str) -> Option<String> {
        None
    }

    /// Image for an emoticon name (`[eicon]`).
    fn eicon_url(&self, _name: &str) -> Option<String> {
        None
    }
}

/// A resolver that knows nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultResolver;

impl Resolver for DefaultResolver {}

/// Feature flags for rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Kinds shown as their literal source instead of being honoured.
    pub disabled: BTreeSet<MarkupKind>,
}

impl RenderOptions {
    pub fn with_disabled(kinds: impl IntoIterator<Item = MarkupKind>) -> Self {
        Self {
            disabled: kinds.into_iter().collect(),
        }
    }

    pub fn is_enabled(&self, kind: MarkupKind) -> bool {
        kind == MarkupKind::PlainText || !self.disabled.contains(&kind)
    }
}

/// Something that turns a parsed message into a string.
pub trait Render {
    fn render(&self, doc: &ParsedMarkup) -> String;
}
