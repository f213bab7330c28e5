//! # Tag Vocabulary
//!
//! The closed set of markup kinds and the keyword table that maps the text
//! inside `[...]` to them. Lookups are exact and case-sensitive: `[b]` is
//! bold, `[B]` is literal text.
//!
//! The table is plain `const` data, so it can be read from any number of
//! threads without synchronisation.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// A recognized tag kind, or [`MarkupKind::PlainText`] for literal content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub enum MarkupKind {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Url,
    Color,
    User,
    Icon,
    EIcon,
    Channel,
    Session,
    Superscript,
    Subscript,
    Big,
    Small,
    Collapse,
    Quote,
    HorizontalRule,
    Indent,
    Justify,
    Heading,
    Left,
    Right,
    Center,
    /// Verbatim region; content is never tokenized.
    NoParse,
    /// Not markup. Literal source text, or a tag that could not be matched.
    PlainText,
}

/// Keyword table. Every markup kind appears exactly once; `PlainText` never does.
const KEYWORDS: [(&str, MarkupKind); 25] = [
    ("b", MarkupKind::Bold),
    ("i", MarkupKind::Italic),
    ("u", MarkupKind::Underline),
    ("s", MarkupKind::Strikethrough),
    ("url", MarkupKind::Url),
    ("color", MarkupKind::Color),
    ("user", MarkupKind::User),
    ("icon", MarkupKind::Icon),
    ("eicon", MarkupKind::EIcon),
    ("channel", MarkupKind::Channel),
    ("session", MarkupKind::Session),
    ("sup", MarkupKind::Superscript),
    ("sub", MarkupKind::Subscript),
    ("big", MarkupKind::Big),
    ("small", MarkupKind::Small),
    ("collapse", MarkupKind::Collapse),
    ("quote", MarkupKind::Quote),
    ("hr", MarkupKind::HorizontalRule),
    ("indent", MarkupKind::Indent),
    ("justify", MarkupKind::Justify),
    ("heading", MarkupKind::Heading),
    ("left", MarkupKind::Left),
    ("right", MarkupKind::Right),
    ("center", MarkupKind::Center),
    ("noparse", MarkupKind::NoParse),
];

/// Looks up the markup kind for a tag keyword.
///
/// Returns `None` for anything outside the vocabulary, including differently
/// cased or padded keywords.
pub fn lookup(keyword: &str) -> Option<MarkupKind> {
    KEYWORDS
        .iter()
        .find(|(k, _)| *k == keyword)
        .map(|(_, kind)| *kind)
}

impl MarkupKind {
    /// Every markup kind that has a keyword, in table order.
    pub const ALL: [MarkupKind; 25] = {
        let mut all = [MarkupKind::PlainText; 25];
        let mut i = 0;
        while i < KEYWORDS.len() {
            all[i] = KEYWORDS[i].1;
            i += 1;
        }
        all
    };

    /// The keyword written between the brackets, `None` for `PlainText`.
    pub fn keyword(self) -> Option<&'static str> {
        KEYWORDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map(|(k, _)| *k)
    }

    /// Kinds that can never hold children.
    pub fn is_leaf(self) -> bool {
        matches!(self, MarkupKind::PlainText | MarkupKind::HorizontalRule)
    }
}

impl fmt::Display for MarkupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword().unwrap_or("text"))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown tag keyword '{0}'")]
pub struct UnknownTag(pub String);

impl FromStr for MarkupKind {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lookup(s).ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// The serialized form: the keyword, or `"text"` for `PlainText`.
impl From<MarkupKind> for String {
    fn from(kind: MarkupKind) -> Self {
        kind.to_string()
    }
}

/// Inverse of the serialized form. Only here does `"text"` name `PlainText`.
impl TryFrom<String> for MarkupKind {
    type Error = UnknownTag;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.as_str() {
            "text" => Ok(MarkupKind::PlainText),
            keyword => keyword.parse(),
        }
    }
}
