use bbmark_syntax::{MarkupKind, ParsedMarkup, ResolvedNode, reconstruct};

use crate::{DefaultResolver, Render, RenderOptions, Resolver};

/// Renders a message with its markup stripped.
///
/// Links keep their target when it differs from the shown text, so
/// `[url=http://x.com]site[/url]` becomes `site (http://x.com)`.
#[derive(Debug, Clone)]
pub struct PlainRenderer<R = DefaultResolver> {
    options: RenderOptions,
    resolver: R,
}

impl PlainRenderer<DefaultResolver> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            resolver: DefaultResolver,
        }
    }
}

impl<R: Resolver> PlainRenderer<R> {
    pub fn with_resolver(options: RenderOptions, resolver: R) -> Self {
        Self { options, resolver }
    }

    fn node(&self, node: &ResolvedNode, source: &str, out: &mut String) {
        if !self.options.is_enabled(node.kind) {
            out.push_str(&reconstruct(std::slice::from_ref(node), source));
            return;
        }

        match node.kind {
            MarkupKind::HorizontalRule => out.push('\n'),
            MarkupKind::Url => {
                let shown = node.text_content();
                match node.argument.as_deref() {
                    Some(target) if !shown.is_empty() && shown != target => {
                        out.push_str(&shown);
                        out.push_str(" (");
                        out.push_str(target);
                        out.push(')');
                    }
                    Some(target) if shown.is_empty() => out.push_str(target),
                    _ => out.push_str(&shown),
                }
            }
            MarkupKind::Channel => {
                let id = node.text_content();
                out.push_str(&self.resolver.channel_name(&id).unwrap_or(id));
            }
            MarkupKind::Session => match &node.argument {
                Some(title) => out.push_str(title),
                None => out.push_str(&node.text_content()),
            },
            _ => match &node.text {
                Some(text) => out.push_str(text),
                None => {
                    for child in &node.children {
                        self.node(child, source, out);
                    }
                }
            },
        }
    }
}

impl<R: Resolver> Render for PlainRenderer<R> {
    fn render(&self, doc: &ParsedMarkup) -> String {
        let mut out = String::with_capacity(doc.source.len());
        for node in &doc.nodes {
            self.node(node, &doc.source, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bbmark_syntax::{ParseOptions, parse_document};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn plain(input: &str) -> String {
        let doc = parse_document(input, &ParseOptions::default());
        PlainRenderer::new(RenderOptions::default()).render(&doc)
    }

    #[rstest]
    #[case("hello", "hello")]
    #[case("[b]bold[/b] and [i]it[/i]", "bold and it")]
    #[case("[url=http://x.com]site[/url]", "site (http://x.com)")]
    #[case("[url=http://x.com]http://x.com[/url]", "http://x.com")]
    #[case("[url=http://x.com][/url]", "http://x.com")]
    #[case("[url]x.org[/url]", "x.org")]
    #[case("a[hr]b", "a\nb")]
    #[case("[session=Den]ADH-2[/session]", "Den")]
    #[case("[noparse][b]x[/b][/noparse]", "[b]x[/b]")]
    #[case("[i][b]x[/i]", "[b]x")]
    fn strips_markup(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(plain(input), expected);
    }

    #[test]
    fn bare_urls_keep_their_target() {
        assert_eq!(plain("go http://x.com/a"), "go x.com (http://x.com/a)");
    }

    #[test]
    fn disabled_kind_keeps_source() {
        let doc = parse_document("[b]x[/b] [i]y[/i]", &ParseOptions::default());
        let renderer = PlainRenderer::new(RenderOptions::with_disabled([MarkupKind::Italic]));
        assert_eq!(renderer.render(&doc), "x [i]y[/i]");
    }

    #[test]
    fn channel_names_are_resolved() {
        struct Channels;
        impl Resolver for Channels {
            fn channel_name(&self, id: &str) -> Option<String> {
                Some(format!("#{id}"))
            }
        }

        let doc = parse_document("[channel]abc[/channel]", &ParseOptions::default());
        let renderer = PlainRenderer::with_resolver(RenderOptions::default(), Channels);
        assert_eq!(renderer.render(&doc), "#abc");
    }
}
