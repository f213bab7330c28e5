use bbmark_syntax::autolink::SCHEMES;
use bbmark_syntax::{MarkupKind, ParsedMarkup, ResolvedNode, reconstruct};
use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::{DefaultResolver, Render, RenderOptions, Resolver};

/// Renders a message as an HTML fragment.
///
/// All text and attribute values are escaped. Links are only emitted for
/// `http`, `https` and `ftp` targets; anything else renders as its content.
#[derive(Debug, Clone)]
pub struct HtmlRenderer<R = DefaultResolver> {
    options: RenderOptions,
    resolver: R,
}

impl HtmlRenderer<DefaultResolver> {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            resolver: DefaultResolver,
        }
    }
}

impl<R: Resolver> HtmlRenderer<R> {
    pub fn with_resolver(options: RenderOptions, resolver: R) -> Self {
        Self { options, resolver }
    }

    fn node(&self, node: &ResolvedNode, source: &str, out: &mut String) {
        if !self.options.is_enabled(node.kind) {
            let literal = reconstruct(std::slice::from_ref(node), source);
            push_text(&literal, out);
            return;
        }

        match node.kind {
            MarkupKind::PlainText | MarkupKind::NoParse => match &node.text {
                Some(text) => push_text(text, out),
                None => self.children(node, source, out),
            },
            MarkupKind::Bold => self.wrap("<strong>", "</strong>", node, source, out),
            MarkupKind::Italic => self.wrap("<em>", "</em>", node, source, out),
            MarkupKind::Underline => self.wrap("<u>", "</u>", node, source, out),
            MarkupKind::Strikethrough => self.wrap("<del>", "</del>", node, source, out),
            MarkupKind::Superscript => self.wrap("<sup>", "</sup>", node, source, out),
            MarkupKind::Subscript => self.wrap("<sub>", "</sub>", node, source, out),
            MarkupKind::Big => self.wrap(r#"<span class="bbcode-big">"#, "</span>", node, source, out),
            MarkupKind::Small => {
                self.wrap(r#"<span class="bbcode-small">"#, "</span>", node, source, out)
            }
            MarkupKind::Quote => self.wrap(
                r#"<blockquote class="bbcode-quote">"#,
                "</blockquote>",
                node,
                source,
                out,
            ),
            MarkupKind::Heading => {
                self.wrap(r#"<h3 class="bbcode-heading">"#, "</h3>", node, source, out)
            }
            MarkupKind::Indent => {
                self.wrap(r#"<div class="bbcode-indent">"#, "</div>", node, source, out)
            }
            MarkupKind::Left => self.aligned("left", node, source, out),
            MarkupKind::Right => self.aligned("right", node, source, out),
            MarkupKind::Center => self.aligned("center", node, source, out),
            MarkupKind::Justify => self.aligned("justify", node, source, out),
            MarkupKind::HorizontalRule => out.push_str("<hr>"),
            MarkupKind::Color => self.color(node, source, out),
            MarkupKind::Url => self.url(node, source, out),
            MarkupKind::Collapse => {
                out.push_str(r#"<details class="bbcode-collapse"><summary>"#);
                push_text(node.argument.as_deref().unwrap_or_default(), out);
                out.push_str("</summary>");
                self.children(node, source, out);
                out.push_str("</details>");
            }
            MarkupKind::User => {
                let name = node.text_content();
                match self.resolver.user_url(&name) {
                    Some(url) => {
                        push_open_with_attr(r#"<a class="bbcode-user" href=""#, &url, out);
                        push_text(&name, out);
                        out.push_str("</a>");
                    }
                    None => {
                        out.push_str(r#"<span class="bbcode-user">"#);
                        push_text(&name, out);
                        out.push_str("</span>");
                    }
                }
            }
            MarkupKind::Icon => {
                let name = node.text_content();
                self.image("bbcode-icon", self.resolver.icon_url(&name), &name, out);
            }
            MarkupKind::EIcon => {
                let name = node.text_content();
                self.image("bbcode-eicon", self.resolver.eicon_url(&name), &name, out);
            }
            MarkupKind::Channel => {
                let id = node.text_content();
                let title = self.resolver.channel_name(&id).unwrap_or_else(|| id.clone());
                self.channel(&id, &title, out);
            }
            MarkupKind::Session => {
                let id = node.text_content();
                let title = node
                    .argument
                    .clone()
                    .or_else(|| self.resolver.channel_name(&id))
                    .unwrap_or_else(|| id.clone());
                self.channel(&id, &title, out);
            }
        }
    }

    fn children(&self, node: &ResolvedNode, source: &str, out: &mut String) {
        for child in &node.children {
            self.node(child, source, out);
        }
    }

    fn wrap(&self, open: &str, close: &str, node: &ResolvedNode, source: &str, out: &mut String) {
        out.push_str(open);
        self.children(node, source, out);
        out.push_str(close);
    }

    fn aligned(&self, align: &str, node: &ResolvedNode, source: &str, out: &mut String) {
        out.push_str(r#"<div style="text-align: "#);
        out.push_str(align);
        out.push_str(r#"">"#);
        self.children(node, source, out);
        out.push_str("</div>");
    }

    fn color(&self, node: &ResolvedNode, source: &str, out: &mut String) {
        let color = node
            .argument
            .as_deref()
            .filter(|c| !c.is_empty() && c.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '#'));
        match color {
            Some(color) => {
                push_open_with_attr(r#"<span style="color: "#, color, out);
                self.children(node, source, out);
                out.push_str("</span>");
            }
            None => {
                log::debug!("ignoring color {:?}", node.argument);
                self.children(node, source, out);
            }
        }
    }

    fn url(&self, node: &ResolvedNode, source: &str, out: &mut String) {
        let raw = match &node.argument {
            Some(argument) => argument.clone(),
            None => node.text_content(),
        };
        let Some(href) = link_target(&raw) else {
            log::debug!("not linking {raw:?}");
            self.children(node, source, out);
            return;
        };

        push_open_with_attr(r#"<a class="bbcode-url" rel="nofollow noopener" href=""#, &href, out);
        if node.is_leaf() {
            push_text(&raw, out);
        } else {
            self.children(node, source, out);
        }
        out.push_str("</a>");
    }

    fn image(&self, class: &str, src: Option<String>, name: &str, out: &mut String) {
        match src {
            Some(src) => {
                out.push_str(r#"<img class=""#);
                out.push_str(class);
                out.push_str(r#"" src=""#);
                out.push_str(&encode_double_quoted_attribute(&src));
                out.push_str(r#"" alt=""#);
                out.push_str(&encode_double_quoted_attribute(name));
                out.push_str(r#"">"#);
            }
            None => push_text(name, out),
        }
    }

    fn channel(&self, id: &str, title: &str, out: &mut String) {
        push_open_with_attr(r#"<span class="bbcode-channel" data-channel=""#, id, out);
        push_text(title, out);
        out.push_str("</span>");
    }
}

impl<R: Resolver> Render for HtmlRenderer<R> {
    fn render(&self, doc: &ParsedMarkup) -> String {
        let mut out = String::with_capacity(doc.source.len() * 2);
        for node in &doc.nodes {
            self.node(node, &doc.source, &mut out);
        }
        out
    }
}

/// Writes `prefix`, the escaped attribute value, and the closing `">`.
///
/// `prefix` must end inside an open double-quoted attribute.
fn push_open_with_attr(prefix: &str, value: &str, out: &mut String) {
    out.push_str(prefix);
    out.push_str(&encode_double_quoted_attribute(value));
    out.push_str(r#"">"#);
}

/// Escapes text and turns line breaks into `<br>`.
fn push_text(text: &str, out: &mut String) {
    let mut lines = text.split('\n');
    if let Some(first) = lines.next() {
        out.push_str(&encode_text(first.trim_end_matches('\r')));
    }
    for line in lines {
        out.push_str("<br>");
        out.push_str(&encode_text(line.trim_end_matches('\r')));
    }
}

/// The href for a url tag, or `None` if it must not be linked.
fn link_target(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        None
    } else if SCHEMES.iter().any(|scheme| raw.starts_with(scheme)) {
        Some(raw.to_string())
    } else if raw.contains("://") || (raw.contains(':') && !raw.contains('.')) {
        None
    } else {
        Some(format!("https://{raw}"))
    }
}
