//! # Auto-Link Preprocessor
//!
//! Rewrites bare URLs into explicit `[url=...]...[/url]` markup before the
//! text reaches the scanner:
//!
//! ```
//! use bbmark_syntax::autolink::autolink;
//!
//! assert_eq!(
//!     autolink("see http://www.example.com/a/b"),
//!     "see [url=http://www.example.com/a/b]example.com[/url]"
//! );
//! ```
//!
//! Words are separated by spaces and line breaks only. A word is rewritten
//! when it starts with one of [`SCHEMES`] and the word before it is not the
//! start of explicit link markup. Each occurrence is judged on its own, so
//! the same URL can be wrapped in one place and left bare in another. Rewritten words no longer start with a
//! scheme, so running the pass twice changes nothing.

use std::sync::OnceLock;

use regex::Regex;

/// Prefixes that mark a word as a bare URL.
pub const SCHEMES: [&str; 3] = ["http://", "https://", "ftp://"];

/// Endings of a preceding word that mean the URL is already explicit markup.
const EXPLICIT_MARKERS: [&str; 2] = ["[url=", "url:"];

/// Wraps every bare URL word in `text` with url markup.
pub fn autolink(text: &str) -> String {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let word_regex = WORD_REGEX.get_or_init(|| Regex::new(r"[^ \r\n]+").expect("Invalid word regex"));

    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut previous: Option<&str> = None;

    for word in word_regex.find_iter(text) {
        let candidate = word.as_str();
        let explicit =
            previous.is_some_and(|p| EXPLICIT_MARKERS.iter().any(|marker| p.ends_with(marker)));
        previous = Some(candidate);

        if explicit {
            continue;
        }
        let Some(display) = display_form(candidate) else {
            continue;
        };

        log::trace!("autolinking {candidate:?} at {}", word.start());
        out.push_str(&text[copied..word.start()]);
        out.push_str("[url=");
        out.push_str(candidate);
        out.push(']');
        out.push_str(display);
        out.push_str("[/url]");
        copied = word.end();
    }

    out.push_str(&text[copied..]);
    out
}

/// The short text shown for a bare URL: the host without `www.`.
///
/// Returns `None` when `url` does not start with a known scheme or nothing
/// displayable is left after stripping.
pub fn display_form(url: &str) -> Option<&str> {
    let rest = SCHEMES.iter().find_map(|scheme| url.strip_prefix(scheme))?;
    let host = match rest.split_once('/') {
        Some((host, _)) => host,
        None => rest,
    };
    let display = host.strip_prefix("www.").unwrap_or(host);
    (!display.is_empty()).then_some(display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("http://x.com/a/b", Some("x.com"))]
    #[case("https://www.example.org", Some("example.org"))]
    #[case("ftp://files.example.org/pub/", Some("files.example.org"))]
    #[case("http://www.x.com/", Some("x.com"))]
    #[case("http://", None)]
    #[case("http:///path", None)]
    #[case("mailto:a@b.c", None)]
    #[case("xhttp://x.com", None)]
    fn display_forms(#[case] url: &str, #[case] expected: Option<&str>) {
        assert_eq!(display_form(url), expected);
    }

    #[test]
    fn wraps_bare_url_once() {
        let once = autolink("see http://x.com/a/b");
        assert_eq!(once, "see [url=http://x.com/a/b]x.com[/url]");
        assert_eq!(autolink(&once), once);
    }

    #[test]
    fn text_without_urls_is_unchanged() {
        let input = "nothing to see\r\nhere [b]at all[/b]";
        assert_eq!(autolink(input), input);
    }

    #[test]
    fn every_occurrence_is_wrapped() {
        assert_eq!(
            autolink("http://a.com and\nhttp://a.com"),
            "[url=http://a.com]a.com[/url] and\n[url=http://a.com]a.com[/url]"
        );
    }

    #[test]
    fn prefix_url_does_not_corrupt_longer_url() {
        assert_eq!(
            autolink("http://a.com http://a.com/x"),
            "[url=http://a.com]a.com[/url] [url=http://a.com/x]a.com[/url]"
        );
    }

    #[rstest]
    #[case("[url= http://x.com]site[/url]")]
    #[case("url: http://x.com")]
    #[case("homepage url: http://x.com")]
    fn explicit_markup_is_left_alone(#[case] input: &str) {
        assert_eq!(autolink(input), input);
    }

    #[test]
    fn only_the_url_after_a_marker_is_skipped() {
        assert_eq!(
            autolink("url: http://a.com http://b.com"),
            "url: http://a.com [url=http://b.com]b.com[/url]"
        );
    }

    #[test]
    fn repeated_url_is_judged_per_occurrence() {
        // The copy after the marker stays bare; the later copy is wrapped.
        assert_eq!(
            autolink("url: http://a.com http://a.com"),
            "url: http://a.com [url=http://a.com]a.com[/url]"
        );
        assert_eq!(
            autolink("http://a.com url: http://a.com"),
            "[url=http://a.com]a.com[/url] url: http://a.com"
        );
    }

    #[test]
    fn url_inside_a_word_is_not_a_candidate() {
        let input = "(http://x.com) [url=http://x.com]x[/url]";
        assert_eq!(autolink(input), input);
    }

    #[test]
    fn preserves_surrounding_whitespace() {
        assert_eq!(
            autolink("  https://x.com  "),
            "  [url=https://x.com]x.com[/url]  "
        );
    }
}
