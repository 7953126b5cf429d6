//! Description Rendering
//!
//! Markdown for event and challenge descriptions via pulldown-cmark, with:
//! - Syntax highlighting for fenced code blocks (syntect)
//! - Size-constrained images, with proxy-relative media paths encoded
//! - External links opened in a new tab

use std::sync::OnceLock;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

/// Syntax highlighter resources (lazy loaded)
static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn get_syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn get_theme() -> &'static Theme {
    THEME_SET
        .get_or_init(ThemeSet::load_defaults)
        .themes
        .get("InspiredGitHub")
        .expect("Theme not found")
}

fn get_options() -> Options {
    Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS
}

/// Render a description to HTML
pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, get_options());
    let events = transform_events(parser);
    let mut html_output = String::new();
    push_html(&mut html_output, events.into_iter());
    html_output
}

/// Render for inline use (strips outer <p> tags), e.g. card teasers
pub fn parse_markdown_inline(text: &str) -> String {
    let html = parse_markdown(text);

    html.trim()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
        .map(|s| s.to_string())
        .unwrap_or(html)
}

// State for the event transformer
enum State {
    Normal,
    InCodeBlock { lang: Option<String>, content: String },
    InImage { dropped_depth: usize },
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    let mut state = State::Normal;

    for event in parser {
        match state {
            State::Normal => match event {
                // --- Code Blocks (Highlighting) ---
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(l) => Some(l.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    state = State::InCodeBlock { lang, content: String::new() };
                }

                // --- Images (size-constrained, proxy-relative paths encoded) ---
                Event::Start(Tag::Image { dest_url, .. }) => {
                    let url = resolve_media_url(&dest_url);
                    let html = format!(
                        r#"<img src="{}" style="max-width: 100%; max-height: 400px; display: block; border-radius: 4px;" />"#,
                        url
                    );
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::InImage { dropped_depth: 0 }; // Drop the alt text events
                }

                // --- External links open in a new tab ---
                Event::Start(Tag::Link { dest_url, title, .. }) => {
                    let html = if is_external_url(&dest_url) {
                        format!(
                            r#"<a href="{}" title="{}" target="_blank" rel="noopener">"#,
                            dest_url, title
                        )
                    } else {
                        format!(r#"<a href="{}" title="{}">"#, dest_url, title)
                    };
                    events.push(Event::Html(CowStr::from(html)));
                }
                Event::End(TagEnd::Link) => {
                    events.push(Event::Html(CowStr::from("</a>".to_string())));
                }

                other => events.push(other),
            },

            State::InCodeBlock { ref mut lang, ref mut content } => match event {
                Event::Text(t) => content.push_str(&t),
                Event::End(TagEnd::CodeBlock) => {
                    let html = highlight_code(content, lang.as_deref());
                    events.push(Event::Html(CowStr::from(html)));
                    state = State::Normal;
                }
                _ => {}
            },

            State::InImage { ref mut dropped_depth } => match event {
                Event::Start(_) => *dropped_depth += 1,
                Event::End(_) => {
                    if *dropped_depth == 0 {
                        state = State::Normal;
                    } else {
                        *dropped_depth -= 1;
                    }
                }
                _ => {}
            },
        }
    }

    events
}

fn highlight_code(code: &str, lang: Option<&str>) -> String {
    let ss = get_syntax_set();
    let theme = get_theme();

    let syntax = lang
        .and_then(|l| ss.find_syntax_by_token(l))
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    highlighted_html_for_string(code, ss, syntax, theme)
        .unwrap_or_else(|_| format!("<pre><code>{}</code></pre>", escape_html(code)))
}

const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'{')
    .add(b'}');

fn is_external_url(url: &str) -> bool {
    let lower = url.to_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Proxy-relative media paths (cover images, attachments) may contain spaces
/// and unicode; encode them. Absolute and data URLs pass through untouched.
pub fn resolve_media_url(url: &str) -> String {
    if is_external_url(url) || url.starts_with("data:") {
        url.to_string()
    } else {
        utf8_percent_encode(url, PATH_ENCODE_SET).to_string()
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_render_strips_paragraph_wrapper() {
        let html = parse_markdown_inline("just *one* line");
        assert!(!html.starts_with("<p>"));
        assert!(html.contains("<em>one</em>"));
    }

    #[test]
    fn external_links_get_new_tab_attributes() {
        let html = parse_markdown("[docs](https://example.com/docs)");
        assert!(html.contains(r#"target="_blank""#));
        assert!(html.contains(r#"rel="noopener""#));
    }

    #[test]
    fn relative_media_paths_are_encoded() {
        assert_eq!(
            resolve_media_url("/media/cover image.png"),
            "/media/cover%20image.png"
        );
        assert_eq!(
            resolve_media_url("https://cdn.example.com/a b.png"),
            "https://cdn.example.com/a b.png"
        );
    }
}
