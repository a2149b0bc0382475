//! Markdown → storage XHTML.
//!
//! pulldown-cmark already emits self-closing void tags (`<br />`, `<hr />`),
//! which the storage format requires. The only rewrite is for code blocks:
//! they become the `code` structured macro so the wiki highlights them.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Render Markdown to the store's storage representation.
pub fn to_storage(markdown: &str) -> String {
    let mut events = Vec::new();
    // (language, accumulated code) while inside a code block.
    let mut code: Option<(String, String)> = None;

    for event in Parser::new_ext(markdown, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                code = Some((language, String::new()));
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some((language, body)) = code.take() {
                    events.push(Event::Html(CowStr::from(code_macro(&language, &body))));
                }
            }
            Event::Text(text) if code.is_some() => {
                if let Some((_, body)) = code.as_mut() {
                    body.push_str(&text);
                }
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

fn code_macro(language: &str, body: &str) -> String {
    let mut out = String::from(r#"<ac:structured-macro ac:name="code">"#);
    if !language.is_empty() {
        out.push_str(r#"<ac:parameter ac:name="language">"#);
        out.push_str(language);
        out.push_str("</ac:parameter>");
    }
    out.push_str("<ac:plain-text-body><![CDATA[");
    out.push_str(&body.replace("]]>", "]]]]><![CDATA[>"));
    out.push_str("]]></ac:plain-text-body></ac:structured-macro>\n");
    out
}
