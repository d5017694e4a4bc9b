use pulldown_cmark::{html::push_html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

mod highlight;

pub use highlight::Highlighter;

use crate::error::Result;

/// Strategy used for fenced and indented code blocks.
pub trait CodeRenderer {
    fn render_code(&self, language: Option<&str>, source: &str) -> Result<String>;
}

/// Renders every code block as escaped, unhighlighted text.
#[derive(Clone, Copy, Debug, Default)]
pub struct PlainCode;

impl CodeRenderer for PlainCode {
    fn render_code(&self, language: Option<&str>, source: &str) -> Result<String> {
        Ok(plain_code_block(language, source))
    }
}

pub(crate) fn plain_code_block(language: Option<&str>, source: &str) -> String {
    match language {
        Some(language) => format!(
            "<pre><code class=\"language-{}\">{}</code></pre>\n",
            tera::escape_html(language),
            tera::escape_html(source)
        ),
        None => format!("<pre><code>{}</code></pre>\n", tera::escape_html(source)),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct CodeBlock {
    language: Option<String>,
    source: String,
}

/// First word of a fence info string, e.g. `rust` for ```` ```rust,ignore ````.
fn fence_language(kind: &CodeBlockKind) -> Option<String> {
    match kind {
        CodeBlockKind::Fenced(info) => info
            .split(|ch: char| ch.is_whitespace() || ch == ',')
            .next()
            .filter(|token| !token.is_empty())
            .map(|token| token.to_owned()),
        CodeBlockKind::Indented => None,
    }
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_TASKLISTS
}

/// Render markdown to HTML, handing each code block to `renderer`.
pub fn render<R: CodeRenderer + ?Sized>(content: &str, renderer: &R) -> Result<String> {
    let mut events: Vec<Event> = vec![];
    let mut code: Option<CodeBlock> = None;

    for event in Parser::new_ext(content, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                code = Some(CodeBlock {
                    language: fence_language(&kind),
                    source: String::new(),
                });
            }
            Event::End(TagEnd::CodeBlock) => {
                if let Some(block) = code.take() {
                    let html = renderer.render_code(block.language.as_deref(), &block.source)?;
                    events.push(Event::Html(html.into()));
                }
            }
            Event::Text(text) if code.is_some() => {
                if let Some(block) = code.as_mut() {
                    block.source.push_str(&text);
                }
            }
            event => events.push(event),
        }
    }

    let mut html = String::with_capacity(content.len() * 2);
    push_html(&mut html, events.into_iter());

    Ok(html)
}

#[cfg(test)]
mod test {
    use std::cell::RefCell;

    use crate::{
        error::Result,
        markdown::{render, CodeRenderer, PlainCode},
    };

    #[derive(Default)]
    struct Recorder {
        seen: RefCell<Vec<(Option<String>, String)>>,
    }

    impl CodeRenderer for Recorder {
        fn render_code(&self, language: Option<&str>, source: &str) -> Result<String> {
            self.seen
                .borrow_mut()
                .push((language.map(|l| l.to_owned()), source.to_owned()));
            Ok("<div class=\"code\"></div>".into())
        }
    }

    #[test]
    fn heading() {
        assert_eq!(render("# Hi", &PlainCode).unwrap(), "<h1>Hi</h1>\n");
    }

    #[test]
    fn dispatches_code_blocks() {
        let recorder = Recorder::default();
        let html = render(
            "Intro\n\n```rust,ignore\nfn main() {}\n```\n\n    indented\n\n```\nplain\n```\n",
            &recorder,
        )
        .unwrap();

        assert_eq!(
            *recorder.seen.borrow(),
            vec![
                (Some("rust".to_owned()), "fn main() {}\n".to_owned()),
                (None, "indented\n".to_owned()),
                (None, "plain\n".to_owned()),
            ]
        );
        assert!(html.starts_with("<p>Intro</p>\n"));
        assert_eq!(html.matches("<div class=\"code\"></div>").count(), 3);
    }

    #[test]
    fn plain_code_is_escaped() {
        assert_eq!(
            render("```html\n<b>&</b>\n```", &PlainCode).unwrap(),
            "<pre><code class=\"language-html\">&lt;b&gt;&amp;&lt;&#x2F;b&gt;\n</code></pre>\n"
        );
    }

    #[test]
    fn deterministic() {
        let source = "Some *emphasis*, a [link](https://example.com).\n\n| a | b |\n|---|---|\n| 1 | 2 |\n";
        assert_eq!(
            render(source, &PlainCode).unwrap(),
            render(source, &PlainCode).unwrap()
        );
    }
}
