//! Markdown to HTML
//!
//! Uses pulldown-cmark with the same extensions as the on-screen view and
//! gives every heading an `id` from a fresh anchor registry, so the TOC
//! fragments produced by the compiler resolve inside the exported document.

use pulldown_cmark::{html, CowStr, Event, Options, Parser, Tag, TagEnd};

use crate::report::slug::AnchorRegistry;

/// Markdown extensions enabled for export
pub fn markdown_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Attach slug ids to headings that do not already carry one
fn with_heading_ids<'a>(events: Vec<Event<'a>>) -> Vec<Event<'a>> {
    let mut registry = AnchorRegistry::new();
    let mut out = events.clone();

    let mut open: Option<(usize, String)> = None;
    for (idx, event) in events.iter().enumerate() {
        match event {
            Event::Start(Tag::Heading { .. }) => open = Some((idx, String::new())),
            Event::Text(text) | Event::Code(text) => {
                if let Some((_, buf)) = open.as_mut() {
                    buf.push_str(text);
                }
            }
            Event::End(TagEnd::Heading(_)) => {
                let Some((start, text)) = open.take() else {
                    continue;
                };
                if let Event::Start(Tag::Heading {
                    level,
                    id: None,
                    classes,
                    attrs,
                }) = &events[start]
                {
                    out[start] = Event::Start(Tag::Heading {
                        level: *level,
                        id: Some(CowStr::from(registry.slug(&text))),
                        classes: classes.clone(),
                        attrs: attrs.clone(),
                    });
                } else {
                    // Explicit ids still occupy a slot
                    registry.slug(&text);
                }
            }
            _ => {}
        }
    }

    out
}

/// Render `markdown` to an HTML fragment in the fixed light theme
pub fn render_html(markdown: &str) -> String {
    let events: Vec<Event> = Parser::new_ext(markdown, markdown_options()).collect();
    let events = with_heading_ids(events);

    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, events.into_iter());

    format!(
        "<article class=\"markdown-body\" data-theme=\"light\">\n{}</article>\n",
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{Flow, Id, Status, Task};
    use crate::report::compile::compile;

    #[test]
    fn test_render_html_wraps_in_light_article() {
        let html = render_html("hello");
        assert!(html.starts_with("<article class=\"markdown-body\" data-theme=\"light\">"));
        assert!(html.contains("<p>hello</p>"));
    }

    #[test]
    fn test_render_html_heading_ids_dedup() {
        let html = render_html("## Same\n\n## Same");
        assert!(html.contains("<h2 id=\"same\">Same</h2>"));
        assert!(html.contains("<h2 id=\"same-1\">Same</h2>"));
    }

    #[test]
    fn test_render_html_code_in_heading_counts() {
        let html = render_html("# Run `nmap`");
        assert!(html.contains("id=\"run-nmap\""));
    }

    #[test]
    fn test_render_html_tables_enabled() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_toc_links_resolve_to_heading_ids() {
        let flow = Flow {
            id: Id::from("1"),
            title: "Flow".to_string(),
            status: Status::Finished,
        };
        let tasks = vec![
            Task {
                id: Id::from("2"),
                title: "Dup".to_string(),
                status: Status::Waiting,
                input: None,
                result: None,
                subtasks: Vec::new(),
            },
            Task {
                id: Id::from("2"),
                title: "Dup".to_string(),
                status: Status::Waiting,
                input: None,
                result: None,
                subtasks: Vec::new(),
            },
        ];
        let html = render_html(&compile(&tasks, Some(&flow)));

        for fragment in ["1-flow", "2-dup", "2-dup-1"] {
            assert!(html.contains(&format!("href=\"#{}\"", fragment)));
            assert!(html.contains(&format!("id=\"{}\"", fragment)));
        }
    }
}
