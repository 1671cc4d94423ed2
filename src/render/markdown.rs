//! Markdown rendering for bulletin sections and figure notes.

use std::collections::HashSet;

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::config::MarkdownConfig;

#[derive(thiserror::Error, Debug)]
pub enum MarkdownError {
    #[error("invalid markdown extension: {0}")]
    InvalidExtension(String),
}

fn options(markdown_config: &MarkdownConfig) -> Result<Options, MarkdownError> {
    let mut options = Options::empty();
    for extension in &markdown_config.extensions {
        match extension.as_str() {
            "definition_lists" => options.insert(Options::ENABLE_DEFINITION_LIST),
            "footnotes" => options.insert(Options::ENABLE_FOOTNOTES),
            "gfm" => options.insert(Options::ENABLE_GFM),
            "heading_attributes" => options.insert(Options::ENABLE_HEADING_ATTRIBUTES),
            "strikethrough" => options.insert(Options::ENABLE_STRIKETHROUGH),
            "tables" => options.insert(Options::ENABLE_TABLES),
            "tasklists" => options.insert(Options::ENABLE_TASKLISTS),
            other => return Err(MarkdownError::InvalidExtension(other.to_string())),
        }
    }
    Ok(options)
}

/// Render markdown to HTML.
///
/// Raw HTML, including resolved figure fragments, passes through untouched.
/// Headings without an explicit id get one derived from their text.
pub fn render_markdown(
    markdown: &str,
    markdown_config: &MarkdownConfig,
) -> Result<String, MarkdownError> {
    let parser = Parser::new_ext(markdown, options(markdown_config)?);

    let mut in_heading: Option<HeadingLevel> = None;
    let mut heading_text = String::new();
    let mut heading_events: Vec<Event> = Vec::new();
    let mut used_heading_ids: HashSet<String> = HashSet::new();
    let mut events: Vec<Event> = Vec::new();

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, ref id, .. }) if in_heading.is_none() => {
                if let Some(existing_id) = id {
                    used_heading_ids.insert(existing_id.to_string());
                    events.push(event);
                    continue;
                }
                in_heading = Some(level);
                heading_text.clear();
                heading_events.clear();
            }
            Event::End(TagEnd::Heading(_)) if in_heading.is_some() => {
                let level = in_heading.take().unwrap_or(HeadingLevel::H2) as usize;

                let base_id = slugify(&heading_text);
                let mut id = base_id.clone();
                let mut suffix = 1;
                while used_heading_ids.contains(&id) {
                    id = format!("{}-{}", base_id, suffix);
                    suffix += 1;
                }
                used_heading_ids.insert(id.clone());

                let mut inner = String::new();
                html::push_html(&mut inner, heading_events.drain(..));
                events.push(Event::Html(
                    format!("<h{} id=\"{}\">{}</h{}>\n", level, id, inner, level).into(),
                ));
            }
            event if in_heading.is_some() => {
                if let Event::Text(text) | Event::Code(text) = &event {
                    heading_text.push_str(text);
                }
                heading_events.push(event);
            }
            event => events.push(event),
        }
    }

    let mut html_output = String::new();
    html::push_html(&mut html_output, events.into_iter());
    Ok(html_output)
}

/// Convert a string to a slug suitable for use as an HTML id.
fn slugify(s: &str) -> String {
    s.to_lowercase()
        .replace(' ', "-")
        .replace(|c: char| !c.is_alphanumeric() && c != '-', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Main points"), "main-points");
        assert_eq!(slugify("What's changed?"), "whats-changed");
    }

    #[test]
    fn test_render_basic_markdown() {
        let html =
            render_markdown("## Main points\n\nGDP rose.", &MarkdownConfig::default()).unwrap();

        assert!(html.contains("<h2 id=\"main-points\">Main points</h2>"));
        assert!(html.contains("<p>GDP rose.</p>"));
    }

    #[test]
    fn test_heading_keeps_inline_markup() {
        let html = render_markdown(
            "## See [the data](/economy/data) for *2024*",
            &MarkdownConfig::default(),
        )
        .unwrap();

        assert!(html.starts_with("<h2 id=\"see-the-data-for-2024\">"));
        assert!(html.contains("<a href=\"/economy/data\">the data</a>"));
        assert!(html.contains("<em>2024</em>"));
        assert!(html.trim_end().ends_with("</h2>"));
    }

    #[test]
    fn test_heading_text_is_escaped() {
        let html = render_markdown("## Births & deaths", &MarkdownConfig::default()).unwrap();

        assert!(html.contains("<h2 id=\"births--deaths\">Births &amp; deaths</h2>"));
    }

    #[test]
    fn test_duplicate_headings_get_unique_ids() {
        let html = render_markdown("## Notes\n\n## Notes", &MarkdownConfig::default()).unwrap();

        assert!(html.contains("id=\"notes\""));
        assert!(html.contains("id=\"notes-1\""));
    }

    #[test]
    fn test_raw_html_passes_through() {
        let markdown = "Before\n\n<figure class=\"figure\">\n<svg></svg>\n</figure>\n\nAfter";

        let html = render_markdown(markdown, &MarkdownConfig::default()).unwrap();

        assert!(html.contains("<figure class=\"figure\">\n<svg></svg>\n</figure>"));
        assert!(html.contains("<p>After</p>"));
    }

    #[test]
    fn test_tables_extension() {
        let markdown = "| a | b |\n|---|---|\n| 1 | 2 |";

        let html = render_markdown(markdown, &MarkdownConfig::default()).unwrap();

        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_invalid_extension() {
        let config = MarkdownConfig {
            extensions: vec!["nonexistent".to_string()],
        };

        let result = render_markdown("text", &config);

        assert!(matches!(result, Err(MarkdownError::InvalidExtension(_))));
    }
}
