//! Detection of embedded resource tags in markdown.
//!
//! Tags are self-closing elements such as `<ons-chart path="a1b2c3" />`.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<ons-(equation|image|chart|table)\s+path="([A-Za-z0-9/_.+\-]+)"\s*/>"#).unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    Equation,
    Image,
    Chart,
    Table,
}

impl TagKind {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "equation" => Some(TagKind::Equation),
            "image" => Some(TagKind::Image),
            "chart" => Some(TagKind::Chart),
            "table" => Some(TagKind::Table),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TagKind::Equation => "equation",
            TagKind::Image => "image",
            TagKind::Chart => "chart",
            TagKind::Table => "table",
        }
    }
}

/// A resource tag found in a markdown block.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag<'a> {
    pub kind: TagKind,
    pub path: &'a str,
    /// Byte range of the whole tag within the block
    pub span: Range<usize>,
}

/// Find every resource tag in the markdown, in document order.
pub fn find_tags(markdown: &str) -> Vec<Tag<'_>> {
    TAG_RE
        .captures_iter(markdown)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let kind = TagKind::from_name(caps.get(1)?.as_str())?;
            let path = caps.get(2)?.as_str();
            Some(Tag {
                kind,
                path,
                span: whole.range(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tags_in_order() {
        let markdown = "Intro\n\n<ons-chart path=\"c1\"/>\n\ntext <ons-equation path=\"abc123\" />\n<ons-image path=\"/a/b/img-1.2\" />";

        let tags = find_tags(markdown);

        assert_eq!(tags.len(), 3);
        assert_eq!(tags[0].kind, TagKind::Chart);
        assert_eq!(tags[0].path, "c1");
        assert_eq!(tags[1].kind, TagKind::Equation);
        assert_eq!(tags[1].path, "abc123");
        assert_eq!(&markdown[tags[1].span.clone()], "<ons-equation path=\"abc123\" />");
        assert_eq!(tags[2].kind, TagKind::Image);
        assert_eq!(tags[2].path, "/a/b/img-1.2");
    }

    #[test]
    fn test_ignores_malformed_tags() {
        let markdown = concat!(
            "<ons-video path=\"v1\" />",
            "<ons-chart path=\"has space\" />",
            "<ons-chart path=\"c1\">",
            "<ons-table path=\"\" />",
        );

        assert!(find_tags(markdown).is_empty());
    }
}
