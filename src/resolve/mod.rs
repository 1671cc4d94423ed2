//! Resolution of embedded resource tags into HTML fragments.
//!
//! Markdown blocks may carry self-closing tags such as
//! `<ons-equation path="abc123" />`. The [`Resolver`] finds every tag, looks up
//! the figure side-car (and any file it needs) through a [`ResourceReader`],
//! and splices the rendered fragment back in place of the tag.
//!
//! Lookups for distinct tags run concurrently, bounded by a semaphore, and the
//! whole fan-out shares one deadline. A tag whose lookup fails or times out is
//! left verbatim.

mod fragment;
mod reader;
mod tags;

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::join_all;
use tokio::sync::Semaphore;
use tracing::{debug, warn};

use crate::config::MarkdownConfig;
use crate::content::{ContentError, Figure};

pub use fragment::FigureLabels;
pub use reader::ScopedReader;
pub use tags::{Tag, TagKind, find_tags};

/// Lookups a resource tag may need.
#[async_trait]
pub trait ResourceReader: Send + Sync {
    async fn get_figure(&self, path: &str) -> Result<Figure, ContentError>;

    async fn get_resource_body(&self, path: &str) -> Result<Vec<u8>, ContentError>;

    async fn render_table(&self, table: Vec<u8>) -> Result<String, ContentError>;

    async fn get_file_size(&self, path: &str) -> Result<u64, ContentError>;
}

/// Markdown with its tags replaced, plus the fragment rendered for each path.
///
/// When one path is used by tags of different kinds, `fragments` holds the
/// fragment of the kind that appears first in the blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolved {
    pub markdown: Vec<String>,
    pub fragments: HashMap<String, String>,
}

#[derive(Debug, Clone)]
pub struct Resolver {
    max_concurrency: usize,
    timeout: Duration,
    markdown: MarkdownConfig,
}

impl Resolver {
    pub fn new(max_concurrency: usize, timeout: Duration, markdown: MarkdownConfig) -> Self {
        Self {
            max_concurrency: max_concurrency.max(1),
            timeout,
            markdown,
        }
    }

    /// Resolve the tags of a single markdown block.
    pub async fn resolve(
        &self,
        page_uri: &str,
        markdown: &str,
        reader: &dyn ResourceReader,
        labels: &FigureLabels,
    ) -> Resolved {
        self.resolve_many(page_uri, &[markdown], reader, labels).await
    }

    /// Resolve the tags of several blocks in one fan-out.
    ///
    /// The returned markdown has one entry per input block, in input order.
    pub async fn resolve_many(
        &self,
        page_uri: &str,
        blocks: &[&str],
        reader: &dyn ResourceReader,
        labels: &FigureLabels,
    ) -> Resolved {
        let found: Vec<Vec<Tag<'_>>> = blocks.iter().map(|block| find_tags(block)).collect();

        let mut unique: Vec<(TagKind, &str)> = Vec::new();
        for tag in found.iter().flatten() {
            if !unique.contains(&(tag.kind, tag.path)) {
                unique.push((tag.kind, tag.path));
            }
        }
        debug!(page_uri, tags = unique.len(), "resolving resource tags");

        let rendered = self.render_all(page_uri, &unique, reader, labels).await;
        let resolved: HashMap<(TagKind, &str), String> = unique
            .iter()
            .copied()
            .zip(rendered)
            .filter_map(|(key, html)| Some((key, html?)))
            .collect();

        let markdown = blocks
            .iter()
            .zip(&found)
            .map(|(block, tags)| splice(block, tags, &resolved))
            .collect();
        let mut fragments: HashMap<String, String> = HashMap::new();
        for key in &unique {
            if let Some(html) = resolved.get(key) {
                fragments
                    .entry(key.1.to_string())
                    .or_insert_with(|| html.clone());
            }
        }

        Resolved {
            markdown,
            fragments,
        }
    }

    /// One slot per tag, `None` where the tag stays unresolved.
    async fn render_all(
        &self,
        page_uri: &str,
        tags: &[(TagKind, &str)],
        reader: &dyn ResourceReader,
        labels: &FigureLabels,
    ) -> Vec<Option<String>> {
        if tags.is_empty() {
            return Vec::new();
        }

        let permits = Semaphore::new(self.max_concurrency);
        let lookups = tags.iter().map(|&(kind, path)| {
            let permits = &permits;
            let figure = figure_path(page_uri, path);
            async move {
                let _permit = permits.acquire().await.ok()?;
                match fragment::render(kind, &figure, reader, &self.markdown, labels).await {
                    Ok(html) => Some(html),
                    Err(e) => {
                        warn!(
                            kind = kind.as_str(),
                            path = %figure,
                            error = %e,
                            "leaving resource tag unresolved"
                        );
                        None
                    }
                }
            }
        });

        match tokio::time::timeout(self.timeout, join_all(lookups)).await {
            Ok(results) => results,
            Err(_) => {
                warn!(
                    page_uri,
                    tags = tags.len(),
                    timeout = ?self.timeout,
                    "resource resolution timed out, leaving tags unresolved"
                );
                vec![None; tags.len()]
            }
        }
    }
}

/// Tag paths without a leading slash are relative to the page.
fn figure_path(page_uri: &str, path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", page_uri.trim_end_matches('/'), path)
    }
}

fn splice(block: &str, tags: &[Tag<'_>], resolved: &HashMap<(TagKind, &str), String>) -> String {
    let mut out = String::with_capacity(block.len());
    let mut last = 0;
    for tag in tags {
        out.push_str(&block[last..tag.span.start]);
        match resolved.get(&(tag.kind, tag.path)) {
            Some(html) => out.push_str(html),
            None => out.push_str(&block[tag.span.clone()]),
        }
        last = tag.span.end;
    }
    out.push_str(&block[last..]);
    out
}
