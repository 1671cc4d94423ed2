use async_trait::async_trait;

use crate::content::{ContentError, ContentSource, Figure, Scope, TableRenderer};

use super::ResourceReader;

/// Resource lookups made on behalf of one request.
///
/// Binds the request's [`Scope`] so previews resolve figures from the same
/// collection as the page.
pub struct ScopedReader<'a> {
    content: &'a dyn ContentSource,
    tables: &'a dyn TableRenderer,
    scope: &'a Scope,
}

impl<'a> ScopedReader<'a> {
    pub fn new(
        content: &'a dyn ContentSource,
        tables: &'a dyn TableRenderer,
        scope: &'a Scope,
    ) -> Self {
        Self {
            content,
            tables,
            scope,
        }
    }
}

#[async_trait]
impl ResourceReader for ScopedReader<'_> {
    async fn get_figure(&self, path: &str) -> Result<Figure, ContentError> {
        self.content.get_figure(self.scope, path).await
    }

    async fn get_resource_body(&self, path: &str) -> Result<Vec<u8>, ContentError> {
        self.content.get_resource_body(self.scope, path).await
    }

    async fn render_table(&self, table: Vec<u8>) -> Result<String, ContentError> {
        self.tables.render_table(table).await
    }

    async fn get_file_size(&self, path: &str) -> Result<u64, ContentError> {
        self.content.get_file_size(self.scope, path).await
    }
}
