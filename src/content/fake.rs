//! In-memory content source for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{
    AdHocDocument, Breadcrumb, BulletinDocument, ContentError, ContentSource, Figure,
    HomepageContent, Scope, TableRenderer,
};

#[derive(Default)]
pub(crate) struct FakeContent {
    pub bulletins: HashMap<String, BulletinDocument>,
    pub adhocs: HashMap<String, AdHocDocument>,
    pub breadcrumbs: HashMap<String, Vec<Breadcrumb>>,
    pub homepage: Option<HomepageContent>,
    pub figures: HashMap<String, Figure>,
    pub resources: HashMap<String, Vec<u8>>,
    pub file_sizes: HashMap<String, u64>,
    /// Fail every call with an upstream error instead of a lookup
    pub broken: bool,
    /// Scopes seen by `get_bulletin`, for asserting request context propagation
    pub seen_scopes: Mutex<Vec<Scope>>,
}

impl FakeContent {
    fn lookup<T: Clone>(&self, map: &HashMap<String, T>, key: &str) -> Result<T, ContentError> {
        if self.broken {
            return Err(ContentError::Upstream {
                url: key.to_string(),
                status: 500,
                message: "content store unavailable".to_string(),
            });
        }
        map.get(key)
            .cloned()
            .ok_or_else(|| ContentError::NotFound(key.to_string()))
    }
}

#[async_trait]
impl ContentSource for FakeContent {
    async fn get_bulletin(
        &self,
        scope: &Scope,
        uri: &str,
    ) -> Result<BulletinDocument, ContentError> {
        if let Ok(mut seen) = self.seen_scopes.lock() {
            seen.push(scope.clone());
        }
        self.lookup(&self.bulletins, uri)
    }

    async fn get_adhoc(&self, _scope: &Scope, uri: &str) -> Result<AdHocDocument, ContentError> {
        self.lookup(&self.adhocs, uri)
    }

    async fn get_breadcrumb(
        &self,
        _scope: &Scope,
        uri: &str,
    ) -> Result<Vec<Breadcrumb>, ContentError> {
        self.lookup(&self.breadcrumbs, uri)
    }

    async fn get_homepage_content(
        &self,
        _scope: &Scope,
        path: &str,
    ) -> Result<HomepageContent, ContentError> {
        self.homepage
            .clone()
            .ok_or_else(|| ContentError::NotFound(path.to_string()))
    }

    async fn get_figure(&self, _scope: &Scope, path: &str) -> Result<Figure, ContentError> {
        self.lookup(&self.figures, path)
    }

    async fn get_resource_body(&self, _scope: &Scope, path: &str) -> Result<Vec<u8>, ContentError> {
        self.lookup(&self.resources, path)
    }

    async fn get_file_size(&self, _scope: &Scope, path: &str) -> Result<u64, ContentError> {
        self.lookup(&self.file_sizes, path)
    }
}

#[async_trait]
impl TableRenderer for FakeContent {
    async fn render_table(&self, table: Vec<u8>) -> Result<String, ContentError> {
        Ok(format!(
            "<table class=\"rendered\">{}</table>",
            String::from_utf8_lossy(&table)
        ))
    }
}
