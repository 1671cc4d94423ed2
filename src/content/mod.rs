//! Access to the upstream content services.
//!
//! The controller only depends on the [`ContentSource`] and [`TableRenderer`]
//! traits; [`ApiClient`] and [`TableRendererClient`] are the HTTP
//! implementations used in production.

mod client;
#[cfg(test)]
pub(crate) mod fake;
pub mod model;

use async_trait::async_trait;

pub use client::{ApiClient, TableRendererClient};
pub use model::{
    AdHocDocument, Breadcrumb, BulletinDocument, EmergencyBanner, Figure, FigureFile,
    HomepageContent,
};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ContentError {
    #[error("content not found: {0}")]
    NotFound(String),

    #[error("upstream returned {status} for {url}: {message}")]
    Upstream {
        url: String,
        status: u16,
        message: String,
    },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ContentError {
    /// The HTTP status this failure corresponds to upstream.
    pub fn status_hint(&self) -> u16 {
        match self {
            ContentError::NotFound(_) => 404,
            ContentError::Upstream { status, .. } => *status,
            _ => 500,
        }
    }
}

// =============================================================================
// Request scope
// =============================================================================

/// Who is asking and for which collection and language.
///
/// Passed on every upstream call so that previews of unpublished
/// collections see their own content.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scope {
    pub access_token: Option<String>,
    pub collection_id: Option<String>,
    pub language: String,
}

// =============================================================================
// Capabilities
// =============================================================================

/// Source of content documents, navigation and resource side-cars.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn get_bulletin(&self, scope: &Scope, uri: &str)
    -> Result<BulletinDocument, ContentError>;

    async fn get_adhoc(&self, scope: &Scope, uri: &str) -> Result<AdHocDocument, ContentError>;

    async fn get_breadcrumb(&self, scope: &Scope, uri: &str)
    -> Result<Vec<Breadcrumb>, ContentError>;

    async fn get_homepage_content(
        &self,
        scope: &Scope,
        path: &str,
    ) -> Result<HomepageContent, ContentError>;

    async fn get_figure(&self, scope: &Scope, path: &str) -> Result<Figure, ContentError>;

    async fn get_resource_body(&self, scope: &Scope, path: &str) -> Result<Vec<u8>, ContentError>;

    async fn get_file_size(&self, scope: &Scope, path: &str) -> Result<u64, ContentError>;
}

/// Service turning table JSON into rendered table markup.
#[async_trait]
pub trait TableRenderer: Send + Sync {
    async fn render_table(&self, table: Vec<u8>) -> Result<String, ContentError>;
}
