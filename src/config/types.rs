//! Configuration type definitions.
//!
//! These types are pure data - no I/O or complex logic.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEBUG_PATTERN_LIBRARY_PATH: &str = "http://localhost:9000/dist";
const CDN_PATTERN_LIBRARY_PATH: &str = "//cdn.ons.gov.uk/dp-design-system/dd99d1e";

// =============================================================================
// Service configuration
// =============================================================================

/// Service configuration, built once at startup and shared with every request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Address the HTTP server binds to, e.g. ":26500" or "127.0.0.1:8080"
    pub bind_addr: String,
    /// Serve design system assets from a local pattern library
    pub debug: bool,
    /// Public domain used for canonical and share URLs
    pub site_domain: String,
    pub beta_banner_enabled: bool,
    /// Design system assets location. Derived from `debug` when left empty.
    pub pattern_library_assets_path: String,
    /// Base URL of the API router fronting the content services
    pub api_router_url: String,
    /// Base URL of the table rendering service
    pub table_renderer_url: String,
    /// Directory containing the page templates
    pub templates_dir: PathBuf,
    pub graceful_shutdown_timeout_secs: u64,
    /// Timeout applied to every upstream HTTP call
    pub upstream_timeout_secs: u64,
    /// Deadline for resolving all resource tags of one page
    pub resolve_timeout_secs: u64,
    /// Maximum concurrent resource lookups per page
    pub resolve_max_concurrency: usize,
    pub markdown: MarkdownConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: ":26500".to_string(),
            debug: false,
            site_domain: "localhost".to_string(),
            beta_banner_enabled: true,
            pattern_library_assets_path: String::new(),
            api_router_url: "http://localhost:23200/v1".to_string(),
            table_renderer_url: "http://localhost:23300".to_string(),
            templates_dir: PathBuf::from("templates"),
            graceful_shutdown_timeout_secs: 5,
            upstream_timeout_secs: 10,
            resolve_timeout_secs: 10,
            resolve_max_concurrency: 10,
            markdown: MarkdownConfig::default(),
        }
    }
}

impl Config {
    /// Fill in values derived from other settings.
    pub(crate) fn apply_derived(&mut self) {
        if self.pattern_library_assets_path.is_empty() {
            self.pattern_library_assets_path = if self.debug {
                DEBUG_PATTERN_LIBRARY_PATH.to_string()
            } else {
                CDN_PATTERN_LIBRARY_PATH.to_string()
            };
        }
    }

    /// The socket address to bind, accepting the ":port" shorthand.
    pub fn socket_addr(&self) -> String {
        if self.bind_addr.starts_with(':') {
            format!("0.0.0.0{}", self.bind_addr)
        } else {
            self.bind_addr.clone()
        }
    }

    pub fn graceful_shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.graceful_shutdown_timeout_secs)
    }

    pub fn upstream_timeout(&self) -> Duration {
        Duration::from_secs(self.upstream_timeout_secs)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

// =============================================================================
// Markdown configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarkdownConfig {
    /// Extensions to enable for markdown processing
    #[serde(default = "default_markdown_extensions")]
    pub extensions: Vec<String>,
}

fn default_markdown_extensions() -> Vec<String> {
    vec![
        "footnotes".to_string(),
        "gfm".to_string(),
        "strikethrough".to_string(),
        "tables".to_string(),
    ]
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            extensions: default_markdown_extensions(),
        }
    }
}
