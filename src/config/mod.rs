//! Configuration loading and types for the controller.
//!
//! - Type definitions for config structures (`types`)
//! - Loading from defaults, an optional file and the environment (`load`)

mod load;
mod types;

pub use types::{Config, MarkdownConfig};

// =============================================================================
// Errors
// =============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to deserialize config: {0}")]
    Deserialize(#[from] config::ConfigError),

    #[error("failed to get current working directory: {0}")]
    CwdFailure(std::io::Error),

    #[error("{0}")]
    Validation(String),
}
