use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, warn};

use crate::content::ContentError;
use crate::render::RenderError;

/// Why a page request failed.
#[derive(thiserror::Error, Debug)]
pub enum HandlerError {
    #[error("failed to fetch {what} for {uri}: {source}")]
    Content {
        what: &'static str,
        uri: String,
        #[source]
        source: ContentError,
    },

    /// Any breadcrumb failure, not-found included, is a server error.
    #[error("failed to fetch breadcrumbs for {uri}: {source}")]
    Breadcrumbs {
        uri: String,
        #[source]
        source: ContentError,
    },

    #[error("failed to render page: {0}")]
    Render(#[from] RenderError),
}

impl HandlerError {
    pub fn content(what: &'static str, uri: &str, source: ContentError) -> Self {
        HandlerError::Content {
            what,
            uri: uri.to_string(),
            source,
        }
    }

    pub fn breadcrumbs(uri: &str, source: ContentError) -> Self {
        HandlerError::Breadcrumbs {
            uri: uri.to_string(),
            source,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::Content { source, .. } if source.status_hint() == 404 => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::NOT_FOUND {
            warn!(error = %self, "page not found");
        } else {
            error!(error = %self, "request failed");
        }
        (status, status.canonical_reason().unwrap_or_default()).into_response()
    }
}
