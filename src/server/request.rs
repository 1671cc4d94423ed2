//! Per-request context taken from the query string, headers and cookies.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::{COOKIE, HOST};
use axum::http::request::Parts;
use url::form_urlencoded;

use crate::content::Scope;
use crate::locale::DEFAULT_LANGUAGE;

const SUPPORTED_LANGUAGES: &[&str] = &["en", "cy"];

const ACCESS_TOKEN_HEADER: &str = "X-Florence-Token";
const COLLECTION_ID_HEADER: &str = "Collection-Id";
const FORWARDED_PROTO_HEADER: &str = "X-Forwarded-Proto";

const LANG_COOKIE: &str = "lang";
const ACCESS_TOKEN_COOKIE: &str = "access_token";
const COLLECTION_COOKIE: &str = "collection";

/// Who is asking, in which language, and over which protocol.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestContext {
    pub language: String,
    pub access_token: Option<String>,
    pub collection_id: Option<String>,
    pub protocol: String,
}

impl RequestContext {
    pub fn from_parts(parts: &Parts) -> Self {
        let headers = &parts.headers;

        let language = query_param(parts, "lang")
            .filter(|lang| is_supported(lang))
            .or_else(|| cookie(headers, LANG_COOKIE).filter(|lang| is_supported(lang)))
            .or_else(|| language_from_host(headers))
            .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

        Self {
            language,
            access_token: header(headers, ACCESS_TOKEN_HEADER)
                .or_else(|| cookie(headers, ACCESS_TOKEN_COOKIE)),
            collection_id: header(headers, COLLECTION_ID_HEADER)
                .or_else(|| cookie(headers, COLLECTION_COOKIE)),
            protocol: header(headers, FORWARDED_PROTO_HEADER).unwrap_or_else(|| "http".to_string()),
        }
    }

    /// The scope upstream calls are made in.
    pub fn scope(&self) -> Scope {
        Scope {
            access_token: self.access_token.clone(),
            collection_id: self.collection_id.clone(),
            language: self.language.clone(),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_parts(parts))
    }
}

fn is_supported(language: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&language)
}

fn query_param(parts: &Parts, name: &str) -> Option<String> {
    let query = parts.uri.query()?;
    form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.into_owned())
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .filter(|value| !value.is_empty())
}

/// Welsh pages are served from the `cy.` subdomain.
fn language_from_host(headers: &HeaderMap) -> Option<String> {
    let host = headers.get(HOST)?.to_str().ok()?;
    host.starts_with("cy.").then(|| "cy".to_string())
}
