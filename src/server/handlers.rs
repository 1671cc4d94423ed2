use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use tracing::{info, warn};

use crate::content::{HomepageContent, Scope};
use crate::mapper::{PageContext, create_adhoc_model, create_bulletin_model};
use crate::render::figure_function;
use crate::resolve::{FigureLabels, Resolved, ScopedReader};

use super::AppState;
use super::error::HandlerError;
use super::request::RequestContext;

const HOMEPAGE_PATH: &str = "/";
const DATA_SUFFIX: &str = "/data";
const ADHOC_SEGMENT: &str = "adhocs";

/// Which page layout a bulletin is rendered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Current,
    /// Legacy layout, without site-wide messaging
    Sixteens,
}

impl Variant {
    fn template(self) -> &'static str {
        match self {
            Variant::Current => "bulletin",
            Variant::Sixteens => "sixteens-bulletin",
        }
    }
}

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(uri): Path<String>,
) -> Result<Response, HandlerError> {
    let uri = format!("/{}", uri.trim_start_matches('/'));

    if let Some(bulletin_uri) = uri.strip_suffix(DATA_SUFFIX) {
        return bulletin_data(&state, &ctx, bulletin_uri).await;
    }
    if uri.split('/').any(|segment| segment == ADHOC_SEGMENT) {
        return adhoc(&state, &ctx, &uri).await;
    }
    bulletin(&state, &ctx, &uri, Variant::Current).await
}

pub async fn sixteens_page(
    State(state): State<AppState>,
    ctx: RequestContext,
    Path(uri): Path<String>,
) -> Result<Response, HandlerError> {
    let uri = format!("/{}", uri.trim_start_matches('/'));
    bulletin(&state, &ctx, &uri, Variant::Sixteens).await
}

async fn bulletin(
    state: &AppState,
    ctx: &RequestContext,
    uri: &str,
    variant: Variant,
) -> Result<Response, HandlerError> {
    let scope = ctx.scope();

    let (bulletin, homepage) = match variant {
        Variant::Current => tokio::join!(
            state.content.get_bulletin(&scope, uri),
            homepage_content(state, &scope)
        ),
        Variant::Sixteens => (
            state.content.get_bulletin(&scope, uri).await,
            HomepageContent::default(),
        ),
    };
    let mut bulletin = bulletin.map_err(|e| HandlerError::content("bulletin", uri, e))?;

    let breadcrumbs = state
        .content
        .get_breadcrumb(&scope, &bulletin.uri)
        .await
        .map_err(|e| HandlerError::breadcrumbs(&bulletin.uri, e))?;

    let reader = ScopedReader::new(state.content.as_ref(), state.tables.as_ref(), &scope);
    let blocks: Vec<&str> = bulletin
        .sections
        .iter()
        .chain(&bulletin.accordion)
        .map(|section| section.markdown.as_str())
        .collect();
    let labels = FigureLabels::new(&state.localiser, &ctx.language);
    let Resolved {
        markdown,
        fragments,
    } = state
        .resolver
        .resolve_many(&bulletin.uri, &blocks, &reader, &labels)
        .await;
    for (section, resolved) in bulletin
        .sections
        .iter_mut()
        .chain(bulletin.accordion.iter_mut())
        .zip(markdown)
    {
        section.markdown = resolved;
    }

    let context = PageContext {
        language: ctx.language.clone(),
        request_protocol: ctx.protocol.clone(),
        site_domain: state.config.site_domain.clone(),
        service_message: homepage.service_message,
        emergency_banner: homepage.emergency_banner,
    };
    let base = state.renderer.new_base_page(&ctx.language);
    let model = create_bulletin_model(base, &bulletin, &breadcrumbs, &context, &state.localiser);

    let html = state.renderer.build_page_with_functions(
        variant.template(),
        &model,
        vec![("figure", figure_function(fragments))],
    )?;
    info!(uri = %bulletin.uri, template = variant.template(), "rendered bulletin");
    Ok(Html(html).into_response())
}

/// The bulletin document as served by the content API.
async fn bulletin_data(
    state: &AppState,
    ctx: &RequestContext,
    uri: &str,
) -> Result<Response, HandlerError> {
    let bulletin = state
        .content
        .get_bulletin(&ctx.scope(), uri)
        .await
        .map_err(|e| HandlerError::content("bulletin", uri, e))?;
    Ok(Json(bulletin).into_response())
}

async fn adhoc(state: &AppState, ctx: &RequestContext, uri: &str) -> Result<Response, HandlerError> {
    let scope = ctx.scope();

    let mut adhoc = state
        .content
        .get_adhoc(&scope, uri)
        .await
        .map_err(|e| HandlerError::content("ad hoc", uri, e))?;
    let breadcrumbs = state
        .content
        .get_breadcrumb(&scope, &adhoc.uri)
        .await
        .map_err(|e| HandlerError::breadcrumbs(&adhoc.uri, e))?;

    let reader = ScopedReader::new(state.content.as_ref(), state.tables.as_ref(), &scope);
    let blocks: Vec<&str> = adhoc.markdown.iter().map(String::as_str).collect();
    let labels = FigureLabels::new(&state.localiser, &ctx.language);
    let resolved = state
        .resolver
        .resolve_many(&adhoc.uri, &blocks, &reader, &labels)
        .await;
    adhoc.markdown = resolved.markdown;

    let base = state.renderer.new_base_page(&ctx.language);
    let model = create_adhoc_model(base, &adhoc, &breadcrumbs, &state.localiser);

    let html = state.renderer.build_page_with_functions(
        "adhoc",
        &model,
        vec![("figure", figure_function(resolved.fragments))],
    )?;
    Ok(Html(html).into_response())
}

/// Site-wide messaging. A failure leaves the page without it.
async fn homepage_content(state: &AppState, scope: &Scope) -> HomepageContent {
    match state.content.get_homepage_content(scope, HOMEPAGE_PATH).await {
        Ok(content) => content,
        Err(e) => {
            warn!(error = %e, "failed to fetch homepage content, continuing without it");
            HomepageContent::default()
        }
    }
}
