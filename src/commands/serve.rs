use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::{
    ServeArgs,
    config::Config,
    content::{ApiClient, TableRendererClient},
    locale::Localiser,
    render::Renderer,
    resolve::Resolver,
    server::{AppState, router},
};

pub async fn run(args: &ServeArgs) -> Result<(), anyhow::Error> {
    let config = Config::load_from_arg(args.config_file.as_deref())?;
    super::init_tracing(config.debug);

    let upstream_timeout = config.upstream_timeout();
    let content = ApiClient::new(&config.api_router_url, upstream_timeout)?;
    let tables = TableRendererClient::new(&config.table_renderer_url, upstream_timeout)?;
    let renderer = Renderer::new(&config.templates_dir, &config)?;
    let localiser = Localiser::embedded()?;
    let resolver = Resolver::new(
        config.resolve_max_concurrency,
        config.resolve_timeout(),
        config.markdown.clone(),
    );

    let addr = config.socket_addr();
    let shutdown_timeout = config.graceful_shutdown_timeout();
    info!(
        %addr,
        api_router_url = %config.api_router_url,
        site_domain = %config.site_domain,
        "starting bulletin controller"
    );

    let state = AppState {
        config: Arc::new(config),
        content: Arc::new(content),
        tables: Arc::new(tables),
        renderer: Arc::new(renderer),
        localiser: Arc::new(localiser),
        resolver: Arc::new(resolver),
    };

    let listener = TcpListener::bind(&addr).await?;
    let (stopping_tx, mut stopping_rx) = watch::channel(false);
    let server = axum::serve(listener, router(state)).with_graceful_shutdown(async move {
        shutdown_signal().await;
        info!("shutdown signal received, draining requests");
        let _ = stopping_tx.send(true);
    });

    // In-flight requests get `shutdown_timeout` to finish once draining starts.
    let deadline = async move {
        if stopping_rx.wait_for(|stopping| *stopping).await.is_ok() {
            tokio::time::sleep(shutdown_timeout).await;
        } else {
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        result = server.into_future() => result?,
        _ = deadline => warn!(?shutdown_timeout, "graceful shutdown timed out"),
    }

    info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to register SIGTERM handler");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
