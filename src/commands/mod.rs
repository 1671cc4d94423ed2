pub mod render;
pub mod serve;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "bulletin_controller=info,tower_http=info";
const DEBUG_FILTER: &str = "bulletin_controller=debug,tower_http=debug";

/// Log to stderr, filtered by `RUST_LOG` when set.
pub fn init_tracing(debug: bool) {
    let default = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
