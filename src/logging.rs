use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "seocheck=info,actix_web=info";
const VERBOSE_FILTER: &str = "seocheck=debug,actix_web=debug";

/// Installs the global `tracing` subscriber. `RUST_LOG` wins over the defaults;
/// repeated calls are no-ops.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        VERBOSE_FILTER
    } else {
        DEFAULT_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();
}
