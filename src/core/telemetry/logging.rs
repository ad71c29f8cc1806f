use tracing_subscriber::{fmt, EnvFilter};

/// Installs the fmt subscriber, honouring `RUST_LOG` and falling back to `info`.
/// Safe to call more than once; later calls are ignored.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}
