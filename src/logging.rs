use tracing_subscriber::{fmt, EnvFilter};

/// Install a `fmt` subscriber filtered by `RUST_LOG` (default `info`).
///
/// Output goes through the libtest writer so it is captured per test. Safe to
/// call from every test; only the first call installs the subscriber.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_test_writer()
        .try_init();
}
