//! Tracing setup for tests

use once_cell::sync::Lazy;

static TRACING: Lazy<()> = Lazy::new(|| {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init()
        .ok();
});

/// Initializes the tracing subscriber once per test binary.
///
/// Safe to call from every test; only the first call installs the
/// subscriber.
pub fn init_tracing() {
    Lazy::force(&TRACING);
}
