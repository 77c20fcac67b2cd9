//! Diagnostics go to stderr so stdout stays machine readable.

use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over `--log-level` when set.
pub fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("fhir_primitive={level},ferrum_primitives={level}"))
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
