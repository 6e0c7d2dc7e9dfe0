//! Tracing initialization for the binary and for tests
//!
//! Filtering follows the RUST_LOG environment variable, e.g.
//! `RUST_LOG=bcnav3=debug` or `RUST_LOG=bcnav3::pipeline=trace`.

#[cfg(test)]
use once_cell::sync::Lazy;

/// Initialize tracing for tests.
///
/// Safe to call from every test; the subscriber is installed once.
#[cfg(test)]
pub fn init_test_tracing() {
    static TRACING: Lazy<()> = Lazy::new(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("bcnav3=warn"));

        fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_line_number(true)
            .with_test_writer()
            .init();
    });

    Lazy::force(&TRACING);
}

/// Initialize tracing for the binary; call early in main().
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("bcnav3=info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();
}
