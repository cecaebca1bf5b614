//! Log setup for the command-line tool
//!
//! `RUST_LOG` wins when set; otherwise `info`, or `debug` with `--verbose`.
//!
//! ```bash
//! RUST_LOG=untp_migrate=trace untp-migrate migrate app-config.json --output out.json
//! ```

use tracing_subscriber::EnvFilter;

/// Install the global subscriber
///
/// Compact lines without targets, on stderr so stdout stays free for reports.
pub(crate) fn setup_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
