//! Structured logging for the CLI.
//!
//! Logs go to stderr so that JSON on stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "OQL_LOG";

const DEFAULT_FILTER: &str = "warn";

/// Filter from `OQL_LOG`, then `RUST_LOG`, then `warn`.
///
/// An unparsable directive falls back to the default instead of aborting.
fn filter_from_env(oql_log: Option<&str>, rust_log: Option<&str>) -> EnvFilter {
    oql_log
        .or(rust_log)
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

pub fn init_logging() {
    let oql_log = std::env::var(LOG_ENV).ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_from_env(oql_log.as_deref(), rust_log.as_deref());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    // First subscriber wins; a second init (tests) is a no-op.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
