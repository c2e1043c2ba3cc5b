//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Filter used without `-v` when `RUST_LOG` is unset.
const DEFAULT_FILTER: &str = "warn";

/// Filter used with `-v`; overrides `RUST_LOG`.
const VERBOSE_FILTER: &str = "warn,feedq=debug";

/// Install the global subscriber. Logs go to stderr so command output on
/// stdout stays clean.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}
