//! Structured logging setup for binaries and tests that want log output.
//!
//! Filter precedence: `RUST_LOG`, then `WAYPOINT_LOG`, then the level chosen
//! by the caller. Output always goes to stderr so stdout stays free for
//! fixture output and reports.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable consulted when `RUST_LOG` is unset.
pub const LOG_ENV_VAR: &str = "WAYPOINT_LOG";

const CRATE_TARGETS: [&str; 2] = ["waypoint_search", "waypoint_harness"];

/// Install the global subscriber.
///
/// `verbose` lowers the default level from `warn` to `debug`; `log_json`
/// switches from compact text to one JSON object per event, with span
/// open/close events included.
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already installed.
pub fn init_tracing(verbose: bool, log_json: bool) -> Result<(), TryInitError> {
    let level = if verbose { "debug" } else { "warn" };
    init_with_level(level, log_json)
}

/// Like [`init_tracing`] with an explicit level (`"trace"`, `"info"`, ...)
/// or a full filter directive such as `"waypoint_search=trace"`.
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already installed.
pub fn init_with_level(level: &str, log_json: bool) -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_from_env(LOG_ENV_VAR))
        .unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let registry = tracing_subscriber::registry().with(filter);

    if log_json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_ansi(false)
                    .with_span_events(fmt::format::FmtSpan::NEW | fmt::format::FmtSpan::CLOSE),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    }
}

/// Expand a bare level into one directive per crate; pass full directives
/// through unchanged.
fn default_directives(level: &str) -> String {
    if level.contains('=') {
        return level.to_string();
    }
    CRATE_TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}
