//! Logging setup shared by the backend binary and integration tests.
//!
//! Everything logs through `tracing`; this module only installs the
//! subscriber. `RUST_LOG` is honoured on top of the default directive.

use tracing::{error, info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize the tracing subscriber at INFO.
///
/// ```
/// folio_common::logging::init();
/// folio_common::logging::init_with_level(tracing::Level::DEBUG); // no-op, already set
/// ```
pub fn init() {
    init_with_level(Level::INFO);
}

/// Initialize the tracing subscriber with a specific level for the `folio*`
/// targets. Calling it twice is harmless.
pub fn init_with_level(level: Level) {
    let mut filter = EnvFilter::from_default_env();
    for target in ["folio", "folio_backend"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    let result = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .with(filter)
        .try_init();

    if result.is_ok() {
        info!("Logging initialized at level: {}", level);
    }
}

/// Logs the error of a result with some context and passes it through.
pub fn log_result<T, E: std::fmt::Display>(result: Result<T, E>, error_context: &str) -> Result<T, E> {
    if let Err(e) = &result {
        error!("{}: {}", error_context, e);
    }
    result
}
