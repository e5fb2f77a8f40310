//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the lloyd tracing/logging system.
///
/// Reads `LLOYD_LOG` for per-crate log levels.
/// Format: `LLOYD_LOG=lloyd_engine=debug,lloyd_core=warn`
///
/// Falls back to `info` for both lloyd crates if `LLOYD_LOG` is unset or invalid.
/// Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        // A host application may already own the global subscriber.
        let _ = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
    });
}

/// Like [`init_tracing`], but emits newline-delimited JSON records.
///
/// Both initializers share one guard: whichever runs first wins, and a later
/// call to either one does nothing. Pick the format before the first call.
pub fn init_json_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        let _ = tracing_subscriber::registry()
            .with(fmt::layer().json().with_current_span(false))
            .with(filter)
            .try_init();
    });
}

/// Returns true once either initializer has run.
pub fn is_initialized() -> bool {
    INIT.is_completed()
}
