//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter directives.
pub const LOG_ENV_VAR: &str = "LJPW_LOG";

/// Filter used when `LJPW_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "ljpw=info";

/// Initialize the LJPW tracing/logging system.
///
/// Reads `LJPW_LOG` for per-subsystem log levels, e.g.
/// `LJPW_LOG=ljpw_analysis::calibration=debug,ljpw_analysis::scanner=warn`.
/// Events go to stderr so command output on stdout stays machine-readable.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true),
            )
            .with(filter)
            .try_init();
        // A host (or a test harness) may already own the global subscriber.
        if let Err(e) = installed {
            tracing::debug!(error = %e, "global tracing subscriber already set");
        }
    });
}
