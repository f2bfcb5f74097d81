//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Initialize the Vigil tracing/logging system.
///
/// Reads the `VIGIL_LOG` environment variable for per-subsystem log levels.
/// Format: `VIGIL_LOG=vigil_analysis=debug,vigil_storage=warn`
///
/// Falls back to `vigil=info` if `VIGIL_LOG` is not set or is invalid.
/// Output goes to stderr so stdout stays clean for `--format json`.
///
/// Idempotent: calling it multiple times is safe.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("VIGIL_LOG")
            .unwrap_or_else(|_| EnvFilter::new("vigil=info"));

        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(filter)
            .init();
    });
}
