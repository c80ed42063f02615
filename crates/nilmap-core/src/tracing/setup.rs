//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize the nilmap tracing/logging system.
///
/// Reads the `NILMAP_LOG` environment variable for per-crate log levels.
/// Format: `NILMAP_LOG=nilmap_analysis=debug,nilmap_core=warn`
///
/// Falls back to `info` for both nilmap crates if `NILMAP_LOG` is not set or
/// is invalid. Calling it more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        if let Err(e) = try_install() {
            tracing::debug!(error = %e, "global subscriber already installed, keeping it");
        }
    });
}

/// Install the nilmap subscriber as the global default. Fails if a driver
/// already installed one.
fn try_install() -> Result<(), TryInitError> {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .try_init()
}
