//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use crate::constants::{DEFAULT_LOG_FILTER, LOG_ENV_VAR};

static INIT: Once = Once::new();

/// Initialize tracing with the compiled default filter.
///
/// Reads `SUBJ_LOG` for per-module log levels.
/// Format: `SUBJ_LOG=subj_algebra=debug,subj_core=warn`
pub fn init_tracing() {
    init_tracing_with_default(DEFAULT_LOG_FILTER);
}

/// Initialize tracing with the `[logging] filter` setting as the default.
pub fn init_tracing_from_config(config: &LoggingConfig) {
    init_tracing_with_default(config.effective_filter());
}

/// Filter from `SUBJ_LOG`, else `default_filter`, else the compiled default.
pub fn env_filter(default_filter: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Initialize tracing, falling back to `default_filter` when `SUBJ_LOG` is
/// not set or is invalid.
///
/// Only the first call installs a subscriber; later calls are no-ops.
pub fn init_tracing_with_default(default_filter: &str) {
    INIT.call_once(|| {
        let filter = env_filter(default_filter);

        // Another subscriber may already be installed by the host application.
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
