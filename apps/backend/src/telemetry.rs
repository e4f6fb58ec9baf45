use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::AppError;

/// Install a JSON subscriber for embedding hosts. `RUST_LOG` overrides the
/// default filter.
///
/// Fails when the process already has a global subscriber.
pub fn init_tracing() -> Result<(), AppError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn,sea_orm=warn"));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .json();

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::config(format!("tracing already initialized: {e}")))
}
