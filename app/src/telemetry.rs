//! Process-wide `tracing` subscriber setup.

use crate::error::{AppError, ConfigError};
use tracing_subscriber::EnvFilter;

/// Installs a formatting subscriber filtered by `RUST_LOG`, or by `level`
/// when `RUST_LOG` is unset.
///
/// Returns `Ok(false)` if a global subscriber was already installed.
pub fn init_logging(level: &str) -> Result<bool, AppError> {
  let filter = match EnvFilter::try_from_default_env() {
    Ok(filter) => filter,
    Err(_) => EnvFilter::try_new(level).map_err(|e| ConfigError::InvalidValue {
      field: "log_level".to_string(),
      message: e.to_string(),
    })?,
  };

  match tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_target(true)
    .try_init()
  {
    Ok(()) => Ok(true),
    Err(e) if tracing::dispatcher::has_been_set() => {
      tracing::debug!(error = %e, "tracing subscriber already installed");
      Ok(false)
    }
    Err(e) => Err(AppError::Logging(e.to_string())),
  }
}
