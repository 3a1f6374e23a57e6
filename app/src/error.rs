use thiserror::Error;
use trellis_ioc::ResolveError;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration file not found: {0}")]
  NotFound(String),

  #[error("Failed to read configuration file: {0}")]
  Read(#[from] std::io::Error),

  #[error("Failed to parse configuration: {0}")]
  Parse(String),

  #[error("Invalid configuration value for '{field}': {message}")]
  InvalidValue { field: String, message: String },
}

/// Errors raised by the database handle.
#[derive(Debug, Error)]
pub enum DatabaseError {
  #[error("DATABASE_URL is not configured")]
  MissingUrl,

  #[error("database at {url} is unavailable")]
  Unavailable { url: String },
}

/// Errors raised by repositories.
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("query failed: {0}")]
  Query(#[from] DatabaseError),
}

/// Top-level application error.
#[derive(Debug, Error)]
pub enum AppError {
  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error(transparent)]
  Resolve(#[from] ResolveError),

  #[error("Failed to set global tracing subscriber: {0}")]
  Logging(String),
}

pub type Result<T, E = AppError> = std::result::Result<T, E>;
