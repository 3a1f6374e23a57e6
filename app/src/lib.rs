//! # Trellis App
//!
//! The composition root of the user API. It loads [`AppConfig`], installs
//! logging, and describes the service graph to a [`trellis_ioc::Container`]:
//!
//! ```
//! use trellis_app::{config::AppConfig, setup};
//! use trellis_ioc::Container;
//!
//! let config = AppConfig {
//!   database_url: Some("memory://users".to_string()),
//!   ..AppConfig::default()
//! };
//!
//! let container = Container::new();
//! setup::setup_dependencies(&container, &config);
//!
//! let services = setup::get_services(&container).unwrap();
//! let response = services.user_handler.get_users(&services.logger);
//! assert_eq!(response.status, 200);
//! ```
//!
//! [`AppConfig`]: config::AppConfig

pub mod config;
pub mod database;
pub mod error;
pub mod error_codes;
pub mod logger;
pub mod setup;
pub mod telemetry;
pub mod tokens;
pub mod user;

pub use error::{AppError, Result};
