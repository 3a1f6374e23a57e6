//! Identifiers for every service the composition root registers.
//!
//! Each token is a symbol created once per process, so no other
//! registration can collide with it by accident.

use once_cell::sync::Lazy;
use trellis_ioc::ServiceId;

pub static LOGGER: Lazy<ServiceId> = Lazy::new(|| ServiceId::symbol("Logger"));
pub static DATABASE: Lazy<ServiceId> = Lazy::new(|| ServiceId::symbol("Database"));

// Handlers
pub static USER_HANDLER: Lazy<ServiceId> = Lazy::new(|| ServiceId::symbol("UserHandler"));

// Services
pub static USER_SERVICE: Lazy<ServiceId> = Lazy::new(|| ServiceId::symbol("UserService"));

// Repositories
pub static USER_REPOSITORY: Lazy<ServiceId> = Lazy::new(|| ServiceId::symbol("UserRepository"));
