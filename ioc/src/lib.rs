//! # Trellis IoC
//!
//! A small, thread-safe Inversion of Control (IoC) container for Rust.
//!
//! A [`Container`] decouples building objects from using them. A composition
//! root registers a factory per service, then the rest of the application
//! resolves instances on demand. Nothing is constructed until it is first
//! asked for.
//!
//! ## Core Concepts
//!
//! - **Service identifier**: a [`ServiceId`] naming a service by type, by
//!   name, or by an opaque symbol.
//! - **Registration**: a factory plus a [`Lifetime`]. Singletons are built
//!   once per container and cached, transients are built on every resolution.
//! - **Resolution**: [`Container::resolve`] returns an `Arc<T>` or a typed
//!   [`ResolveError`]; a missing registration never yields a default.
//! - **Traits**: services can be registered and resolved as trait objects.
//!
//! ## Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use trellis_ioc::{Container, ServiceId};
//!
//! trait Greeter: Send + Sync {
//!   fn greet(&self) -> String;
//! }
//!
//! struct EnglishGreeter {
//!   message: Arc<String>,
//! }
//!
//! impl Greeter for EnglishGreeter {
//!   fn greet(&self) -> String {
//!     self.message.to_string()
//!   }
//! }
//!
//! let greeter_id = ServiceId::symbol("Greeter");
//! let container = Container::new();
//!
//! container.add_instance("greeting_message", String::from("Hello, World!"));
//!
//! // The factory resolves its own dependency from the container it is given.
//! container.add_singleton_trait::<dyn Greeter>(&greeter_id, |c| {
//!   let message = c.get::<String>("greeting_message").unwrap_or_default();
//!   Arc::new(EnglishGreeter { message })
//! });
//!
//! let greeter = container.resolve::<dyn Greeter>(&greeter_id).unwrap();
//! assert_eq!(greeter.greet(), "Hello, World!");
//!
//! let err = container.resolve::<String>("missing").unwrap_err();
//! assert_eq!(err.to_string(), "service missing is not registered");
//! ```

mod container;
mod core;
mod error;
mod id;
mod macros;

pub use crate::core::{Lifetime, RegisterOptions};
pub use container::Container;
pub use error::{BoxError, ResolveError};
pub use id::ServiceId;
