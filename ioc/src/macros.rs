//! Public macros for ergonomic service resolution.

/// Resolves a service from a container, panicking if it cannot be resolved.
///
/// Meant for wiring code where a missing service is a programming error. The
/// panic message names the identifier and the underlying [`ResolveError`].
/// For a non-panicking version, call [`Container::resolve`] directly.
///
/// Four forms are accepted:
///
/// - `resolve!(container, Type)` resolves `Type` by its type identifier,
/// - `resolve!(container, Type, id)` resolves `Type` registered under `id`,
/// - `resolve!(container, trait Trait)` resolves `dyn Trait` by its type identifier,
/// - `resolve!(container, trait Trait, id)` resolves `dyn Trait` registered under `id`.
///
/// # Panics
///
/// Whenever [`Container::resolve`] would return an error.
///
/// # Examples
///
/// ```
/// use trellis_ioc::{resolve, Container, RegisterOptions};
/// use std::sync::Arc;
///
/// trait Greeter: Send + Sync { fn greet(&self) -> String; }
/// struct EnglishGreeter;
/// impl Greeter for EnglishGreeter { fn greet(&self) -> String { "Hello!".to_string() } }
///
/// let container = Container::new();
/// container.add_class::<String>(RegisterOptions::singleton());
/// container.add_singleton_trait::<dyn Greeter>("greeter", |_| Arc::new(EnglishGreeter));
///
/// let empty = resolve!(&container, String);
/// assert!(empty.is_empty());
///
/// let greeter = resolve!(&container, trait Greeter, "greeter");
/// assert_eq!(greeter.greet(), "Hello!");
/// ```
///
/// [`ResolveError`]: crate::ResolveError
/// [`Container::resolve`]: crate::Container::resolve
#[macro_export]
macro_rules! resolve {
  ($container:expr, trait $trait_ident:ident) => {
    $container
      .resolve::<dyn $trait_ident>($crate::ServiceId::of_type::<dyn $trait_ident>())
      .unwrap_or_else(|err| panic!("Failed to resolve required trait service {}: {}", err.id(), err))
  };

  ($container:expr, trait $trait_ident:ident, $id:expr) => {
    $container
      .resolve::<dyn $trait_ident>($id)
      .unwrap_or_else(|err| panic!("Failed to resolve required trait service {}: {}", err.id(), err))
  };

  ($container:expr, $type:ty) => {
    $container
      .resolve::<$type>($crate::ServiceId::of_type::<$type>())
      .unwrap_or_else(|err| panic!("Failed to resolve required service {}: {}", err.id(), err))
  };

  ($container:expr, $type:ty, $id:expr) => {
    $container
      .resolve::<$type>($id)
      .unwrap_or_else(|err| panic!("Failed to resolve required service {}: {}", err.id(), err))
  };
}
