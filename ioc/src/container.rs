//! The main `Container` struct and its associated methods.

use crate::core::{Factory, Instance, RegisterOptions, Registration, ResolutionGuard};
use crate::error::{BoxError, ResolveError};
use crate::id::ServiceId;
use dashmap::DashMap;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_CONTAINER: AtomicU64 = AtomicU64::new(0);

/// The Inversion of Control (IoC) container.
///
/// A `Container` maps [`ServiceId`]s to registrations: a factory plus a
/// [`Lifetime`](crate::Lifetime). Nothing is constructed until the first [`resolve`] of an
/// identifier, so registrations may be added in any order as long as every
/// identifier a factory resolves is registered by the time it runs.
///
/// All methods take `&self`; the container can be shared across threads.
/// Concurrent first resolutions of a singleton run its factory exactly once.
///
/// # Re-registration
///
/// Registering an identifier that already has a registration replaces it,
/// including any singleton instance it had cached. Instances handed out
/// before the replacement are not touched: callers holding them keep using
/// the old instance.
///
/// [`resolve`]: Container::resolve
pub struct Container {
  serial: u64,
  registrations: DashMap<ServiceId, Arc<Registration>>,
}

impl Default for Container {
  fn default() -> Self {
    Self {
      serial: NEXT_CONTAINER.fetch_add(1, Ordering::Relaxed),
      registrations: DashMap::new(),
    }
  }
}

impl fmt::Debug for Container {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Container")
      .field("serial", &self.serial)
      .field("registrations", &self.registrations.len())
      .finish()
  }
}

impl Container {
  /// Creates a new, empty `Container`.
  pub fn new() -> Self {
    Self::default()
  }

  // --- PRIVATE HELPERS ---

  fn insert(&self, id: ServiceId, registration: Registration) {
    let lifetime = registration.lifetime();
    let previous = self.registrations.insert(id.clone(), Arc::new(registration));
    match previous {
      Some(previous) if previous.is_resolved() => tracing::warn!(
        service = %id,
        ?lifetime,
        "replaced a resolved singleton; instances already handed out stay in use"
      ),
      Some(_) => tracing::debug!(service = %id, ?lifetime, "replaced service registration"),
      None => tracing::debug!(service = %id, ?lifetime, "registered service"),
    }
  }

  // --- Registration ---

  /// Registers a fallible factory for `id`, replacing any prior registration.
  ///
  /// The factory receives this container so it can resolve its own
  /// dependencies; errors from those resolutions can be propagated with `?`.
  ///
  /// ```
  /// use trellis_ioc::{Container, RegisterOptions};
  ///
  /// struct Config { url: String }
  /// struct Database { url: String }
  ///
  /// let container = Container::new();
  /// container.add_singleton("config", |_| Config { url: "postgres://db".into() });
  /// container.register("db", RegisterOptions::default(), |c| {
  ///   let config = c.resolve::<Config>("config")?;
  ///   Ok(Database { url: config.url.clone() })
  /// });
  ///
  /// let db = container.resolve::<Database>("db").unwrap();
  /// assert_eq!(db.url, "postgres://db");
  /// ```
  pub fn register<T, F>(&self, id: impl Into<ServiceId>, options: RegisterOptions, factory: F)
  where
    T: Any + Send + Sync,
    F: Fn(&Container) -> Result<T, BoxError> + Send + Sync + 'static,
  {
    let factory: Factory = Box::new(move |container: &Container| {
      factory(container).map(|value| Box::new(Arc::new(value)) as Instance)
    });
    self.insert(id.into(), Registration::new::<T>(options.lifetime, factory));
  }

  /// Registers a fallible factory producing a trait object (or any other
  /// unsized service) behind an `Arc`.
  pub fn register_trait<I, F>(&self, id: impl Into<ServiceId>, options: RegisterOptions, factory: F)
  where
    I: ?Sized + Any + Send + Sync,
    F: Fn(&Container) -> Result<Arc<I>, BoxError> + Send + Sync + 'static,
  {
    let factory: Factory = Box::new(move |container: &Container| {
      factory(container).map(|arc| Box::new(arc) as Instance)
    });
    self.insert(id.into(), Registration::new::<I>(options.lifetime, factory));
  }

  /// Registers a singleton built by `factory` on first resolution.
  pub fn add_singleton<T: Any + Send + Sync>(
    &self,
    id: impl Into<ServiceId>,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.register(id, RegisterOptions::singleton(), move |c| Ok(factory(c)));
  }

  /// Registers a service built anew by `factory` on every resolution.
  pub fn add_transient<T: Any + Send + Sync>(
    &self,
    id: impl Into<ServiceId>,
    factory: impl Fn(&Container) -> T + Send + Sync + 'static,
  ) {
    self.register(id, RegisterOptions::transient(), move |c| Ok(factory(c)));
  }

  /// Registers an already-built singleton.
  pub fn add_instance<T: Any + Send + Sync>(&self, id: impl Into<ServiceId>, instance: T) {
    self.insert(id.into(), Registration::with_instance(Arc::new(instance)));
  }

  /// Registers a singleton trait object.
  pub fn add_singleton_trait<I: ?Sized + Any + Send + Sync>(
    &self,
    id: impl Into<ServiceId>,
    factory: impl Fn(&Container) -> Arc<I> + Send + Sync + 'static,
  ) {
    self.register_trait::<I, _>(id, RegisterOptions::singleton(), move |c| Ok(factory(c)));
  }

  /// Registers `T::default` under the identifier of the type `T` itself.
  pub fn add_class<T: Default + Any + Send + Sync>(&self, options: RegisterOptions) {
    self.register(ServiceId::of_type::<T>(), options, |_| Ok(T::default()));
  }

  // --- Resolution ---

  /// Resolves the service registered under `id` as a `T`.
  ///
  /// Singletons are built on the first call and cached; later calls return
  /// the same `Arc`. Transients are built on every call.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::Unregistered`] if nothing is registered under `id`.
  /// - [`ResolveError::TypeMismatch`] if `id` was registered with another type.
  /// - [`ResolveError::CircularDependency`] if `id` is already being resolved
  ///   further up this thread's call stack.
  /// - [`ResolveError::Factory`] if the factory failed. A failed singleton is
  ///   not cached, so the next call runs the factory again.
  pub fn resolve<T: ?Sized + Any + Send + Sync>(
    &self,
    id: impl Into<ServiceId>,
  ) -> Result<Arc<T>, ResolveError> {
    let id: ServiceId = id.into();
    let _guard = ResolutionGuard::enter(self.serial, &id)?;

    // Clone the registration out so no map lock is held while a factory runs.
    let registration = self
      .registrations
      .get(&id)
      .map(|entry| Arc::clone(entry.value()))
      .ok_or_else(|| ResolveError::Unregistered { id: id.clone() })?;

    registration.instantiate::<T>(self, &id)
  }

  /// Resolves the service registered under the identifier of the type `T`.
  pub fn resolve_type<T: ?Sized + Any + Send + Sync>(&self) -> Result<Arc<T>, ResolveError> {
    self.resolve::<T>(ServiceId::of_type::<T>())
  }

  /// Like [`resolve`](Container::resolve), discarding the error.
  pub fn get<T: ?Sized + Any + Send + Sync>(&self, id: impl Into<ServiceId>) -> Option<Arc<T>> {
    self.resolve::<T>(id).ok()
  }

  // --- Introspection ---

  /// Whether a registration exists for `id`. Never constructs anything.
  pub fn has(&self, id: impl Into<ServiceId>) -> bool {
    let id: ServiceId = id.into();
    self.registrations.contains_key(&id)
  }

  /// The number of registrations.
  pub fn len(&self) -> usize {
    self.registrations.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registrations.is_empty()
  }

  /// Drops every registration and every cached singleton.
  ///
  /// Meant for test setup and teardown; must not race with resolutions.
  pub fn clear(&self) {
    let ids: Vec<ServiceId> = self
      .registrations
      .iter()
      .map(|entry| entry.key().clone())
      .collect();
    // Removed entries are dropped here, after every shard lock is released,
    // so a cached instance's `Drop` may call back into this container.
    let removed: Vec<(ServiceId, Arc<Registration>)> = ids
      .iter()
      .filter_map(|id| self.registrations.remove(id))
      .collect();
    tracing::debug!(dropped = removed.len(), "cleared container");
    drop(removed);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::core::Lifetime;

  #[test]
  fn lifetime_defaults_to_singleton() {
    assert_eq!(RegisterOptions::default().lifetime, Lifetime::Singleton);
  }

  #[test]
  fn containers_do_not_share_cycle_tracking() {
    // Resolving "a" in `outer` resolves "a" in `inner` from within the
    // factory; that is not a cycle because the containers differ.
    let inner = Arc::new(Container::new());
    inner.add_instance("a", 7u32);

    let outer = Container::new();
    let captured = Arc::clone(&inner);
    outer.register("a", RegisterOptions::singleton(), move |_| {
      let value = captured.resolve::<u32>("a")?;
      Ok(*value + 1)
    });

    assert_eq!(*outer.resolve::<u32>("a").unwrap(), 8);
  }

  #[test]
  fn resolution_stack_unwinds_after_errors() {
    let container = Container::new();
    container.register("failing", RegisterOptions::singleton(), |c| {
      let _ = c.resolve::<u8>("missing")?;
      Ok(1u8)
    });

    assert!(container.resolve::<u8>("failing").is_err());
    // A leaked stack entry would now report a cycle instead.
    container.add_instance("missing", 2u8);
    assert_eq!(*container.resolve::<u8>("failing").unwrap(), 1);
  }

  #[test]
  fn clear_drops_instances_outside_the_map_lock() {
    struct CallsBack {
      container: std::sync::Weak<Container>,
    }

    impl Drop for CallsBack {
      fn drop(&mut self) {
        if let Some(container) = self.container.upgrade() {
          container.add_instance("registered_on_drop", 1u8);
        }
      }
    }

    let container = Arc::new(Container::new());
    container.add_instance(
      "calls_back",
      CallsBack {
        container: Arc::downgrade(&container),
      },
    );
    container.resolve::<CallsBack>("calls_back").unwrap();

    container.clear();

    assert!(!container.has("calls_back"));
    assert!(container.has("registered_on_drop"));
    assert_eq!(container.len(), 1);
  }

  #[test]
  fn debug_reports_registration_count() {
    let container = Container::new();
    container.add_instance("x", 1i32);
    assert!(format!("{:?}", container).contains("registrations: 1"));
  }
}
