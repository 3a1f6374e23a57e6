//! Core, non-public data structures for the IoC container.

use crate::container::Container;
use crate::error::{BoxError, ResolveError};
use crate::id::ServiceId;
use once_cell::sync::OnceCell;
use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::sync::Arc;

thread_local! {
  // The (container, service) pairs currently being resolved on this thread,
  // outermost first.
  static RESOLVING_STACK: RefCell<Vec<(u64, ServiceId)>> = const { RefCell::new(Vec::new()) };
}

/// An RAII guard to detect circular dependencies.
///
/// Entering pushes the key onto the thread-local resolution stack, failing
/// if the same key is already on it. Dropping pops it again.
pub(crate) struct ResolutionGuard {
  _private: (),
}

impl ResolutionGuard {
  pub(crate) fn enter(container: u64, id: &ServiceId) -> Result<Self, ResolveError> {
    RESOLVING_STACK.with(|stack| {
      let mut stack = stack.borrow_mut();
      if let Some(start) = stack
        .iter()
        .position(|(owner, pending)| *owner == container && pending == id)
      {
        let mut chain: Vec<ServiceId> = stack[start..]
          .iter()
          .filter(|(owner, _)| *owner == container)
          .map(|(_, pending)| pending.clone())
          .collect();
        chain.push(id.clone());
        return Err(ResolveError::CircularDependency {
          id: id.clone(),
          chain,
        });
      }
      stack.push((container, id.clone()));
      Ok(Self { _private: () })
    })
  }
}

impl Drop for ResolutionGuard {
  fn drop(&mut self) {
    RESOLVING_STACK.with(|stack| {
      stack.borrow_mut().pop();
    });
  }
}

/// How long a resolved instance lives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Lifetime {
  /// One instance per container, built on first resolution and cached.
  #[default]
  Singleton,
  /// A fresh instance on every resolution.
  Transient,
}

/// Options accepted by [`Container::register`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegisterOptions {
  pub lifetime: Lifetime,
}

impl RegisterOptions {
  pub fn singleton() -> Self {
    Self {
      lifetime: Lifetime::Singleton,
    }
  }

  pub fn transient() -> Self {
    Self {
      lifetime: Lifetime::Transient,
    }
  }
}

// Always an `Arc<T>` behind the `Any`, where `T` is the registered type.
pub(crate) type Instance = Box<dyn Any + Send + Sync>;
pub(crate) type Factory = Box<dyn Fn(&Container) -> Result<Instance, BoxError> + Send + Sync>;

pub(crate) struct Registration {
  lifetime: Lifetime,
  factory: Factory,
  cell: OnceCell<Instance>,
  type_id: TypeId,
  type_name: &'static str,
}

impl Registration {
  pub(crate) fn new<T: ?Sized + Any>(lifetime: Lifetime, factory: Factory) -> Self {
    Self {
      lifetime,
      factory,
      cell: OnceCell::new(),
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
    }
  }

  /// A singleton that starts out resolved.
  pub(crate) fn with_instance<T: ?Sized + Any + Send + Sync>(instance: Arc<T>) -> Self {
    let cached = Arc::clone(&instance);
    let factory: Factory =
      Box::new(move |_: &Container| Ok(Box::new(Arc::clone(&instance)) as Instance));
    Self {
      lifetime: Lifetime::Singleton,
      factory,
      cell: OnceCell::with_value(Box::new(cached) as Instance),
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
    }
  }

  pub(crate) fn lifetime(&self) -> Lifetime {
    self.lifetime
  }

  pub(crate) fn is_resolved(&self) -> bool {
    self.cell.get().is_some()
  }

  pub(crate) fn instantiate<T: ?Sized + Any + Send + Sync>(
    &self,
    container: &Container,
    id: &ServiceId,
  ) -> Result<Arc<T>, ResolveError> {
    if self.type_id != TypeId::of::<T>() {
      return Err(self.mismatch::<T>(id));
    }

    match self.lifetime {
      Lifetime::Singleton => {
        if let Some(instance) = self.cell.get() {
          tracing::trace!(service = %id, "singleton cache hit");
          return self.downcast_ref(instance, id);
        }
        // Concurrent first resolutions block here until one factory call
        // has filled the cell. A failed attempt leaves it empty.
        let instance = self.cell.get_or_try_init(|| {
          tracing::debug!(service = %id, type_name = self.type_name, "constructing singleton");
          (self.factory)(container)
        });
        match instance {
          Ok(instance) => self.downcast_ref(instance, id),
          Err(source) => Err(ResolveError::from_factory(id, source)),
        }
      }
      Lifetime::Transient => {
        tracing::trace!(service = %id, type_name = self.type_name, "constructing transient");
        let instance =
          (self.factory)(container).map_err(|source| ResolveError::from_factory(id, source))?;
        instance
          .downcast::<Arc<T>>()
          .map(|arc_in_a_box| *arc_in_a_box)
          .map_err(|_| self.mismatch::<T>(id))
      }
    }
  }

  fn downcast_ref<T: ?Sized + Any + Send + Sync>(
    &self,
    instance: &Instance,
    id: &ServiceId,
  ) -> Result<Arc<T>, ResolveError> {
    instance
      .downcast_ref::<Arc<T>>()
      .cloned()
      .ok_or_else(|| self.mismatch::<T>(id))
  }

  fn mismatch<T: ?Sized + Any>(&self, id: &ServiceId) -> ResolveError {
    ResolveError::TypeMismatch {
      id: id.clone(),
      requested: std::any::type_name::<T>(),
      registered: self.type_name,
    }
  }
}
