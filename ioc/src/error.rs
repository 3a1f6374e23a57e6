//! Errors reported while resolving services.

use crate::id::ServiceId;
use thiserror::Error;

/// A boxed error produced by a service factory.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The ways resolving a service can fail.
#[derive(Debug, Error)]
pub enum ResolveError {
  /// No registration exists for the identifier. No factory was invoked.
  #[error("service {id} is not registered")]
  Unregistered { id: ServiceId },

  /// The registration exists but produces a different type than requested.
  #[error("service {id} is registered as `{registered}` but was requested as `{requested}`")]
  TypeMismatch {
    id: ServiceId,
    requested: &'static str,
    registered: &'static str,
  },

  /// Resolving `id` required resolving `id` again on the same thread.
  #[error("circular dependency detected while resolving service {id}: {}", format_chain(.chain))]
  CircularDependency { id: ServiceId, chain: Vec<ServiceId> },

  /// The factory registered for `id` failed.
  #[error("factory for service {id} failed: {source}")]
  Factory {
    id: ServiceId,
    #[source]
    source: BoxError,
  },
}

impl ResolveError {
  /// The identifier whose resolution failed.
  pub fn id(&self) -> &ServiceId {
    match self {
      ResolveError::Unregistered { id }
      | ResolveError::TypeMismatch { id, .. }
      | ResolveError::CircularDependency { id, .. }
      | ResolveError::Factory { id, .. } => id,
    }
  }

  pub(crate) fn from_factory(id: &ServiceId, source: BoxError) -> Self {
    // Nested resolution failures surface as-is instead of being wrapped once
    // per level of the dependency graph.
    match source.downcast::<ResolveError>() {
      Ok(nested) => *nested,
      Err(source) => ResolveError::Factory {
        id: id.clone(),
        source,
      },
    }
  }
}

fn format_chain(chain: &[ServiceId]) -> String {
  chain
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join(" -> ")
}
