//! Service identifiers: the keys a `Container` is indexed by.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_SYMBOL: AtomicU64 = AtomicU64::new(0);

/// A token naming a registerable service.
///
/// A `ServiceId` comes in one of three shapes:
///
/// - a **type** reference, created with [`ServiceId::of_type`],
/// - a **name**, created with [`ServiceId::named`] (or `From<&str>`/`From<String>`),
/// - an opaque **symbol**, created with [`ServiceId::symbol`].
///
/// Types and symbols compare by identity, names compare by value. Two ids of
/// different shapes are never equal, so the name `"Logger"` and the symbol
/// `Symbol(Logger)` are distinct keys.
///
/// ```
/// use trellis_ioc::ServiceId;
///
/// let a = ServiceId::symbol("Logger");
/// let b = ServiceId::symbol("Logger");
/// assert_ne!(a, b);
/// assert_eq!(a, a.clone());
///
/// assert_eq!(ServiceId::named("db"), ServiceId::from("db"));
/// assert_eq!(ServiceId::of_type::<String>(), ServiceId::of_type::<String>());
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ServiceId(Key);

#[derive(Clone)]
enum Key {
  Type {
    type_id: TypeId,
    type_name: &'static str,
  },
  Name(Arc<str>),
  Symbol {
    serial: u64,
    description: Arc<str>,
  },
}

// Equality and hashing skip `type_name` and `description`: they are labels,
// the identity lives in `type_id` and `serial`.
impl PartialEq for Key {
  fn eq(&self, other: &Self) -> bool {
    match (self, other) {
      (Key::Type { type_id: a, .. }, Key::Type { type_id: b, .. }) => a == b,
      (Key::Name(a), Key::Name(b)) => a == b,
      (Key::Symbol { serial: a, .. }, Key::Symbol { serial: b, .. }) => a == b,
      _ => false,
    }
  }
}

impl Eq for Key {}

impl Hash for Key {
  fn hash<H: Hasher>(&self, state: &mut H) {
    match self {
      Key::Type { type_id, .. } => {
        0u8.hash(state);
        type_id.hash(state);
      }
      Key::Name(name) => {
        1u8.hash(state);
        name.hash(state);
      }
      Key::Symbol { serial, .. } => {
        2u8.hash(state);
        serial.hash(state);
      }
    }
  }
}

impl ServiceId {
  /// An identifier naming the type `T`. `T` may be unsized, e.g. `dyn Trait`.
  pub fn of_type<T: ?Sized + Any>() -> Self {
    Self(Key::Type {
      type_id: TypeId::of::<T>(),
      type_name: std::any::type_name::<T>(),
    })
  }

  /// An identifier equal to every other named identifier with the same text.
  pub fn named(name: impl Into<String>) -> Self {
    Self(Key::Name(Arc::from(name.into())))
  }

  /// A fresh, unique identifier. It is equal only to its own clones; the
  /// description is used for diagnostics alone.
  pub fn symbol(description: impl Into<String>) -> Self {
    Self(Key::Symbol {
      serial: NEXT_SYMBOL.fetch_add(1, Ordering::Relaxed),
      description: Arc::from(description.into()),
    })
  }
}

impl fmt::Display for ServiceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.0 {
      Key::Type { type_name, .. } => f.write_str(type_name),
      Key::Name(name) => f.write_str(name),
      Key::Symbol { description, .. } => write!(f, "Symbol({})", description),
    }
  }
}

impl fmt::Debug for ServiceId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.0 {
      Key::Type { type_name, .. } => write!(f, "ServiceId::Type({})", type_name),
      Key::Name(name) => write!(f, "ServiceId::Name({:?})", name),
      Key::Symbol {
        serial,
        description,
      } => write!(f, "ServiceId::Symbol({}#{})", description, serial),
    }
  }
}

impl From<&str> for ServiceId {
  fn from(name: &str) -> Self {
    Self::named(name)
  }
}

impl From<String> for ServiceId {
  fn from(name: String) -> Self {
    Self::named(name)
  }
}

impl From<&ServiceId> for ServiceId {
  fn from(id: &ServiceId) -> Self {
    id.clone()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  trait Marker {}

  #[test]
  fn shapes_never_collide() {
    let name = ServiceId::named("Logger");
    let symbol = ServiceId::symbol("Logger");
    assert_ne!(name, symbol);
    assert_ne!(ServiceId::named(std::any::type_name::<String>()), ServiceId::of_type::<String>());
  }

  #[test]
  fn type_ids_distinguish_types() {
    assert_eq!(ServiceId::of_type::<dyn Marker>(), ServiceId::of_type::<dyn Marker>());
    assert_ne!(ServiceId::of_type::<u32>(), ServiceId::of_type::<u64>());
  }

  #[test]
  fn hashing_agrees_with_equality() {
    let symbol = ServiceId::symbol("db");
    let mut set = HashSet::new();
    set.insert(ServiceId::named("db"));
    set.insert(ServiceId::from(String::from("db")));
    set.insert(symbol.clone());
    set.insert(symbol.clone());
    set.insert(ServiceId::symbol("db"));
    assert_eq!(set.len(), 3);
    assert!(set.contains(&symbol));
  }

  #[test]
  fn display_names_the_identifier() {
    assert_eq!(ServiceId::named("missing").to_string(), "missing");
    assert_eq!(ServiceId::symbol("Logger").to_string(), "Symbol(Logger)");
    assert_eq!(ServiceId::of_type::<u8>().to_string(), "u8");
  }
}
