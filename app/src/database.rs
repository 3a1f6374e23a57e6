//! The database handle shared by repositories.

use crate::error::DatabaseError;
use crate::user::User;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

pub trait DatabaseService: Send + Sync {
  fn url(&self) -> &str;

  fn select_users(&self) -> Result<Vec<User>, DatabaseError>;
}

/// An in-process stand-in for the SQL database.
#[derive(Debug)]
pub struct InMemoryDatabase {
  url: String,
  users: RwLock<Vec<User>>,
  available: AtomicBool,
}

impl InMemoryDatabase {
  /// Opens a handle for `url`. Fails when no URL is configured.
  pub fn connect(url: Option<&str>) -> Result<Self, DatabaseError> {
    let url = url.filter(|url| !url.is_empty()).ok_or(DatabaseError::MissingUrl)?;
    tracing::info!(%url, "database handle opened");
    Ok(Self {
      url: url.to_string(),
      users: RwLock::new(Vec::new()),
      available: AtomicBool::new(true),
    })
  }

  pub fn insert_user(&self, user: User) {
    self.users.write().push(user);
  }

  /// Simulates the database going away (or coming back).
  pub fn set_available(&self, available: bool) {
    self.available.store(available, Ordering::Release);
  }
}

impl DatabaseService for InMemoryDatabase {
  fn url(&self) -> &str {
    &self.url
  }

  fn select_users(&self) -> Result<Vec<User>, DatabaseError> {
    if !self.available.load(Ordering::Acquire) {
      return Err(DatabaseError::Unavailable {
        url: self.url.clone(),
      });
    }
    Ok(self.users.read().clone())
  }
}
