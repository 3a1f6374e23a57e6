mod handler;
mod repository;
mod service;

pub use handler::{health, JsonResponse, UserHandler};
pub use repository::{UserRepository, UserRepositoryImpl};
pub use service::{UserService, UsersQueryService, UsersQueryServiceImpl};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub id: i64,
  pub name: String,
  pub email: String,
}

impl User {
  pub fn new(id: i64, name: impl Into<String>, email: impl Into<String>) -> Self {
    Self {
      id,
      name: name.into(),
      email: email.into(),
    }
  }
}
