use super::{User, UserRepository};
use crate::database::DatabaseService;
use crate::error_codes::{self, ErrorCode};
use crate::logger::Logger;
use std::sync::Arc;

/// Read-side user operations.
pub trait UsersQueryService: Send + Sync {
  fn get_users(&self) -> Result<Vec<User>, ErrorCode>;
}

pub struct UsersQueryServiceImpl {
  logger: Arc<Logger>,
  database: Arc<dyn DatabaseService>,
  repository: Arc<dyn UserRepository>,
}

impl UsersQueryServiceImpl {
  pub fn new(
    logger: Arc<Logger>,
    database: Arc<dyn DatabaseService>,
    repository: Arc<dyn UserRepository>,
  ) -> Self {
    Self {
      logger,
      database,
      repository,
    }
  }
}

impl UsersQueryService for UsersQueryServiceImpl {
  fn get_users(&self) -> Result<Vec<User>, ErrorCode> {
    self
      .repository
      .get_users(self.database.as_ref())
      .map_err(|e| {
        let code = error_codes::user::GET_USERS_INTERNAL_ERROR;
        tracing::debug!(error = %e, code = %code, "get users failed");
        self.logger.error(code.message());
        code
      })
  }
}

/// Facade over the user feature's services.
pub struct UserService {
  pub users_query: Arc<dyn UsersQueryService>,
}

impl UserService {
  pub fn new(
    logger: Arc<Logger>,
    database: Arc<dyn DatabaseService>,
    repository: Arc<dyn UserRepository>,
  ) -> Self {
    Self {
      users_query: Arc::new(UsersQueryServiceImpl::new(logger, database, repository)),
    }
  }
}
