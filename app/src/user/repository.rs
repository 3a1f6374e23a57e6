use super::User;
use crate::database::DatabaseService;
use crate::error::RepositoryError;
use crate::logger::Logger;
use std::sync::Arc;

pub trait UserRepository: Send + Sync {
  fn get_users(&self, database: &dyn DatabaseService) -> Result<Vec<User>, RepositoryError>;
}

pub struct UserRepositoryImpl {
  logger: Arc<Logger>,
}

impl UserRepositoryImpl {
  pub fn new(logger: Arc<Logger>) -> Self {
    Self { logger }
  }
}

impl UserRepository for UserRepositoryImpl {
  fn get_users(&self, database: &dyn DatabaseService) -> Result<Vec<User>, RepositoryError> {
    database.select_users().map_err(|e| {
      self.logger.error("can not get users");
      RepositoryError::from(e)
    })
  }
}
