//! The composition root: describes the object graph to a `Container`.

use crate::config::AppConfig;
use crate::database::{DatabaseService, InMemoryDatabase};
use crate::logger::Logger;
use crate::tokens::{DATABASE, LOGGER, USER_HANDLER, USER_REPOSITORY, USER_SERVICE};
use crate::user::{UserHandler, UserRepository, UserRepositoryImpl, UserService};
use std::sync::Arc;
use trellis_ioc::{Container, RegisterOptions, ResolveError};

/// Registers every application service with `container`.
///
/// Registration order does not follow dependency order: factories run on
/// first resolution, by which time everything they resolve is registered.
pub fn setup_dependencies(container: &Container, config: &AppConfig) {
  // Infrastructure
  let service_name = config.service_name.clone();
  container.add_singleton(&*LOGGER, move |_| Logger::new(service_name.clone()));

  let database_url = config.database_url.clone();
  container.register_trait::<dyn DatabaseService, _>(
    &*DATABASE,
    RegisterOptions::singleton(),
    move |_| {
      let database = InMemoryDatabase::connect(database_url.as_deref())?;
      Ok(Arc::new(database) as Arc<dyn DatabaseService>)
    },
  );

  // Handlers
  container.register(&*USER_HANDLER, RegisterOptions::singleton(), |c| {
    let user_service = c.resolve::<UserService>(&*USER_SERVICE)?;
    Ok(UserHandler::new(user_service))
  });

  // Services
  container.register(&*USER_SERVICE, RegisterOptions::singleton(), |c| {
    let logger = c.resolve::<Logger>(&*LOGGER)?;
    let database = c.resolve::<dyn DatabaseService>(&*DATABASE)?;
    let repository = c.resolve::<dyn UserRepository>(&*USER_REPOSITORY)?;
    Ok(UserService::new(logger, database, repository))
  });

  // Repositories
  container.register_trait::<dyn UserRepository, _>(
    &*USER_REPOSITORY,
    RegisterOptions::singleton(),
    |c| {
      let logger = c.resolve::<Logger>(&*LOGGER)?;
      Ok(Arc::new(UserRepositoryImpl::new(logger)) as Arc<dyn UserRepository>)
    },
  );

  tracing::debug!(registrations = container.len(), "dependencies registered");
}

/// The resolved services, bundled for the HTTP layer.
#[derive(Clone)]
pub struct Services {
  pub database: Arc<dyn DatabaseService>,
  pub logger: Arc<Logger>,
  pub user_handler: Arc<UserHandler>,
  pub user_service: Arc<UserService>,
  pub user_repository: Arc<dyn UserRepository>,
}

/// Resolves the fixed set of services the HTTP layer needs.
pub fn get_services(container: &Container) -> Result<Services, ResolveError> {
  Ok(Services {
    database: container.resolve::<dyn DatabaseService>(&*DATABASE)?,
    logger: container.resolve::<Logger>(&*LOGGER)?,
    user_handler: container.resolve::<UserHandler>(&*USER_HANDLER)?,
    user_service: container.resolve::<UserService>(&*USER_SERVICE)?,
    user_repository: container.resolve::<dyn UserRepository>(&*USER_REPOSITORY)?,
  })
}
