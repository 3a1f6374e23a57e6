use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use trellis_app::config::AppConfig;
use trellis_app::database::{DatabaseService, InMemoryDatabase};
use trellis_app::error::DatabaseError;
use trellis_app::error_codes;
use trellis_app::logger::Logger;
use trellis_app::setup::{get_services, setup_dependencies};
use trellis_app::tokens::{DATABASE, LOGGER, USER_HANDLER, USER_REPOSITORY, USER_SERVICE};
use trellis_app::user::{health, User, UserHandler, UserService};
use trellis_ioc::{Container, RegisterOptions, ResolveError};

fn config() -> AppConfig {
  AppConfig {
    database_url: Some("memory://users".to_string()),
    service_name: "wiring-test".to_string(),
    ..AppConfig::default()
  }
}

// Replaces the database registration with a handle the test keeps a reference to.
fn install_database(container: &Container) -> Arc<InMemoryDatabase> {
  let database = Arc::new(InMemoryDatabase::connect(Some("memory://users")).unwrap());
  let registered = Arc::clone(&database);
  container.register_trait::<dyn DatabaseService, _>(&*DATABASE, RegisterOptions::singleton(), move |_| {
    Ok(Arc::clone(&registered) as Arc<dyn DatabaseService>)
  });
  database
}

#[test]
fn registers_every_token_without_constructing() {
  let container = Container::new();
  setup_dependencies(&container, &AppConfig::default());

  // No database URL is configured, yet registering succeeds: nothing is built.
  for token in [&*LOGGER, &*DATABASE, &*USER_HANDLER, &*USER_SERVICE, &*USER_REPOSITORY] {
    assert!(container.has(token), "{} should be registered", token);
  }
  assert_eq!(container.len(), 5);
}

#[test]
fn get_services_shares_singletons_across_the_graph() {
  let container = Container::new();
  setup_dependencies(&container, &config());

  let services = get_services(&container).unwrap();
  let again = get_services(&container).unwrap();

  assert!(Arc::ptr_eq(&services.user_handler, &again.user_handler));
  assert!(Arc::ptr_eq(&services.user_service, &again.user_service));
  assert!(Arc::ptr_eq(&services.logger, &again.logger));
  assert_eq!(services.logger.service(), "wiring-test");
  assert_eq!(services.database.url(), "memory://users");
}

#[test]
fn handler_lists_users() {
  let container = Container::new();
  setup_dependencies(&container, &config());
  let database = install_database(&container);
  database.insert_user(User::new(1, "Ada", "ada@example.com"));
  database.insert_user(User::new(2, "Grace", "grace@example.com"));

  let services = get_services(&container).unwrap();
  let response = services.user_handler.get_users(&services.logger);

  assert_eq!(response.status, 200);
  assert_eq!(
    response.body,
    json!([
      { "id": 1, "name": "Ada", "email": "ada@example.com" },
      { "id": 2, "name": "Grace", "email": "grace@example.com" },
    ])
  );
}

#[test]
fn handler_maps_database_failure_to_error_code() {
  let container = Container::new();
  setup_dependencies(&container, &config());
  let database = install_database(&container);
  database.set_available(false);

  let handler = container.resolve::<UserHandler>(&*USER_HANDLER).unwrap();
  let logger = container.resolve::<Logger>(&*LOGGER).unwrap();
  let response = handler.get_users(&logger);

  let code = error_codes::user::GET_USERS_INTERNAL_ERROR;
  assert_eq!(response.status, 400);
  assert_eq!(
    response.body,
    json!({ "code": code.code(), "message": code.message() })
  );
}

#[test]
fn get_user_by_id_is_not_implemented() {
  let container = Container::new();
  setup_dependencies(&container, &config());

  let services = get_services(&container).unwrap();
  let response = services.user_handler.get_user_by_id("1");

  assert_eq!(response.status, 501);
  assert_eq!(response.body["code"], "NOT_IMPLEMENTED");
}

#[test]
fn missing_database_url_fails_resolution_and_is_retried() {
  let container = Container::new();
  setup_dependencies(&container, &AppConfig::default());

  let err = get_services(&container).err().expect("database factory should fail");
  match &err {
    ResolveError::Factory { id, source } => {
      assert_eq!(id, &*DATABASE);
      assert!(matches!(
        source.downcast_ref::<DatabaseError>(),
        Some(DatabaseError::MissingUrl)
      ));
    }
    other => panic!("unexpected error: {other}"),
  }

  // The failure was not cached; fixing the registration lets resolution succeed.
  install_database(&container);
  assert!(container.resolve::<UserService>(&*USER_SERVICE).is_ok());
}

#[test]
fn clear_unwires_everything() {
  let container = Container::new();
  setup_dependencies(&container, &config());
  let services = get_services(&container).unwrap();

  container.clear();

  assert!(!container.has(&*USER_HANDLER));
  assert!(matches!(
    get_services(&container),
    Err(ResolveError::Unregistered { .. })
  ));
  // Already-resolved services keep working.
  assert_eq!(services.user_handler.get_users(&services.logger).status, 200);
}

#[test]
fn health_reports_ok() {
  let response = health();

  assert_eq!(response.status, 200);
  assert_eq!(response.body, json!({ "status": "ok" }));
}
