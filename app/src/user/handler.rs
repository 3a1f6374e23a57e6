use super::UserService;
use crate::error_codes::BASIC_ERROR;
use crate::logger::Logger;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_INTERNAL_SERVER_ERROR: u16 = 500;
pub const STATUS_NOT_IMPLEMENTED: u16 = 501;

/// A status code plus JSON body, ready for whatever HTTP layer serves it.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonResponse {
  pub status: u16,
  pub body: Value,
}

impl JsonResponse {
  pub fn new(status: u16, body: Value) -> Self {
    Self { status, body }
  }

  fn serialized(status: u16, body: &impl Serialize) -> Self {
    match serde_json::to_value(body) {
      Ok(body) => Self::new(status, body),
      Err(_) => Self::new(
        STATUS_INTERNAL_SERVER_ERROR,
        json!({ "code": BASIC_ERROR.code(), "message": BASIC_ERROR.message() }),
      ),
    }
  }
}

/// `GET /api/v1/health`
pub fn health() -> JsonResponse {
  JsonResponse::new(STATUS_OK, json!({ "status": "ok" }))
}

pub struct UserHandler {
  user_service: Arc<UserService>,
}

impl UserHandler {
  pub fn new(user_service: Arc<UserService>) -> Self {
    Self { user_service }
  }

  /// `GET /api/v1/users`
  pub fn get_users(&self, logger: &Logger) -> JsonResponse {
    match self.user_service.users_query.get_users() {
      Ok(users) => JsonResponse::serialized(STATUS_OK, &users),
      Err(code) => {
        logger.error(code.message());
        JsonResponse::serialized(STATUS_BAD_REQUEST, &code)
      }
    }
  }

  /// `GET /api/v1/users/:id`
  pub fn get_user_by_id(&self, _id: &str) -> JsonResponse {
    JsonResponse::new(
      STATUS_NOT_IMPLEMENTED,
      json!({
        "ok": false,
        "code": "NOT_IMPLEMENTED",
        "message": "get user by id is not implemented yet",
      }),
    )
  }
}
