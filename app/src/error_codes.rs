//! Numbered error codes returned to API clients.
//!
//! A code is the feature number padded to two digits followed by the case
//! number padded to two digits, so feature 1 case 0 is `"0100"` and feature
//! 1 case 500 is `"01500"`.

use serde::{Serialize, Serializer};
use std::fmt;

const FEATURE_DIGITS: usize = 2;
const CASE_DIGITS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCode {
  feature: u16,
  case: u16,
  message: &'static str,
}

impl ErrorCode {
  pub const fn new(feature: u16, case: u16, message: &'static str) -> Self {
    Self {
      feature,
      case,
      message,
    }
  }

  pub fn code(&self) -> String {
    format!(
      "{:0fw$}{:0cw$}",
      self.feature,
      self.case,
      fw = FEATURE_DIGITS,
      cw = CASE_DIGITS
    )
  }

  pub fn message(&self) -> &'static str {
    self.message
  }
}

impl fmt::Display for ErrorCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "[{}] {}", self.code(), self.message)
  }
}

impl Serialize for ErrorCode {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    #[derive(Serialize)]
    struct Wire<'a> {
      code: String,
      message: &'a str,
    }

    Wire {
      code: self.code(),
      message: self.message,
    }
    .serialize(serializer)
  }
}

/// The catch-all error for failures no feature-specific code describes.
pub const BASIC_ERROR: ErrorCode = ErrorCode::new(0, 0, "Internal server error");

pub mod user {
  use super::ErrorCode;

  const FEATURE: u16 = 1;

  // Handler cases: 0-499.
  pub const INVALID_BODY: ErrorCode = ErrorCode::new(FEATURE, 0, "User invalid body");
  pub const INVALID_PARAMS: ErrorCode = ErrorCode::new(FEATURE, 1, "User invalid params");

  // Service cases: 500-999.
  pub const GET_USERS_INTERNAL_ERROR: ErrorCode =
    ErrorCode::new(FEATURE, 500, "Get users internal error");
  pub const GET_USERS_NOT_FOUND: ErrorCode = ErrorCode::new(FEATURE, 501, "Get users not found");
  pub const GET_USERS_INVALID_REQUEST: ErrorCode =
    ErrorCode::new(FEATURE, 502, "Get users invalid request");
  pub const GET_USERS_UNAUTHORIZED: ErrorCode =
    ErrorCode::new(FEATURE, 503, "Get users unauthorized");
  pub const GET_USERS_FORBIDDEN: ErrorCode = ErrorCode::new(FEATURE, 504, "Get users forbidden");
  pub const GET_USERS_TOO_MANY_REQUESTS: ErrorCode =
    ErrorCode::new(FEATURE, 505, "Get users too many requests");
}

#[cfg(test)]
mod tests {
  use super::*;
  use pretty_assertions::assert_eq;

  #[test]
  fn codes_are_zero_padded() {
    assert_eq!(BASIC_ERROR.code(), "0000");
    assert_eq!(user::INVALID_BODY.code(), "0100");
    assert_eq!(user::INVALID_PARAMS.code(), "0101");
    assert_eq!(user::GET_USERS_INTERNAL_ERROR.code(), "01500");
    assert_eq!(user::GET_USERS_TOO_MANY_REQUESTS.code(), "01505");
  }

  #[test]
  fn serializes_code_and_message() {
    let json = serde_json::to_value(user::GET_USERS_NOT_FOUND).unwrap();
    assert_eq!(
      json,
      serde_json::json!({ "code": "01501", "message": "Get users not found" })
    );
  }
}
