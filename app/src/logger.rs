use std::sync::Arc;

/// The application logger handed to services through the container.
///
/// Every event is emitted through `tracing` and tagged with the service name,
/// so whichever subscriber is installed decides where it ends up.
#[derive(Debug, Clone)]
pub struct Logger {
  service: Arc<str>,
}

impl Logger {
  pub fn new(service: impl Into<String>) -> Self {
    Self {
      service: Arc::from(service.into()),
    }
  }

  pub fn service(&self) -> &str {
    &self.service
  }

  pub fn info(&self, message: &str) {
    tracing::info!(service = %self.service, "{}", message);
  }

  pub fn error(&self, message: &str) {
    tracing::error!(service = %self.service, "{}", message);
  }
}
