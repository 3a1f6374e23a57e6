use std::sync::Arc;
use trellis_ioc::{resolve, Container};

// 1. Define the abstraction (the trait)
trait Logger: Send + Sync {
  fn log(&self, message: &str);
}

// 2. Define a concrete implementation
struct ConsoleLogger;
impl Logger for ConsoleLogger {
  fn log(&self, message: &str) {
    println!("[CONSOLE LOG]: {}", message);
  }
}

// 3. Define a service that depends on the abstraction
struct ReportService {
  logger: Arc<dyn Logger>,
}

impl ReportService {
  fn generate_report(&self) {
    self.logger.log("Starting report generation.");
    self.logger.log("Finished report generation.");
  }
}

fn main() {
  let container = Container::new();

  // The container stores an Arc<ConsoleLogger> and serves it as Arc<dyn Logger>.
  container.add_singleton_trait::<dyn Logger>("logger", |_| Arc::new(ConsoleLogger));

  // ReportService does not build its logger; its factory resolves it.
  container.add_singleton("reports", |c| ReportService {
    logger: resolve!(c, trait Logger, "logger"),
  });

  println!("Resolving the high-level service...");
  let report_service = resolve!(&container, ReportService, "reports");

  println!("Using the service...");
  report_service.generate_report();
}
