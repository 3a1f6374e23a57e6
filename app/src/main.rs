use trellis_app::{config::AppConfig, setup, telemetry, Result};
use trellis_ioc::Container;

fn main() -> Result<()> {
  let config = AppConfig::load()?;
  telemetry::init_logging(&config.log_level)?;

  let container = Container::new();
  setup::setup_dependencies(&container, &config);
  let services = setup::get_services(&container)?;

  services.logger.info(&format!(
    "services ready, serving at http://localhost:{}",
    config.port
  ));
  Ok(())
}
