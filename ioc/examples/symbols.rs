use std::sync::Arc;
use trellis_ioc::{Container, ServiceId};

trait MessageSender: Send + Sync {
  fn send(&self, to: &str, message: &str) -> String;
}

struct EmailSender;
impl MessageSender for EmailSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending email to {}: '{}'", to, message)
  }
}

struct SmsSender;
impl MessageSender for SmsSender {
  fn send(&self, to: &str, message: &str) -> String {
    format!("Sending SMS to {}: '{}'", to, message)
  }
}

fn main() {
  // Two symbols with the same description are still two different services.
  let email = ServiceId::symbol("Sender");
  let sms = ServiceId::symbol("Sender");

  let container = Container::new();
  container.add_singleton_trait::<dyn MessageSender>(&email, |_| Arc::new(EmailSender));
  container.add_singleton_trait::<dyn MessageSender>(&sms, |_| Arc::new(SmsSender));

  let email_notifier = container.resolve::<dyn MessageSender>(&email).unwrap();
  let sms_notifier = container.resolve::<dyn MessageSender>(&sms).unwrap();

  let result1 = email_notifier.send("test@example.com", "Hello from Trellis!");
  let result2 = sms_notifier.send("+123456789", "Hello from Trellis!");

  println!("{}", result1);
  println!("{}", result2);

  assert!(result1.contains("email"));
  assert!(result2.contains("SMS"));
}
