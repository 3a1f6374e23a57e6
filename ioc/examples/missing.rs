use std::panic;
use trellis_ioc::{resolve, Container, ResolveError};

struct UnregisteredService;

fn main() {
  let container = Container::new();

  // --- The fallible `resolve()` method ---
  match container.resolve::<UnregisteredService>("unregistered") {
    Ok(_) => panic!("Should not have found the service!"),
    Err(err @ ResolveError::Unregistered { .. }) => println!("Correctly failed: {}", err),
    Err(other) => panic!("Unexpected error: {}", other),
  }

  // --- The panicking `resolve!` macro ---
  let result = panic::catch_unwind(panic::AssertUnwindSafe(|| {
    let _service = resolve!(&container, UnregisteredService);
  }));
  assert!(result.is_err(), "resolve! should have panicked.");
  println!("Caught the expected panic from resolve!.");
}
