use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use trellis_ioc::Container;

// A simple service that gets a unique ID upon creation.
struct RequestTracker {
  id: usize,
}

static ID_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn main() {
  let container = Container::new();

  // This factory runs once, on first resolution.
  container.add_singleton("singleton_tracker", |_| {
    println!("Creating SINGLETON RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });

  // This factory runs on every resolution.
  container.add_transient("transient_tracker", |_| {
    println!("Creating TRANSIENT RequestTracker...");
    RequestTracker {
      id: ID_COUNTER.fetch_add(1, Ordering::SeqCst),
    }
  });

  println!("--- Resolving Singletons ---");
  let s1 = container.resolve::<RequestTracker>("singleton_tracker").unwrap();
  let s2 = container.resolve::<RequestTracker>("singleton_tracker").unwrap();
  println!("Singleton 1 ID: {}, Singleton 2 ID: {}", s1.id, s2.id);
  assert_eq!(s1.id, 0);
  assert!(Arc::ptr_eq(&s1, &s2), "Singleton instances should be identical");

  println!("--- Resolving Transients ---");
  let t1 = container.resolve::<RequestTracker>("transient_tracker").unwrap();
  let t2 = container.resolve::<RequestTracker>("transient_tracker").unwrap();
  println!("Transient 1 ID: {}, Transient 2 ID: {}", t1.id, t2.id);
  assert_eq!((t1.id, t2.id), (1, 2));
  assert!(!Arc::ptr_eq(&t1, &t2), "Transient instances should be different");
}
