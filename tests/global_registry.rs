//! Integration tests for the process-wide registry facade.

use bytestack::global;

// The harness runs every test on its own thread, so each test sees a fresh
// thread-local registry.

#[test]
fn test_global_namespace_round_trip() {
    let handle = global::create();
    assert!(handle.raw() >= 0);
    assert!(global::is_valid(handle));

    global::push(handle, b"hello");
    global::push(handle, b"world");
    assert_eq!(global::size(handle), 2);

    let mut buf = [0u8; 8];
    assert_eq!(global::pop(handle, &mut buf), 5);
    assert_eq!(&buf[..5], b"world");
    assert_eq!(global::pop(handle, &mut buf), 5);
    assert_eq!(&buf[..5], b"hello");

    global::release(handle);
    assert!(!global::is_valid(handle));
    assert_eq!(global::size(handle), 0);
}

#[test]
fn test_with_registry_reaches_the_full_api() {
    let handle = global::with_registry(|stacks| {
        stacks.try_create().expect("handle space is not exhausted")
    });

    global::push(handle, b"x");
    assert_eq!(global::with_registry(|stacks| stacks.live()), 1);

    global::release(handle);
}

#[test]
fn test_registries_are_per_thread() {
    let handle = global::create();
    global::push(handle, b"main");

    // A stack created on this thread is unknown to other threads.
    let seen_elsewhere = std::thread::spawn(move || global::is_valid(handle))
        .join()
        .expect("probe thread must not panic");
    assert!(!seen_elsewhere);

    assert!(global::is_valid(handle));
    global::release(handle);
}
