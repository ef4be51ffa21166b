//! Process-wide default registry
//!
//! Free functions over a shared [`StackRegistry`], for callers that want a
//! single handle namespace without threading a registry reference through
//! their code. The registry lives in thread-local storage, which keeps the
//! single-threaded contract intact without any synchronization: each thread
//! that touches this module gets its own independent namespace, and handles
//! must never be carried across threads.

use std::cell::RefCell;

use crate::handle::Handle;
use crate::registry::StackRegistry;

thread_local! {
    static REGISTRY: RefCell<StackRegistry> = RefCell::new(StackRegistry::new());
}

/// Runs `f` with mutable access to this thread's registry
///
/// Escape hatch for operations the free functions below don't cover, such
/// as reading [`capacity`](StackRegistry::capacity) or the `try_*` API.
pub fn with_registry<R>(f: impl FnOnce(&mut StackRegistry) -> R) -> R {
    REGISTRY.with(|registry| f(&mut registry.borrow_mut()))
}

/// Creates a new stack in this thread's registry
///
/// Returns [`Handle::INVALID`] on resource exhaustion.
pub fn create() -> Handle {
    with_registry(StackRegistry::create)
}

/// Destroys a stack; invalid handles are silently ignored
pub fn release(handle: Handle) {
    with_registry(|registry| registry.release(handle));
}

/// Returns whether `handle` refers to a live stack on this thread
pub fn is_valid(handle: Handle) -> bool {
    with_registry(|registry| registry.is_valid(handle))
}

/// Number of elements in the stack behind `handle`, zero if invalid
pub fn size(handle: Handle) -> usize {
    with_registry(|registry| registry.size(handle))
}

/// Pushes a copy of `payload`; precondition failures are silently ignored
pub fn push(handle: Handle, payload: &[u8]) {
    with_registry(|registry| registry.push(handle, payload));
}

/// Pops the top element into `out`, returning bytes written (zero on any
/// precondition failure)
pub fn pop(handle: Handle, out: &mut [u8]) -> usize {
    with_registry(|registry| registry.pop(handle, out))
}
