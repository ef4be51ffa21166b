//! Handle-addressed LIFO byte stack containers
//!
//! This crate manages an arbitrary number of independent stacks of
//! variable-length byte payloads. Each stack is addressed through an opaque
//! integer [`Handle`] issued by a [`StackRegistry`], a growable slot table
//! that reuses freed slots before growing and releases its backing storage
//! entirely once the last stack is gone.
//!
//! # Features
//!
//! - `std` (default): Enables standard library support
//! - `logging` (default): Structured diagnostics via `tracing`
//! - `stats`: Registry activity counters
//!
//! # Example
//!
//! ```
//! use bytestack::StackRegistry;
//!
//! let mut stacks = StackRegistry::new();
//! let handle = stacks.create();
//!
//! stacks.push(handle, b"first");
//! stacks.push(handle, b"second");
//! assert_eq!(stacks.size(handle), 2);
//!
//! let mut buf = [0u8; 16];
//! let written = stacks.pop(handle, &mut buf);
//! assert_eq!(&buf[..written], b"second");
//!
//! stacks.release(handle);
//! assert!(!stacks.is_valid(handle));
//! ```
//!
//! The registry is single-threaded by contract: it contains no internal
//! synchronization, and callers needing concurrent access must wrap the whole
//! registry in their own lock. For a process-wide namespace without explicit
//! context threading, see the [`global`] module.

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Core modules
pub mod error;
pub mod handle;
pub mod registry;

#[cfg(feature = "std")]
pub mod global;

// Re-export common types for convenience
pub use error::{Result, StackError};
pub use handle::{Handle, RawHandle};
#[cfg(feature = "stats")]
pub use registry::RegistryStats;
pub use registry::{RegistryConfig, StackRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
