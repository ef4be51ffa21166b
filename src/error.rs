//! Error types for registry operations
//!
//! Only the `try_*` half of the API surfaces these errors. The plain
//! operations keep the sentinel contract: creation reports exhaustion with
//! [`Handle::INVALID`](crate::Handle::INVALID), and every other failure is a
//! benign no-op or zero result.

use thiserror::Error;

use crate::handle::RawHandle;

/// Result type for registry operations
pub type Result<T> = core::result::Result<T, StackError>;

/// Registry operation errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackError {
    /// No more handles can be issued
    #[error("handle space exhausted (capacity {capacity})")]
    HandlesExhausted {
        /// Slot capacity at the time of the failed allocation
        capacity: usize,
    },

    /// The underlying allocator refused a reservation
    #[error("allocation failed: requested {requested} bytes")]
    AllocationFailed {
        /// Size of the refused reservation in bytes
        requested: usize,
    },

    /// Stale, negative, out-of-range, or already-released handle
    #[error("handle {handle} does not refer to a live stack")]
    InvalidHandle {
        /// Raw handle value as supplied by the caller
        handle: RawHandle,
    },

    /// Push of a zero-length payload
    #[error("cannot push an empty payload")]
    EmptyPayload,

    /// Pop from a stack holding no elements
    #[error("stack is empty")]
    StackEmpty,

    /// Output buffer smaller than the top element; the element is retained
    #[error("output buffer too small: need {needed} bytes, have {capacity}")]
    BufferTooSmall {
        /// Stored length of the top element
        needed: usize,
        /// Capacity of the caller-supplied buffer
        capacity: usize,
    },
}

impl StackError {
    /// Create an invalid handle error
    pub fn invalid_handle(handle: RawHandle) -> Self {
        Self::InvalidHandle { handle }
    }

    /// Create an allocation failure error
    pub fn allocation_failed(requested: usize) -> Self {
        Self::AllocationFailed { requested }
    }

    /// Check if the error reports resource exhaustion rather than misuse
    pub fn is_exhaustion(&self) -> bool {
        matches!(
            self,
            Self::HandlesExhausted { .. } | Self::AllocationFailed { .. }
        )
    }
}
