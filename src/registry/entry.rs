//! Per-slot node chain storage
//!
//! Each occupied slot owns a singly-linked chain of heap nodes, newest
//! first. Ownership is strictly single-owner: the entry owns the top node
//! and every node owns the one beneath it, so unlinking the top promotes
//! the next node without any reference counting.

#[cfg(not(feature = "std"))]
use alloc::{boxed::Box, vec::Vec};

use crate::error::{Result, StackError};

/// One stored element: an exact-length payload plus the link to the node
/// beneath it
struct Node {
    below: Option<Box<Node>>,
    payload: Box<[u8]>,
}

impl Node {
    /// Allocates a node holding a copy of `payload`
    ///
    /// The payload buffer is reserved fallibly, so an out-of-memory push
    /// surfaces as `AllocationFailed` instead of aborting the process.
    fn with_payload(payload: &[u8]) -> Result<Box<Node>> {
        let mut buf = Vec::new();
        buf.try_reserve_exact(payload.len())
            .map_err(|_| StackError::allocation_failed(payload.len()))?;
        buf.extend_from_slice(payload);

        Ok(Box::new(Node {
            below: None,
            payload: buf.into_boxed_slice(),
        }))
    }
}

/// One registry slot: the element chain of a single stack instance
///
/// A free slot keeps `top = None`, `len = 0`, `in_use = false`.
#[derive(Default)]
pub(crate) struct StackEntry {
    top: Option<Box<Node>>,
    len: usize,
    in_use: bool,
}

impl StackEntry {
    /// Creates a slot in the free state
    pub(crate) fn free() -> Self {
        Self::default()
    }

    pub(crate) fn is_used(&self) -> bool {
        self.in_use
    }

    pub(crate) fn mark_used(&mut self) {
        debug_assert!(!self.in_use);
        self.in_use = true;
    }

    /// Number of elements currently stored
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Pushes a copy of `payload` as the new top element
    pub(crate) fn push(&mut self, payload: &[u8]) -> Result<()> {
        if payload.is_empty() {
            return Err(StackError::EmptyPayload);
        }

        // Link above the current top only once the node exists, so a failed
        // allocation leaves the chain untouched.
        let mut node = Node::with_payload(payload)?;
        node.below = self.top.take();
        self.top = Some(node);
        self.len += 1;
        Ok(())
    }

    /// Copies the top element into `out`, unlinks it, and returns the
    /// number of bytes written
    ///
    /// An undersized buffer refuses the pop outright: nothing is copied and
    /// the element stays on the stack for a later attempt.
    pub(crate) fn pop_into(&mut self, out: &mut [u8]) -> Result<usize> {
        match self.top.take() {
            Some(mut node) if node.payload.len() <= out.len() => {
                let written = node.payload.len();
                out[..written].copy_from_slice(&node.payload);
                self.top = node.below.take();
                self.len -= 1;
                Ok(written)
            }
            Some(node) => {
                let needed = node.payload.len();
                self.top = Some(node);
                Err(StackError::BufferTooSmall {
                    needed,
                    capacity: out.len(),
                })
            }
            None => Err(StackError::StackEmpty),
        }
    }

    /// Frees the whole chain and returns the slot to the free state
    pub(crate) fn clear(&mut self) {
        self.unlink_chain();
        self.len = 0;
        self.in_use = false;
    }

    /// Deletes nodes top-to-bottom, each unlink promoting the node below
    ///
    /// Iterative on purpose: dropping a long chain through the nested
    /// `Option<Box<Node>>` links would recurse once per element.
    fn unlink_chain(&mut self) {
        let mut top = self.top.take();
        while let Some(mut node) = top {
            top = node.below.take();
        }
    }
}

impl Drop for StackEntry {
    fn drop(&mut self) {
        self.unlink_chain();
    }
}
