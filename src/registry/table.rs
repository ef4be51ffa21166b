//! Growable handle table with slot reuse
//!
//! ## Invariants
//!
//! - `live <= slots.len()` at all times
//! - Every occupied slot has `in_use = true`; every free slot holds no
//!   nodes and reports length zero
//! - Whenever `live < slots.len()`, a free slot exists at or after
//!   `first_free` (releases pull the cursor back, never past a free slot)
//! - `slots.len() <= config.max_stacks <= MAX_STACKS`, so every slot index
//!   is representable as a non-negative `RawHandle`
//!
//! ## Not Thread-Safe
//!
//! - No internal synchronization of any kind
//! - All operations take `&self`/`&mut self` and run to completion
//! - Concurrent callers must wrap the registry in their own lock

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;
use core::mem;

#[cfg(feature = "logging")]
use tracing::{debug, trace};

#[cfg(feature = "stats")]
use super::RegistryStats;
use super::{RegistryConfig, StackEntry};
use crate::error::{Result, StackError};
use crate::handle::{Handle, RawHandle};

/// Registry of independent LIFO byte stacks, addressed by integer handles
///
/// Handles are slot indices. Allocation reuses freed slots before growing
/// the table (capacity doubles, clamped to the signed handle space), and
/// releasing the last live stack drops the backing storage entirely so an
/// idle registry occupies no heap memory.
///
/// # Example
/// ```
/// use bytestack::StackRegistry;
///
/// let mut stacks = StackRegistry::new();
/// let a = stacks.create();
/// let b = stacks.create();
///
/// stacks.push(a, &[1, 2, 3]);
/// assert_eq!(stacks.size(a), 1);
/// assert_eq!(stacks.size(b), 0);
///
/// stacks.release(a);
/// stacks.release(b);
/// assert!(stacks.is_pristine());
/// ```
pub struct StackRegistry {
    slots: Vec<StackEntry>,
    /// Count of currently occupied slots
    live: usize,
    /// Lowest index that may be free; scans only ever move it forward
    first_free: usize,
    config: RegistryConfig,
    #[cfg(feature = "stats")]
    stats: RegistryStats,
}

impl StackRegistry {
    /// Creates an empty registry with the default growth policy
    ///
    /// No heap allocation happens until the first stack is created.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with a custom configuration
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            slots: Vec::new(),
            live: 0,
            first_free: 0,
            config: config.normalized(),
            #[cfg(feature = "stats")]
            stats: RegistryStats::default(),
        }
    }

    /// Creates a new stack and returns its handle
    ///
    /// Returns [`Handle::INVALID`] when the handle space is exhausted or the
    /// table could not grow. Existing stacks are unaffected by a failure.
    pub fn create(&mut self) -> Handle {
        self.try_create().unwrap_or(Handle::INVALID)
    }

    /// Creates a new stack, reporting failures as errors
    pub fn try_create(&mut self) -> Result<Handle> {
        if self.live == self.slots.len() {
            self.grow()?;
        } else {
            // A free slot is guaranteed at or after the cursor.
            while self.slots[self.first_free].is_used() {
                self.first_free += 1;
            }
        }

        let index = self.first_free;
        self.slots[index].mark_used();
        self.live += 1;
        self.first_free += 1;

        #[cfg(feature = "stats")]
        self.stats.record_create(self.live);

        Ok(Handle::from_raw(index as RawHandle))
    }

    /// Destroys the stack behind `handle`, freeing all of its elements
    ///
    /// An invalid handle is silently ignored. Releasing the last live stack
    /// returns the registry to its pristine state: backing storage freed,
    /// capacity and cursor reset to zero.
    pub fn release(&mut self, handle: Handle) {
        let Some(index) = handle.index() else { return };
        let Some(entry) = self.slots.get_mut(index) else {
            return;
        };
        if !entry.is_used() {
            return;
        }

        entry.clear();
        self.live -= 1;

        #[cfg(feature = "stats")]
        self.stats.record_release();

        if self.live == 0 {
            // Last stack gone: drop the slot array so an idle registry
            // holds no memory.
            self.slots = Vec::new();
            self.first_free = 0;

            #[cfg(feature = "logging")]
            trace!("last stack released, table reset to pristine");
        } else if index < self.first_free {
            self.first_free = index;
        }
    }

    /// Returns whether `handle` currently refers to a live stack
    ///
    /// Total over all inputs: negative values and indices far outside the
    /// current capacity simply report `false`.
    pub fn is_valid(&self, handle: Handle) -> bool {
        self.entry(handle).is_some()
    }

    /// Number of elements in the stack behind `handle`
    ///
    /// Returns zero for an invalid handle as well as for a live, empty
    /// stack; callers that need to tell the two apart should check
    /// [`is_valid`](Self::is_valid) first.
    pub fn size(&self, handle: Handle) -> usize {
        self.entry(handle).map_or(0, StackEntry::len)
    }

    /// Pushes a copy of `payload` onto the stack behind `handle`
    ///
    /// Silently does nothing on an invalid handle, an empty payload, or a
    /// failed node allocation.
    pub fn push(&mut self, handle: Handle, payload: &[u8]) {
        let _ = self.try_push(handle, payload);
    }

    /// Pushes a copy of `payload`, reporting failures as errors
    pub fn try_push(&mut self, handle: Handle, payload: &[u8]) -> Result<()> {
        let Some(entry) = self.entry_mut(handle) else {
            return Err(StackError::invalid_handle(handle.raw()));
        };

        match entry.push(payload) {
            Ok(()) => {
                #[cfg(feature = "stats")]
                self.stats.record_push();
                Ok(())
            }
            Err(err) => {
                #[cfg(feature = "stats")]
                if err.is_exhaustion() {
                    self.stats.record_dropped_push();
                }
                #[cfg(feature = "logging")]
                if err.is_exhaustion() {
                    debug!(
                        handle = handle.raw(),
                        bytes = payload.len(),
                        "push dropped: node allocation failed"
                    );
                }
                Err(err)
            }
        }
    }

    /// Pops the top element into `out`, returning the number of bytes
    /// written
    ///
    /// Returns zero on an invalid handle, an empty stack, or a buffer
    /// smaller than the stored element. The undersized-buffer case refuses
    /// the pop outright: no bytes are copied and the element remains
    /// available for a later pop with an adequate buffer.
    pub fn pop(&mut self, handle: Handle, out: &mut [u8]) -> usize {
        self.try_pop(handle, out).unwrap_or(0)
    }

    /// Pops the top element into `out`, reporting failures as errors
    pub fn try_pop(&mut self, handle: Handle, out: &mut [u8]) -> Result<usize> {
        let Some(entry) = self.entry_mut(handle) else {
            return Err(StackError::invalid_handle(handle.raw()));
        };

        let written = entry.pop_into(out)?;

        #[cfg(feature = "stats")]
        self.stats.record_pop();

        Ok(written)
    }

    /// Current slot capacity of the table
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live stacks
    pub fn live(&self) -> usize {
        self.live
    }

    /// Whether the registry holds no stacks and no backing storage
    pub fn is_pristine(&self) -> bool {
        self.slots.is_empty()
    }

    /// Registry activity counters
    #[cfg(feature = "stats")]
    pub fn stats(&self) -> &RegistryStats {
        &self.stats
    }

    fn entry(&self, handle: Handle) -> Option<&StackEntry> {
        let index = handle.index()?;
        self.slots.get(index).filter(|entry| entry.is_used())
    }

    fn entry_mut(&mut self, handle: Handle) -> Option<&mut StackEntry> {
        let index = handle.index()?;
        self.slots.get_mut(index).filter(|entry| entry.is_used())
    }

    /// Expands the slot array: empty tables start at the configured initial
    /// capacity, occupied ones double, clamped to the handle-space cap
    fn grow(&mut self) -> Result<()> {
        let old_capacity = self.slots.len();
        let limit = self.config.max_stacks;

        if old_capacity >= limit {
            return Err(StackError::HandlesExhausted {
                capacity: old_capacity,
            });
        }

        let new_capacity = if old_capacity == 0 {
            self.config.initial_capacity
        } else {
            old_capacity.saturating_mul(2)
        }
        .min(limit);

        // Fallible reservation: a refused allocation must leave the
        // existing slots valid and occupied as before.
        let additional = new_capacity - old_capacity;
        self.slots
            .try_reserve_exact(additional)
            .map_err(|_| StackError::allocation_failed(additional * mem::size_of::<StackEntry>()))?;
        self.slots.resize_with(new_capacity, StackEntry::free);

        // Everything below the old capacity is occupied, so the first free
        // slot is exactly where the new ones start.
        self.first_free = old_capacity;

        #[cfg(feature = "logging")]
        trace!(
            old_capacity,
            new_capacity,
            live = self.live,
            "grew handle table"
        );

        Ok(())
    }
}

impl Default for StackRegistry {
    fn default() -> Self {
        Self::new()
    }
}
