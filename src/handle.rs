//! Opaque handles addressing stacks inside a registry

/// Raw signed integer carried by a [`Handle`]
///
/// The handle space is deliberately signed: slot indices are non-negative,
/// which leaves the negative range free for the invalid sentinel.
pub type RawHandle = i32;

/// Opaque identifier for one stack instance inside a
/// [`StackRegistry`](crate::StackRegistry)
///
/// A handle is nothing more than the index of the slot it was issued from.
/// It carries no generation counter: once released, a handle value may be
/// issued again for a new stack in the same slot, and a stale copy held
/// across that reuse will address the new stack. Holding on to released
/// handles is a caller bug the registry cannot detect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Handle(RawHandle);

impl Handle {
    /// Sentinel returned when no handle could be issued
    pub const INVALID: Handle = Handle(-1);

    /// Wraps a raw integer as a handle
    ///
    /// Any value is accepted, including negative ones; validity is decided
    /// by the registry the handle is presented to.
    pub const fn from_raw(raw: RawHandle) -> Self {
        Handle(raw)
    }

    /// Returns the raw integer value
    pub const fn raw(self) -> RawHandle {
        self.0
    }

    /// Slot index, or `None` for the sentinel and other negative values
    pub(crate) fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }
}

impl core::fmt::Display for Handle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}
