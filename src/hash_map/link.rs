//! Packed insertion-order links
//!
//! Each occupied slot carries one `u64` holding two slot indices of the same
//! table:
//!
//! ```text
//!   bits [63:32] = previous occupied slot (0xFFFF_FFFF = none)
//!   bits [31:0]  = next occupied slot     (0xFFFF_FFFF = none)
//! ```
//!
//! This threads a doubly-linked list through the table without any per-entry
//! allocation.

/// Marker for "no slot" in either half of a link
pub(crate) const NIL: u32 = u32::MAX;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(transparent)]
pub(crate) struct Link(u64);

impl Link {
    /// Both directions unset
    pub(crate) const UNLINKED: Self = Self(u64::MAX);
    const PREV_SHIFT: u32 = 32;
    const NEXT_MASK: u64 = 0xFFFF_FFFF;

    #[inline(always)]
    pub(crate) fn new(prev: u32, next: u32) -> Self {
        Self(((prev as u64) << Self::PREV_SHIFT) | next as u64)
    }

    #[inline(always)]
    pub(crate) fn prev(self) -> Option<usize> {
        let prev = (self.0 >> Self::PREV_SHIFT) as u32;
        (prev != NIL).then_some(prev as usize)
    }

    #[inline(always)]
    pub(crate) fn next(self) -> Option<usize> {
        let next = (self.0 & Self::NEXT_MASK) as u32;
        (next != NIL).then_some(next as usize)
    }

    #[inline(always)]
    pub(crate) fn with_next(self, next: u32) -> Self {
        Self((self.0 & !Self::NEXT_MASK) | next as u64)
    }

    /// Mark this slot as the tail of the list
    #[inline(always)]
    pub(crate) fn terminated(self) -> Self {
        Self(self.0 | Self::NEXT_MASK)
    }
}
