//! FIFO queue of packed countdown entries.

use std::collections::VecDeque;

use super::PackedEntry;

/// Outcome of dequeuing the head of a [`TickQueue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickState {
    /// The countdown has not expired. Holds the entry as it was re-enqueued,
    /// with its countdown already decremented.
    Waiting(PackedEntry),
    /// The countdown expired and the entry was discarded. Holds the entry
    /// exactly as it was dequeued, flag bits included.
    Due(PackedEntry),
}

impl TickState {
    /// Returns the entry if it is due now.
    #[must_use]
    #[inline]
    pub const fn due(self) -> Option<PackedEntry> {
        match self {
            Self::Due(entry) => Some(entry),
            Self::Waiting(_) => None,
        }
    }

    /// Returns true if the entry is due now.
    #[must_use]
    #[inline]
    pub const fn is_due(self) -> bool {
        matches!(self, Self::Due(_))
    }

    /// The entry carried by this state.
    #[must_use]
    #[inline]
    pub const fn entry(self) -> PackedEntry {
        match self {
            Self::Waiting(entry) | Self::Due(entry) => entry,
        }
    }
}

/// A FIFO queue of scheduled cell updates.
///
/// Callers enqueue packed entries themselves and drain the queue with one of
/// the two dequeue-and-test protocols:
///
/// - [`check`](Self::check) treats the whole 5-bit field as the countdown.
/// - [`check_masked`](Self::check_masked) counts down only the bits selected
///   by a mask and leaves the remaining flag bits untouched.
///
/// A typical pass snapshots [`len`](Self::len) and dequeues that many times,
/// so entries re-enqueued during the pass wait until the next one.
#[derive(Debug, Clone, Default)]
pub struct TickQueue {
    entries: VecDeque<PackedEntry>,
}

impl TickQueue {
    /// Creates a new empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new queue with room for `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
        }
    }

    /// Appends an entry at the tail.
    #[inline]
    pub fn enqueue(&mut self, entry: PackedEntry) {
        self.entries.push_back(entry);
    }

    /// Dequeues the head entry using its whole delay field as the countdown.
    ///
    /// A non-zero delay is decremented and the entry goes back to the tail.
    ///
    /// # Panics
    /// Panics if the queue is empty. Callers drain at most [`len`](Self::len)
    /// entries per pass.
    #[inline]
    pub fn check(&mut self) -> TickState {
        self.check_masked(PackedEntry::FLAGS_MASK)
    }

    /// Dequeues the head entry, counting down only the bits selected by `mask`.
    ///
    /// Bits of the delay/flags field outside `mask` belong to the caller and
    /// are carried through unchanged, both into the re-enqueued entry and
    /// into the returned due entry.
    ///
    /// # Panics
    /// Panics if the queue is empty.
    pub fn check_masked(&mut self, mask: u8) -> TickState {
        let entry = self
            .entries
            .pop_front()
            .expect("dequeued from an empty tick queue");

        let flags = entry.flags();
        let delay = flags & mask;
        if delay == 0 {
            return TickState::Due(entry);
        }

        // Zero the old countdown bits, then set them with the new value
        let flags = (flags & !mask) | (delay - 1);
        let requeued = entry.with_flags(flags);
        self.entries.push_back(requeued);
        TickState::Waiting(requeued)
    }

    /// Returns the number of pending entries.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is pending.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every pending entry.
    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates pending entries from head to tail.
    pub fn iter(&self) -> impl Iterator<Item = PackedEntry> + '_ {
        self.entries.iter().copied()
    }
}
