//! Packed countdown queues.
//!
//! Every behavior simulator defers work by pushing a [`PackedEntry`] into its
//! own [`TickQueue`] and later draining it with [`TickQueue::check`] or
//! [`TickQueue::check_masked`].
//!
//! # Architecture
//!
//! - [`PackedEntry`] - A cell index and a 5-bit countdown/flags field in one `u32`
//! - [`TickQueue`] - FIFO of packed entries with the dequeue-and-test protocols
//! - [`TickState`] - Outcome of one dequeue

mod packed_entry;
mod tick_queue;

pub use packed_entry::PackedEntry;
pub use tick_queue::{TickQueue, TickState};
