//! `PackedEntry` bit-packing for scheduled cell updates.
//!
//! A pending update costs one `u32`:
//! - Bits 0-26: linear cell index (up to 134,217,727)
//! - Bits 27-31: countdown, optionally shared with caller-owned flag bits

/// A scheduled cell update packed into a single `u32`.
///
/// Bit layout:
/// ```text
/// Bit Position:  31 30 29 28 27 26 ........................................ 0
///                | F  F  F  F  F | P P P P P P P P P P P P P P P P P P P P P P P P P P P |
///                |               |                                                     |
///                |               +-> Position (27 bits)                                |
///                +-----------------> Delay / flags (5 bits)                            |
/// ```
///
/// Values wider than their field are silently truncated; callers keep
/// positions below `2^27` and delays/flags below `32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedEntry(u32);

impl PackedEntry {
    /// Mask for the position field (bits 0-26).
    pub const POS_MASK: u32 = 0x07FF_FFFF;

    /// Mask for the delay/flags field (bits 27-31).
    pub const TICK_MASK: u32 = 0xF800_0000;

    /// Offset of the delay/flags field.
    pub const TICK_SHIFT: u32 = 27;

    /// All five bits of the delay/flags field, once shifted down.
    pub const FLAGS_MASK: u8 = 0b1_1111;

    /// The longest delay a single entry can carry.
    pub const MAX_DELAY: u8 = Self::FLAGS_MASK;

    /// Packs a position with a delay, or with a delay combined with flag bits.
    #[must_use]
    #[inline]
    pub const fn new(pos: usize, flags: u8) -> Self {
        Self(((pos as u32) & Self::POS_MASK) | ((flags as u32) << Self::TICK_SHIFT))
    }

    /// Reinterprets a raw packed word.
    #[must_use]
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw packed word.
    #[must_use]
    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The linear cell index.
    #[must_use]
    #[inline]
    pub const fn pos(self) -> usize {
        (self.0 & Self::POS_MASK) as usize
    }

    /// The full 5-bit delay/flags field.
    #[must_use]
    #[inline]
    pub const fn flags(self) -> u8 {
        ((self.0 & Self::TICK_MASK) >> Self::TICK_SHIFT) as u8
    }

    /// Replaces the delay/flags field, keeping the position.
    #[must_use]
    #[inline]
    pub const fn with_flags(self, flags: u8) -> Self {
        Self::new(self.pos(), flags)
    }
}
