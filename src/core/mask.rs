//! Identity bits for appender deduplication
//!
//! Every distinct sink name is assigned one bit out of a 64-bit word. During
//! dispatch the bits of appenders that already fired are OR-ed into a local
//! word, so "did this sink already see the event" is a single AND.
//!
//! The width is a hard ceiling: once 64 names are registered, further names
//! are refused rather than wrapped onto an existing bit.

use super::error::{LoggerError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;

/// Number of distinct sink names a [`MaskRegistry`] can hand out.
pub const MASK_BITS: u32 = u64::BITS;

/// A single identity bit, or a union of them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Mask(u64);

impl Mask {
    pub const EMPTY: Mask = Mask(0);

    #[inline]
    pub fn bits(self) -> u64 {
        self.0
    }

    #[inline]
    pub fn intersects(self, other: Mask) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    pub fn insert(&mut self, other: Mask) {
        self.0 |= other.0;
    }
}

impl fmt::Debug for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Mask({:#x})", self.0)
    }
}

#[derive(Debug, Default)]
struct Allocation {
    by_name: HashMap<String, Mask>,
    next_bit: u32,
}

/// Allocator handing out one [`Mask`] bit per registered name.
///
/// Registration is serialized by an internal lock, so concurrent callers
/// registering the same new name receive the same bit.
///
/// # Example
///
/// ```
/// use rust_logger_hierarchy::MaskRegistry;
///
/// let masks = MaskRegistry::new();
/// let a = masks.register("ring_buffer");
/// assert_eq!(masks.register("ring_buffer"), a);
/// assert_ne!(masks.register("capture"), a);
/// ```
#[derive(Debug, Default)]
pub struct MaskRegistry {
    inner: Mutex<Allocation>,
}

impl MaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the bit for `name`, allocating a fresh one on first sight.
    pub fn try_register(&self, name: &str) -> Result<Mask> {
        let mut inner = self.inner.lock();
        if let Some(mask) = inner.by_name.get(name) {
            return Ok(*mask);
        }
        if inner.next_bit >= MASK_BITS {
            return Err(LoggerError::mask_exhausted(name));
        }
        let mask = Mask(1u64 << inner.next_bit);
        inner.next_bit += 1;
        inner.by_name.insert(name.to_string(), mask);
        Ok(mask)
    }

    /// Like [`try_register`](Self::try_register).
    ///
    /// # Panics
    ///
    /// Panics when all [`MASK_BITS`] bits are already assigned to other names.
    pub fn register(&self, name: &str) -> Mask {
        match self.try_register(name) {
            Ok(mask) => mask,
            Err(e) => panic!("{}", e),
        }
    }

    /// Bit previously assigned to `name`, if any.
    pub fn get(&self, name: &str) -> Option<Mask> {
        self.inner.lock().by_name.get(name).copied()
    }

    /// Number of bits handed out so far.
    pub fn len(&self) -> usize {
        self.inner.lock().next_bit as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
