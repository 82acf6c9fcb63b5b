//! VM memory: a byte buffer, conceptually infinite, zero-extended on read.
//!
//! This is ambient support for Components F and G (the return extractor
//! reads from it; the gas gate prices growing it) rather than a halting-core
//! component in its own right.

use crate::constants::{MEMORY_EXPANSION_QUOTIENT, WORD_SIZE};
use crate::errors::InternalError;

/// The EVM's byte-addressable scratch memory for one call frame.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Memory {
    data: Vec<u8>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn resize_to_cover(&mut self, end: usize) {
        let words = end.div_ceil(WORD_SIZE);
        let target = words.saturating_mul(WORD_SIZE);
        if target > self.data.len() {
            self.data.resize(target, 0);
        }
    }

    /// Writes `value` starting at `offset`, growing memory as needed.
    pub fn store(&mut self, offset: usize, value: &[u8]) -> Result<(), InternalError> {
        let end = offset
            .checked_add(value.len())
            .ok_or(InternalError::ArithmeticOverflow)?;
        self.resize_to_cover(end);
        if let Some(dest) = self.data.get_mut(offset..end) {
            dest.copy_from_slice(value);
        }
        Ok(())
    }

    /// Reads `len` bytes starting at `offset`, zero-extending past the
    /// current memory size. This never fails and never grows `self`; it is
    /// a pure read, matching the Return Extractor's contract (§4.F).
    #[must_use]
    pub fn load_range_zero_extended(&self, offset: usize, len: usize) -> Vec<u8> {
        let mut out = vec![0u8; len];
        let Some(end) = offset.checked_add(len) else {
            return out;
        };
        let readable_end = end.min(self.data.len());
        if readable_end <= offset {
            return out;
        }
        let Some(src) = self.data.get(offset..readable_end) else {
            return out;
        };
        let copy_len = src.len();
        if let Some(dest) = out.get_mut(..copy_len) {
            dest.copy_from_slice(src);
        }
        out
    }

    /// Gas cost, in the quadratic memory-expansion formula, of growing
    /// memory so that it covers `byte_size` bytes. Returns `0` if `self`
    /// already covers that many bytes. See §4.G/§9.
    #[must_use]
    pub fn expansion_cost(&self, byte_size: usize) -> u64 {
        if byte_size <= self.data.len() {
            return 0;
        }
        cost_for_size(byte_size).saturating_sub(cost_for_size(self.data.len()))
    }
}

fn cost_for_size(byte_size: usize) -> u64 {
    let words = u64::try_from(byte_size.div_ceil(WORD_SIZE)).unwrap_or(u64::MAX);
    let quotient = u64::try_from(MEMORY_EXPANSION_QUOTIENT).unwrap_or(u64::MAX);
    let quadratic = words.saturating_mul(words).saturating_div(quotient);
    let linear = words.saturating_mul(3);
    quadratic.saturating_add(linear)
}
