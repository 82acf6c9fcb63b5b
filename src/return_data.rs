//! Component F: the return-data extractor (*H* in the Yellow Paper).
//!
//! `RETURN`/`REVERT` halt the current frame and hand the caller a byte range
//! read out of memory. This is a pure function of the probed `(offset,
//! length)` pair and the machine's memory; it never errors, since memory
//! reads zero-extend (§4.F).

use crate::machine::MachineState;
use crate::stack::ProbedInputs;
use bytes::Bytes;
use ethereum_types::U256;

/// Extracts the output bytes for a halting `RETURN`/`REVERT`, given the
/// already-probed `(offset, length)` stack inputs in pop order.
///
/// Offsets and lengths that don't fit in `usize` (way beyond any memory this
/// crate will ever actually grow to) are treated as if length were zero:
/// the Yellow Paper's *H* is total, and this crate never panics computing it.
#[must_use]
pub fn extract_return_data(machine: &MachineState, inputs: &ProbedInputs) -> Bytes {
    let offset = inputs.get(0).unwrap_or_default();
    let length = inputs.get(1).unwrap_or_default();
    let Some((offset, length)) = to_usize_pair(offset, length) else {
        return Bytes::new();
    };
    Bytes::from(machine.memory.load_range_zero_extended(offset, length))
}

fn to_usize_pair(offset: U256, length: U256) -> Option<(usize, usize)> {
    Some((usize::try_from(offset).ok()?, usize::try_from(length).ok()?))
}
