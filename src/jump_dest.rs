//! Component C: the jump-destination set.
//!
//! One-pass scan over the bytecode: `PUSHn` skips its immediate, `JUMPDEST`
//! records its position. A byte that equals the `JUMPDEST` value but sits
//! inside a `PUSHn` immediate is never recorded; that's the entire reason
//! this is a stateful scan rather than a `memchr`.

use crate::errors::InternalError;
use crate::opcode::opcode_metadata;
use rustc_hash::FxHashSet;

const JUMPDEST_BYTE: u8 = 0x5B;

/// Scans `code` and returns the set of valid `JUMPDEST` positions.
///
/// Called once per bytecode and cached alongside the execution environment;
/// `JUMP`/`JUMPI` handling never rescans.
pub fn build_jump_dests(code: &[u8]) -> Result<FxHashSet<usize>, InternalError> {
    let mut dests = FxHashSet::default();
    let mut pc = 0usize;

    while pc < code.len() {
        #[allow(clippy::indexing_slicing)]
        let byte = code[pc];

        if byte == JUMPDEST_BYTE {
            dests.insert(pc);
            pc = pc
                .checked_add(1)
                .ok_or(InternalError::ProgramCounterOverflow)?;
            continue;
        }

        let skip = opcode_metadata(byte)
            .map(|m| usize::from(m.pushes_immediate_bytes))
            .unwrap_or(0);

        pc = pc
            .checked_add(1)
            .and_then(|next| next.checked_add(skip))
            .ok_or(InternalError::ProgramCounterOverflow)?;
    }

    Ok(dests)
}
