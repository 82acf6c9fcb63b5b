//! §3 Data Model: Machine State (*μ*) and Execution Environment (*I*).
//!
//! The halting core reads these fields and never mutates them; the
//! surrounding interpreter owns mutation between steps.

use crate::fork::ForkConfig;
use crate::memory::Memory;
use crate::stack::Stack;
use bytes::Bytes;
use rustc_hash::FxHashSet;

/// *μ*: the machine state the classifier inspects at each step.
#[derive(Debug, Clone, Default)]
pub struct MachineState {
    pub pc: usize,
    pub stack: Stack,
    pub memory: Memory,
    pub gas: u64,
    /// Return data of the most recent sub-call, possibly empty.
    pub last_return_data: Bytes,
}

impl MachineState {
    #[must_use]
    pub fn new(gas: u64) -> Self {
        Self {
            pc: 0,
            stack: Stack::new(),
            memory: Memory::new(),
            gas,
            last_return_data: Bytes::new(),
        }
    }
}

/// *I*: the read-only execution environment for the current call frame.
#[derive(Debug, Clone)]
pub struct ExecutionEnvironment {
    pub code: Bytes,
    pub valid_jump_dests: FxHashSet<usize>,
    pub is_static: bool,
    pub config: ForkConfig,
}

impl ExecutionEnvironment {
    /// Builds an environment from bytecode, deriving and caching the
    /// jump-destination set once (§4.C); callers must not rescan per step.
    pub fn new(
        code: Bytes,
        is_static: bool,
        config: ForkConfig,
    ) -> Result<Self, crate::errors::InternalError> {
        let valid_jump_dests = crate::jump_dest::build_jump_dests(&code)?;
        Ok(Self {
            code,
            valid_jump_dests,
            is_static,
            config,
        })
    }

    /// Byte at `pc`, or `STOP` (`0x00`) if `pc` is past the end of code.
    /// Invariant 1 of §3: this is legal, not an error.
    #[must_use]
    pub fn opcode_byte_at(&self, pc: usize) -> u8 {
        self.code.get(pc).copied().unwrap_or(0x00)
    }
}
