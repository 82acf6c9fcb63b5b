//! Error taxonomy for the halting core.
//!
//! [`HaltReason`] is data, not a thrown error: the classifier always returns
//! it as part of [`crate::classify::ClassifyOutcome`], never via `Result::Err`.
//! [`InternalError`] is reserved for conditions the spec's invariants rule out
//! by construction (a caller-side contract violation), and is the only thing
//! in this crate propagated with `?`.

use thiserror::Error;

/// The closed set of exceptional halts the classifier can report.
///
/// This is the Yellow Paper's *Z* predicate's range, minus `Continue`. Every
/// variant here ends the current call frame; none of them are retryable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HaltReason {
    /// The fetched opcode is the explicit `INVALID` (`0xFE`).
    InvalidInstruction,
    /// The fetched byte has no assigned opcode, or the opcode is fork-gated
    /// off for the active [`crate::fork::ForkConfig`].
    UndefinedInstruction,
    /// Fewer stack items are present than the opcode's input arity.
    StackUnderflow,
    /// Executing the opcode would push the stack past 1024 items.
    StackOverflow,
    /// `JUMP`/`JUMPI` targets a position outside `valid_jump_dests`.
    InvalidJumpDestination,
    /// A state-mutating opcode was attempted inside a static call frame.
    StaticStateModification,
    /// `RETURNDATACOPY` would read past the end of `last_return_data`.
    OutOfMemoryBounds,
    /// The gas cost of the opcode exceeds the machine's remaining gas.
    OutOfGas,
}

impl HaltReason {
    /// Short machine-stable name, handy for logging and test assertions.
    pub const fn name(self) -> &'static str {
        match self {
            HaltReason::InvalidInstruction => "invalid_instruction",
            HaltReason::UndefinedInstruction => "undefined_instruction",
            HaltReason::StackUnderflow => "stack_underflow",
            HaltReason::StackOverflow => "stack_overflow",
            HaltReason::InvalidJumpDestination => "invalid_jump_destination",
            HaltReason::StaticStateModification => "static_state_modification",
            HaltReason::OutOfMemoryBounds => "out_of_memory_bounds",
            HaltReason::OutOfGas => "out_of_gas",
        }
    }
}

impl std::fmt::Display for HaltReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A violation of this crate's own invariants: a bug in the caller or in a
/// collaborator, never a property of the bytecode under analysis.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InternalError {
    #[error("program counter arithmetic overflowed while scanning bytecode")]
    ProgramCounterOverflow,
    #[error("arithmetic overflow computing a bounds check")]
    ArithmeticOverflow,
}
