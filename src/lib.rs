//! Halting-condition analysis for EVM bytecode.
//!
//! This crate implements the Yellow Paper's exceptional-halt predicate *Z*
//! and its normal-halt counterpart *H*: given one step of machine state and
//! an execution environment, decide whether the next opcode may execute, and
//! if it halts the frame, why. It does not execute opcodes: arithmetic,
//! storage, and call semantics are the surrounding interpreter's job.
//!
//! The entry point is [`classify::classify`]; [`classify::normal_halt`]
//! covers the separate question of whether a successfully-classified opcode
//! ends the frame by design (`RETURN`/`REVERT`/`STOP`/`SELFDESTRUCT`).

pub mod classify;
pub mod constants;
pub mod errors;
pub mod fork;
pub mod gas;
pub mod jump_dest;
pub mod machine;
pub mod memory;
pub mod opcode;
pub mod return_data;
pub mod stack;

pub use classify::{classify, normal_halt, ClassifyOutcome, NormalHalt};
pub use errors::{HaltReason, InternalError};
pub use fork::ForkConfig;
pub use gas::{CostOracle, GasReport, StandardCostOracle};
pub use machine::{ExecutionEnvironment, MachineState};
pub use opcode::{opcode_metadata, OpcodeInfo, Symbol};
