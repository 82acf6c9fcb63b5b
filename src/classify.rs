//! Component E: the halt classifier, the Yellow Paper's *Z* predicate.
//!
//! `classify` runs the nine ordered checks of the core contract and reports
//! either `Continue` (with the opcode's gas cost) or `Halt(reason)`. Order is
//! normative: a stack underflow must be reported even on a fork where the
//! opcode would also be undefined, and the gas gate is never consulted once
//! an earlier check has already failed.

use crate::errors::HaltReason;
use crate::fork::fork_enabled;
use crate::gas::{CostOracle, GasReport};
use crate::machine::{ExecutionEnvironment, MachineState};
use crate::opcode::{opcode_metadata, OpcodeInfo, Symbol};
use crate::stack::{probe, MAX_ARITY};
use bytes::Bytes;
use ethereum_types::U256;

/// Result of running the nine-step classification on one opcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyOutcome {
    /// The opcode is safe to execute; this is its gas cost.
    Continue(GasReport),
    Halt(HaltReason),
}

/// The non-faulting halts: `RETURN`, `REVERT`, `STOP`, `SELFDESTRUCT`.
///
/// Distinct from [`HaltReason`]: these end the frame by design, not by fault,
/// and the classifier never reports them through `ClassifyOutcome::Halt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalHalt {
    Return(Bytes),
    Revert(Bytes),
    Stop,
    SelfDestruct,
}

/// Looks up an opcode's metadata through both the table (A) and the fork
/// gate (B) in one step, the combination the classifier calls `m` in §4.E.
#[must_use]
pub fn resolve_opcode(byte: u8, config: crate::fork::ForkConfig) -> Option<OpcodeInfo> {
    opcode_metadata(byte).and_then(|info| fork_enabled(info, config))
}

/// Runs the nine-step classification algorithm for the opcode at `machine.pc`.
pub fn classify<O: CostOracle>(
    machine: &MachineState,
    env: &ExecutionEnvironment,
    oracle: &O,
) -> ClassifyOutcome {
    let byte = env.opcode_byte_at(machine.pc);
    tracing::trace!(pc = machine.pc, byte, "classifying opcode");

    // Steps 2-3: INVALID wins over undefined even though it can never
    // actually be fork-gated off; table lookup happens before the gate so a
    // gated-off opcode and an unassigned byte are both `none` by step 3.
    let raw = opcode_metadata(byte);
    if let Some(raw_info) = raw {
        if raw_info.symbol == Symbol::Invalid {
            return halt(HaltReason::InvalidInstruction, machine.pc);
        }
    }
    let Some(info) = raw.and_then(|i| fork_enabled(i, env.config)) else {
        return halt(HaltReason::UndefinedInstruction, machine.pc);
    };

    // Step 4: stack underflow.
    let delta = info.input_count;
    if machine.stack.len() < delta {
        return halt(HaltReason::StackUnderflow, machine.pc);
    }

    // Step 5: stack overflow.
    let alpha = info.output_count;
    #[allow(clippy::unwrap_used)]
    let depth_after = machine.stack.len().checked_sub(delta).unwrap();
    let depth_after = depth_after.saturating_add(alpha);
    if depth_after > crate::constants::MAX_STACK_DEPTH {
        return halt(HaltReason::StackOverflow, machine.pc);
    }

    // Step 6: jump-destination validation.
    debug_assert!(delta <= MAX_ARITY, "opcode arity exceeds MAX_ARITY");
    #[allow(clippy::unwrap_used)]
    let inputs = probe(&machine.stack, delta).unwrap();

    match info.symbol {
        Symbol::Jump => {
            let target = inputs.get(0).unwrap_or_default();
            if !is_valid_jump_target(target, env) {
                return halt(HaltReason::InvalidJumpDestination, machine.pc);
            }
        }
        Symbol::Jumpi => {
            let target = inputs.get(0).unwrap_or_default();
            let condition = inputs.get(1).unwrap_or_default();
            if !condition.is_zero() && !is_valid_jump_target(target, env) {
                return halt(HaltReason::InvalidJumpDestination, machine.pc);
            }
        }
        _ => {}
    }

    // Step 7: static-frame state-mutation check.
    if env.is_static && mutates_state_in_context(info, &inputs) {
        return halt(HaltReason::StaticStateModification, machine.pc);
    }

    // Step 8: RETURNDATACOPY bounds check.
    if info.symbol == Symbol::ReturnDataCopy {
        let return_data_start = inputs.get(1).unwrap_or_default();
        let size = inputs.get(2).unwrap_or_default();
        let available = U256::from(machine.last_return_data.len());
        let within_bounds = return_data_start
            .checked_add(size)
            .is_some_and(|end| end <= available);
        if !within_bounds {
            return halt(HaltReason::OutOfMemoryBounds, machine.pc);
        }
    }

    // Step 9: the gas gate.
    let report = oracle.cost_of(info, &inputs, machine, env);
    if report.cost() > machine.gas {
        return halt(HaltReason::OutOfGas, machine.pc);
    }

    tracing::trace!(pc = machine.pc, cost = report.cost(), "continuing");
    ClassifyOutcome::Continue(report)
}

fn halt(reason: HaltReason, pc: usize) -> ClassifyOutcome {
    tracing::debug!(pc, reason = %reason, "halting");
    ClassifyOutcome::Halt(reason)
}

fn is_valid_jump_target(target: U256, env: &ExecutionEnvironment) -> bool {
    usize::try_from(target)
        .ok()
        .is_some_and(|t| env.valid_jump_dests.contains(&t))
}

/// The static-mutation table of §4.E, including `CALL`'s value-dependent
/// exception: a zero-value `CALL` is permitted in a static frame.
fn mutates_state_in_context(info: OpcodeInfo, inputs: &crate::stack::ProbedInputs) -> bool {
    match info.symbol {
        Symbol::Call => {
            let value = inputs.get(2).unwrap_or_default();
            !value.is_zero()
        }
        _ => info.mutates_state,
    }
}

/// The *H* function's frame-ending counterpart: whether this opcode ends the
/// frame normally (not a fault), and with what payload. Callers invoke this
/// only after `classify` has returned `Continue` for the same opcode.
#[must_use]
pub fn normal_halt(info: OpcodeInfo, machine: &MachineState) -> Option<NormalHalt> {
    match info.symbol {
        Symbol::Return => {
            let inputs = probe(&machine.stack, info.input_count)?;
            Some(NormalHalt::Return(crate::return_data::extract_return_data(
                machine, &inputs,
            )))
        }
        Symbol::Revert => {
            let inputs = probe(&machine.stack, info.input_count)?;
            Some(NormalHalt::Revert(crate::return_data::extract_return_data(
                machine, &inputs,
            )))
        }
        Symbol::Stop => Some(NormalHalt::Stop),
        Symbol::SelfDestruct => Some(NormalHalt::SelfDestruct),
        _ => None,
    }
}
