//! Component G: the gas gate.
//!
//! Prices one opcode given the probed inputs and current memory size, and
//! reports whether the machine's remaining gas covers it. The constants below
//! are the static and dynamic base costs from the Yellow Paper's fee schedule
//! as the teacher's `gas_cost` module names them; dynamic terms that depend on
//! call/create semantics outside this crate's scope (EIP-2929 access lists,
//! call stipends, refunds) are intentionally flattened to their pre-2929 base
//! cost; see `StandardCostOracle`'s docs and §1 of the design notes.

use crate::machine::{ExecutionEnvironment, MachineState};
use crate::opcode::{OpcodeInfo, Symbol};
use crate::stack::ProbedInputs;
use ethereum_types::U256;

const ZERO: u64 = 0;
const BASE: u64 = 2;
const VERY_LOW: u64 = 3;
const LOW: u64 = 5;
const MID: u64 = 8;
const HIGH: u64 = 10;
const JUMPDEST_COST: u64 = 1;

const KECCAK256_STATIC: u64 = 30;
const KECCAK256_WORD: u64 = 6;
const COPY_STATIC: u64 = 3;
const COPY_WORD: u64 = 3;
const LOG_STATIC: u64 = 375;
const LOG_TOPIC: u64 = 375;
const LOG_BYTE: u64 = 8;
const EXP_STATIC: u64 = 10;
const EXP_BYTE: u64 = 50;
const BLOCKHASH_COST: u64 = 20;
const SELFBALANCE_COST: u64 = 5;
const SLOAD_COST: u64 = 100;
const SSTORE_COST: u64 = 100;
const TSTORE_COST: u64 = 100;
const TLOAD_COST: u64 = 100;
const CREATE_COST: u64 = 32_000;
const SELFDESTRUCT_COST: u64 = 5_000;
const CALL_BASE_COST: u64 = 100;
const WORD_SIZE: usize = crate::constants::WORD_SIZE;

/// Breakdown of how an opcode's cost was computed, for logging and tests.
/// `Original` means the static base cost with no dynamic term; `Changed`
/// carries a short, human-readable note about what dynamic term applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GasReport {
    Original(u64),
    Changed(u64, &'static str),
}

impl GasReport {
    #[must_use]
    pub fn cost(&self) -> u64 {
        match *self {
            GasReport::Original(c) | GasReport::Changed(c, _) => c,
        }
    }
}

/// Pricing policy for opcodes, parameterized so alternate fee schedules can
/// be plugged in without touching [`crate::classify::classify`].
pub trait CostOracle {
    /// Computes the cost of executing `info` given the probed stack inputs
    /// and current machine/environment state. Must not mutate `machine`.
    fn cost_of(
        &self,
        info: OpcodeInfo,
        inputs: &ProbedInputs,
        machine: &MachineState,
        env: &ExecutionEnvironment,
    ) -> GasReport;
}

/// The fee schedule the teacher's interpreter charges, minus EIP-2929
/// warm/cold access metering, call stipends, gas forwarding (63/64ths rule),
/// and storage-refund accounting; all out of scope for a halting-condition
/// analyzer (see §1's Non-goals). Address- and storage-touching opcodes are
/// charged a flat warm-equivalent cost instead of a cold/warm split.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCostOracle;

impl StandardCostOracle {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    fn memory_expansion(machine: &MachineState, offset: U256, size: U256) -> u64 {
        if size.is_zero() {
            return 0;
        }
        let (Ok(offset), Ok(size)) = (usize::try_from(offset), usize::try_from(size)) else {
            return 0;
        };
        let Some(end) = offset.checked_add(size) else {
            return 0;
        };
        machine.memory.expansion_cost(end)
    }

    fn word_count(size: U256) -> u64 {
        let Ok(size) = usize::try_from(size) else {
            return u64::MAX;
        };
        u64::try_from(size.div_ceil(WORD_SIZE)).unwrap_or(u64::MAX)
    }

    fn copy_word_cost(size: U256) -> u64 {
        Self::word_count(size).saturating_mul(COPY_WORD)
    }

    fn exp_dynamic_cost(exponent: U256) -> u64 {
        let exponent_byte_size =
            u64::try_from(exponent.bits().div_ceil(8)).unwrap_or(u64::MAX);
        exponent_byte_size.saturating_mul(EXP_BYTE)
    }
}

impl CostOracle for StandardCostOracle {
    fn cost_of(
        &self,
        info: OpcodeInfo,
        inputs: &ProbedInputs,
        machine: &MachineState,
        _env: &ExecutionEnvironment,
    ) -> GasReport {
        use Symbol::*;

        let get = |i: usize| inputs.get(i).unwrap_or_default();

        match info.symbol {
            Stop | Return | Revert | Invalid => GasReport::Original(ZERO),

            Add | Sub | Lt | Gt | Slt | Sgt | Eq | IsZero | And | Or | Xor | Not | Byte | Shl
            | Shr | Sar | Push0 | Push(_) | Pop => GasReport::Original(VERY_LOW),

            Mul | Div | Sdiv | Mod | Smod | SignExtend => GasReport::Original(LOW),

            Addmod | Mulmod | Jump => GasReport::Original(MID),

            Jumpi => GasReport::Original(HIGH),

            JumpDest => GasReport::Original(JUMPDEST_COST),

            Dup(_) | Swap(_) => GasReport::Original(VERY_LOW),

            Address | Origin | Caller | CallValue | CallDataSize | CodeSize | GasPrice
            | Coinbase | Timestamp | Number | PrevRandao | GasLimit | ChainId | BaseFee
            | BlobBaseFee | Pc | MSize | Gas => GasReport::Original(BASE),

            CallDataLoad => GasReport::Original(VERY_LOW),

            Balance | ExtCodeSize | ExtCodeHash | SLoad => {
                GasReport::Changed(SLOAD_COST, "flat warm-equivalent access cost")
            }

            SStore => GasReport::Changed(SSTORE_COST, "flat warm-equivalent write cost"),
            TLoad => GasReport::Original(TLOAD_COST),
            TStore => GasReport::Original(TSTORE_COST),

            BlockHash => GasReport::Original(BLOCKHASH_COST),
            SelfBalance => GasReport::Original(SELFBALANCE_COST),
            BlobHash => GasReport::Original(VERY_LOW),

            Exp => {
                let dynamic = Self::exp_dynamic_cost(get(1));
                let total = EXP_STATIC.saturating_add(dynamic);
                if dynamic == 0 {
                    GasReport::Original(total)
                } else {
                    GasReport::Changed(total, "exponent byte-size dynamic term")
                }
            }

            Keccak256 => {
                let offset = get(0);
                let size = get(1);
                let expansion = Self::memory_expansion(machine, offset, size);
                let word_cost = Self::word_count(size).saturating_mul(KECCAK256_WORD);
                let total = KECCAK256_STATIC
                    .saturating_add(word_cost)
                    .saturating_add(expansion);
                GasReport::Changed(total, "hashed-range dynamic term + memory expansion")
            }

            MLoad => {
                let expansion = Self::memory_expansion(machine, get(0), U256::from(WORD_SIZE));
                cost_with_expansion(VERY_LOW, expansion)
            }
            MStore | MStore8 => {
                let width = if matches!(info.symbol, MStore8) {
                    U256::one()
                } else {
                    U256::from(WORD_SIZE)
                };
                let expansion = Self::memory_expansion(machine, get(0), width);
                cost_with_expansion(VERY_LOW, expansion)
            }

            CallDataCopy | CodeCopy | ReturnDataCopy => {
                let dest_offset = get(0);
                let size = get(2);
                let expansion = Self::memory_expansion(machine, dest_offset, size);
                let word_cost = Self::copy_word_cost(size);
                let total = COPY_STATIC
                    .saturating_add(word_cost)
                    .saturating_add(expansion);
                GasReport::Changed(total, "copy-size dynamic term + memory expansion")
            }

            ExtCodeCopy => {
                let dest_offset = get(1);
                let size = get(3);
                let expansion = Self::memory_expansion(machine, dest_offset, size);
                let word_cost = Self::copy_word_cost(size);
                let total = CALL_BASE_COST
                    .saturating_add(word_cost)
                    .saturating_add(expansion);
                GasReport::Changed(total, "flat access cost + copy-size term + memory expansion")
            }

            MCopy => {
                let dest_offset = get(0);
                let src_offset = get(1);
                let size = get(2);
                let dest_expansion = Self::memory_expansion(machine, dest_offset, size);
                let src_expansion = Self::memory_expansion(machine, src_offset, size);
                let expansion = dest_expansion.max(src_expansion);
                let word_cost = Self::copy_word_cost(size);
                let total = COPY_STATIC
                    .saturating_add(word_cost)
                    .saturating_add(expansion);
                GasReport::Changed(total, "copy-size dynamic term + memory expansion")
            }

            ReturnDataSize => GasReport::Original(BASE),

            Log(n) => {
                let offset = get(0);
                let size = get(1);
                let expansion = Self::memory_expansion(machine, offset, size);
                let byte_len = u64::try_from(size).unwrap_or(u64::MAX);
                let byte_cost = byte_len.saturating_mul(LOG_BYTE);
                let topic_cost = LOG_TOPIC.saturating_mul(u64::from(n));
                let total = LOG_STATIC
                    .saturating_add(topic_cost)
                    .saturating_add(byte_cost)
                    .saturating_add(expansion);
                GasReport::Changed(total, "topic count + byte length + memory expansion")
            }

            Create => GasReport::Changed(CREATE_COST, "flat init-code cost, no hashing term"),
            Create2 => GasReport::Changed(
                CREATE_COST,
                "flat init-code cost, no hashing or salt term",
            ),

            Call | CallCode | DelegateCall | StaticCall => GasReport::Changed(
                CALL_BASE_COST,
                "flat access cost, no stipend or 63/64ths forwarding",
            ),

            SelfDestruct => {
                GasReport::Changed(SELFDESTRUCT_COST, "flat cost, no new-account surcharge")
            }
        }
    }
}

fn cost_with_expansion(static_cost: u64, expansion: u64) -> GasReport {
    if expansion == ZERO {
        GasReport::Original(static_cost)
    } else {
        GasReport::Changed(static_cost.saturating_add(expansion), "memory expansion")
    }
}
