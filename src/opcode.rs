//! Component A: the opcode metadata table.
//!
//! A total function from byte to optional [`OpcodeInfo`]. Unassigned bytes
//! map to `None`; the `INVALID` opcode (`0xFE`) is distinct from "unassigned"
//! and carries real metadata (see [`OpcodeInfo`] docs on `symbol`).

/// Closed enumeration of opcode symbols this crate understands.
///
/// This does not cover opcode *execution* (arithmetic, storage, calls);
/// only the shape the halting core needs: arity and state-mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(clippy::upper_case_acronyms)]
pub enum Symbol {
    Stop,
    Add,
    Mul,
    Sub,
    Div,
    Sdiv,
    Mod,
    Smod,
    Addmod,
    Mulmod,
    Exp,
    SignExtend,
    Lt,
    Gt,
    Slt,
    Sgt,
    Eq,
    IsZero,
    And,
    Or,
    Xor,
    Not,
    Byte,
    Shl,
    Shr,
    Sar,
    Keccak256,
    Address,
    Balance,
    Origin,
    Caller,
    CallValue,
    CallDataLoad,
    CallDataSize,
    CallDataCopy,
    CodeSize,
    CodeCopy,
    GasPrice,
    ExtCodeSize,
    ExtCodeCopy,
    ReturnDataSize,
    ReturnDataCopy,
    ExtCodeHash,
    BlockHash,
    Coinbase,
    Timestamp,
    Number,
    PrevRandao,
    GasLimit,
    ChainId,
    SelfBalance,
    BaseFee,
    BlobHash,
    BlobBaseFee,
    Pop,
    MLoad,
    MStore,
    MStore8,
    SLoad,
    SStore,
    Jump,
    Jumpi,
    Pc,
    MSize,
    Gas,
    JumpDest,
    TLoad,
    TStore,
    MCopy,
    Push0,
    Push(u8),
    Dup(u8),
    Swap(u8),
    Log(u8),
    Create,
    Call,
    CallCode,
    Return,
    DelegateCall,
    Create2,
    StaticCall,
    Revert,
    Invalid,
    SelfDestruct,
}

/// Metadata for one opcode: stack arity, immediate width, mutation flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeInfo {
    pub symbol: Symbol,
    /// δ: number of stack items this opcode consumes.
    pub input_count: usize,
    /// α: number of stack items this opcode produces.
    pub output_count: usize,
    /// Bytes of immediate data following this opcode (0 unless PUSH1..PUSH32).
    pub pushes_immediate_bytes: u8,
    /// Whether this opcode can mutate world state, ignoring the `CALL`
    /// value-dependent exception handled separately by the classifier.
    pub mutates_state: bool,
}

const fn info(
    symbol: Symbol,
    input_count: usize,
    output_count: usize,
    pushes_immediate_bytes: u8,
    mutates_state: bool,
) -> OpcodeInfo {
    OpcodeInfo {
        symbol,
        input_count,
        output_count,
        pushes_immediate_bytes,
        mutates_state,
    }
}

/// Maximum stack arity of any opcode (`CALL`: gas, addr, value, argsOffset,
/// argsSize, retOffset, retSize). Used to size the stack-probe buffer.
pub const MAX_ARITY: usize = 7;

/// Looks up the metadata for a raw opcode byte.
///
/// Returns `None` for unassigned bytes. This is the only place opcode
/// metadata is constructed; the fork gate (`crate::fork`) filters this
/// table's output, it never reimplements it.
#[must_use]
pub fn opcode_metadata(byte: u8) -> Option<OpcodeInfo> {
    use Symbol::*;
    Some(match byte {
        0x00 => info(Stop, 0, 0, 0, false),
        0x01 => info(Add, 2, 1, 0, false),
        0x02 => info(Mul, 2, 1, 0, false),
        0x03 => info(Sub, 2, 1, 0, false),
        0x04 => info(Div, 2, 1, 0, false),
        0x05 => info(Sdiv, 2, 1, 0, false),
        0x06 => info(Mod, 2, 1, 0, false),
        0x07 => info(Smod, 2, 1, 0, false),
        0x08 => info(Addmod, 3, 1, 0, false),
        0x09 => info(Mulmod, 3, 1, 0, false),
        0x0A => info(Exp, 2, 1, 0, false),
        0x0B => info(SignExtend, 2, 1, 0, false),

        0x10 => info(Lt, 2, 1, 0, false),
        0x11 => info(Gt, 2, 1, 0, false),
        0x12 => info(Slt, 2, 1, 0, false),
        0x13 => info(Sgt, 2, 1, 0, false),
        0x14 => info(Eq, 2, 1, 0, false),
        0x15 => info(IsZero, 1, 1, 0, false),
        0x16 => info(And, 2, 1, 0, false),
        0x17 => info(Or, 2, 1, 0, false),
        0x18 => info(Xor, 2, 1, 0, false),
        0x19 => info(Not, 1, 1, 0, false),
        0x1A => info(Byte, 2, 1, 0, false),
        0x1B => info(Shl, 2, 1, 0, false),
        0x1C => info(Shr, 2, 1, 0, false),
        0x1D => info(Sar, 2, 1, 0, false),

        0x20 => info(Keccak256, 2, 1, 0, false),

        0x30 => info(Address, 0, 1, 0, false),
        0x31 => info(Balance, 1, 1, 0, false),
        0x32 => info(Origin, 0, 1, 0, false),
        0x33 => info(Caller, 0, 1, 0, false),
        0x34 => info(CallValue, 0, 1, 0, false),
        0x35 => info(CallDataLoad, 1, 1, 0, false),
        0x36 => info(CallDataSize, 0, 1, 0, false),
        0x37 => info(CallDataCopy, 3, 0, 0, false),
        0x38 => info(CodeSize, 0, 1, 0, false),
        0x39 => info(CodeCopy, 3, 0, 0, false),
        0x3A => info(GasPrice, 0, 1, 0, false),
        0x3B => info(ExtCodeSize, 1, 1, 0, false),
        0x3C => info(ExtCodeCopy, 4, 0, 0, false),
        0x3D => info(ReturnDataSize, 0, 1, 0, false),
        0x3E => info(ReturnDataCopy, 3, 0, 0, false),
        0x3F => info(ExtCodeHash, 1, 1, 0, false),

        0x40 => info(BlockHash, 1, 1, 0, false),
        0x41 => info(Coinbase, 0, 1, 0, false),
        0x42 => info(Timestamp, 0, 1, 0, false),
        0x43 => info(Number, 0, 1, 0, false),
        0x44 => info(PrevRandao, 0, 1, 0, false),
        0x45 => info(GasLimit, 0, 1, 0, false),
        0x46 => info(ChainId, 0, 1, 0, false),
        0x47 => info(SelfBalance, 0, 1, 0, false),
        0x48 => info(BaseFee, 0, 1, 0, false),
        0x49 => info(BlobHash, 1, 1, 0, false),
        0x4A => info(BlobBaseFee, 0, 1, 0, false),

        0x50 => info(Pop, 1, 0, 0, false),
        0x51 => info(MLoad, 1, 1, 0, false),
        0x52 => info(MStore, 2, 0, 0, false),
        0x53 => info(MStore8, 2, 0, 0, false),
        0x54 => info(SLoad, 1, 1, 0, false),
        0x55 => info(SStore, 2, 0, 0, true),
        0x56 => info(Jump, 1, 0, 0, false),
        0x57 => info(Jumpi, 2, 0, 0, false),
        0x58 => info(Pc, 0, 1, 0, false),
        0x59 => info(MSize, 0, 1, 0, false),
        0x5A => info(Gas, 0, 1, 0, false),
        0x5B => info(JumpDest, 0, 0, 0, false),
        0x5C => info(TLoad, 1, 1, 0, false),
        0x5D => info(TStore, 2, 0, 0, false),
        0x5E => info(MCopy, 3, 0, 0, false),

        0x5F => info(Push0, 0, 1, 0, false),
        b @ 0x60..=0x7F => {
            let n = b.saturating_sub(0x5F);
            info(Push(n), 0, 1, n, false)
        }
        b @ 0x80..=0x8F => {
            let n = b.saturating_sub(0x7F);
            info(
                Dup(n),
                usize::from(n),
                usize::from(n).saturating_add(1),
                0,
                false,
            )
        }
        b @ 0x90..=0x9F => {
            let n = b.saturating_sub(0x8F);
            let arity = usize::from(n).saturating_add(1);
            info(Swap(n), arity, arity, 0, false)
        }
        b @ 0xA0..=0xA4 => {
            let n = b.saturating_sub(0xA0);
            info(Log(n), usize::from(n).saturating_add(2), 0, 0, true)
        }

        0xF0 => info(Create, 3, 1, 0, true),
        0xF1 => info(Call, 7, 1, 0, false),
        0xF2 => info(CallCode, 7, 1, 0, false),
        0xF3 => info(Return, 2, 0, 0, false),
        0xF4 => info(DelegateCall, 6, 1, 0, false),
        0xF5 => info(Create2, 4, 1, 0, true),
        0xFA => info(StaticCall, 6, 1, 0, false),
        0xFD => info(Revert, 2, 0, 0, false),
        0xFE => info(Invalid, 0, 0, 0, false),
        0xFF => info(SelfDestruct, 1, 0, 0, true),

        _ => return None,
    })
}
