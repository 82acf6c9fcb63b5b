//! A toy stepping loop that wires the halting core into something runnable.
//!
//! This is a demonstration of the `classify`/`normal_halt` contract, not a
//! production interpreter: it walks the supplied bytecode linearly (it never
//! executes an opcode's actual effect, so `JUMP`/`JUMPI` never actually
//! redirect `pc`) and prints, at every position, whether the halting core
//! would let that step proceed and for how much gas. Real execution
//! (arithmetic, storage, calls, memory writes) stays the surrounding
//! interpreter's job, exactly as in the library this binary links against.

use clap::Parser;
use ethereum_types::U256;
use evm_halt_core::{
    classify, normal_halt, ClassifyOutcome, ExecutionEnvironment, ForkConfig, MachineState,
    StandardCostOracle,
};
use std::process::ExitCode;

/// Step through EVM bytecode printing the halting core's decision at each pc.
#[derive(Debug, Parser)]
struct Args {
    /// Hex-encoded bytecode, with or without a leading "0x".
    code: String,

    /// Starting gas.
    #[arg(long, default_value_t = 1_000_000)]
    gas: u64,

    /// Run in a static (non-mutating) call frame.
    #[arg(long)]
    r#static: bool,

    /// Fork preset: frontier, homestead, byzantium, constantinople, london,
    /// cancun, or all (every gated opcode enabled).
    #[arg(long, default_value = "all")]
    fork: String,

    /// Number of placeholder zero words to pre-fill the stack with, so
    /// opcodes with nonzero arity don't trivially underflow. This is the
    /// demo's stand-in for real stack contents; it is not execution.
    #[arg(long, default_value_t = 8)]
    stack_depth: usize,
}

fn fork_config(name: &str) -> Option<ForkConfig> {
    match name {
        "frontier" => Some(ForkConfig::frontier()),
        "homestead" => Some(ForkConfig::homestead()),
        "byzantium" => Some(ForkConfig::byzantium()),
        "constantinople" => Some(ForkConfig::constantinople()),
        "london" => Some(ForkConfig::london()),
        "cancun" => Some(ForkConfig::cancun()),
        "all" => Some(ForkConfig::all_enabled()),
        _ => None,
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let Some(config) = fork_config(&args.fork) else {
        eprintln!(
            "unknown fork preset {:?}; expected one of frontier/homestead/byzantium/constantinople/london/cancun/all",
            args.fork
        );
        return ExitCode::FAILURE;
    };

    let trimmed = args.code.strip_prefix("0x").unwrap_or(&args.code);
    let code = match hex::decode(trimmed) {
        Ok(bytes) => bytes,
        Err(err) => {
            eprintln!("invalid hex bytecode: {err}");
            return ExitCode::FAILURE;
        }
    };

    let env = match ExecutionEnvironment::new(code.clone().into(), args.r#static, config) {
        Ok(env) => env,
        Err(err) => {
            eprintln!("failed to build execution environment: {err}");
            return ExitCode::FAILURE;
        }
    };

    let mut machine = MachineState::new(args.gas);
    for _ in 0..args.stack_depth {
        if machine.stack.push(U256::zero()).is_err() {
            break;
        }
    }

    let oracle = StandardCostOracle::new();
    let mut pc = 0usize;

    while pc < code.len() {
        machine.pc = pc;
        match classify(&machine, &env, &oracle) {
            ClassifyOutcome::Halt(reason) => {
                println!("pc={pc:<5} halt: {reason}");
                return ExitCode::SUCCESS;
            }
            ClassifyOutcome::Continue(report) => {
                let cost = report.cost();
                machine.gas = machine.gas.saturating_sub(cost);
                let byte = code.get(pc).copied().unwrap_or(0x00);
                let Some(info) = evm_halt_core::classify::resolve_opcode(byte, config) else {
                    println!("pc={pc:<5} continue: cost={cost}");
                    break;
                };
                println!(
                    "pc={pc:<5} continue: opcode={:?} cost={cost} gas_remaining={}",
                    info.symbol, machine.gas
                );
                if let Some(halt) = normal_halt(info, &machine) {
                    println!("pc={pc:<5} frame ends: {halt:?}");
                    return ExitCode::SUCCESS;
                }
                pc = pc
                    .saturating_add(1)
                    .saturating_add(usize::from(info.pushes_immediate_bytes));
            }
        }
    }

    println!("pc={pc:<5} ran off the end of code (implicit STOP)");
    ExitCode::SUCCESS
}
