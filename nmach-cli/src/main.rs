//! `nmach` - run or inspect the nondeterministic byte machine

use std::io::{self, BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use nmach_disassembler::disassemble;
use nmach_runtime::{
    DumpStyle, ExecutionResult, HaltReason, Machine, MachineConfig, Memory, MemoryDump,
    RuntimeError,
};
use nmach_spec::{Address, Config, Displacement, DEFAULT_MEMORY_SIZE};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "nmach")]
#[command(about = "Nondeterministic byte machine over a circular memory", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Execute instructions at random entry addresses, dumping memory as it evolves
    Run(RunArgs),
    /// List the instructions seen from consecutive entry addresses
    Disasm(DisasmArgs),
}

/// Options shared by every subcommand that builds a memory image
#[derive(Args, Debug)]
struct MemoryArgs {
    /// Memory size in bytes
    #[arg(long, default_value_t = DEFAULT_MEMORY_SIZE)]
    size: usize,

    /// Seed for memory contents and entry addresses (OS entropy when absent)
    #[arg(long)]
    seed: Option<u64>,

    /// Treat every operand as relative, ignoring opcode bits 7, 6 and 5
    #[arg(long, action = ArgAction::SetTrue)]
    relative_only: bool,

    /// Select the operation from the low two opcode bits
    #[arg(long, action = ArgAction::SetTrue)]
    decode_opcodes: bool,

    /// Read operand displacements as 0..=255 instead of -128..=127
    #[arg(long, action = ArgAction::SetTrue)]
    unsigned_displacement: bool,
}

impl MemoryArgs {
    fn spec_config(&self) -> Result<Config> {
        let mut config = Config::with_memory_size(self.size)?;
        config.absolute_addressing = !self.relative_only;
        config.decode_opcodes = self.decode_opcodes;
        if self.unsigned_displacement {
            config.displacement = Displacement::Unsigned;
        }
        Ok(config)
    }
}

#[derive(Args, Debug)]
struct RunArgs {
    #[command(flatten)]
    memory: MemoryArgs,

    /// Number of instructions to execute
    #[arg(long, default_value_t = 1_000)]
    steps: u64,

    /// Ignore --steps and run until interrupted
    #[arg(long, action = ArgAction::SetTrue)]
    unbounded: bool,

    /// Dump memory before every Nth step (0 disables dumps)
    #[arg(long, default_value_t = 1)]
    dump_every: u64,

    /// Print zero bytes as `00` instead of blanks
    #[arg(long, action = ArgAction::SetTrue)]
    show_zeros: bool,

    /// Only print the final summary
    #[arg(long, action = ArgAction::SetTrue)]
    quiet: bool,
}

impl RunArgs {
    fn machine_config(&self) -> Result<MachineConfig> {
        Ok(MachineConfig {
            spec: self.memory.spec_config()?,
            max_steps: (!self.unbounded).then_some(self.steps),
            seed: self.memory.seed,
            enable_execution_trace: false,
        })
    }

    fn dump_style(&self) -> DumpStyle {
        DumpStyle {
            blank_zeros: !self.show_zeros,
            ..DumpStyle::default()
        }
    }
}

#[derive(Args, Debug)]
struct DisasmArgs {
    #[command(flatten)]
    memory: MemoryArgs,

    /// First entry address (any integer, folded into the buffer)
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    start: Address,

    /// Number of consecutive entry addresses to list
    #[arg(long, default_value_t = 32)]
    count: usize,
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    match cli.command {
        Command::Run(args) => {
            let cancel = Arc::new(AtomicBool::new(false));
            let handler_flag = Arc::clone(&cancel);
            ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed))
                .context("failed to install Ctrl-C handler")?;
            run_and_report(&args, &mut out, cancel)?;
        }
        Command::Disasm(args) => disasm(&args, &mut out)?,
    }

    out.flush().context("failed to flush stdout")?;
    Ok(())
}

/// Log to stderr so dumps on stdout stay clean
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Run, then print the summary; Ctrl-C ends the run through `cancel`
fn run_and_report<W: Write>(args: &RunArgs, out: &mut W, cancel: Arc<AtomicBool>) -> Result<()> {
    let result = run(args, out, cancel)?;
    writeln!(out, "{}", summary(&result))?;
    out.flush().context("failed to flush stdout")?;
    Ok(())
}

fn run<W: Write>(args: &RunArgs, out: &mut W, cancel: Arc<AtomicBool>) -> Result<ExecutionResult> {
    let config = args.machine_config()?;
    let style = args.dump_style();
    let dumping = !args.quiet && args.dump_every > 0;

    let machine = Machine::new(config)
        .context("failed to initialize machine")?
        .with_cancel_handle(cancel);
    tracing::info!(config = %machine.config().spec, "running");

    // Each dump is flushed whole so an interrupt never cuts one short
    let mut observer = |step: u64, memory: &Memory| -> Result<(), RuntimeError> {
        if dumping && step % args.dump_every == 0 {
            write!(out, "{}", MemoryDump::new(memory, style)?)?;
            out.flush()?;
        }
        Ok(())
    };
    let result = machine.run_with(&mut observer)?;

    tracing::info!(steps = result.steps, nonzero = result.nonzero, "finished");
    Ok(result)
}

fn summary(result: &ExecutionResult) -> String {
    let reason = match result.halt_reason {
        HaltReason::StepLimit => "step limit",
        HaltReason::Cancelled => "cancelled",
    };
    format!(
        "steps = {}, nnz = {}, halted: {}",
        result.steps, result.nonzero, reason
    )
}

fn disasm<W: Write>(args: &DisasmArgs, out: &mut W) -> Result<()> {
    let spec = args.memory.spec_config()?;
    let config = MachineConfig {
        spec,
        max_steps: Some(0),
        seed: args.memory.seed,
        enable_execution_trace: false,
    };
    let machine = Machine::new(config).context("failed to initialize machine")?;
    let listing = disassemble(machine.memory(), args.start, args.count, &spec);
    out.write_all(listing.as_bytes())?;
    Ok(())
}
