//! # NMACH Runtime
//!
//! Execute instructions of the nondeterministic machine.
//!
//! Memory is a ring of bytes seeded with random values. Every step picks a
//! random entry address, reads the four bytes there as an instruction and
//! writes one result byte. No byte is code or data by itself; it depends only
//! on where the next instruction happens to start.
//!
//! ## Features
//!
//! - **Total addressing**: every `i64` address folds into the buffer
//! - **Single write per step**: exactly one destination cell per instruction
//! - **Bounded driver**: step budget and cancellation flag instead of an endless loop
//! - **Dumps**: hex view of memory with optional blank zeros and nonzero count
//!
//! ## Example
//!
//! ```rust,no_run
//! use nmach_runtime::{Machine, MachineConfig};
//!
//! let config = MachineConfig {
//!     max_steps: Some(10_000),
//!     seed: Some(1),
//!     ..MachineConfig::default()
//! };
//! let result = Machine::new(config).unwrap().run().unwrap();
//! println!("steps: {}, nonzero: {}", result.steps, result.nonzero);
//! ```

pub mod error;
pub mod state;
pub mod memory;
pub mod execute;
pub mod trace;
pub mod machine;
pub mod dump;

pub use state::{MachineState, HaltReason};
pub use memory::Memory;
pub use execute::{decode, execute, ResolvedInstruction};
pub use trace::StepRecord;
pub use machine::{Machine, MachineConfig, ExecutionResult, StepObserver, NoObserver};
pub use dump::{DumpStyle, MemoryDump};
pub use error::RuntimeError;

/// Simple execution helper
///
/// Runs a seeded machine of the canonical size for `steps` steps and returns
/// the final memory.
pub fn run(seed: u64, steps: u64) -> Result<Memory, RuntimeError> {
    let config = MachineConfig {
        seed: Some(seed),
        ..MachineConfig::default()
    };
    let mut machine = Machine::new(config)?;
    for _ in 0..steps {
        machine.step();
    }
    Ok(machine.into_memory())
}
