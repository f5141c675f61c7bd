//! Nondeterministic machine driver
//!
//! Owns the memory and the random source. Each step draws an entry address
//! and executes one instruction there. The reference machine loops forever;
//! here the loop ends on a step budget or when the cancellation flag is set.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use nmach_spec::{Address, Config, NmachError, ENTRY_RANGE};

use crate::error::Result;
use crate::execute::execute;
use crate::memory::Memory;
use crate::state::{HaltReason, MachineState};
use crate::trace::StepRecord;

/// Machine configuration
#[derive(Debug, Clone)]
pub struct MachineConfig {
    /// Instruction interpretation settings
    pub spec: Config,

    /// Maximum number of steps before halting (`None` runs until cancelled)
    pub max_steps: Option<u64>,

    /// Seed for memory initialization and entry selection (`None` seeds from the OS)
    pub seed: Option<u64>,

    /// Enable execution trace collection
    pub enable_execution_trace: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            spec: Config::DEFAULT,
            max_steps: Some(1_000_000),
            seed: None,
            enable_execution_trace: false,
        }
    }
}

/// Execution result
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    /// Number of steps executed
    pub steps: u64,

    /// Reason for halting
    pub halt_reason: HaltReason,

    /// Non-zero cells when the machine halted
    pub nonzero: usize,

    /// Execution trace (if execution tracing enabled), one record per step
    pub execution_trace: Vec<StepRecord>,
}

impl ExecutionResult {
    /// Steps whose write changed a cell
    pub fn mutation_count(&self) -> usize {
        self.execution_trace.iter().filter(|r| r.mutated()).count()
    }
}

/// Hook called before every step with the step number and current memory
pub trait StepObserver {
    fn before_step(&mut self, step: u64, memory: &Memory) -> Result<()>;
}

impl<F> StepObserver for F
where
    F: FnMut(u64, &Memory) -> Result<()>,
{
    fn before_step(&mut self, step: u64, memory: &Memory) -> Result<()> {
        self(step, memory)
    }
}

/// Observer that does nothing
pub struct NoObserver;

impl StepObserver for NoObserver {
    fn before_step(&mut self, _step: u64, _memory: &Memory) -> Result<()> {
        Ok(())
    }
}

/// Nondeterministic Machine
pub struct Machine {
    /// Driver state (step count, halt flag)
    state: MachineState,

    /// Memory subsystem
    memory: Memory,

    /// Source of initial memory and entry addresses
    rng: StdRng,

    /// Configuration
    config: MachineConfig,

    /// Set from any thread to stop between steps
    cancel: Arc<AtomicBool>,

    /// Execution trace (if enabled)
    execution_trace: Vec<StepRecord>,
}

impl Machine {
    /// Create a machine with randomly initialized memory
    pub fn new(config: MachineConfig) -> Result<Self> {
        config.spec.validate()?;
        let mut rng = seeded_rng(config.seed);
        let memory = Memory::random(config.spec.memory_size, &mut rng)?;
        Ok(Self::assemble(memory, rng, config))
    }

    /// Create a machine over an existing memory image
    pub fn with_memory(memory: Memory, config: MachineConfig) -> Result<Self> {
        if memory.len() != config.spec.memory_size {
            return Err(NmachError::ImageSizeMismatch {
                expected: config.spec.memory_size,
                found: memory.len(),
            }
            .into());
        }
        let rng = seeded_rng(config.seed);
        Ok(Self::assemble(memory, rng, config))
    }

    fn assemble(memory: Memory, rng: StdRng, config: MachineConfig) -> Self {
        tracing::debug!(
            memory_size = memory.len(),
            nonzero = memory.nonzero_count(),
            seed = ?config.seed,
            max_steps = ?config.max_steps,
            "machine initialized"
        );
        Self {
            state: MachineState::new(),
            memory,
            rng,
            config,
            cancel: Arc::new(AtomicBool::new(false)),
            execution_trace: Vec::new(),
        }
    }

    /// Replace the cancellation flag with one the caller already shares,
    /// e.g. with a signal handler installed before the machine existed
    pub fn with_cancel_handle(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Shared flag that stops `run` before the next step once set
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Draw the next entry address, unreduced
    pub fn next_entry(&mut self) -> Address {
        self.rng.gen_range(0..ENTRY_RANGE)
    }

    /// Execute one instruction at a random entry address
    pub fn step(&mut self) -> StepRecord {
        let entry = self.next_entry();
        self.step_at(entry)
    }

    /// Execute one instruction at `entry`
    pub fn step_at(&mut self, entry: Address) -> StepRecord {
        let record = execute(&mut self.memory, entry, &self.config.spec);
        if self.config.enable_execution_trace {
            self.execution_trace.push(record);
        }
        self.state.inc_steps();
        record
    }

    /// Run until the step budget is spent or the machine is cancelled
    pub fn run(self) -> Result<ExecutionResult> {
        self.run_with(&mut NoObserver)
    }

    /// Like [`run`](Self::run), calling `observer` before each step
    pub fn run_with<O: StepObserver + ?Sized>(mut self, observer: &mut O) -> Result<ExecutionResult> {
        while !self.state.is_halted() {
            if let Some(limit) = self.config.max_steps {
                if self.state.steps >= limit {
                    self.state.halt(HaltReason::StepLimit);
                    break;
                }
            }

            observer.before_step(self.state.steps, &self.memory)?;

            // Checked after the observer so it can stop the machine itself
            if self.cancel.load(Ordering::Relaxed) {
                self.state.halt(HaltReason::Cancelled);
                break;
            }

            self.step();
        }

        let halt_reason = self.state.halt_reason.unwrap_or(HaltReason::StepLimit);
        tracing::debug!(steps = self.state.steps, ?halt_reason, "machine halted");

        Ok(ExecutionResult {
            steps: self.state.steps,
            halt_reason,
            nonzero: self.memory.nonzero_count(),
            execution_trace: self.execution_trace,
        })
    }

    /// Get current state (for debugging)
    pub fn state(&self) -> &MachineState {
        &self.state
    }

    /// Get memory (for debugging)
    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Execution trace collected so far
    pub fn execution_trace(&self) -> &[StepRecord] {
        &self.execution_trace
    }

    pub fn into_memory(self) -> Memory {
        self.memory
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
