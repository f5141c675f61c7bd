//! Machine state

use serde::{Deserialize, Serialize};

/// Driver state between steps
#[derive(Debug, Clone, Default)]
pub struct MachineState {
    /// Steps executed so far
    pub steps: u64,

    /// Halted flag
    pub halted: bool,

    /// Halt reason
    pub halt_reason: Option<HaltReason>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HaltReason {
    /// Step budget exhausted
    StepLimit,
    /// Cancellation flag raised
    Cancelled,
}

impl MachineState {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_halted(&self) -> bool {
        self.halted
    }

    #[inline]
    pub fn inc_steps(&mut self) {
        self.steps += 1;
    }

    /// Halt execution
    pub fn halt(&mut self, reason: HaltReason) {
        self.halted = true;
        self.halt_reason = Some(reason);
    }
}
