//! Deterministic, step-driven virtual machine for a two-dimensional,
//! stack-based esoteric language in the Befunge-93 family.
//!
//! A fixed 80x25 character grid is the program. An instruction pointer walks
//! it toroidally; every visited cell is an opcode, a digit literal, or (in
//! string mode) data. Hosts drive the machine one [`Machine::tick`] at a
//! time and observe it through read-only accessors or a [`MachineSnapshot`].

use std::env;
use std::fs;
use std::io::Read;
use std::path::Path;
use thiserror::Error;

pub mod direction;
pub mod eval;
pub mod grid;
pub mod machine;
pub mod random;
pub mod snapshot;
pub mod state;
pub mod value;

pub use direction::Direction;
pub use eval::Opcode;
pub use grid::{Grid, HEIGHT, WIDTH};
pub use machine::Machine;
pub use random::{RandomSource, ScriptedRandom, StdRandom};
pub use snapshot::MachineSnapshot;
pub use state::State;
pub use value::Value;

/// Environment variable that turns on per-tick stderr tracing.
pub const TRACE_ENV: &str = "BEFUNGE_TRACE";

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialize error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("program did not halt within {limit} ticks")]
    TickLimit { limit: u64 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineConfig {
    /// Seed for the `?` opcode; `None` draws from OS entropy.
    pub seed: Option<u64>,
    pub trace: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            trace: Self::trace_from_env(),
        }
    }
}

impl MachineConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    pub(crate) fn trace_from_env() -> bool {
        env::var_os(TRACE_ENV).is_some_and(|value| !value.is_empty() && value != "0")
    }
}

/// Ticks `machine` until it halts. Returns the number of ticks taken, or
/// `CoreError::TickLimit` once `max_ticks` have elapsed without halting.
pub fn run_until_halted<R: RandomSource>(machine: &mut Machine<R>, max_ticks: u64) -> Result<u64> {
    let mut taken = 0u64;
    while !machine.is_halted() {
        if taken >= max_ticks {
            return Err(CoreError::TickLimit { limit: max_ticks });
        }
        machine.tick();
        taken += 1;
    }
    Ok(taken)
}

/// Reads program text from `path`, or from stdin when `path` is `-`.
pub fn load_program(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    Ok(fs::read_to_string(path)?)
}
