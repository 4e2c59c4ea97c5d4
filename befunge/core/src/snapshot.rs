use crate::direction::Direction;
use crate::value::Value;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Owned, read-only copy of the machine as of the last completed tick.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSnapshot {
    pub program: String,
    pub pos: (usize, usize),
    pub direction: Direction,
    #[serde(default)]
    pub stack: Vec<Value>,
    #[serde(default)]
    pub output: String,
    #[serde(default)]
    pub string_mode: bool,
    #[serde(default)]
    pub halted: bool,
    #[serde(default)]
    pub ticks: u64,
}

impl MachineSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Program text split into rows.
    pub fn rows(&self) -> impl Iterator<Item = &str> {
        self.program.split('\n')
    }
}
