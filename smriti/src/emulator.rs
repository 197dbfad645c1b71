//! Replay of recorded instruction sequences.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::instruction::{Instruction, Operation};
use crate::robot::Robot;

/// Separator between instruction tokens in the canonical text form.
pub const TOKEN_SEPARATOR: char = ';';

/// Immutable, replayable instruction sequence.
///
/// Produced by [`Session::emulate`](crate::Session::emulate), parsed from the
/// canonical text form, or decoded from bytes. The sequence is shared behind
/// an `Arc`, so clones are cheap and the emulator can be replayed from
/// several threads at once against independent robots.
///
/// # Example
///
/// ```
/// use smriti::{Emulator, Operation};
/// use smriti::devices::MemoRobot;
///
/// let emulator: Emulator = "m10;t45;b".parse()?;
///
/// let mut robot = MemoRobot::new();
/// emulator.operate(&mut robot)?;
/// assert_eq!(robot.trace(), "m10;t45;b");
/// # Ok::<(), smriti::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<Instruction>", into = "Vec<Instruction>")]
pub struct Emulator {
    instructions: Arc<[Instruction]>,
}

impl Emulator {
    /// Create an emulator over the given sequence
    pub fn new(instructions: Vec<Instruction>) -> Self {
        Self {
            instructions: instructions.into(),
        }
    }

    /// Recorded instructions in call order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Iterate over the instructions in call order
    pub fn iter(&self) -> std::slice::Iter<'_, Instruction> {
        self.instructions.iter()
    }

    /// Number of instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// New emulator that plays `self` followed by `other`
    pub fn concat(&self, other: &Emulator) -> Emulator {
        let mut instructions = Vec::with_capacity(self.len() + other.len());
        instructions.extend_from_slice(&self.instructions);
        instructions.extend_from_slice(&other.instructions);
        Self::new(instructions)
    }

    /// Encode the sequence with postcard
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let instructions: &[Instruction] = &self.instructions;
        Ok(postcard::to_allocvec(&instructions)?)
    }

    /// Decode a sequence produced by [`to_bytes`](Self::to_bytes)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let instructions: Vec<Instruction> = postcard::from_bytes(bytes)?;
        Ok(Self::new(instructions))
    }
}

impl Operation for Emulator {
    /// Replay every instruction in order.
    ///
    /// Stops at the first device error and returns it; instructions after
    /// the failing one are not sent.
    fn operate(&self, robot: &mut dyn Robot) -> Result<()> {
        log::debug!("Replaying {} instructions", self.len());

        for (index, instruction) in self.instructions.iter().enumerate() {
            log::trace!("replay[{}]: {}", index, instruction);
            if let Err(e) = instruction.operate(robot) {
                log::warn!(
                    "Replay aborted at instruction {} of {} ({}): {}",
                    index + 1,
                    self.len(),
                    instruction,
                    e
                );
                return Err(e);
            }
        }

        Ok(())
    }
}

impl fmt::Display for Emulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, instruction) in self.instructions.iter().enumerate() {
            if index > 0 {
                write!(f, "{}", TOKEN_SEPARATOR)?;
            }
            write!(f, "{}", instruction)?;
        }
        Ok(())
    }
}

impl FromStr for Emulator {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        if text.is_empty() {
            return Ok(Self::default());
        }

        let instructions = text
            .split(TOKEN_SEPARATOR)
            .map(str::parse)
            .collect::<Result<Vec<Instruction>>>()?;
        Ok(Self::new(instructions))
    }
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl From<Vec<Instruction>> for Emulator {
    fn from(instructions: Vec<Instruction>) -> Self {
        Self::new(instructions)
    }
}

impl From<Emulator> for Vec<Instruction> {
    fn from(emulator: Emulator) -> Self {
        emulator.instructions.to_vec()
    }
}

impl<'a> IntoIterator for &'a Emulator {
    type Item = &'a Instruction;
    type IntoIter = std::slice::Iter<'a, Instruction>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
