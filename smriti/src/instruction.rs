//! Recorded robot instructions
//!
//! An [`Instruction`] captures one call on the [`Robot`] trait together with
//! its arguments. Each instruction has a compact canonical text form:
//!
//! | Call | Token |
//! |------|-------|
//! | `beep()` | `b` |
//! | `move_distance(d)` | `m<d>` |
//! | `turn(a)` | `t<a>` |
//!
//! Numbers use the default `f64` formatting, which is the shortest text that
//! parses back to the same value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::robot::Robot;

/// Anything that can be executed against a robot.
///
/// Implemented by a single [`Instruction`] and by a whole
/// [`Emulator`](crate::Emulator) sequence.
pub trait Operation {
    /// Execute against `robot`, returning the first device error unchanged
    fn operate(&self, robot: &mut dyn Robot) -> Result<()>;
}

/// A single recorded robot call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum Instruction {
    /// `beep()`
    Beep,
    /// `move_distance(distance)`
    Move {
        /// Distance passed to the robot
        distance: f64,
    },
    /// `turn(angle)`
    Turn {
        /// Angle passed to the robot
        angle: f64,
    },
}

impl Instruction {
    /// Name of the robot operation this instruction invokes
    pub fn operation(&self) -> &'static str {
        match self {
            Self::Beep => "beep",
            Self::Move { .. } => "move",
            Self::Turn { .. } => "turn",
        }
    }
}

/// Equality follows the canonical rendering: `-0` differs from `0`, and any
/// two NaN arguments are equal.
impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Beep, Self::Beep) => true,
            (Self::Move { distance: a }, Self::Move { distance: b }) => same_argument(*a, *b),
            (Self::Turn { angle: a }, Self::Turn { angle: b }) => same_argument(*a, *b),
            _ => false,
        }
    }
}

impl Eq for Instruction {}

fn same_argument(a: f64, b: f64) -> bool {
    (a.is_nan() && b.is_nan()) || a.to_bits() == b.to_bits()
}

impl Operation for Instruction {
    fn operate(&self, robot: &mut dyn Robot) -> Result<()> {
        match *self {
            Self::Beep => robot.beep(),
            Self::Move { distance } => robot.move_distance(distance),
            Self::Turn { angle } => robot.turn(angle),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Beep => f.write_str("b"),
            Self::Move { distance } => write!(f, "m{}", distance),
            Self::Turn { angle } => write!(f, "t{}", angle),
        }
    }
}

impl FromStr for Instruction {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        let parse_arg = |arg: &str| {
            arg.parse::<f64>()
                .map_err(|e| Error::InvalidInstruction(format!("`{}`: {}", token, e)))
        };

        match token.split_at_checked(1) {
            Some(("b", "")) => Ok(Self::Beep),
            Some(("m", arg)) => Ok(Self::Move {
                distance: parse_arg(arg)?,
            }),
            Some(("t", arg)) => Ok(Self::Turn {
                angle: parse_arg(arg)?,
            }),
            _ => Err(Error::InvalidInstruction(format!(
                "unrecognized token `{}`",
                token
            ))),
        }
    }
}
