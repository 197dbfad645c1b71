//! Smriti - command recording and replay for robots
//!
//! Wrap any [`Robot`] in a [`Session`] and every command sent through it is
//! forwarded to the robot and logged as an [`Instruction`]. A snapshot of the
//! log ([`Emulator`]) can then be replayed against any other robot, as many
//! times as needed.
//!
//! ```
//! use smriti::{Operation, Robot, Session};
//! use smriti::devices::MemoRobot;
//!
//! let mut original = MemoRobot::new();
//! let mut session = Session::new(&mut original);
//! session.move_distance(10.0)?;
//! session.turn(45.0)?;
//! session.beep()?;
//! let emulator = session.emulate();
//!
//! let mut clone = MemoRobot::new();
//! emulator.operate(&mut clone)?;
//! assert_eq!(original.trace(), clone.trace());
//! # Ok::<(), smriti::Error>(())
//! ```
//!
//! ## Modules
//!
//! - [`robot`]: the [`Robot`] command trait
//! - [`instruction`]: recorded calls and the [`Operation`] trait
//! - [`session`]: recording wrappers
//! - [`emulator`]: replayable snapshots, text and binary encodings
//! - [`devices`]: trace-recording and simulated robots
//! - [`walk`]: seeded random command sequences
//! - [`config`]: TOML configuration for the `smriti` binary

pub mod config;
pub mod devices;
pub mod emulator;
pub mod error;
pub mod instruction;
pub mod robot;
pub mod session;
pub mod walk;

// Re-export commonly used types
pub use config::AppConfig;
pub use emulator::Emulator;
pub use error::{Error, Result};
pub use instruction::{Instruction, Operation};
pub use robot::Robot;
pub use session::{Session, SharedSession};
pub use walk::RandomWalk;
