//! Robot implementations shipped with the crate.
//!
//! - [`MemoRobot`]: keeps a textual trace of every call
//! - [`SimulatedRobot`]: point robot moving in a bounded arena

pub mod memo;
pub mod sim;

pub use memo::MemoRobot;
pub use sim::{CollisionMode, Pose2D, SimulatedRobot};
