//! Trace-recording robot
//!
//! Keeps an independent textual trace of every call it receives, using the
//! same token format as [`Instruction`](crate::Instruction). Useful as a replay
//! target when checking that a recording reproduces the original calls.

use std::fmt::{self, Write};

use crate::error::Result;
use crate::robot::Robot;

/// Robot that only remembers what it was told to do
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoRobot {
    trace: String,
    calls: usize,
}

impl MemoRobot {
    /// Create a robot with an empty trace
    pub fn new() -> Self {
        Self::default()
    }

    /// `;`-separated trace of all calls received
    pub fn trace(&self) -> &str {
        &self.trace
    }

    /// Number of calls received
    pub fn calls(&self) -> usize {
        self.calls
    }

    fn remember(&mut self, args: fmt::Arguments<'_>) {
        if !self.trace.is_empty() {
            self.trace.push(';');
        }
        self.trace.write_fmt(args).ok();
        self.calls += 1;
    }
}

impl Robot for MemoRobot {
    fn move_distance(&mut self, distance: f64) -> Result<()> {
        self.remember(format_args!("m{}", distance));
        Ok(())
    }

    fn turn(&mut self, angle: f64) -> Result<()> {
        self.remember(format_args!("t{}", angle));
        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        self.remember(format_args!("b"));
        Ok(())
    }
}

impl fmt::Display for MemoRobot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.trace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_format() {
        let mut robot = MemoRobot::new();
        robot.move_distance(10.0).unwrap();
        robot.turn(-45.5).unwrap();
        robot.beep().unwrap();

        assert_eq!(robot.trace(), "m10;t-45.5;b");
        assert_eq!(robot.to_string(), "m10;t-45.5;b");
        assert_eq!(robot.calls(), 3);
    }

    #[test]
    fn test_fresh_robot_is_empty() {
        let robot = MemoRobot::new();
        assert_eq!(robot.trace(), "");
        assert_eq!(robot.calls(), 0);
    }
}
