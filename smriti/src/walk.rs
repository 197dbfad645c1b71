//! Random command sequences
//!
//! Drives a robot with a uniformly random mix of moves, turns and beeps.
//! Seeded walks are reproducible, which makes them handy for exercising
//! record/replay on arbitrary call interleavings.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::WalkConfig;
use crate::error::Result;
use crate::instruction::{Instruction, Operation};
use crate::robot::Robot;

/// Random command generator
pub struct RandomWalk {
    rng: StdRng,
    max_distance: f64,
    max_angle: f64,
}

impl RandomWalk {
    /// Create a walk with an explicit seed
    pub fn seeded(seed: u64, config: &WalkConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            max_distance: config.max_distance,
            max_angle: config.max_angle,
        })
    }

    /// Create a walk from config, drawing a seed from the OS if none is set.
    ///
    /// Returns the walk together with the seed actually used.
    pub fn from_config(config: &WalkConfig) -> Result<(Self, u64)> {
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Ok((Self::seeded(seed, config)?, seed))
    }

    /// Draw the next command
    pub fn next_instruction(&mut self) -> Instruction {
        match self.rng.random_range(0..3) {
            0 => Instruction::Beep,
            1 => Instruction::Move {
                distance: self.rng.random::<f64>() * self.max_distance,
            },
            _ => Instruction::Turn {
                angle: self.rng.random::<f64>() * self.max_angle,
            },
        }
    }

    /// Send `steps` random commands to `robot`.
    ///
    /// Stops at the first robot error.
    pub fn drive(&mut self, robot: &mut dyn Robot, steps: usize) -> Result<()> {
        for step in 0..steps {
            let instruction = self.next_instruction();
            log::trace!("walk[{}]: {}", step, instruction);
            instruction.operate(robot)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::MemoRobot;

    #[test]
    fn test_same_seed_same_walk() {
        let config = WalkConfig::default();
        let mut first = MemoRobot::new();
        let mut second = MemoRobot::new();

        RandomWalk::seeded(99, &config)
            .unwrap()
            .drive(&mut first, 50)
            .unwrap();
        RandomWalk::seeded(99, &config)
            .unwrap()
            .drive(&mut second, 50)
            .unwrap();

        assert_eq!(first.calls(), 50);
        assert_eq!(first.trace(), second.trace());
    }

    #[test]
    fn test_arguments_within_range() {
        let config = WalkConfig {
            max_distance: 2.0,
            max_angle: 30.0,
            ..WalkConfig::default()
        };
        let mut walk = RandomWalk::seeded(5, &config).unwrap();

        for _ in 0..500 {
            match walk.next_instruction() {
                Instruction::Move { distance } => assert!((0.0..2.0).contains(&distance)),
                Instruction::Turn { angle } => assert!((0.0..30.0).contains(&angle)),
                Instruction::Beep => {}
            }
        }
    }

    #[test]
    fn test_all_operations_drawn() {
        let mut walk = RandomWalk::seeded(1, &WalkConfig::default()).unwrap();
        let drawn: Vec<&'static str> = (0..200)
            .map(|_| walk.next_instruction().operation())
            .collect();

        for operation in ["beep", "move", "turn"] {
            assert!(drawn.contains(&operation), "{} never drawn", operation);
        }
    }

    #[test]
    fn test_config_seed_is_used() {
        let config = WalkConfig {
            seed: Some(17),
            ..WalkConfig::default()
        };
        let (_, seed) = RandomWalk::from_config(&config).unwrap();
        assert_eq!(seed, 17);
    }

    #[test]
    fn test_invalid_range_rejected() {
        let config = WalkConfig {
            max_distance: f64::NAN,
            ..WalkConfig::default()
        };
        assert!(RandomWalk::seeded(0, &config).is_err());
    }
}
