//! Kinematic robot simulator
//!
//! Point robot in a square arena centred at the origin. `move_distance`
//! drives along the current heading, `turn` rotates in place (degrees, CCW
//! positive). Leaving the arena is handled according to [`CollisionMode`].

use std::f64::consts::{PI, TAU};

use serde::{Deserialize, Serialize};

use crate::config::SimulationConfig;
use crate::error::{Error, Result};
use crate::robot::Robot;

/// What happens when a move would leave the arena
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollisionMode {
    /// Stop at the wall; the call succeeds
    #[default]
    Stop,
    /// Reject the move with a device error; the pose is unchanged
    Fail,
}

/// 2D pose (x, y, theta in radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Pose2D {
    /// X position
    pub x: f64,
    /// Y position
    pub y: f64,
    /// Heading in radians, normalized to (-PI, PI]
    pub theta: f64,
}

impl Pose2D {
    /// Create a new pose
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self {
            x,
            y,
            theta: normalize_angle(theta),
        }
    }

    /// Heading in degrees
    pub fn heading_degrees(&self) -> f64 {
        self.theta.to_degrees()
    }
}

/// Simulated point robot with heading
#[derive(Debug, Clone)]
pub struct SimulatedRobot {
    pose: Pose2D,
    half_extent: f64,
    collision_mode: CollisionMode,
    odometer: f64,
    beeps: usize,
    collisions: usize,
}

impl SimulatedRobot {
    /// Create a robot at the configured start pose.
    ///
    /// The configuration is validated first; an invalid arena or a start
    /// pose outside it is rejected.
    pub fn new(config: &SimulationConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            pose: Pose2D::new(
                config.start_x,
                config.start_y,
                config.start_heading.to_radians(),
            ),
            half_extent: config.arena_half_extent,
            collision_mode: config.collision_mode,
            odometer: 0.0,
            beeps: 0,
            collisions: 0,
        })
    }

    /// Current pose
    pub fn pose(&self) -> Pose2D {
        self.pose
    }

    /// Total distance actually travelled
    pub fn odometer(&self) -> f64 {
        self.odometer
    }

    /// Number of beeps emitted
    pub fn beeps(&self) -> usize {
        self.beeps
    }

    /// Number of moves that hit the arena wall
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    fn inside(&self, x: f64, y: f64) -> bool {
        x.abs() <= self.half_extent && y.abs() <= self.half_extent
    }

    /// Largest fraction of the displacement (dx, dy) that stays in the arena
    fn travel_fraction(&self, dx: f64, dy: f64) -> f64 {
        let axis_limit = |position: f64, delta: f64| {
            if delta > 0.0 {
                (self.half_extent - position) / delta
            } else if delta < 0.0 {
                (-self.half_extent - position) / delta
            } else {
                f64::INFINITY
            }
        };

        axis_limit(self.pose.x, dx)
            .min(axis_limit(self.pose.y, dy))
            .clamp(0.0, 1.0)
    }
}

impl Robot for SimulatedRobot {
    fn move_distance(&mut self, distance: f64) -> Result<()> {
        if !distance.is_finite() {
            return Err(Error::device(
                "move",
                format!("non-finite distance {}", distance),
            ));
        }

        let dx = distance * self.pose.theta.cos();
        let dy = distance * self.pose.theta.sin();
        let (target_x, target_y) = (self.pose.x + dx, self.pose.y + dy);

        if self.inside(target_x, target_y) {
            self.pose.x = target_x;
            self.pose.y = target_y;
            self.odometer += distance.abs();
            return Ok(());
        }

        match self.collision_mode {
            CollisionMode::Fail => Err(Error::device(
                "move",
                format!(
                    "target ({:.3}, {:.3}) outside arena of half extent {}",
                    target_x, target_y, self.half_extent
                ),
            )),
            CollisionMode::Stop => {
                let fraction = self.travel_fraction(dx, dy);
                let limit = self.half_extent;
                self.pose.x = (self.pose.x + dx * fraction).clamp(-limit, limit);
                self.pose.y = (self.pose.y + dy * fraction).clamp(-limit, limit);
                self.odometer += distance.abs() * fraction;
                self.collisions += 1;
                log::debug!(
                    "Wall hit after {:.1}% of move {}, stopped at ({:.3}, {:.3})",
                    fraction * 100.0,
                    distance,
                    self.pose.x,
                    self.pose.y
                );
                Ok(())
            }
        }
    }

    fn turn(&mut self, angle: f64) -> Result<()> {
        if !angle.is_finite() {
            return Err(Error::device("turn", format!("non-finite angle {}", angle)));
        }
        self.pose.theta = normalize_angle(self.pose.theta + angle.to_radians());
        Ok(())
    }

    fn beep(&mut self) -> Result<()> {
        self.beeps += 1;
        log::debug!("Beep #{}", self.beeps);
        Ok(())
    }
}

/// Normalize angle to (-PI, PI]
pub fn normalize_angle(angle: f64) -> f64 {
    let mut a = angle % TAU;
    if a > PI {
        a -= TAU;
    } else if a <= -PI {
        a += TAU;
    }
    a
}
