//! Robot trait definition

use crate::error::Result;

/// Command interface of a controllable robot.
///
/// Hardware drivers, simulators, test doubles and [`Session`](crate::Session)
/// all implement this trait, so a recording can be replayed against any of
/// them. The trait does not constrain argument values: negative, zero or
/// non-finite values are passed through and the implementation decides what
/// they mean.
pub trait Robot {
    /// Drive straight by `distance` (negative drives backwards)
    fn move_distance(&mut self, distance: f64) -> Result<()>;

    /// Rotate in place by `angle` degrees (positive = CCW)
    fn turn(&mut self, angle: f64) -> Result<()>;

    /// Emit an audible signal
    fn beep(&mut self) -> Result<()>;
}

impl<R: Robot + ?Sized> Robot for &mut R {
    fn move_distance(&mut self, distance: f64) -> Result<()> {
        (**self).move_distance(distance)
    }

    fn turn(&mut self, angle: f64) -> Result<()> {
        (**self).turn(angle)
    }

    fn beep(&mut self) -> Result<()> {
        (**self).beep()
    }
}

impl<R: Robot + ?Sized> Robot for Box<R> {
    fn move_distance(&mut self, distance: f64) -> Result<()> {
        (**self).move_distance(distance)
    }

    fn turn(&mut self, angle: f64) -> Result<()> {
        (**self).turn(angle)
    }

    fn beep(&mut self) -> Result<()> {
        (**self).beep()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::MemoRobot;

    fn square(robot: &mut dyn Robot) -> Result<()> {
        for _ in 0..4 {
            robot.move_distance(1.0)?;
            robot.turn(90.0)?;
        }
        Ok(())
    }

    #[test]
    fn test_mut_ref_forwards() {
        let mut memo = MemoRobot::new();
        {
            let mut handle = &mut memo;
            handle.beep().unwrap();
            square(&mut handle).unwrap();
        }
        assert_eq!(memo.trace(), "b;m1;t90;m1;t90;m1;t90;m1;t90");
    }

    #[test]
    fn test_boxed_dyn_robot() {
        let mut boxed: Box<dyn Robot> = Box::new(MemoRobot::new());
        boxed.move_distance(-2.5).unwrap();
        boxed.turn(0.0).unwrap();
        boxed.beep().unwrap();
        square(&mut boxed).unwrap();
    }
}
