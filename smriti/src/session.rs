//! Recording sessions
//!
//! A [`Session`] sits between a caller and a robot. Every command is sent to
//! the robot first and, once the robot accepts it, appended to the session's
//! instruction log. [`Session::emulate`] snapshots that log into an
//! [`Emulator`] which can replay it later against any robot.
//!
//! [`SharedSession`] is the thread-safe variant: the forwarded call and the
//! log append happen under one lock, so the log order always matches the
//! order in which calls reached the robot.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::emulator::Emulator;
use crate::error::Result;
use crate::instruction::Instruction;
use crate::robot::Robot;

/// Recording wrapper around a robot.
///
/// The session itself is a [`Robot`], so it can be handed to any code that
/// drives a robot. Pass `&mut robot` to keep ownership of the device, or
/// pass the device by value and get it back with [`into_inner`](Self::into_inner).
///
/// # Example
///
/// ```
/// use smriti::{Robot, Session};
/// use smriti::devices::MemoRobot;
///
/// let mut robot = MemoRobot::new();
/// let mut session = Session::new(&mut robot);
/// session.move_distance(10.0)?;
/// session.turn(45.0)?;
/// session.beep()?;
///
/// let emulator = session.emulate();
/// assert_eq!(emulator.to_string(), "m10;t45;b");
/// assert_eq!(robot.trace(), "m10;t45;b");
/// # Ok::<(), smriti::Error>(())
/// ```
#[derive(Debug)]
pub struct Session<R: Robot> {
    robot: R,
    instructions: Vec<Instruction>,
}

impl<R: Robot> Session<R> {
    /// Start recording commands sent to `robot`
    pub fn new(robot: R) -> Self {
        Self {
            robot,
            instructions: Vec::new(),
        }
    }

    /// Alias of [`new`](Self::new)
    pub fn open(robot: R) -> Self {
        Self::new(robot)
    }

    /// Snapshot the log recorded so far.
    ///
    /// The returned emulator owns its own copy; commands recorded afterwards
    /// do not show up in it.
    pub fn emulate(&self) -> Emulator {
        log::debug!("Session snapshot: {} instructions", self.instructions.len());
        Emulator::new(self.instructions.clone())
    }

    /// Instructions recorded so far, in call order
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Number of recorded instructions
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// The wrapped robot
    pub fn robot(&self) -> &R {
        &self.robot
    }

    /// End the session and hand back the robot
    pub fn into_inner(self) -> R {
        self.robot
    }

    /// Forward `instruction` to the robot and log it if the robot accepted it
    fn record(&mut self, instruction: Instruction) -> Result<()> {
        let forwarded = match instruction {
            Instruction::Beep => self.robot.beep(),
            Instruction::Move { distance } => self.robot.move_distance(distance),
            Instruction::Turn { angle } => self.robot.turn(angle),
        };

        if let Err(e) = forwarded {
            log::warn!("Not recording {}: {}", instruction, e);
            return Err(e);
        }

        log::trace!("record[{}]: {}", self.instructions.len(), instruction);
        self.instructions.push(instruction);
        Ok(())
    }
}

impl<R: Robot> Robot for Session<R> {
    fn move_distance(&mut self, distance: f64) -> Result<()> {
        self.record(Instruction::Move { distance })
    }

    fn turn(&mut self, angle: f64) -> Result<()> {
        self.record(Instruction::Turn { angle })
    }

    fn beep(&mut self) -> Result<()> {
        self.record(Instruction::Beep)
    }
}

/// Thread-safe recording session.
///
/// Clones share the same underlying session. Each command holds the lock for
/// the whole forward-then-append step.
#[derive(Debug)]
pub struct SharedSession<R: Robot> {
    inner: Arc<Mutex<Session<R>>>,
}

impl<R: Robot> SharedSession<R> {
    /// Start recording commands sent to `robot`
    pub fn new(robot: R) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Session::new(robot))),
        }
    }

    /// See [`Robot::move_distance`]
    pub fn move_distance(&self, distance: f64) -> Result<()> {
        self.inner.lock().move_distance(distance)
    }

    /// See [`Robot::turn`]
    pub fn turn(&self, angle: f64) -> Result<()> {
        self.inner.lock().turn(angle)
    }

    /// See [`Robot::beep`]
    pub fn beep(&self) -> Result<()> {
        self.inner.lock().beep()
    }

    /// Snapshot the log recorded so far
    pub fn emulate(&self) -> Emulator {
        self.inner.lock().emulate()
    }

    /// Number of recorded instructions
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// Check if nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Run `f` with the wrapped robot while holding the lock
    pub fn with_robot<T>(&self, f: impl FnOnce(&R) -> T) -> T {
        f(self.inner.lock().robot())
    }

    /// Recover the session if this is the last handle
    pub fn try_unwrap(self) -> std::result::Result<Session<R>, Self> {
        Arc::try_unwrap(self.inner)
            .map(|mutex| mutex.into_inner())
            .map_err(|inner| Self { inner })
    }
}

impl<R: Robot> Clone for SharedSession<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Robot> Robot for SharedSession<R> {
    fn move_distance(&mut self, distance: f64) -> Result<()> {
        SharedSession::move_distance(self, distance)
    }

    fn turn(&mut self, angle: f64) -> Result<()> {
        SharedSession::turn(self, angle)
    }

    fn beep(&mut self) -> Result<()> {
        SharedSession::beep(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::MemoRobot;
    use crate::error::Error;
    use crate::instruction::Operation;
    use std::thread;

    /// Robot that rejects every move longer than `limit`
    struct Limited {
        limit: f64,
        memo: MemoRobot,
    }

    impl Robot for Limited {
        fn move_distance(&mut self, distance: f64) -> Result<()> {
            if distance.abs() > self.limit {
                return Err(Error::device("move", format!("{} exceeds limit", distance)));
            }
            self.memo.move_distance(distance)
        }

        fn turn(&mut self, angle: f64) -> Result<()> {
            self.memo.turn(angle)
        }

        fn beep(&mut self) -> Result<()> {
            self.memo.beep()
        }
    }

    #[test]
    fn test_records_in_call_order() {
        let mut robot = MemoRobot::new();
        let mut session = Session::new(&mut robot);

        session.move_distance(10.0).unwrap();
        session.turn(45.0).unwrap();
        session.move_distance(15.0).unwrap();
        session.beep().unwrap();
        session.beep().unwrap();

        let emulator = session.emulate();
        assert_eq!(session.len(), 5);
        assert_eq!(emulator.to_string(), "m10;t45;m15;b;b");
        assert_eq!(robot.trace(), emulator.to_string());
    }

    #[test]
    fn test_empty_session() {
        let session = Session::open(MemoRobot::new());
        assert!(session.is_empty());

        let emulator = session.emulate();
        assert!(emulator.is_empty());
        assert_eq!(emulator.to_string(), "");
        assert_eq!(session.robot().calls(), 0);
    }

    #[test]
    fn test_snapshot_isolation() {
        let mut session = Session::new(MemoRobot::new());
        session.move_distance(1.0).unwrap();
        let before = session.emulate();

        session.turn(90.0).unwrap();
        session.beep().unwrap();
        let after = session.emulate();

        assert_eq!(before.to_string(), "m1");
        assert_eq!(after.to_string(), "m1;t90;b");

        let mut replay = MemoRobot::new();
        before.operate(&mut replay).unwrap();
        assert_eq!(replay.trace(), "m1");
    }

    #[test]
    fn test_failed_call_is_not_recorded() {
        let mut session = Session::new(Limited {
            limit: 5.0,
            memo: MemoRobot::new(),
        });

        session.move_distance(2.0).unwrap();
        let err = session.move_distance(50.0).unwrap_err();
        assert!(matches!(err, Error::Device { operation: "move", .. }));
        session.turn(10.0).unwrap();

        assert_eq!(session.emulate().to_string(), "m2;t10");
        assert_eq!(session.robot().memo.trace(), "m2;t10");
    }

    #[test]
    fn test_into_inner_returns_robot() {
        let mut session = Session::new(MemoRobot::new());
        session.beep().unwrap();
        let robot = session.into_inner();
        assert_eq!(robot.trace(), "b");
    }

    #[test]
    fn test_nested_sessions() {
        let mut inner = Session::new(MemoRobot::new());
        {
            let mut outer = Session::new(&mut inner);
            outer.move_distance(3.0).unwrap();
            outer.beep().unwrap();
            assert_eq!(outer.emulate().to_string(), "m3;b");
        }
        assert_eq!(inner.emulate().to_string(), "m3;b");
        assert_eq!(inner.robot().trace(), "m3;b");
    }

    #[test]
    fn test_shared_session_across_threads() {
        let shared = SharedSession::new(MemoRobot::new());

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let session = shared.clone();
                thread::spawn(move || {
                    for step in 0..25 {
                        session.move_distance((worker * 100 + step) as f64).unwrap();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 100);
        let emulator = shared.emulate();
        let trace = shared.with_robot(|robot| robot.trace().to_string());
        assert_eq!(emulator.to_string(), trace);

        let session = shared.try_unwrap().unwrap();
        let mut values: Vec<f64> = session
            .instructions()
            .iter()
            .map(|instruction| match instruction {
                Instruction::Move { distance } => *distance,
                other => panic!("unexpected instruction {}", other),
            })
            .collect();
        values.sort_by(f64::total_cmp);
        let expected: Vec<f64> = (0..4)
            .flat_map(|worker| (0..25).map(move |step| (worker * 100 + step) as f64))
            .collect();
        assert_eq!(values, expected);
    }

    #[test]
    fn test_shared_session_as_robot() {
        let shared = SharedSession::new(MemoRobot::new());
        let mut handle = shared.clone();
        let emulator: Emulator = "t15;b".parse().unwrap();
        emulator.operate(&mut handle).unwrap();

        assert!(shared.clone().try_unwrap().is_err());
        drop(handle);
        assert_eq!(shared.emulate(), emulator);
    }
}
