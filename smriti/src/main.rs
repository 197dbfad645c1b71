//! Smriti - record/replay harness
//!
//! Records a seeded random walk on a simulated robot, then replays the
//! recording on freshly created robots and checks that every replay issues
//! the same commands and ends at the same pose.
//!
//! Usage:
//!   smriti --steps 20 --seed 42
//!   smriti --config smriti.toml --replays 3
//!
//! Enable per-instruction logging:
//!   RUST_LOG=trace smriti

use clap::Parser;
use smriti::devices::SimulatedRobot;
use smriti::{AppConfig, Emulator, Error, Operation, RandomWalk, Result, Session};
use std::path::PathBuf;

/// Record a random walk and verify its replays
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of random commands (overrides config)
    #[arg(long)]
    steps: Option<usize>,

    /// RNG seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Number of replays to verify
    #[arg(long, default_value = "2")]
    replays: usize,

    /// Also print the postcard encoding of the recording
    #[arg(long)]
    show_bytes: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(steps) = args.steps {
        config.walk.steps = steps;
    }
    if let Some(seed) = args.seed {
        config.walk.seed = Some(seed);
    }

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("Smriti v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(path) = &args.config {
        log::info!("Using config: {}", path.display());
    }

    let (mut walk, seed) = RandomWalk::from_config(&config.walk)?;
    log::info!(
        "Recording {} random commands (seed {})",
        config.walk.steps,
        seed
    );

    let mut session = Session::new(SimulatedRobot::new(&config.simulation)?);
    walk.drive(&mut session, config.walk.steps)?;
    let emulator = session.emulate();
    let original = session.into_inner();

    let pose = original.pose();
    log::info!(
        "Original run: pose=({:.3}, {:.3}, {:.1}°) odometer={:.3} beeps={} collisions={}",
        pose.x,
        pose.y,
        pose.heading_degrees(),
        original.odometer(),
        original.beeps(),
        original.collisions()
    );

    println!("{}", emulator);
    if args.show_bytes {
        let bytes = emulator.to_bytes()?;
        println!("{} bytes: {}", bytes.len(), hex(&bytes));
        let decoded = Emulator::from_bytes(&bytes)?;
        verify_trace(&emulator, &decoded)?;
    }

    for replay in 1..=args.replays {
        let mut target = Session::new(SimulatedRobot::new(&config.simulation)?);
        emulator.operate(&mut target)?;
        verify_trace(&emulator, &target.emulate())?;

        let replayed = target.into_inner();
        if replayed.pose() != original.pose() || replayed.beeps() != original.beeps() {
            let actual = replayed.pose();
            return Err(Error::ReplayMismatch {
                expected: format!("{:?}", pose),
                actual: format!("{:?}", actual),
            });
        }
        log::info!("Replay {}/{} matches original", replay, args.replays);
    }

    log::info!(
        "Verified {} instructions across {} replays",
        emulator.len(),
        args.replays
    );
    Ok(())
}

fn verify_trace(expected: &Emulator, actual: &Emulator) -> Result<()> {
    if expected != actual {
        return Err(Error::ReplayMismatch {
            expected: expected.to_string(),
            actual: actual.to_string(),
        });
    }
    Ok(())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
