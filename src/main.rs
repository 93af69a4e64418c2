/* 3rd party libraries */
use clap::Parser;
use crossbeam_channel as cbc;
use log::{error, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::thread::Builder;
use std::time::Duration;

/* Custom libraries */
use lift_sim::config::{self, Config};
use lift_sim::shared::{LogEntry, Snapshot};
use lift_sim::simulation::report::{new_log_lines, render_status};
use lift_sim::simulation::traffic::random_trip;
use lift_sim::simulation::{Command, SimulationRunner};
use lift_sim::unwrap_or_exit;
use lift_sim::ElevatorController;

const DEFAULT_CONFIG: &str = "config.toml";

/// Single-car elevator simulation with random passenger traffic.
#[derive(Parser, Debug)]
#[clap(name = "lift-sim", version)]
struct Args {
    /// Path to the TOML configuration file
    #[clap(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Simulated seconds to run for
    #[clap(short, long, default_value_t = 60.0)]
    duration: f64,

    /// Tick as fast as possible on the main thread instead of in real time
    #[clap(long)]
    headless: bool,

    /// Seed for the random passenger trips
    #[clap(long)]
    seed: Option<u64>,

    /// Print the final snapshot as JSON
    #[clap(long)]
    json: bool,
}

enum Frame {
    Spawn,
    Status,
    Snapshot(Snapshot),
    Closed,
}

/* Main */
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    // Load the configuration
    let config = if !args.config.exists() && args.config == PathBuf::from(DEFAULT_CONFIG) {
        warn!("{} not found, using built-in defaults", DEFAULT_CONFIG);
        Config::default()
    } else {
        unwrap_or_exit!(config::load_config(&args.config))
    };

    if !(args.duration.is_finite() && args.duration > 0.0) {
        error!("ERROR: duration must be positive, got {}", args.duration);
        std::process::exit(1);
    }

    let rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let controller = if args.headless {
        run_headless(&config, args.duration, rng)
    } else {
        run_realtime(&config, args.duration, rng)
    };

    info!(
        "Simulation finished at t={:.2} with {} passengers still in the building",
        controller.now(),
        controller.passengers().len()
    );
    println!("{}", render_status(&controller.snapshot()));

    if args.json {
        println!(
            "{}",
            unwrap_or_exit!(serde_json::to_string_pretty(&controller.snapshot()))
        );
    }
}

/// Prints activity log lines that appeared since `seen` and remembers them.
fn print_new_lines(seen: &mut Vec<LogEntry>, snapshot: &Snapshot) {
    for line in new_log_lines(seen, &snapshot.log) {
        println!("{}", line);
    }
    *seen = snapshot.log.clone();
}

fn run_headless(config: &Config, duration: f64, mut rng: StdRng) -> ElevatorController {
    let mut controller = ElevatorController::new(config);
    let dt = config.simulation.frame_dt();
    let mut next_spawn = 0.0;
    let mut seen = Vec::new();

    while controller.now() < duration {
        if controller.now() >= next_spawn {
            let (source, target) = random_trip(&mut rng, controller.floor_count());
            unwrap_or_exit!(controller.spawn_passenger(source, target));
            next_spawn += config.simulation.spawn_interval;
        }
        unwrap_or_exit!(controller.tick(dt));
        print_new_lines(&mut seen, &controller.snapshot());
    }

    controller
}

fn run_realtime(config: &Config, duration: f64, rng: StdRng) -> ElevatorController {
    // Initialize channels
    let (command_tx, command_rx) = cbc::unbounded::<Command>();
    let (snapshot_tx, snapshot_rx) = cbc::unbounded::<Snapshot>();

    // Start the simulation module
    let runner = SimulationRunner::new(
        ElevatorController::new(config),
        rng,
        config.simulation.frame_interval(),
        config.simulation.frame_dt(),
        command_rx,
        snapshot_tx,
    );
    let runner_thread = unwrap_or_exit!(Builder::new()
        .name("simulation".into())
        .spawn(move || runner.run()));

    // Passengers arrive at a fixed simulated interval
    let spawn_every = Duration::from_secs_f64(
        config.simulation.spawn_interval / config.simulation.time_scale,
    );
    let spawner = cbc::tick(spawn_every);
    let status = cbc::tick(Duration::from_secs(1));
    let _ = command_tx.send(Command::SpawnRandom);

    let mut seen = Vec::new();
    let mut latest: Option<Snapshot> = None;

    loop {
        let frame = cbc::select! {
            recv(spawner) -> _ => Frame::Spawn,
            recv(status) -> _ => Frame::Status,
            recv(snapshot_rx) -> snapshot => match snapshot {
                Ok(snapshot) => Frame::Snapshot(snapshot),
                Err(_) => Frame::Closed,
            },
        };

        match frame {
            Frame::Spawn => {
                let _ = command_tx.send(Command::SpawnRandom);
            }
            Frame::Status => {
                if let Some(snapshot) = &latest {
                    println!("{}", render_status(snapshot));
                }
            }
            Frame::Snapshot(snapshot) => {
                print_new_lines(&mut seen, &snapshot);
                let done = snapshot.time >= duration;
                latest = Some(snapshot);
                if done {
                    break;
                }
            }
            Frame::Closed => {
                error!("Simulation thread stopped publishing");
                break;
            }
        }
    }

    let _ = command_tx.send(Command::Terminate);
    match runner_thread.join() {
        Ok(controller) => controller,
        Err(_) => {
            error!("ERROR: simulation thread panicked");
            std::process::exit(1);
        }
    }
}
