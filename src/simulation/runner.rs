/***************************************/
/*        3rd party libraries          */
/***************************************/
use crossbeam_channel as cbc;
use log::{debug, error, warn};
use rand::rngs::StdRng;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::elevator::ElevatorController;
use crate::shared::Snapshot;
use crate::simulation::traffic::random_trip;

/***************************************/
/*               Enums                 */
/***************************************/
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Spawn { source: u8, target: u8 },
    SpawnRandom,
    CarCall(u8),
    Terminate,
}

enum Event {
    Tick,
    Command(Command),
    Terminate,
}

/**
 * Clock driver for the elevator controller.
 *
 * The `SimulationRunner` owns the controller on its own thread and advances it
 * by a fixed `dt` on every frame of a crossbeam ticker. Collaborators talk to
 * it only through channels: commands in, snapshots out. A snapshot is
 * published after every tick and every command.
 *
 * # Fields
 * - `controller`:          The simulation being driven.
 * - `rng`:                 Source of random passenger trips.
 * - `frame_interval`:      Real time between ticks.
 * - `frame_dt`:            Simulated time advanced per tick.
 * - `command_rx`:          Receives spawn, car call and terminate commands.
 * - `snapshot_tx`:         Publishes the state after every change.
 */
pub struct SimulationRunner {
    controller: ElevatorController,
    rng: StdRng,
    frame_interval: Duration,
    frame_dt: f64,
    command_rx: cbc::Receiver<Command>,
    snapshot_tx: cbc::Sender<Snapshot>,
}

impl SimulationRunner {
    pub fn new(
        controller: ElevatorController,
        rng: StdRng,
        frame_interval: Duration,
        frame_dt: f64,
        command_rx: cbc::Receiver<Command>,
        snapshot_tx: cbc::Sender<Snapshot>,
    ) -> SimulationRunner {
        SimulationRunner {
            controller,
            rng,
            frame_interval,
            frame_dt,
            command_rx,
            snapshot_tx,
        }
    }

    /// Runs until `Command::Terminate` arrives or every command sender is
    /// dropped, then hands the controller back.
    pub fn run(mut self) -> ElevatorController {
        let ticker = cbc::tick(self.frame_interval);

        // Main loop
        loop {
            let event = cbc::select! {
                recv(ticker) -> _ => Event::Tick,
                recv(self.command_rx) -> command => match command {
                    Ok(Command::Terminate) => Event::Terminate,
                    Ok(command) => Event::Command(command),
                    Err(_) => Event::Terminate,
                },
            };

            match event {
                Event::Tick => {
                    if let Err(e) = self.controller.tick(self.frame_dt) {
                        error!("Tick rejected: {}", e);
                        break;
                    }
                }
                Event::Command(command) => self.handle_command(command),
                Event::Terminate => {
                    debug!("Simulation runner terminating at t={:.3}", self.controller.now());
                    break;
                }
            }

            // Nobody listening is fine, the renderer may have gone away.
            let _ = self.snapshot_tx.send(self.controller.snapshot());
        }

        self.controller
    }

    fn handle_command(&mut self, command: Command) {
        let result = match command {
            Command::Spawn { source, target } => self
                .controller
                .spawn_passenger(source, target)
                .map(|_| ()),
            Command::SpawnRandom => {
                let (source, target) = random_trip(&mut self.rng, self.controller.floor_count());
                self.controller.spawn_passenger(source, target).map(|_| ())
            }
            Command::CarCall(floor) => self.controller.request_car_call(floor),
            Command::Terminate => Ok(()),
        };

        if let Err(e) = result {
            warn!("Command {:?} rejected: {}", command, e);
        }
    }
}
