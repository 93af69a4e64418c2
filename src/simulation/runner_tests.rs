/*
 * Unit tests for the simulation runner
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 *  - test_runner_terminate
 *  - test_runner_spawn_publishes_snapshot
 *  - test_runner_spawn_random
 *  - test_runner_rejects_bad_command
 *  - test_runner_ticks_advance_time
 *  - test_runner_stops_when_senders_dropped
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod runner_tests {
    use crate::config::Config;
    use crate::elevator::ElevatorController;
    use crate::shared::{PassengerState, Snapshot};
    use crate::simulation::{Command, SimulationRunner};
    use crossbeam_channel::{unbounded, Receiver, Sender};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::thread::{spawn, JoinHandle};
    use std::time::Duration;

    fn setup_runner() -> (
        JoinHandle<ElevatorController>,
        Sender<Command>,    // command_tx
        Receiver<Snapshot>, // snapshot_rx
    ) {
        // Arrange mock channels
        let (command_tx, command_rx) = unbounded::<Command>();
        let (snapshot_tx, snapshot_rx) = unbounded::<Snapshot>();

        // Default configuration, one simulated second per real millisecond
        let controller = ElevatorController::new(&Config::default());
        let runner = SimulationRunner::new(
            controller,
            StdRng::seed_from_u64(1),
            Duration::from_millis(1),
            1.0 / 16.0,
            command_rx,
            snapshot_tx,
        );

        (spawn(move || runner.run()), command_tx, snapshot_rx)
    }

    /// Receives snapshots until one matches, failing after a few seconds.
    fn wait_for(snapshot_rx: &Receiver<Snapshot>, condition: impl Fn(&Snapshot) -> bool) -> Snapshot {
        loop {
            match snapshot_rx.recv_timeout(Duration::from_secs(5)) {
                Ok(snapshot) if condition(&snapshot) => return snapshot,
                Ok(_) => {}
                Err(e) => panic!("Error receiving from snapshot_rx: {:?}", e),
            }
        }
    }

    #[test]
    fn test_runner_terminate() {
        // Arrange
        let (runner_thread, command_tx, _snapshot_rx) = setup_runner();

        // Act
        command_tx.send(Command::Terminate).unwrap();
        let controller = runner_thread.join().unwrap();

        // Assert
        assert!(controller.passengers().is_empty());
    }

    #[test]
    fn test_runner_spawn_publishes_snapshot() {
        // Arrange
        let (runner_thread, command_tx, snapshot_rx) = setup_runner();

        // Act
        command_tx.send(Command::Spawn { source: 2, target: 5 }).unwrap();
        let snapshot = wait_for(&snapshot_rx, |s| !s.passengers.is_empty());

        // Assert
        assert_eq!(snapshot.passengers[0].source, 2);
        assert_eq!(snapshot.passengers[0].target, 5);

        // The car eventually picks the passenger up
        wait_for(&snapshot_rx, |s| {
            s.passengers
                .iter()
                .any(|p| p.state == PassengerState::InCar)
        });

        // Cleanup
        command_tx.send(Command::Terminate).unwrap();
        let controller = runner_thread.join().unwrap();
        assert!(controller.now() >= snapshot.time);
    }

    #[test]
    fn test_runner_spawn_random() {
        // Arrange
        let (runner_thread, command_tx, snapshot_rx) = setup_runner();

        // Act
        for _ in 0..3 {
            command_tx.send(Command::SpawnRandom).unwrap();
        }
        let snapshot = wait_for(&snapshot_rx, |s| s.passengers.len() == 3);

        // Assert
        for passenger in &snapshot.passengers {
            assert_ne!(passenger.source, passenger.target);
            assert!(passenger.target < 8);
        }

        // Cleanup
        command_tx.send(Command::Terminate).unwrap();
        runner_thread.join().unwrap();
    }

    #[test]
    fn test_runner_rejects_bad_command() {
        // Arrange
        let (runner_thread, command_tx, snapshot_rx) = setup_runner();

        // Act
        command_tx.send(Command::Spawn { source: 3, target: 3 }).unwrap();
        command_tx.send(Command::CarCall(42)).unwrap();
        command_tx.send(Command::CarCall(6)).unwrap();
        let snapshot = wait_for(&snapshot_rx, |s| !s.car_calls.is_empty());

        // Assert
        assert!(snapshot.passengers.is_empty());
        assert_eq!(snapshot.car_calls, vec![6]);

        // Cleanup
        command_tx.send(Command::Terminate).unwrap();
        runner_thread.join().unwrap();
    }

    #[test]
    fn test_runner_ticks_advance_time() {
        // Arrange
        let (runner_thread, command_tx, snapshot_rx) = setup_runner();

        // Act
        let first = wait_for(&snapshot_rx, |s| s.time > 0.0);
        let later = wait_for(&snapshot_rx, |s| s.time > first.time + 1.0);

        // Assert
        assert!(later.time > first.time);

        // Cleanup
        command_tx.send(Command::Terminate).unwrap();
        let controller = runner_thread.join().unwrap();
        assert!(controller.now() >= later.time);
    }

    #[test]
    fn test_runner_stops_when_senders_dropped() {
        // Arrange
        let (runner_thread, command_tx, _snapshot_rx) = setup_runner();

        // Act
        drop(command_tx);

        // Assert
        assert!(runner_thread.join().is_ok());
    }
}
