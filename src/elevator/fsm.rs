/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::{debug, warn};

/***************************************/
/*           Local modules             */
/***************************************/
use crate::config::{Config, TimingConfig};
use crate::elevator::activity_log::ActivityLog;
use crate::elevator::call_queue::CallQueue;
use crate::elevator::door::{DoorController, DoorEvent};
use crate::elevator::passengers::PassengerRegistry;
use crate::elevator::scheduler::{Action, ActionQueue};
use crate::error::SimError;
use crate::shared::{Direction, DoorState, Motion, Passenger, PassengerId, Snapshot};

/**
 * Dispatch-and-door controller for a single car.
 *
 * The `ElevatorController` owns every piece of simulation state and is driven
 * by `tick`. While the doors are closed it heads for the nearest pending call;
 * on arrival it opens the doors, clears the floor's calls and schedules the
 * exit phase, the boarding phase and the close request as timed actions.
 * Passengers, calls and the activity log are only mutated through its
 * methods; renderers read a `Snapshot`.
 *
 * # Fields
 * - `n_floors`:                Number of floors, indexed `0..n_floors`.
 * - `floor_height`:            Distance between two floors.
 * - `speed`:                   Constant car speed.
 * - `arrival_tolerance`:       Distance below which the car counts as arrived.
 * - `obstruction_tolerance`:   Distance within which the car counts as at a floor for the doorway check.
 * - `timing`:                  Delays of the arrival sequence.
 * - `now`:                     Simulated time.
 * - `position`:                Car elevation along the shaft, only changed by dispatch.
 * - `target_floor`:            Floor being approached or served.
 * - `motion`:                  Current direction of travel.
 * - `door`:                    Door state machine.
 * - `calls`:                   Pending car and hall calls.
 * - `passengers`:              Every passenger not yet removed.
 * - `actions`:                 Pending timed actions.
 * - `log`:                     Bounded activity log.
 */
#[derive(Debug, Clone)]
pub struct ElevatorController {
    n_floors: u8,
    floor_height: f64,
    speed: f64,
    arrival_tolerance: f64,
    obstruction_tolerance: f64,
    timing: TimingConfig,

    now: f64,
    position: f64,
    target_floor: Option<u8>,
    motion: Motion,
    door: DoorController,
    calls: CallQueue,
    passengers: PassengerRegistry,
    actions: ActionQueue,
    log: ActivityLog,
}

impl ElevatorController {
    pub fn new(config: &Config) -> ElevatorController {
        ElevatorController {
            n_floors: config.building.floor_count,
            floor_height: config.building.floor_height,
            speed: config.elevator.speed,
            arrival_tolerance: config.elevator.arrival_tolerance,
            obstruction_tolerance: config.elevator.obstruction_tolerance,
            timing: config.timing.clone(),
            now: 0.0,
            position: 0.0,
            target_floor: None,
            motion: Motion::Idle,
            door: DoorController::new(config.elevator.door_speed),
            calls: CallQueue::new(config.building.floor_count),
            passengers: PassengerRegistry::new(),
            actions: ActionQueue::new(),
            log: ActivityLog::new(config.simulation.log_capacity),
        }
    }

    /***************************************/
    /*               Inputs                */
    /***************************************/

    /// Advances the simulation by `dt`.
    ///
    /// Due timed actions fire first, in order. Then either the car moves (doors
    /// closed) or the doors move, so one tick never does both except for the
    /// door starting to open on the tick the car arrives.
    pub fn tick(&mut self, dt: f64) -> Result<(), SimError> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(SimError::InvalidTimeStep(dt));
        }
        self.now += dt;

        while let Some((at, action)) = self.actions.pop_due(self.now) {
            debug!("t={:.3}: firing {:?} (due {:.3})", self.now, action, at);
            self.fire(at, action);
        }

        if self.door.is_closed() {
            self.dispatch(dt);
        }
        if !self.door.is_closed() {
            self.operate_door(dt);
        }
        Ok(())
    }

    /// Creates a waiting passenger and registers a hall call at its floor.
    pub fn spawn_passenger(&mut self, source: u8, target: u8) -> Result<PassengerId, SimError> {
        self.check_floor(source)?;
        self.check_floor(target)?;
        if source == target {
            return Err(SimError::SameSourceAndTarget(source));
        }

        let id = self.passengers.spawn(source, target);
        self.calls
            .request_hall_call(source, Direction::between(source, target));
        self.log
            .message(self.now, format!("New passenger spawned at Floor {}", source));
        debug!("Passenger {} spawned: {} -> {}", id, source, target);
        Ok(id)
    }

    /// Registers a car call as if a button inside the car was pressed.
    pub fn request_car_call(&mut self, floor: u8) -> Result<(), SimError> {
        self.check_floor(floor)?;
        if self.calls.request_car_call(floor) {
            debug!("Car call registered for floor {}", floor);
        }
        Ok(())
    }

    /***************************************/
    /*               Outputs               */
    /***************************************/
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn floor_count(&self) -> u8 {
        self.n_floors
    }

    pub fn floor_height(&self) -> f64 {
        self.floor_height
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    /// The floor the car is stopped at, if it is within arrival tolerance of one.
    pub fn current_floor(&self) -> Option<u8> {
        self.floor_within(self.arrival_tolerance)
    }

    pub fn target_floor(&self) -> Option<u8> {
        self.target_floor
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn door_state(&self) -> DoorState {
        self.door.state()
    }

    pub fn door_open_fraction(&self) -> f64 {
        self.door.open_fraction()
    }

    pub fn passengers(&self) -> &[Passenger] {
        self.passengers.all()
    }

    pub fn passenger(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.get(id)
    }

    pub fn calls(&self) -> &CallQueue {
        &self.calls
    }

    pub fn pending_calls(&self) -> Vec<u8> {
        self.calls.pending()
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// True while someone boarding or exiting at the car's floor is in the doorway.
    pub fn is_obstructed(&self) -> bool {
        match self.floor_within(self.obstruction_tolerance) {
            Some(floor) => self.passengers.blocks_floor(floor),
            None => false,
        }
    }

    /// The pending floor closest to the car. Ties go to the call listed first,
    /// car calls before hall calls. Direction of hall calls is not considered.
    pub fn select_target(&self) -> Option<u8> {
        let current = self.position / self.floor_height;
        let mut nearest: Option<u8> = None;
        for floor in self.calls.pending() {
            let distance = (floor as f64 - current).abs();
            match nearest {
                Some(best) if distance >= (best as f64 - current).abs() => {}
                _ => nearest = Some(floor),
            }
        }
        nearest
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time: self.now,
            floor_count: self.n_floors,
            floor_height: self.floor_height,
            position: self.position,
            current_floor: self.current_floor(),
            target_floor: self.target_floor,
            motion: self.motion,
            door_state: self.door.state(),
            door_open_fraction: self.door.open_fraction(),
            passengers: self.passengers.all().to_vec(),
            pending_calls: self.calls.pending(),
            car_calls: self.calls.car_calls().to_vec(),
            hall_calls: self.calls.hall_calls().to_vec(),
            log: self.log.entries().cloned().collect(),
        }
    }

    /***************************************/
    /*            Dispatching              */
    /***************************************/
    fn dispatch(&mut self, dt: f64) {
        let target = match self.select_target() {
            Some(floor) => floor,
            None => {
                self.target_floor = None;
                self.motion = Motion::Idle;
                return;
            }
        };
        self.target_floor = Some(target);

        let dy = self.elevation(target) - self.position;
        if dy.abs() < self.arrival_tolerance {
            self.arrive(target);
            return;
        }

        self.position += dy.signum() * dy.abs().min(self.speed * dt);
        self.motion = if dy > 0.0 { Motion::Up } else { Motion::Down };
    }

    fn arrive(&mut self, floor: u8) {
        let now = self.now;
        self.position = self.elevation(floor);
        self.motion = Motion::Idle;
        self.door.request_open();

        self.log.separator(now);
        self.log.message(now, format!("Arrived at Floor {}", floor));

        // Every call at this floor is served by this stop.
        self.calls.clear(floor);

        self.actions
            .schedule(now + self.timing.exit_delay, Action::ExitPhase { floor });
        self.actions
            .schedule(now + self.timing.boarding_delay, Action::BoardingPhase { floor });
        self.actions
            .schedule(now + self.timing.door_dwell, Action::CloseDoors);
    }

    /***************************************/
    /*                Doors                */
    /***************************************/
    fn operate_door(&mut self, dt: f64) {
        let obstructed = self.is_obstructed();
        match self.door.step(dt, obstructed) {
            Some(DoorEvent::FullyOpen) => {
                self.log.message(self.now, "Doors fully open");
            }
            Some(DoorEvent::Reopening) => {
                self.log
                    .message(self.now, "Doors re-opening (passenger detected)");
                self.actions
                    .schedule(self.now + self.timing.reopen_dwell, Action::CloseDoors);
            }
            Some(DoorEvent::Closed) => {
                self.log.message(self.now, "Doors closed");
                self.log.separator(self.now);
            }
            None => {}
        }
    }

    fn close_doors(&mut self, at: f64) {
        match self.door.state() {
            DoorState::Open if !self.is_obstructed() => {
                self.door.request_close();
                self.log.message(at, "Doors closing...");
            }
            DoorState::Open | DoorState::Opening => {
                debug!("Doors busy at t={:.3}, holding them open", at);
                self.actions
                    .schedule(at + self.timing.reopen_dwell, Action::CloseDoors);
            }
            DoorState::Closing | DoorState::Closed => {}
        }
    }

    /***************************************/
    /*          Timed passenger work       */
    /***************************************/
    fn fire(&mut self, at: f64, action: Action) {
        match action {
            Action::ExitPhase { floor } => self.exit_phase(at, floor),
            Action::BoardingPhase { floor } => self.boarding_phase(at, floor),
            Action::CompleteBoarding { id } => self.complete_boarding(at, id),
            Action::RemovePassenger { id } => {
                if let Some(passenger) = self.passengers.remove_exited(id) {
                    debug!(
                        "Passenger {} left the building at floor {}",
                        passenger.id, passenger.target
                    );
                }
            }
            Action::CloseDoors => self.close_doors(at),
        }
    }

    fn exit_phase(&mut self, at: f64, floor: u8) {
        let riders = self.passengers.riding_to(floor);
        if !self.is_serving(floor) {
            if !riders.is_empty() {
                warn!("Exit at floor {} superseded, calling the car back", floor);
                self.calls.request_car_call(floor);
            }
            return;
        }

        for id in riders {
            if self.passengers.begin_exiting(id) {
                self.log.separator(at);
                self.log
                    .message(at, format!("Passenger exiting at Floor {}", floor));
                self.log.separator(at);
                self.actions
                    .schedule(at + self.timing.exit_dwell, Action::RemovePassenger { id });
            }
        }
    }

    fn boarding_phase(&mut self, at: f64, floor: u8) {
        let waiting = self.passengers.waiting_at(floor);
        if !self.is_serving(floor) {
            for id in waiting {
                if let Some(p) = self.passengers.get(id) {
                    let direction = Direction::between(p.source, p.target);
                    warn!("Boarding at floor {} superseded, calling the car back", floor);
                    self.calls.request_hall_call(floor, direction);
                }
            }
            return;
        }

        for id in waiting {
            if self.passengers.begin_boarding(id) {
                self.log.separator(at);
                self.log
                    .message(at, format!("Passenger boarding at Floor {}", floor));
                self.log.separator(at);
                self.actions.schedule(
                    at + self.timing.boarding_dwell,
                    Action::CompleteBoarding { id },
                );
            }
        }
    }

    fn complete_boarding(&mut self, at: f64, id: PassengerId) {
        if !self.passengers.finish_boarding(id) {
            return;
        }
        if let Some(target) = self.passengers.get(id).map(|p| p.target) {
            self.calls.request_car_call(target);
            self.log
                .message(at, format!("Passenger requested Floor {}", target));
        }
    }

    /***************************************/
    /*              Helpers                */
    /***************************************/
    fn is_serving(&self, floor: u8) -> bool {
        !self.door.is_closed() && self.current_floor() == Some(floor)
    }

    fn elevation(&self, floor: u8) -> f64 {
        floor as f64 * self.floor_height
    }

    fn floor_within(&self, tolerance: f64) -> Option<u8> {
        let nearest = (self.position / self.floor_height).round();
        if nearest < 0.0 || nearest >= self.n_floors as f64 {
            return None;
        }
        let floor = nearest as u8;
        if (self.elevation(floor) - self.position).abs() < tolerance {
            Some(floor)
        } else {
            None
        }
    }

    fn check_floor(&self, floor: u8) -> Result<(), SimError> {
        if floor >= self.n_floors {
            return Err(SimError::FloorOutOfRange {
                floor,
                floor_count: self.n_floors,
            });
        }
        Ok(())
    }

    /***************************************/
    /*           Test helpers              */
    /***************************************/
    #[cfg(test)]
    pub(crate) fn test_set_position(&mut self, position: f64) {
        self.position = position;
    }

    #[cfg(test)]
    pub(crate) fn test_calls_mut(&mut self) -> &mut CallQueue {
        &mut self.calls
    }
}
