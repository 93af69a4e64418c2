/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Passenger, PassengerId, PassengerState};

/**
 * Authoritative passenger collection.
 *
 * Passengers move strictly forward through
 * `waiting -> boarding -> in_car -> exiting` and are then removed. Each
 * transition method checks the current state and returns `false` (leaving the
 * passenger untouched) when it does not apply, so timed actions can call them
 * without knowing what happened since they were scheduled.
 */
#[derive(Debug, Clone, Default)]
pub struct PassengerRegistry {
    passengers: Vec<Passenger>,
    next_id: u64,
}

impl PassengerRegistry {
    pub fn new() -> PassengerRegistry {
        PassengerRegistry::default()
    }

    /// Adds a waiting passenger. Floors are validated by the caller.
    pub fn spawn(&mut self, source: u8, target: u8) -> PassengerId {
        let id = PassengerId(self.next_id);
        self.next_id += 1;
        self.passengers.push(Passenger {
            id,
            source,
            target,
            state: PassengerState::Waiting,
        });
        id
    }

    pub fn get(&self, id: PassengerId) -> Option<&Passenger> {
        self.passengers.iter().find(|p| p.id == id)
    }

    pub fn all(&self) -> &[Passenger] {
        &self.passengers
    }

    pub fn len(&self) -> usize {
        self.passengers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passengers.is_empty()
    }

    pub fn waiting_at(&self, floor: u8) -> Vec<PassengerId> {
        self.select(|p| p.state == PassengerState::Waiting && p.source == floor)
    }

    pub fn riding_to(&self, floor: u8) -> Vec<PassengerId> {
        self.select(|p| p.state == PassengerState::InCar && p.target == floor)
    }

    pub fn begin_boarding(&mut self, id: PassengerId) -> bool {
        self.advance(id, PassengerState::Waiting, PassengerState::Boarding)
    }

    pub fn finish_boarding(&mut self, id: PassengerId) -> bool {
        self.advance(id, PassengerState::Boarding, PassengerState::InCar)
    }

    pub fn begin_exiting(&mut self, id: PassengerId) -> bool {
        self.advance(id, PassengerState::InCar, PassengerState::Exiting)
    }

    /// Deletes a passenger that has finished exiting.
    pub fn remove_exited(&mut self, id: PassengerId) -> Option<Passenger> {
        let index = self
            .passengers
            .iter()
            .position(|p| p.id == id && p.state == PassengerState::Exiting)?;
        Some(self.passengers.remove(index))
    }

    /// True if someone boarding or exiting at `floor` is in the doorway.
    pub fn blocks_floor(&self, floor: u8) -> bool {
        self.passengers
            .iter()
            .any(|p| p.blocking_floor() == Some(floor))
    }

    fn select(&self, predicate: impl Fn(&Passenger) -> bool) -> Vec<PassengerId> {
        self.passengers
            .iter()
            .filter(|p| predicate(p))
            .map(|p| p.id)
            .collect()
    }

    fn advance(&mut self, id: PassengerId, from: PassengerState, to: PassengerState) -> bool {
        match self.passengers.iter_mut().find(|p| p.id == id) {
            Some(passenger) if passenger.state == from => {
                passenger.state = to;
                true
            }
            _ => false,
        }
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
