/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::Deserialize;
use serde::Serialize;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DoorState {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Requested travel direction of a hall call.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn between(source: u8, target: u8) -> Direction {
        if target > source {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}

/// What the car is doing right now.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Motion {
    Idle,
    Up,
    Down,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HallCall {
    pub floor: u8,
    pub direction: Direction,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PassengerId(pub u64);

impl fmt::Display for PassengerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PassengerState {
    Waiting,
    Boarding,
    InCar,
    Exiting,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Passenger {
    pub id: PassengerId,
    pub source: u8,
    pub target: u8,
    pub state: PassengerState,
}

impl Passenger {
    /// The floor a boarding or exiting passenger keeps the doors open at.
    pub fn blocking_floor(&self) -> Option<u8> {
        match self.state {
            PassengerState::Boarding => Some(self.source),
            PassengerState::Exiting => Some(self.target),
            PassengerState::Waiting | PassengerState::InCar => None,
        }
    }

    /// Where a renderer should move this passenger toward, as (depth, elevation).
    /// Depth 0 is the car; larger values are further into the landing.
    pub fn anchor(&self, elevator_position: f64, floor_height: f64) -> (f64, f64) {
        match self.state {
            PassengerState::Waiting => (3.5, self.source as f64 * floor_height),
            PassengerState::Boarding => (0.0, self.source as f64 * floor_height),
            PassengerState::InCar => (0.0, elevator_position),
            PassengerState::Exiting => (4.5, self.target as f64 * floor_height),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", content = "message", rename_all = "lowercase")]
pub enum LogKind {
    Message(String),
    Separator,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    /// Position in the whole history, counting entries already dropped.
    pub seq: u64,
    pub time: f64,
    #[serde(flatten)]
    pub kind: LogKind,
}

impl LogEntry {
    pub fn message(&self) -> Option<&str> {
        match &self.kind {
            LogKind::Message(message) => Some(message),
            LogKind::Separator => None,
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            LogKind::Message(message) => write!(f, "[{}] {}", clock_time(self.time), message),
            LogKind::Separator => Ok(()),
        }
    }
}

/// Formats simulated seconds as HH:MM:SS.
pub fn clock_time(seconds: f64) -> String {
    let total = seconds.max(0.0) as u64;
    format!("{:02}:{:02}:{:02}", total / 3600, (total / 60) % 60, total % 60)
}

/// Read-only view of the whole simulation, handed to renderers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub time: f64,
    pub floor_count: u8,
    pub floor_height: f64,
    pub position: f64,
    pub current_floor: Option<u8>,
    pub target_floor: Option<u8>,
    pub motion: Motion,
    pub door_state: DoorState,
    pub door_open_fraction: f64,
    pub passengers: Vec<Passenger>,
    pub pending_calls: Vec<u8>,
    pub car_calls: Vec<u8>,
    pub hall_calls: Vec<HallCall>,
    pub log: Vec<LogEntry>,
}

/***************************************/
/*             Unit tests              */
/***************************************/
