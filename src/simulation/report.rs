/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{clock_time, DoorState, LogEntry, Motion, PassengerState, Snapshot};

/// One-line text status of a snapshot.
pub fn render_status(snapshot: &Snapshot) -> String {
    let floor = snapshot.position / snapshot.floor_height;
    let motion = match snapshot.motion {
        Motion::Idle => "-",
        Motion::Up => "^",
        Motion::Down => "v",
    };
    let door = match snapshot.door_state {
        DoorState::Closed => "closed",
        DoorState::Opening => "opening",
        DoorState::Open => "open",
        DoorState::Closing => "closing",
    };

    let count = |state: PassengerState| {
        snapshot
            .passengers
            .iter()
            .filter(|p| p.state == state)
            .count()
    };

    format!(
        "[{}] car {:.2} {} | door {} {:>3.0}% | waiting {} boarding {} riding {} exiting {} | calls {:?}",
        clock_time(snapshot.time),
        floor,
        motion,
        door,
        snapshot.door_open_fraction * 100.0,
        count(PassengerState::Waiting),
        count(PassengerState::Boarding),
        count(PassengerState::InCar),
        count(PassengerState::Exiting),
        snapshot.pending_calls,
    )
}

/// Log messages in `current` that are newer than anything in `previous`,
/// oldest first. Both logs are newest first.
pub fn new_log_lines<'a>(previous: &[LogEntry], current: &'a [LogEntry]) -> Vec<&'a LogEntry> {
    let newest_seen = previous.first().map(|entry| entry.seq);
    current
        .iter()
        .rev()
        .filter(|entry| newest_seen.map_or(true, |seen| entry.seq > seen))
        .filter(|entry| entry.message().is_some())
        .collect()
}

/***************************************/
/*             Unit tests              */
/***************************************/
