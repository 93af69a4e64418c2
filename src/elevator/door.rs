/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::DoorState;

/// Completion or interruption reported by one door step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DoorEvent {
    FullyOpen,
    Reopening,
    Closed,
}

/**
 * Door state machine.
 *
 * The controller requests `opening` on arrival and `closing` after the dwell;
 * everything else happens in `step`: an opening door runs to fully open and
 * cannot be interrupted, a closing door reverses to `opening` as soon as it is
 * obstructed. The open fraction stays in [0, 1] and is 0 only when closed and
 * 1 only when open, once a step has followed the last request.
 */
#[derive(Debug, Clone)]
pub struct DoorController {
    state: DoorState,
    open_fraction: f64,
    rate: f64,
}

impl DoorController {
    pub fn new(rate: f64) -> DoorController {
        DoorController {
            state: DoorState::Closed,
            open_fraction: 0.0,
            rate,
        }
    }

    pub fn state(&self) -> DoorState {
        self.state
    }

    pub fn open_fraction(&self) -> f64 {
        self.open_fraction
    }

    pub fn is_closed(&self) -> bool {
        self.state == DoorState::Closed
    }

    /// Starts opening a closed door. Returns `false` in any other state.
    pub fn request_open(&mut self) -> bool {
        if self.state != DoorState::Closed {
            return false;
        }
        self.state = DoorState::Opening;
        true
    }

    /// Starts closing a fully open door. Returns `false` in any other state.
    pub fn request_close(&mut self) -> bool {
        if self.state != DoorState::Open {
            return false;
        }
        self.state = DoorState::Closing;
        true
    }

    /// Advances the door by `dt` given the current obstruction condition.
    pub fn step(&mut self, dt: f64, obstructed: bool) -> Option<DoorEvent> {
        match self.state {
            DoorState::Opening => {
                self.open_fraction = (self.open_fraction + self.rate * dt).min(1.0);
                if self.open_fraction >= 1.0 {
                    self.state = DoorState::Open;
                    return Some(DoorEvent::FullyOpen);
                }
                None
            }
            DoorState::Closing => {
                if obstructed {
                    self.state = DoorState::Opening;
                    return Some(DoorEvent::Reopening);
                }
                self.open_fraction = (self.open_fraction - self.rate * dt).max(0.0);
                if self.open_fraction <= 0.0 {
                    self.state = DoorState::Closed;
                    return Some(DoorEvent::Closed);
                }
                None
            }
            // Open holds until the controller asks to close; closed is idle.
            DoorState::Open | DoorState::Closed => None,
        }
    }
}
