use std::cmp::Ordering;
use std::collections::BinaryHeap;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::PassengerId;

/// Deferred work committed to during a tick. Each action re-checks the live
/// state when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ExitPhase { floor: u8 },
    BoardingPhase { floor: u8 },
    CompleteBoarding { id: PassengerId },
    RemovePassenger { id: PassengerId },
    CloseDoors,
}

impl Action {
    // Passenger work due at the same instant as a close request runs first,
    // so the doors see the doorway as it is after that work.
    fn rank(&self) -> u8 {
        match self {
            Action::CloseDoors => 1,
            _ => 0,
        }
    }
}

/// Fire times are kept on a microsecond grid so delay chains that add up to
/// the same instant compare equal.
fn quantize(at: f64) -> f64 {
    (at * 1e6).round() / 1e6
}

#[derive(Debug, Clone)]
struct Scheduled {
    at: f64,
    seq: u64,
    action: Action,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Scheduled {}
impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
impl Ord for Scheduled {
    // Reversed so the max-heap pops the earliest, then passenger work, then
    // first scheduled.
    fn cmp(&self, other: &Self) -> Ordering {
        self.at
            .total_cmp(&other.at)
            .then(self.action.rank().cmp(&other.action.rank()))
            .then(self.seq.cmp(&other.seq))
            .reverse()
    }
}

/// Pending timed actions, released by fire time. At equal fire times passenger
/// work goes before `CloseDoors`, otherwise scheduling order holds.
#[derive(Debug, Clone, Default)]
pub struct ActionQueue {
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl ActionQueue {
    pub fn new() -> ActionQueue {
        ActionQueue::default()
    }

    pub fn schedule(&mut self, at: f64, action: Action) {
        self.queue.push(Scheduled {
            at: quantize(at),
            seq: self.next_seq,
            action,
        });
        self.next_seq += 1;
    }

    /// Pops the next action due at or before `now`, with its fire time.
    pub fn pop_due(&mut self, now: f64) -> Option<(f64, Action)> {
        if self.queue.peek()?.at > now {
            return None;
        }
        self.queue.pop().map(|s| (s.at, s.action))
    }

    pub fn next_due(&self) -> Option<f64> {
        self.queue.peek().map(|s| s.at)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod scheduler_tests {
    use super::*;

    #[test]
    fn test_pop_due_respects_time() {
        // Arrange
        let mut actions = ActionQueue::new();
        actions.schedule(2.0, Action::CloseDoors);
        actions.schedule(1.0, Action::ExitPhase { floor: 3 });

        // Act & Assert
        assert_eq!(actions.next_due(), Some(1.0));
        assert_eq!(actions.pop_due(0.5), None);
        assert_eq!(actions.pop_due(1.0), Some((1.0, Action::ExitPhase { floor: 3 })));
        assert_eq!(actions.pop_due(1.5), None);
        assert_eq!(actions.pop_due(5.0), Some((2.0, Action::CloseDoors)));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_equal_times_passenger_work_before_close() {
        // Arrange
        let mut actions = ActionQueue::new();
        let id = PassengerId(7);
        actions.schedule(5.5, Action::CloseDoors);
        actions.schedule(5.5, Action::RemovePassenger { id });
        actions.schedule(5.5, Action::BoardingPhase { floor: 1 });
        actions.schedule(5.5, Action::CompleteBoarding { id });

        // Act
        let order: Vec<Action> = std::iter::from_fn(|| actions.pop_due(6.0))
            .map(|(_, action)| action)
            .collect();

        // Assert
        assert_eq!(
            order,
            vec![
                Action::RemovePassenger { id },
                Action::BoardingPhase { floor: 1 },
                Action::CompleteBoarding { id },
                Action::CloseDoors,
            ]
        );
    }

    #[test]
    fn test_delay_chains_meet_at_same_instant() {
        // Arrange: (t + 1.5) + 4.0 and t + 5.5 may differ in the last bit
        let mut actions = ActionQueue::new();
        let id = PassengerId(1);
        let arrival = 10.0 + 1.0 / 60.0 * 58.0;
        actions.schedule(arrival + 5.5, Action::CloseDoors);
        actions.schedule((arrival + 1.5) + 4.0, Action::RemovePassenger { id });

        // Act
        let first = actions.pop_due(arrival + 6.0);
        let second = actions.pop_due(arrival + 6.0);

        // Assert
        assert_eq!(first.map(|(_, action)| action), Some(Action::RemovePassenger { id }));
        assert_eq!(second.map(|(_, action)| action), Some(Action::CloseDoors));
        assert_eq!(first.map(|(at, _)| at), second.map(|(at, _)| at));
    }

    #[test]
    fn test_len_tracks_queue() {
        let mut actions = ActionQueue::new();
        assert_eq!(actions.next_due(), None);
        actions.schedule(1.0, Action::CloseDoors);
        actions.schedule(1.0, Action::CloseDoors);
        assert_eq!(actions.len(), 2);
    }
}
