/*
 * Unit tests for the door controller
 *
 * The unit tests follows the Arrange, Act, Assert pattern.
 *
 * Tests:
 * - test_door_init
 * - test_door_opens_fully
 * - test_door_requests_only_from_rest
 * - test_door_closes_and_reports
 * - test_door_reopens_when_obstructed
 * - test_door_opening_ignores_obstruction
 * - test_door_open_holds_without_request
 * - test_door_fraction_monotonic_and_bounded
 */

/***************************************/
/*             Unit tests              */
/***************************************/
#[cfg(test)]
mod door_tests {
    use crate::elevator::door::{DoorController, DoorEvent};
    use crate::shared::DoorState::{Closed, Closing, Open, Opening};

    fn open_door() -> DoorController {
        let mut door = DoorController::new(1.0);
        door.request_open();
        door.step(1.0, false);
        door
    }

    #[test]
    fn test_door_init() {
        let door = DoorController::new(1.0);
        assert_eq!(door.state(), Closed);
        assert_eq!(door.open_fraction(), 0.0);
        assert!(door.is_closed());
    }

    #[test]
    fn test_door_opens_fully() {
        // Arrange
        let mut door = DoorController::new(1.0);
        assert!(door.request_open());

        // Act
        let first = door.step(0.6, false);
        let fraction_after_first = door.open_fraction();
        let second = door.step(0.6, false);

        // Assert
        assert_eq!(first, None);
        assert!((fraction_after_first - 0.6).abs() < 1e-9);
        assert_eq!(second, Some(DoorEvent::FullyOpen));
        assert_eq!(door.state(), Open);
        assert_eq!(door.open_fraction(), 1.0);
    }

    #[test]
    fn test_door_requests_only_from_rest() {
        let mut door = DoorController::new(1.0);

        // Closing a closed door is refused
        assert!(!door.request_close());

        assert!(door.request_open());
        // Opening twice is refused, as is closing while opening
        assert!(!door.request_open());
        assert!(!door.request_close());
        assert_eq!(door.state(), Opening);

        door.step(2.0, false);
        assert!(!door.request_open());
        assert!(door.request_close());
        assert_eq!(door.state(), Closing);
    }

    #[test]
    fn test_door_closes_and_reports() {
        // Arrange
        let mut door = open_door();
        door.request_close();

        // Act
        let first = door.step(0.5, false);
        let second = door.step(0.5, false);

        // Assert
        assert_eq!(first, None);
        assert_eq!(second, Some(DoorEvent::Closed));
        assert_eq!(door.state(), Closed);
        assert_eq!(door.open_fraction(), 0.0);

        // Closed door stays put
        assert_eq!(door.step(1.0, true), None);
        assert_eq!(door.state(), Closed);
    }

    #[test]
    fn test_door_reopens_when_obstructed() {
        // Arrange
        let mut door = open_door();
        door.request_close();
        door.step(0.4, false);
        let fraction_before = door.open_fraction();

        // Act
        let event = door.step(0.4, true);

        // Assert
        assert_eq!(event, Some(DoorEvent::Reopening));
        assert_eq!(door.state(), Opening);
        assert_eq!(door.open_fraction(), fraction_before);

        // A door that stays obstructed never reaches closed
        for _ in 0..10 {
            door.step(0.4, true);
            assert_ne!(door.state(), Closed);
        }
        assert_eq!(door.state(), Open);
    }

    #[test]
    fn test_door_opening_ignores_obstruction() {
        let mut door = DoorController::new(1.0);
        door.request_open();

        assert_eq!(door.step(0.5, true), None);
        assert_eq!(door.state(), Opening);
        assert_eq!(door.step(0.5, false), Some(DoorEvent::FullyOpen));
    }

    #[test]
    fn test_door_open_holds_without_request() {
        let mut door = open_door();
        for _ in 0..100 {
            assert_eq!(door.step(0.1, false), None);
        }
        assert_eq!(door.state(), Open);
        assert_eq!(door.open_fraction(), 1.0);
    }

    #[test]
    fn test_door_fraction_monotonic_and_bounded() {
        // Arrange
        let mut door = DoorController::new(0.7);
        door.request_open();
        let mut previous = door.open_fraction();

        // Act & Assert: opening run
        while door.state() == Opening {
            door.step(0.13, false);
            let fraction = door.open_fraction();
            assert!(fraction >= previous);
            assert!((0.0..=1.0).contains(&fraction));
            previous = fraction;
        }
        assert_eq!(door.state(), Open);

        // Act & Assert: closing run
        door.request_close();
        while door.state() == Closing {
            door.step(0.13, false);
            let fraction = door.open_fraction();
            assert!(fraction <= previous);
            assert!((0.0..=1.0).contains(&fraction));
            previous = fraction;
        }
        assert_eq!(door.state(), Closed);
    }
}
