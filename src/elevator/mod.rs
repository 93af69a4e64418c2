pub mod activity_log;
pub mod call_queue;
pub mod door;
pub mod door_tests;
pub mod fsm;
pub mod passengers;
pub mod scheduler;

pub use activity_log::ActivityLog;
pub use call_queue::CallQueue;
pub use door::DoorController;
pub use fsm::ElevatorController;
pub use passengers::PassengerRegistry;
