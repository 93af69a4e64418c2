pub mod macros;
pub mod structs;

pub use structs::clock_time;
pub use structs::Direction;
pub use structs::DoorState;
pub use structs::HallCall;
pub use structs::LogEntry;
pub use structs::LogKind;
pub use structs::Motion;
pub use structs::Passenger;
pub use structs::PassengerId;
pub use structs::PassengerState;
pub use structs::Snapshot;
