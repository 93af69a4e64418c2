/***************************************/
/*           Local modules             */
/***************************************/
use crate::shared::{Direction, HallCall};

/**
 * Pending requests for service.
 *
 * Car calls are destination floors requested from inside the car and are kept
 * sorted ascending. Hall calls are requests from a landing, kept in the order
 * they were made, one per floor regardless of direction. Both sets are
 * deduplicated; selecting which call to serve is up to the controller.
 *
 * Floors outside `0..n_floors` are a contract violation and panic. Callers
 * validate at their input boundary.
 */
#[derive(Debug, Clone)]
pub struct CallQueue {
    n_floors: u8,
    car_calls: Vec<u8>,
    hall_calls: Vec<HallCall>,
}

impl CallQueue {
    pub fn new(n_floors: u8) -> CallQueue {
        CallQueue {
            n_floors,
            car_calls: Vec::new(),
            hall_calls: Vec::new(),
        }
    }

    /// Returns `true` if the call was not already pending.
    pub fn request_car_call(&mut self, floor: u8) -> bool {
        self.check_floor(floor);
        match self.car_calls.binary_search(&floor) {
            Ok(_) => false,
            Err(index) => {
                self.car_calls.insert(index, floor);
                true
            }
        }
    }

    /// Returns `true` if the call was not already pending. A second hall call
    /// at the same floor is a no-op even if its direction differs.
    pub fn request_hall_call(&mut self, floor: u8, direction: Direction) -> bool {
        self.check_floor(floor);
        if self.hall_calls.iter().any(|call| call.floor == floor) {
            return false;
        }
        self.hall_calls.push(HallCall { floor, direction });
        true
    }

    /// Removes every call at `floor`.
    pub fn clear(&mut self, floor: u8) {
        self.car_calls.retain(|&f| f != floor);
        self.hall_calls.retain(|call| call.floor != floor);
    }

    /// Car call floors first, then hall call floors not already listed.
    pub fn pending(&self) -> Vec<u8> {
        let mut floors = self.car_calls.clone();
        for call in &self.hall_calls {
            if !floors.contains(&call.floor) {
                floors.push(call.floor);
            }
        }
        floors
    }

    pub fn is_empty(&self) -> bool {
        self.car_calls.is_empty() && self.hall_calls.is_empty()
    }

    pub fn car_calls(&self) -> &[u8] {
        &self.car_calls
    }

    pub fn hall_calls(&self) -> &[HallCall] {
        &self.hall_calls
    }

    fn check_floor(&self, floor: u8) {
        assert!(
            floor < self.n_floors,
            "call for floor {} outside building of {} floors",
            floor,
            self.n_floors
        );
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
