/***************************************/
/*        3rd party libraries          */
/***************************************/
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/***************************************/
/*           Local modules             */
/***************************************/
use crate::error::ConfigError;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub building: BuildingConfig,
    pub elevator: ElevatorConfig,
    pub timing: TimingConfig,
    pub simulation: SimulationConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct BuildingConfig {
    pub floor_count: u8,
    pub floor_height: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ElevatorConfig {
    pub speed: f64,
    pub door_speed: f64,
    pub arrival_tolerance: f64,
    pub obstruction_tolerance: f64,
}

/// Delays of the arrival sequence, in simulated seconds.
///
/// `exit_delay`, `boarding_delay` and `door_dwell` are measured from arrival,
/// the dwells from the passenger transition that started them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct TimingConfig {
    pub exit_delay: f64,
    pub exit_dwell: f64,
    pub boarding_delay: f64,
    pub boarding_dwell: f64,
    pub door_dwell: f64,
    pub reopen_dwell: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    pub frame_interval_ms: u64,
    pub time_scale: f64,
    pub spawn_interval: f64,
    pub log_capacity: usize,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        BuildingConfig {
            floor_count: 8,
            floor_height: 1.5,
        }
    }
}

impl Default for ElevatorConfig {
    fn default() -> Self {
        ElevatorConfig {
            speed: 1.0,
            door_speed: 1.0,
            arrival_tolerance: 0.05,
            obstruction_tolerance: 0.1,
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        TimingConfig {
            exit_delay: 1.5,
            exit_dwell: 4.0,
            boarding_delay: 2.5,
            boarding_dwell: 2.5,
            door_dwell: 5.5,
            reopen_dwell: 2.0,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            frame_interval_ms: 16,
            time_scale: 1.0,
            spawn_interval: 6.0,
            log_capacity: 50,
        }
    }
}

impl SimulationConfig {
    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }

    /// Simulated time covered by one driver frame.
    pub fn frame_dt(&self) -> f64 {
        self.frame_interval().as_secs_f64() * self.time_scale
    }
}

/***************************************/
/*             Public API              */
/***************************************/
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let config_str = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let config: Config = toml::from_str(&config_str)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.building.floor_count < 2 {
            return Err(ConfigError::Invalid(format!(
                "building.floor_count must be at least 2, got {}",
                self.building.floor_count
            )));
        }

        let positive = [
            ("building.floor_height", self.building.floor_height),
            ("elevator.speed", self.elevator.speed),
            ("elevator.door_speed", self.elevator.door_speed),
            ("elevator.arrival_tolerance", self.elevator.arrival_tolerance),
            ("elevator.obstruction_tolerance", self.elevator.obstruction_tolerance),
            ("timing.exit_delay", self.timing.exit_delay),
            ("timing.exit_dwell", self.timing.exit_dwell),
            ("timing.boarding_delay", self.timing.boarding_delay),
            ("timing.boarding_dwell", self.timing.boarding_dwell),
            ("timing.door_dwell", self.timing.door_dwell),
            ("timing.reopen_dwell", self.timing.reopen_dwell),
            ("simulation.time_scale", self.simulation.time_scale),
            ("simulation.spawn_interval", self.simulation.spawn_interval),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be positive and finite, got {}",
                    key, value
                )));
            }
        }

        if self.elevator.arrival_tolerance >= self.building.floor_height / 2.0 {
            return Err(ConfigError::Invalid(format!(
                "elevator.arrival_tolerance ({}) must be below half the floor height ({})",
                self.elevator.arrival_tolerance, self.building.floor_height
            )));
        }
        if self.simulation.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "simulation.frame_interval_ms must be at least 1".to_string(),
            ));
        }
        if self.simulation.log_capacity == 0 {
            return Err(ConfigError::Invalid(
                "simulation.log_capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/***************************************/
/*             Unit tests              */
/***************************************/
