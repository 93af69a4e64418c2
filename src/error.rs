/***************************************/
/*        3rd party libraries          */
/***************************************/
use thiserror::Error;

/***************************************/
/*            Error types              */
/***************************************/

/// Rejected inputs to the controller. Nothing is mutated or logged when one
/// of these is returned.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("floor {floor} is outside the building (0..{floor_count})")]
    FloorOutOfRange { floor: u8, floor_count: u8 },

    #[error("passenger source and target are both floor {0}")]
    SameSourceAndTarget(u8),

    #[error("time step must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}
