use thiserror::Error;

/// `SimulationError` enumerates all possible errors returned by the tandem
/// network simulation
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Represents a configuration value rejected before any scheduling
    #[error("Invalid configuration for `{parameter}`: {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },

    /// Represents an operation requested on a station that does not exist
    #[error("A specified station cannot be found in the network")]
    StationNotFound,

    /// Represents an operation requested on a customer that is not in the network
    #[error("A specified customer cannot be found in the network")]
    CustomerNotFound,

    /// Represents an activity that does not match the state of its station or customer
    #[error("An invalid model state was encountered")]
    InvalidModelState,

    /// Represents an activity scheduled in the past, or at a non-finite time
    #[error("An invalid state was encountered, with respect to event scheduling")]
    EventSchedulingError,

    /// Transparent serde_json errors
    #[error(transparent)]
    JSONError(#[from] serde_json::error::Error),

    /// Transparent serde_yaml errors
    #[error(transparent)]
    YAMLError(#[from] serde_yaml::Error),

    /// Transparent Exponential distribution errors
    #[error(transparent)]
    ExpError(#[from] rand_distr::ExpError),
}
