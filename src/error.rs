use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Overdraft is deliberately absent: ledgers may go negative.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    #[error("Route for vehicle {vehicle_id} has no waypoints")]
    InvalidRoute { vehicle_id: String },

    #[error("Invalid pricing input: {field} = {value} (must be finite and non-negative)")]
    InvalidPricingInput { field: &'static str, value: f64 },

    #[error("Congestion probability {0} is outside [0, 1]")]
    InvalidCongestionProbability(f64),

    #[error("Invalid clock: {0}")]
    InvalidClock(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;
