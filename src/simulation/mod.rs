use serde::{Deserialize, Serialize};

pub mod events;
pub mod geometry;
pub mod ledger;
pub mod pricing;
pub mod scenario;
pub mod scheduler;
pub mod vehicle;

pub use events::*;
pub use geometry::*;
pub use ledger::*;
pub use pricing::*;
pub use scenario::*;
pub use scheduler::*;
pub use vehicle::*;

/// Simulated time, in whole ticks.
pub type Tick = u64;

/// A (latitude, longitude) pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VehicleId(pub String);

impl From<&str> for VehicleId {
    fn from(id: &str) -> Self {
        VehicleId(id.to_string())
    }
}

impl From<String> for VehicleId {
    fn from(id: String) -> Self {
        VehicleId(id)
    }
}

impl std::fmt::Display for VehicleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
