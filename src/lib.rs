pub mod config;
pub mod error;
pub mod report;
pub mod simulation;

pub use simulation::*;
pub use config::*;
pub use error::{SimError, SimResult};
