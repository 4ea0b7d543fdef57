use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub simulation: SimulationParams,
    pub region: Region,
    pub zones: ZoneGeneration,
    pub routes: RouteGeneration,
    pub accounts: AccountParams,
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationParams {
    pub vehicle_count: u32,
    pub zone_count: u32,
    /// Scheduler time bound, in ticks.
    pub until: u64,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct Region {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ZoneGeneration {
    /// Radius bounds in degrees.
    pub radius_min: f64,
    pub radius_max: f64,
    pub circle_segments: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteGeneration {
    pub min_waypoints: usize,
    pub max_waypoints: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AccountParams {
    pub initial_balance: f64,
    pub vendors: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RandomConfig {
    pub seed: Option<u64>,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            vehicle_count: 10,
            zone_count: 5,
            until: 100,
        }
    }
}

impl Default for Region {
    fn default() -> Self {
        Self {
            lat_min: 13.0,
            lat_max: 13.9,
            lon_min: 80.0,
            lon_max: 80.9,
        }
    }
}

impl Default for ZoneGeneration {
    fn default() -> Self {
        Self {
            radius_min: 0.1,
            radius_max: 0.2,
            circle_segments: 64,
        }
    }
}

impl Default for RouteGeneration {
    fn default() -> Self {
        Self {
            min_waypoints: 5,
            max_waypoints: 15,
        }
    }
}

impl Default for AccountParams {
    fn default() -> Self {
        Self {
            initial_balance: 100.0,
            vendors: vec![
                "Vendor_A".to_string(),
                "Vendor_B".to_string(),
                "Vendor_C".to_string(),
            ],
        }
    }
}

impl Validate for ScenarioConfig {
    fn validate(&self) -> Result<()> {
        // Validate simulation parameters
        if self.simulation.until == 0 {
            return Err(anyhow!("Simulation time bound must be greater than zero"));
        }

        // Validate region
        let region = &self.region;
        if !(region.lat_min < region.lat_max) || !(region.lon_min < region.lon_max) {
            return Err(anyhow!("Region bounds must satisfy min < max for both latitude and longitude"));
        }

        if region.lat_min < -90.0 || region.lat_max > 90.0 {
            return Err(anyhow!("Region latitude must lie within [-90, 90]"));
        }

        if region.lon_min < -180.0 || region.lon_max > 180.0 {
            return Err(anyhow!("Region longitude must lie within [-180, 180]"));
        }

        // Validate zone generation
        let zones = &self.zones;
        if !(zones.radius_min > 0.0) || zones.radius_min > zones.radius_max {
            return Err(anyhow!("Zone radius bounds must satisfy 0 < min <= max"));
        }

        if zones.circle_segments < 3 {
            return Err(anyhow!("Zone circles need at least 3 segments, got {}", zones.circle_segments));
        }

        // Validate route generation
        let routes = &self.routes;
        if routes.min_waypoints == 0 {
            return Err(anyhow!("Routes must have at least one waypoint"));
        }

        if routes.min_waypoints > routes.max_waypoints {
            return Err(anyhow!("Minimum waypoints {} exceeds maximum {}", routes.min_waypoints, routes.max_waypoints));
        }

        // Validate accounts
        if !self.accounts.initial_balance.is_finite() {
            return Err(anyhow!("Initial balance must be finite"));
        }

        if self.accounts.vendors.is_empty() {
            return Err(anyhow!("At least one payment vendor must be defined"));
        }

        Ok(())
    }
}
