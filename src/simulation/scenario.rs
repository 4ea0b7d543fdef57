use super::{AccountLedger, Coordinate, TollZone, Vehicle};
use crate::config::{ScenarioConfig, Validate};
use crate::error::{SimError, SimResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use std::sync::Arc;

/// Toll zones plus the vehicles that will drive through them.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub zones: Arc<[TollZone]>,
    pub vehicles: Vec<Vehicle>,
}

/// Seeded generator for random zones, routes and accounts.
pub struct ScenarioGenerator {
    config: ScenarioConfig,
    rng: StdRng,
}

impl ScenarioGenerator {
    /// Fails when `config` does not pass validation, since an empty vendor
    /// list or an inverted range cannot be sampled.
    pub fn new(config: ScenarioConfig, seed: Option<u64>) -> SimResult<Self> {
        config
            .validate()
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;

        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Ok(Self { config, rng })
    }

    pub fn generate(&mut self) -> SimResult<Scenario> {
        let zones: Arc<[TollZone]> = self
            .generate_toll_zones(self.config.simulation.zone_count as usize)
            .into();

        let vehicles = (0..self.config.simulation.vehicle_count)
            .map(|i| self.generate_vehicle(format!("Vehicle_{}", i), Arc::clone(&zones)))
            .collect::<SimResult<Vec<_>>>()?;

        log::info!("Generated scenario: {} toll zones, {} vehicles", zones.len(), vehicles.len());

        Ok(Scenario { zones, vehicles })
    }

    /// Circular zones centred uniformly inside the configured region.
    pub fn generate_toll_zones(&mut self, count: usize) -> Vec<TollZone> {
        let zones = &self.config.zones;
        let radius = Uniform::new_inclusive(zones.radius_min, zones.radius_max);
        let segments = zones.circle_segments;

        (0..count)
            .map(|i| {
                let center = self.random_coordinate();
                let radius = radius.sample(&mut self.rng);
                TollZone::circle(format!("zone_{}", i), center, radius, segments)
            })
            .collect()
    }

    pub fn generate_route(&mut self) -> Vec<Coordinate> {
        let routes = &self.config.routes;
        let len = self.rng.gen_range(routes.min_waypoints..=routes.max_waypoints);
        (0..len).map(|_| self.random_coordinate()).collect()
    }

    pub fn generate_vehicle(&mut self, id: String, zones: Arc<[TollZone]>) -> SimResult<Vehicle> {
        let route = self.generate_route();
        let accounts = &self.config.accounts;
        let vendor = accounts.vendors[self.rng.gen_range(0..accounts.vendors.len())].clone();
        let account = AccountLedger::new(accounts.initial_balance, vendor);
        Vehicle::new(id, route, account, zones)
    }

    fn random_coordinate(&mut self) -> Coordinate {
        let region = self.config.region;
        Coordinate::new(
            self.rng.gen_range(region.lat_min..region.lat_max),
            self.rng.gen_range(region.lon_min..region.lon_max),
        )
    }
}
