#![allow(dead_code)]

use std::sync::Arc;
use toll_sim::{
    config::{PricingConfig, RoadConfig},
    simulation::{AccountLedger, Clock, Coordinate, Scheduler, TollPricingPolicy, TollZone, Vehicle},
};

pub const ZONE_CENTER: Coordinate = Coordinate::new(13.5, 80.5);

/// Pricing with the default rates, pinned to an off-peak hour.
pub fn off_peak_pricing() -> PricingConfig {
    PricingConfig {
        clock: Clock::Fixed { hour: 12 },
        ..PricingConfig::default()
    }
}

pub fn calm_road() -> RoadConfig {
    RoadConfig {
        congestion_probability: 0.0,
        ..RoadConfig::default()
    }
}

pub fn center_zone() -> Arc<[TollZone]> {
    Arc::from(vec![TollZone::circle("zone_0", ZONE_CENTER, 0.15, 64)])
}

pub fn vehicle(id: &str, route: &[(f64, f64)], zones: &Arc<[TollZone]>) -> Vehicle {
    let route = route.iter().copied().map(Coordinate::from).collect();
    Vehicle::new(id, route, AccountLedger::new(100.0, "Vendor_A"), Arc::clone(zones)).unwrap()
}

pub fn scheduler(road: RoadConfig) -> Scheduler {
    Scheduler::new(TollPricingPolicy::new(off_peak_pricing()), road, Some(7)).unwrap()
}
