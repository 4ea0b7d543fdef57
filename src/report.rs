//! Terminal-state report, built after the scheduler stops.

use crate::simulation::{distance_km, Coordinate, Scheduler, Tick, VehicleState};
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleReport {
    pub vehicle_id: String,
    /// Straight-line distance from route start to route end.
    pub total_distance_km: f64,
    pub total_toll: f64,
    pub final_balance: f64,
    pub vendor: String,
    pub state: VehicleState,
    pub final_position: Coordinate,
    pub payments: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub ended_at: Tick,
    pub vehicles_on_road: usize,
    pub vehicles: Vec<VehicleReport>,
}

impl SimulationReport {
    pub fn from_scheduler(scheduler: &Scheduler) -> Self {
        let vehicles = scheduler
            .processes()
            .iter()
            .map(|process| {
                let vehicle = process.vehicle();
                let account = vehicle.account();
                VehicleReport {
                    vehicle_id: vehicle.id().to_string(),
                    total_distance_km: distance_km(vehicle.start(), vehicle.end()),
                    total_toll: account.total_paid(),
                    final_balance: account.balance(),
                    vendor: account.vendor().to_string(),
                    state: process.state(),
                    final_position: vehicle.position(),
                    payments: account.payments().to_vec(),
                }
            })
            .collect();

        Self {
            ended_at: scheduler.now(),
            vehicles_on_road: scheduler.vehicles_scheduled_by(scheduler.now()),
            vehicles,
        }
    }

    pub fn total_tolls(&self) -> f64 {
        self.vehicles.iter().map(|v| v.total_toll).sum()
    }

    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("Report generated: {}", path.display());
        Ok(())
    }

    pub fn log_summary(&self) {
        log::info!("=== Toll Report (t={}) ===", self.ended_at);
        for v in &self.vehicles {
            log::info!(
                "{:<12} {:>8.2} km  {:>9.2} INR paid  {:>9.2} INR left  {:<9} {:?}",
                v.vehicle_id, v.total_distance_km, v.total_toll, v.final_balance, v.vendor, v.state
            );
        }
        log::info!("Total tolls collected: {:.2} INR", self.total_tolls());
    }
}
