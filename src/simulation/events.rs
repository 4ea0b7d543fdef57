//! Structured advisory stream emitted by vehicle processes.
//!
//! The engine never prints; callers drain the [`EventLog`] after (or during)
//! a run and decide how to present it.

use super::{TimeSlot, Tick, VehicleId};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimEvent {
    pub tick: Tick,
    pub vehicle_id: VehicleId,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventKind {
    /// Vehicle was inside a toll zone and was debited.
    ZoneCrossing {
        zone: String,
        distance_km: f64,
        slot: TimeSlot,
        toll: f64,
        balance: f64,
    },
    /// Distance from start exceeded a section's limit. Informational only.
    SpeedAdvisory {
        section: String,
        limit: f64,
        distance_km: f64,
    },
    /// An extra tick of delay was drawn after a waypoint.
    Congestion,
    /// Vehicle sat on its final waypoint long enough to be halted.
    Contingency { stationary_ticks: u32 },
    /// Route exhausted normally.
    Completed,
    /// A toll could not be priced; the debit was skipped.
    PricingRejected { zone: String, reason: String },
}

#[derive(Debug, Default, Clone)]
pub struct EventLog {
    events: Vec<SimEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, tick: Tick, vehicle_id: &VehicleId, kind: EventKind) {
        self.events.push(SimEvent {
            tick,
            vehicle_id: vehicle_id.clone(),
            kind,
        });
    }

    pub fn events(&self) -> &[SimEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn for_vehicle<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a SimEvent> + 'a {
        self.events.iter().filter(move |e| e.vehicle_id.0 == id)
    }

    /// Take every recorded event, leaving the log empty.
    pub fn drain(&mut self) -> Vec<SimEvent> {
        std::mem::take(&mut self.events)
    }
}

impl std::fmt::Display for SimEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let id = &self.vehicle_id;
        match &self.kind {
            EventKind::ZoneCrossing { zone, toll, balance, .. } => write!(
                f,
                "[t={}] {} crossed toll zone {}. Toll: {:.2} INR, Remaining balance: {:.2} INR",
                self.tick, id, zone, toll, balance
            ),
            EventKind::SpeedAdvisory { section, limit, .. } => write!(
                f,
                "[t={}] {} exceeded speed limit in {}. Speed limit: {} km/h",
                self.tick, id, section, limit
            ),
            EventKind::Congestion => write!(f, "[t={}] {} delayed by congestion", self.tick, id),
            EventKind::Contingency { stationary_ticks } => write!(
                f,
                "[t={}] Emergency contingency: {} has been stationary for {} time units",
                self.tick, id, stationary_ticks
            ),
            EventKind::Completed => write!(f, "[t={}] {} completed its route", self.tick, id),
            EventKind::PricingRejected { zone, reason } => write!(
                f,
                "[t={}] {} toll in zone {} rejected: {}",
                self.tick, id, zone, reason
            ),
        }
    }
}
