use super::{
    distance_km, AccountLedger, Coordinate, EventKind, EventLog, Tick, TollPricingPolicy, TollZone,
    VehicleId,
};
use crate::config::RoadConfig;
use crate::error::{SimError, SimResult};
use rand::RngCore;
use rand_distr::{Bernoulli, Distribution};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct Vehicle {
    id: VehicleId,
    start: Coordinate,
    end: Coordinate,
    position: Coordinate,
    route: Vec<Coordinate>,
    account: AccountLedger,
    zones: Arc<[TollZone]>,
    stationary_time: u32,
}

impl Vehicle {
    /// Start and end are the first and last waypoints of `route`.
    pub fn new(
        id: impl Into<VehicleId>,
        route: Vec<Coordinate>,
        account: AccountLedger,
        zones: Arc<[TollZone]>,
    ) -> SimResult<Self> {
        let id = id.into();
        let (start, end) = match (route.first(), route.last()) {
            (Some(&start), Some(&end)) => (start, end),
            _ => return Err(SimError::InvalidRoute { vehicle_id: id.0 }),
        };

        Ok(Self {
            id,
            start,
            end,
            position: start,
            route,
            account,
            zones,
            stationary_time: 0,
        })
    }

    pub fn id(&self) -> &VehicleId {
        &self.id
    }

    pub fn start(&self) -> Coordinate {
        self.start
    }

    pub fn end(&self) -> Coordinate {
        self.end
    }

    pub fn position(&self) -> Coordinate {
        self.position
    }

    pub fn route(&self) -> &[Coordinate] {
        &self.route
    }

    pub fn account(&self) -> &AccountLedger {
        &self.account
    }

    pub fn zones(&self) -> &[TollZone] {
        &self.zones
    }

    pub fn stationary_time(&self) -> u32 {
        self.stationary_time
    }

    /// Cumulative distance from the start of the route to the current position.
    pub fn distance_from_start(&self) -> f64 {
        distance_km(self.start, self.position)
    }

    /// Charge once per containing zone. Overlapping zones each charge.
    fn check_toll_zones(&mut self, now: Tick, policy: &TollPricingPolicy, events: &mut EventLog) {
        for zone in self.zones.iter() {
            if !zone.contains(self.position) {
                continue;
            }

            let distance = distance_km(self.start, self.position);
            match policy.slot_at(now).and_then(|slot| policy.quote(distance, slot)) {
                Ok(quote) => {
                    let toll = quote.total();
                    let balance = self.account.deduct_toll(toll);
                    log::debug!(
                        "{} crossed toll zone {} at t={}: toll {:.2}, balance {:.2}",
                        self.id, zone.name(), now, toll, balance
                    );
                    events.push(now, &self.id, EventKind::ZoneCrossing {
                        zone: zone.name().to_string(),
                        distance_km: distance,
                        slot: quote.slot,
                        toll,
                        balance,
                    });
                }
                Err(e) => {
                    log::warn!("{} toll in zone {} rejected: {}", self.id, zone.name(), e);
                    events.push(now, &self.id, EventKind::PricingRejected {
                        zone: zone.name().to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    fn check_speed_limits(&self, now: Tick, road: &RoadConfig, events: &mut EventLog) {
        let distance = self.distance_from_start();
        for section in &road.speed_limit_sections {
            if distance > section.limit {
                events.push(now, &self.id, EventKind::SpeedAdvisory {
                    section: section.name.clone(),
                    limit: section.limit,
                    distance_km: distance,
                });
            }
        }
    }

    fn update_stationary_time(&mut self) {
        if self.position == self.end {
            self.stationary_time += 1;
        } else {
            self.stationary_time = 0;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleState {
    Traveling,
    /// Counting ticks on the final waypoint; not terminal by itself.
    StationaryAtEnd,
    HaltedContingency,
    Completed,
}

impl VehicleState {
    pub fn is_terminal(self) -> bool {
        matches!(self, VehicleState::HaltedContingency | VehicleState::Completed)
    }
}

/// What a process does the next time the scheduler resumes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Move to the next waypoint, then check zones and speed.
    Advance,
    /// Waypoint's tick has elapsed; may still be held up by congestion.
    Settle { delayed: bool },
    Finished(VehicleState),
}

/// Everything a process may touch while it runs inside one tick.
pub struct TickContext<'a> {
    pub now: Tick,
    pub policy: &'a TollPricingPolicy,
    pub road: &'a RoadConfig,
    pub congestion: &'a Bernoulli,
    pub rng: &'a mut dyn RngCore,
    pub events: &'a mut EventLog,
}

/// Drives one vehicle along its route as an explicit state machine.
///
/// Each waypoint costs one suspension of one tick, plus one more tick when
/// congestion is drawn. Zone and speed checks for a waypoint run before the
/// suspension, so they always precede the next positional advance.
#[derive(Debug, Clone)]
pub struct VehicleProcess {
    vehicle: Vehicle,
    phase: Phase,
    next_waypoint: usize,
    registered_at: Tick,
    resume_at: Tick,
    finished_at: Option<Tick>,
}

impl VehicleProcess {
    pub fn new(vehicle: Vehicle, start_at: Tick) -> Self {
        Self {
            vehicle,
            phase: Phase::Advance,
            next_waypoint: 0,
            registered_at: start_at,
            resume_at: start_at,
            finished_at: None,
        }
    }

    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    pub fn registered_at(&self) -> Tick {
        self.registered_at
    }

    pub fn resume_at(&self) -> Tick {
        self.resume_at
    }

    pub fn finished_at(&self) -> Option<Tick> {
        self.finished_at
    }

    /// Number of waypoints the vehicle has moved to so far.
    pub fn waypoints_visited(&self) -> usize {
        self.next_waypoint
    }

    pub fn state(&self) -> VehicleState {
        match self.phase {
            Phase::Finished(state) => state,
            _ if self.vehicle.stationary_time > 0 => VehicleState::StationaryAtEnd,
            _ => VehicleState::Traveling,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, Phase::Finished(_))
    }

    /// Whether the scheduler should resume this process at `now`.
    pub fn is_runnable_at(&self, now: Tick) -> bool {
        !self.is_terminal() && self.resume_at <= now
    }

    pub fn resume(&mut self, ctx: &mut TickContext<'_>) {
        match self.phase {
            Phase::Advance => self.advance(ctx),
            Phase::Settle { delayed } => {
                if !delayed && ctx.congestion.sample(&mut *ctx.rng) {
                    log::debug!("{} delayed by congestion at t={}", self.vehicle.id, ctx.now);
                    ctx.events.push(ctx.now, &self.vehicle.id, EventKind::Congestion);
                    self.suspend(ctx.now, Phase::Settle { delayed: true });
                    return;
                }

                self.vehicle.update_stationary_time();
                if self.next_waypoint < self.vehicle.route.len() {
                    self.advance(ctx);
                } else {
                    ctx.events.push(ctx.now, &self.vehicle.id, EventKind::Completed);
                    self.finish(ctx.now, VehicleState::Completed);
                }
            }
            Phase::Finished(_) => {}
        }
    }

    fn advance(&mut self, ctx: &mut TickContext<'_>) {
        let stationary = self.vehicle.stationary_time;
        if stationary >= ctx.road.contingency_ticks {
            log::info!(
                "Emergency contingency: {} has been stationary for {} time units",
                self.vehicle.id, stationary
            );
            ctx.events.push(ctx.now, &self.vehicle.id, EventKind::Contingency {
                stationary_ticks: stationary,
            });
            self.finish(ctx.now, VehicleState::HaltedContingency);
            return;
        }

        self.vehicle.position = self.vehicle.route[self.next_waypoint];
        self.next_waypoint += 1;

        self.vehicle.check_toll_zones(ctx.now, ctx.policy, ctx.events);
        self.vehicle.check_speed_limits(ctx.now, ctx.road, ctx.events);

        self.suspend(ctx.now, Phase::Settle { delayed: false });
    }

    fn suspend(&mut self, now: Tick, phase: Phase) {
        self.phase = phase;
        self.resume_at = now + 1;
    }

    fn finish(&mut self, now: Tick, state: VehicleState) {
        self.phase = Phase::Finished(state);
        self.finished_at = Some(now);
    }
}
