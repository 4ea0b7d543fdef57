use super::{EventLog, Tick, TickContext, TollPricingPolicy, Vehicle, VehicleProcess, VehicleState};
use crate::config::{RoadConfig, Validate};
use crate::error::{SimError, SimResult};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::Bernoulli;

/// Process-wide simulated time. Never moves backwards.
#[derive(Debug, Clone, Default)]
pub struct SimulationClock {
    now: Tick,
}

impl SimulationClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Tick {
        self.now
    }

    pub fn advance_to(&mut self, tick: Tick) {
        debug_assert!(tick >= self.now, "simulated time must not go backwards");
        self.now = self.now.max(tick);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub ended_at: Tick,
    pub completed: usize,
    pub halted: usize,
    pub unfinished: usize,
}

/// Cooperative scheduler for vehicle processes.
///
/// At each simulated instant every runnable process is resumed once, in
/// registration order. A resumed process always suspends until a later tick
/// or finishes, so one instant never resumes the same vehicle twice.
#[derive(Debug)]
pub struct Scheduler {
    clock: SimulationClock,
    processes: Vec<VehicleProcess>,
    policy: TollPricingPolicy,
    road: RoadConfig,
    congestion: Bernoulli,
    rng: StdRng,
    events: EventLog,
}

impl Scheduler {
    pub fn new(policy: TollPricingPolicy, road: RoadConfig, seed: Option<u64>) -> SimResult<Self> {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };
        Self::with_rng(policy, road, rng)
    }

    pub fn with_rng(policy: TollPricingPolicy, road: RoadConfig, rng: StdRng) -> SimResult<Self> {
        let congestion = Bernoulli::new(road.congestion_probability)
            .map_err(|_| SimError::InvalidCongestionProbability(road.congestion_probability))?;
        road.validate()
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            clock: SimulationClock::new(),
            processes: Vec::new(),
            policy,
            road,
            congestion,
            rng,
            events: EventLog::new(),
        })
    }

    /// Register a vehicle departing at the current tick.
    pub fn register(&mut self, vehicle: Vehicle) {
        let now = self.clock.now();
        self.register_at(vehicle, now);
    }

    /// Register a vehicle departing at `tick` (or now, if `tick` has passed).
    pub fn register_at(&mut self, vehicle: Vehicle, tick: Tick) {
        let start = tick.max(self.clock.now());
        log::debug!("Registered {} departing at t={}", vehicle.id(), start);
        self.processes.push(VehicleProcess::new(vehicle, start));
    }

    pub fn now(&self) -> Tick {
        self.clock.now()
    }

    pub fn processes(&self) -> &[VehicleProcess] {
        &self.processes
    }

    pub fn process(&self, id: &str) -> Option<&VehicleProcess> {
        self.processes.iter().find(|p| p.vehicle().id().0 == id)
    }

    pub fn policy(&self) -> &TollPricingPolicy {
        &self.policy
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn events_mut(&mut self) -> &mut EventLog {
        &mut self.events
    }

    /// Earliest tick at which some unfinished process wants to run.
    pub fn next_wakeup(&self) -> Option<Tick> {
        self.processes
            .iter()
            .filter(|p| !p.is_terminal())
            .map(|p| p.resume_at())
            .min()
    }

    pub fn all_terminal(&self) -> bool {
        self.processes.iter().all(|p| p.is_terminal())
    }

    /// Advance to the next instant with runnable processes and resume them.
    /// Returns the instant processed, or `None` once every process is terminal.
    pub fn step(&mut self) -> Option<Tick> {
        let next = self.next_wakeup()?;
        self.clock.advance_to(next);
        let now = self.clock.now();

        let Self { processes, policy, road, congestion, rng, events, .. } = self;
        let mut ctx = TickContext {
            now,
            policy,
            road,
            congestion,
            rng,
            events,
        };

        for process in processes.iter_mut() {
            if process.is_runnable_at(now) {
                log::trace!("Resuming {} at t={}", process.vehicle().id(), now);
                process.resume(&mut ctx);
            }
        }

        Some(now)
    }

    /// Run until every process is terminal or the next instant would reach
    /// `until`. Unfinished processes keep their partial state.
    pub fn run_until(&mut self, until: Tick) -> RunSummary {
        loop {
            match self.next_wakeup() {
                None => break,
                Some(next) if next >= until => {
                    self.clock.advance_to(until);
                    break;
                }
                Some(_) => {
                    self.step();
                }
            }
        }

        let summary = self.summary();
        log::info!(
            "Simulation stopped at t={}: {} completed, {} halted, {} unfinished",
            summary.ended_at, summary.completed, summary.halted, summary.unfinished
        );
        summary
    }

    pub fn run_to_completion(&mut self) -> RunSummary {
        self.run_until(Tick::MAX)
    }

    pub fn summary(&self) -> RunSummary {
        let mut summary = RunSummary {
            ended_at: self.clock.now(),
            completed: 0,
            halted: 0,
            unfinished: 0,
        };
        for process in &self.processes {
            match process.state() {
                VehicleState::Completed => summary.completed += 1,
                VehicleState::HaltedContingency => summary.halted += 1,
                _ => summary.unfinished += 1,
            }
        }
        summary
    }

    /// Number of vehicles whose process was scheduled to start at or before
    /// `tick`. Diagnostics only.
    pub fn vehicles_scheduled_by(&self, tick: Tick) -> usize {
        self.processes
            .iter()
            .filter(|p| p.registered_at() <= tick)
            .count()
    }
}
