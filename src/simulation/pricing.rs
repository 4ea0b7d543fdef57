use super::Tick;
use crate::config::PricingConfig;
use crate::error::{SimError, SimResult};
use chrono::{FixedOffset, Local, Timelike, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeSlot {
    Peak,
    OffPeak,
}

impl TimeSlot {
    /// Hours 7-9 and 17-19 (inclusive) are peak.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            7..=9 | 17..=19 => TimeSlot::Peak,
            _ => TimeSlot::OffPeak,
        }
    }
}

/// Source of the hour of day used for time-slot classification.
pub trait TimeOfDay {
    /// Hour in `0..24`, or an error when the source is misconfigured.
    fn hour_at(&self, tick: Tick) -> SimResult<u32>;

    fn slot_at(&self, tick: Tick) -> SimResult<TimeSlot> {
        self.hour_at(tick).map(TimeSlot::from_hour)
    }
}

/// Shipped time-of-day sources, selectable from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Clock {
    /// Hour read from the system clock in the host's local time zone, or at a
    /// fixed UTC offset when one is given.
    Wall {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        utc_offset_minutes: Option<i32>,
    },
    /// Always the same hour.
    Fixed { hour: u32 },
    /// Hour derived from simulated ticks.
    Simulated { start_hour: u32, ticks_per_hour: u64 },
}

impl Default for Clock {
    fn default() -> Self {
        Clock::Wall { utc_offset_minutes: None }
    }
}

impl TimeOfDay for Clock {
    fn hour_at(&self, tick: Tick) -> SimResult<u32> {
        match *self {
            Clock::Wall { utc_offset_minutes: None } => Ok(Local::now().hour()),
            Clock::Wall { utc_offset_minutes: Some(minutes) } => {
                let offset = minutes
                    .checked_mul(60)
                    .and_then(FixedOffset::east_opt)
                    .ok_or_else(|| {
                        SimError::InvalidClock(format!("UTC offset of {} minutes is out of range", minutes))
                    })?;
                Ok(Utc::now().with_timezone(&offset).hour())
            }
            Clock::Fixed { hour } if hour >= 24 => {
                Err(SimError::InvalidClock(format!("fixed hour {} is outside [0, 24)", hour)))
            }
            Clock::Fixed { hour } => Ok(hour),
            Clock::Simulated { start_hour, .. } if start_hour >= 24 => Err(SimError::InvalidClock(
                format!("simulated start hour {} is outside [0, 24)", start_hour),
            )),
            Clock::Simulated { ticks_per_hour: 0, .. } => {
                Err(SimError::InvalidClock("simulated clock needs at least one tick per hour".to_string()))
            }
            Clock::Simulated { start_hour, ticks_per_hour } => {
                let elapsed = tick / ticks_per_hour;
                Ok(((start_hour as u64 + elapsed) % 24) as u32)
            }
        }
    }
}

/// Itemised toll for one zone crossing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TollQuote {
    pub distance_km: f64,
    pub slot: TimeSlot,
    pub base: f64,
    pub time_slot: f64,
    pub congestion: f64,
}

impl TollQuote {
    pub fn total(&self) -> f64 {
        self.base + self.time_slot + self.congestion
    }
}

/// Maps (distance, time of day, congestion) to a toll amount.
///
/// `distance_km` is the cumulative distance from the vehicle's start to its
/// current position, not the distance covered inside the zone.
pub struct TollPricingPolicy {
    config: PricingConfig,
    clock: Box<dyn TimeOfDay>,
}

impl TollPricingPolicy {
    /// Policy whose time of day comes from `config.clock`.
    pub fn new(config: PricingConfig) -> Self {
        let clock = config.clock;
        Self::with_clock(config, clock)
    }

    pub fn with_clock(config: PricingConfig, clock: impl TimeOfDay + 'static) -> Self {
        Self {
            config,
            clock: Box::new(clock),
        }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn slot_at(&self, now: Tick) -> SimResult<TimeSlot> {
        self.clock.slot_at(now)
    }

    pub fn compute_toll(&self, distance_km: f64, now: Tick) -> SimResult<f64> {
        Ok(self.quote(distance_km, self.slot_at(now)?)?.total())
    }

    /// Pure pricing for an explicit time slot.
    pub fn quote(&self, distance_km: f64, slot: TimeSlot) -> SimResult<TollQuote> {
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(SimError::InvalidPricingInput { field: "distance_km", value: distance_km });
        }

        let rates = &self.config;
        let slot_rate = match slot {
            TimeSlot::Peak => rates.time_slot_rate.peak,
            TimeSlot::OffPeak => rates.time_slot_rate.off_peak,
        };

        let congestion = if distance_km > rates.congestion_threshold {
            distance_km * rates.dynamic_pricing_rate
        } else {
            0.0
        };

        let quote = TollQuote {
            distance_km,
            slot,
            base: distance_km * rates.per_km_rate + rates.fixed_fee,
            time_slot: distance_km * slot_rate,
            congestion,
        };

        let total = quote.total();
        if !total.is_finite() || total < 0.0 {
            return Err(SimError::InvalidPricingInput { field: "toll", value: total });
        }

        Ok(quote)
    }
}

impl std::fmt::Debug for TollPricingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TollPricingPolicy")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
