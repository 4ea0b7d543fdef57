use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;
use crate::simulation::Clock;

/// INR per USD used to scale the default rates.
const INR_PER_USD: f64 = 82.0;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PricingConfig {
    pub per_km_rate: f64,
    pub fixed_fee: f64,
    pub dynamic_pricing_rate: f64,
    pub congestion_threshold: f64,
    pub time_slot_rate: TimeSlotRates,
    pub clock: Clock,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct TimeSlotRates {
    pub peak: f64,
    pub off_peak: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            per_km_rate: 0.05 * INR_PER_USD,
            fixed_fee: 2.00 * INR_PER_USD,
            dynamic_pricing_rate: 0.02 * INR_PER_USD,
            congestion_threshold: 10.0,
            time_slot_rate: TimeSlotRates::default(),
            clock: Clock::default(),
        }
    }
}

impl Default for TimeSlotRates {
    fn default() -> Self {
        Self {
            peak: 0.03 * INR_PER_USD,
            off_peak: 0.01 * INR_PER_USD,
        }
    }
}

impl Validate for PricingConfig {
    fn validate(&self) -> Result<()> {
        let rates = [
            ("per_km_rate", self.per_km_rate),
            ("fixed_fee", self.fixed_fee),
            ("dynamic_pricing_rate", self.dynamic_pricing_rate),
            ("time_slot_rate.peak", self.time_slot_rate.peak),
            ("time_slot_rate.off_peak", self.time_slot_rate.off_peak),
        ];

        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!("Pricing rate '{}' must be finite and non-negative, got {}", name, value));
            }
        }

        if !self.congestion_threshold.is_finite() || self.congestion_threshold < 0.0 {
            return Err(anyhow!("Congestion threshold must be finite and non-negative"));
        }

        match self.clock {
            Clock::Wall { utc_offset_minutes: Some(minutes) } if minutes.abs() >= 24 * 60 => {
                return Err(anyhow!("Wall clock UTC offset {} minutes must be under 24 hours", minutes));
            }
            Clock::Fixed { hour } if hour >= 24 => {
                return Err(anyhow!("Fixed clock hour {} must be in range [0, 24)", hour));
            }
            Clock::Simulated { start_hour, ticks_per_hour } => {
                if start_hour >= 24 {
                    return Err(anyhow!("Simulated clock start hour {} must be in range [0, 24)", start_hour));
                }
                if ticks_per_hour == 0 {
                    return Err(anyhow!("Simulated clock ticks per hour must be greater than zero"));
                }
            }
            _ => {}
        }

        Ok(())
    }
}
