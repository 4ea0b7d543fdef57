use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RoadConfig {
    /// Checked in order on every waypoint.
    pub speed_limit_sections: Vec<SpeedLimitSection>,
    /// Consecutive ticks at the final waypoint before a contingency halt.
    pub contingency_ticks: u32,
    /// Chance of one extra tick of delay after each waypoint.
    pub congestion_probability: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SpeedLimitSection {
    pub name: String,
    pub limit: f64,
}

impl Default for RoadConfig {
    fn default() -> Self {
        Self {
            speed_limit_sections: vec![
                SpeedLimitSection { name: "section_1".to_string(), limit: 60.0 },
                SpeedLimitSection { name: "section_2".to_string(), limit: 80.0 },
                SpeedLimitSection { name: "section_3".to_string(), limit: 100.0 },
            ],
            contingency_ticks: 5,
            congestion_probability: 0.1,
        }
    }
}

impl Validate for RoadConfig {
    fn validate(&self) -> Result<()> {
        for section in &self.speed_limit_sections {
            if section.name.is_empty() {
                return Err(anyhow!("Speed limit sections must be named"));
            }

            if !section.limit.is_finite() || section.limit <= 0.0 {
                return Err(anyhow!("Speed limit for '{}' must be positive", section.name));
            }
        }

        if self.contingency_ticks == 0 {
            return Err(anyhow!("Contingency ticks must be greater than zero"));
        }

        if !(0.0..=1.0).contains(&self.congestion_probability) {
            return Err(anyhow!("Congestion probability {} must be in range [0, 1]", self.congestion_probability));
        }

        Ok(())
    }
}
