use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod rates;
pub mod road;
pub mod generation;

pub use rates::*;
pub use road::*;
pub use generation::*;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub pricing: PricingConfig,
    #[serde(default)]
    pub road: RoadConfig,
    #[serde(default)]
    pub scenario: ScenarioConfig,
}

impl SimulationConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration from {}", path))?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;

        // Validate configurations
        config.validate()?;

        Ok(config)
    }
}

impl Validate for SimulationConfig {
    fn validate(&self) -> Result<()> {
        self.pricing.validate()?;
        self.road.validate()?;
        self.scenario.validate()?;
        Ok(())
    }
}

pub trait Validate {
    fn validate(&self) -> Result<()>;
}
