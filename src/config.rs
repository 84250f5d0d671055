use std::{path::PathBuf, time::Duration};

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::{domain::BatteryConfig, optimizer::ObjectiveWeights};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub battery: BatteryConfig,
    #[serde(default)]
    pub objective: ObjectiveWeights,
    #[serde(default)]
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// JSON file of input records, used when no path is given on the command line
    pub input_path: Option<PathBuf>,
    /// Where to write the response; stdout when unset
    pub output_path: Option<PathBuf>,
    pub solve_timeout_seconds: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            input_path: None,
            output_path: None,
            solve_timeout_seconds: 30,
        }
    }
}

impl RunConfig {
    pub fn solve_timeout(&self) -> Duration {
        Duration::from_secs(self.solve_timeout_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file("config/default.toml"))
                .merge(Env::prefixed("DISPATCH__").split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self> {
        Ok(figment.extract()?)
    }
}
