//! Run settings
//!
//! Loaded from a JSON file next to the level plans. Every field has a default
//! so a partial file (or no file at all) is fine.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{FINISH_DELAY, SIM_DT};
use crate::error::SimResult;
use crate::sim::{Spawn, SymbolTable};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for coin phases
    pub seed: u64,
    /// Fixed timestep in seconds
    pub sim_dt: f64,
    /// Give up on a level after this much simulated time
    pub max_seconds: f64,
    /// Grace period after a level resolves
    pub finish_delay: f64,
    /// Symbol to actor mapping used by the parser
    pub legend: BTreeMap<char, Spawn>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0,
            sim_dt: SIM_DT,
            max_seconds: 30.0,
            finish_delay: FINISH_DELAY,
            legend: BTreeMap::from([
                ('@', Spawn::Player),
                ('=', Spawn::HorizontalFireball),
                ('|', Spawn::VerticalFireball),
                ('v', Spawn::FireRain),
                ('o', Spawn::Coin),
            ]),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> SimResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from `path`, falling back to defaults when the file is
    /// missing or invalid
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match std::fs::read_to_string(path)
            .map_err(Into::into)
            .and_then(|json| Self::from_json(&json))
        {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::warn!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    /// Number of ticks that fit in `max_seconds`
    pub fn max_ticks(&self) -> u64 {
        if self.sim_dt <= 0.0 {
            return 0;
        }
        (self.max_seconds / self.sim_dt).round() as u64
    }

    /// Parser symbol table built from the legend
    pub fn symbol_table(&self) -> SymbolTable {
        SymbolTable::from_legend(self.legend.iter().map(|(&symbol, &spawn)| (symbol, spawn)))
    }
}
