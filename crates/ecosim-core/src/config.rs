//! Configuration types for the simulation.

use serde::{Deserialize, Serialize};

/// How the final density grid is printed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Symbol for cells whose net count is zero
    pub empty_symbol: char,
    /// Symbol for cells holding equal, non-zero numbers of prey and predators.
    /// `None` prints them with `empty_symbol`, matching the classic output.
    pub contested_symbol: Option<char>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            empty_symbol: '*',
            contested_symbol: None,
        }
    }
}

/// Runner behaviour that does not affect simulation outcomes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Log a population snapshot every this many ticks (0 disables)
    pub summary_interval: u64,
}

/// Everything the command line front end needs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    pub simulation: SimulationConfig,
    pub render: RenderConfig,
    /// Default log filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            render: RenderConfig::default(),
            log_filter: "info".to_string(),
        }
    }
}
