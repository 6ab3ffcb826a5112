//! Population statistics gathered while stepping a world.

use serde::{Deserialize, Serialize};

/// What happened during a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    /// Tick number, starting at 1 for the first step
    pub tick: u64,
    pub prey_eaten: u32,
    pub prey_born: u32,
    pub predators_born: u32,
    /// Prey removed for reaching their maximum age
    pub prey_died: u32,
    /// Predators removed for reaching their maximum age
    pub predators_died: u32,
    pub prey_alive: usize,
    pub predators_alive: usize,
}

/// Totals accumulated over a whole run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub ticks: u64,
    pub prey_eaten: u64,
    pub prey_born: u64,
    pub predators_born: u64,
    pub prey_died: u64,
    pub predators_died: u64,
    pub peak_prey: usize,
    pub peak_predators: usize,
    /// First tick that ended with no prey left
    pub prey_extinct_at: Option<u64>,
    /// First tick that ended with no predators left
    pub predators_extinct_at: Option<u64>,
}

impl RunStats {
    /// Seed peaks from the populations present before the first tick
    pub fn with_initial(prey: usize, predators: usize) -> Self {
        Self {
            peak_prey: prey,
            peak_predators: predators,
            ..Self::default()
        }
    }

    pub fn record(&mut self, step: &StepStats) {
        self.ticks += 1;
        self.prey_eaten += u64::from(step.prey_eaten);
        self.prey_born += u64::from(step.prey_born);
        self.predators_born += u64::from(step.predators_born);
        self.prey_died += u64::from(step.prey_died);
        self.predators_died += u64::from(step.predators_died);
        self.peak_prey = self.peak_prey.max(step.prey_alive);
        self.peak_predators = self.peak_predators.max(step.predators_alive);

        if step.prey_alive == 0 && self.prey_extinct_at.is_none() {
            self.prey_extinct_at = Some(step.tick);
        }
        if step.predators_alive == 0 && self.predators_extinct_at.is_none() {
            self.predators_extinct_at = Some(step.tick);
        }
    }

    pub fn total_births(&self) -> u64 {
        self.prey_born + self.predators_born
    }

    pub fn total_deaths(&self) -> u64 {
        self.prey_eaten + self.prey_died + self.predators_died
    }
}
