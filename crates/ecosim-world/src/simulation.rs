//! Simulation engine: the per-tick transition and the runner around it.
//!
//! A tick is a fixed pipeline of phases, and their order decides outcomes:
//!
//! 1. movement: prey walk one cell, predators two
//! 2. predation: predators, oldest id first, eat every prey sharing their cell
//! 3. aging
//! 4. rotation, checked against the new age
//! 5. reproduction: prey at age 5 or 10, predators with two or more food
//! 6. death: anything at or past its species' maximum age

use crate::entity::Animal;
use crate::world::World;
use ecosim_core::{Position, Result, RunStats, SimulationConfig, StepStats};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, event, info, instrument, trace, Level};

/// Advance a world by one tick.
pub fn step(mut world: World) -> World {
    apply_tick(&mut world, 0);
    world
}

/// Apply `steps` ticks in sequence. Empty populations do not stop the loop.
pub fn run(mut world: World, steps: u64) -> World {
    for tick in 1..=steps {
        apply_tick(&mut world, tick);
    }
    world
}

/// Run one tick in place and report what happened.
fn apply_tick(world: &mut World, tick: u64) -> StepStats {
    let extent = world.extent();
    let (mut prey, mut predators) = world.take_populations();
    let mut stats = StepStats {
        tick,
        ..Default::default()
    };

    // Movement
    for animal in prey.iter_mut().chain(predators.iter_mut()) {
        animal.advance(extent);
    }

    // Predation
    stats.prey_eaten = resolve_predation(&mut prey, &mut predators);

    // Aging, then rotation against the new age
    for animal in prey.iter_mut().chain(predators.iter_mut()) {
        animal.grow();
        if animal.rotate_if_due() {
            trace!(id = %animal.id, facing = ?animal.facing, age = animal.age, "Animal turned");
        }
    }

    // Reproduction
    stats.prey_born = breed(&mut prey, world);
    stats.predators_born = breed(&mut predators, world);

    // Death
    stats.prey_died = remove_expired(&mut prey);
    stats.predators_died = remove_expired(&mut predators);

    stats.prey_alive = prey.len();
    stats.predators_alive = predators.len();
    world.replace_populations(prey, predators);

    debug!(
        tick,
        prey_eaten = stats.prey_eaten,
        prey_born = stats.prey_born,
        predators_born = stats.predators_born,
        prey_died = stats.prey_died,
        predators_died = stats.predators_died,
        prey_alive = stats.prey_alive,
        predators_alive = stats.predators_alive,
        "Tick complete"
    );

    stats
}

/// Let every predator, most senior first, eat the prey on its cell.
///
/// The first predator to reach a cell takes all of it, so a prey is never
/// credited to more than one predator. Returns the number of prey eaten.
fn resolve_predation(prey: &mut Vec<Animal>, predators: &mut [Animal]) -> u32 {
    if prey.is_empty() || predators.is_empty() {
        return 0;
    }

    predators.sort_by_key(|predator| predator.id);

    let mut prey_per_cell: HashMap<Position, u32> = HashMap::new();
    for animal in prey.iter() {
        *prey_per_cell.entry(animal.position).or_insert(0) += 1;
    }

    let mut cleared: HashSet<Position> = HashSet::new();
    let mut eaten = 0;
    for predator in predators.iter_mut() {
        if let Some(count) = prey_per_cell.remove(&predator.position) {
            predator.feed(count);
            cleared.insert(predator.position);
            eaten += count;
            trace!(
                predator = %predator.id,
                row = predator.position.row,
                col = predator.position.col,
                count,
                food = predator.food(),
                "Predator fed"
            );
        }
    }

    prey.retain(|animal| !cleared.contains(&animal.position));
    eaten
}

/// Evaluate every parent, then append the newborns after them.
fn breed(population: &mut Vec<Animal>, world: &mut World) -> u32 {
    let mut newborns = Vec::new();

    for parent in population.iter_mut() {
        if parent.wants_offspring() {
            let child = parent.offspring(world.allocate_id());
            parent.reset_food();
            trace!(
                parent = %parent.id,
                child = %child.id,
                species = %parent.species(),
                "Offspring born"
            );
            newborns.push(child);
        }
    }

    let born = newborns.len() as u32;
    population.extend(newborns);
    born
}

fn remove_expired(population: &mut Vec<Animal>) -> u32 {
    let before = population.len();
    population.retain(|animal| !animal.is_expired());
    (before - population.len()) as u32
}

/// Stateful runner that tracks tick count and run statistics.
pub struct Simulation {
    world: World,
    config: SimulationConfig,
    tick: u64,
    stats: RunStats,
}

impl Simulation {
    pub fn new(world: World, config: SimulationConfig) -> Self {
        let (prey, predators) = world.population();
        Self {
            world,
            config,
            tick: 0,
            stats: RunStats::with_initial(prey, predators),
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    /// Execute one tick
    pub fn step(&mut self) -> StepStats {
        self.tick += 1;
        let step = apply_tick(&mut self.world, self.tick);
        self.stats.record(&step);
        step
    }

    /// Run the given number of ticks and collect the result
    #[instrument(skip(self), fields(extent = %self.world.extent()))]
    pub fn run(mut self, steps: u64) -> SimulationResult {
        let (prey, predators) = self.world.population();
        info!(prey, predators, "Starting simulation for {} ticks", steps);

        for _ in 0..steps {
            let step = self.step();

            let interval = self.config.summary_interval;
            if interval > 0 && self.tick % interval == 0 {
                self.emit_population_metrics(&step);
            }
        }

        self.emit_run_summary();

        SimulationResult {
            world: self.world,
            stats: self.stats,
            total_ticks: self.tick,
        }
    }

    fn emit_population_metrics(&self, step: &StepStats) {
        info!(
            event = "population_metrics",
            tick = self.tick,
            prey = step.prey_alive,
            predators = step.predators_alive,
            prey_eaten = step.prey_eaten,
            births = step.prey_born + step.predators_born,
            "Population snapshot"
        );
    }

    fn emit_run_summary(&self) {
        let (prey, predators) = self.world.population();
        info!(
            event = "run_summary",
            total_ticks = self.tick,
            prey,
            predators,
            peak_prey = self.stats.peak_prey,
            peak_predators = self.stats.peak_predators,
            prey_eaten = self.stats.prey_eaten,
            births = self.stats.total_births(),
            deaths = self.stats.total_deaths(),
            "Simulation complete"
        );

        if let Some(tick) = self.stats.prey_extinct_at {
            event!(Level::INFO, tick, "Prey population went extinct");
        }
        if let Some(tick) = self.stats.predators_extinct_at {
            event!(Level::INFO, tick, "Predator population went extinct");
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationResult {
    pub world: World,
    pub stats: RunStats,
    pub total_ticks: u64,
}

impl SimulationResult {
    /// Pretty-printed JSON report of the final world and run statistics
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
