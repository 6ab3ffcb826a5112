//! World simulation engine.
//!
//! This module implements the toroidal grid where prey and predators move,
//! feed, breed and die, one deterministic tick at a time.

pub mod entity;
pub mod grid;
pub mod scenario;
pub mod simulation;
pub mod world;

pub use entity::{Animal, Kind};
pub use grid::DensityGrid;
pub use scenario::Scenario;
pub use simulation::{run, step, Simulation, SimulationResult};
pub use world::World;
