//! Scenario input: grid size, tick count and the starting animals.
//!
//! The textual form is a stream of whitespace-separated integers:
//!
//! ```text
//! N M K
//! R F
//! row col facing stability   (R prey lines)
//! row col facing stability   (F predator lines)
//! ```

use crate::simulation::{Simulation, SimulationResult};
use crate::world::World;
use ecosim_core::{Error, Result, SimulationConfig, Species};
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use std::str::SplitWhitespace;
use tracing::{debug, warn};

/// Starting state of one animal, as written in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub row: i64,
    pub col: i64,
    pub facing: i64,
    pub stability: i64,
}

/// A parsed, not yet validated, simulation setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub rows: i64,
    pub cols: i64,
    pub steps: u64,
    pub prey: Vec<Placement>,
    pub predators: Vec<Placement>,
}

impl Scenario {
    pub fn parse(input: &str) -> Result<Self> {
        let mut tokens = Tokens::new(input);

        debug!("Reading grid size as N x M x K");
        let rows = tokens.next_int("row count N")?;
        let cols = tokens.next_int("column count M")?;
        let steps = tokens.next_count("step count K")?;

        debug!("Reading population sizes as prey x predators");
        let prey_count = tokens.next_count("prey count")?;
        let predator_count = tokens.next_count("predator count")?;

        let prey = tokens.placements(prey_count, "prey")?;
        let predators = tokens.placements(predator_count, "predator")?;

        if tokens.has_remaining() {
            warn!("Ignoring trailing input after the last predator");
        }

        Ok(Self {
            rows,
            cols,
            steps,
            prey,
            predators,
        })
    }

    /// Read and parse a scenario file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let input = std::fs::read_to_string(path)?;
        Self::parse(&input)
    }

    /// Read and parse a scenario from any reader, such as stdin
    pub fn from_reader(mut reader: impl Read) -> Result<Self> {
        let mut input = String::new();
        reader.read_to_string(&mut input)?;
        Self::parse(&input)
    }

    /// Validate the setup and build its world. Prey get ids before predators.
    pub fn build_world(&self) -> Result<World> {
        let mut world = World::with_size(self.rows, self.cols)?;

        let groups = [
            (Species::Prey, &self.prey),
            (Species::Predator, &self.predators),
        ];
        for (species, placements) in groups {
            for p in placements {
                world.spawn(species, p.row, p.col, p.facing, p.stability)?;
            }
        }

        Ok(world)
    }

    /// Build the world and run it for the scenario's tick count
    pub fn execute(&self, config: SimulationConfig) -> Result<SimulationResult> {
        let world = self.build_world()?;
        Ok(Simulation::new(world, config).run(self.steps))
    }
}

struct Tokens<'a> {
    inner: SplitWhitespace<'a>,
    consumed: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            consumed: 0,
        }
    }

    fn next_int(&mut self, what: &str) -> Result<i64> {
        let token = self.inner.next().ok_or_else(|| {
            Error::Parse(format!("unexpected end of input while reading {what}"))
        })?;
        self.consumed += 1;
        token.parse().map_err(|_| {
            Error::Parse(format!(
                "token {} ({token:?}) is not an integer; expected {what}",
                self.consumed
            ))
        })
    }

    fn next_count(&mut self, what: &str) -> Result<u64> {
        let value = self.next_int(what)?;
        u64::try_from(value)
            .map_err(|_| Error::Parse(format!("{what} must be non-negative, got {value}")))
    }

    fn placements(&mut self, count: u64, label: &str) -> Result<Vec<Placement>> {
        (0..count)
            .map(|i| -> Result<Placement> {
                Ok(Placement {
                    row: self.next_int(&format!("{label} {i} row"))?,
                    col: self.next_int(&format!("{label} {i} column"))?,
                    facing: self.next_int(&format!("{label} {i} facing"))?,
                    stability: self.next_int(&format!("{label} {i} stability"))?,
                })
            })
            .collect()
    }

    fn has_remaining(&mut self) -> bool {
        self.inner.next().is_some()
    }
}
