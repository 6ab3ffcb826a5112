//! Density grid used to print the final state of a world.

use crate::world::World;
use ecosim_core::{Position, RenderConfig};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Occupancy of a single cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub prey: u32,
    pub predators: u32,
}

impl Cell {
    /// Prey minus predators
    pub fn net(&self) -> i64 {
        i64::from(self.prey) - i64::from(self.predators)
    }

    /// Occupied, but prey and predators cancel out
    pub fn is_contested(&self) -> bool {
        self.prey > 0 && self.prey == self.predators
    }
}

/// Per-cell population counts over the whole grid
#[derive(Debug, Clone, Serialize)]
pub struct DensityGrid {
    pub rows: u32,
    pub cols: u32,
    cells: Vec<Cell>,
}

impl DensityGrid {
    pub fn from_world(world: &World) -> Self {
        let extent = world.extent();
        let mut grid = Self {
            rows: extent.rows,
            cols: extent.cols,
            cells: vec![Cell::default(); extent.cells()],
        };

        for prey in world.prey() {
            grid.get_mut(prey.position).prey += 1;
        }
        for predator in world.predators() {
            grid.get_mut(predator.position).predators += 1;
        }

        grid
    }

    pub fn get(&self, pos: Position) -> &Cell {
        &self.cells[self.pos_to_index(pos)]
    }

    fn get_mut(&mut self, pos: Position) -> &mut Cell {
        let index = self.pos_to_index(pos);
        &mut self.cells[index]
    }

    fn pos_to_index(&self, pos: Position) -> usize {
        pos.row as usize * self.cols as usize + pos.col as usize
    }

    /// Print one line per row. A cell shows its net count, or the empty
    /// symbol when the net count is zero.
    pub fn render(&self, config: &RenderConfig) -> String {
        let mut out = String::with_capacity(self.cells.len() + self.rows as usize);

        for row in self.cells.chunks(self.cols as usize) {
            for cell in row {
                match (cell.net(), config.contested_symbol) {
                    (0, Some(symbol)) if cell.is_contested() => out.push(symbol),
                    (0, _) => out.push(config.empty_symbol),
                    (net, _) => out.push_str(&net.to_string()),
                }
            }
            out.push('\n');
        }

        out
    }
}

impl fmt::Display for DensityGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderConfig::default()))
    }
}
