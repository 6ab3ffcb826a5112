//! Core type definitions for the simulation.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Creation-order identity of an animal.
///
/// Identities are handed out by the world in strictly increasing order and
/// are never reused, so comparing two ids compares the animals' seniority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct EntityId(pub u64);

impl EntityId {
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Size of the toroidal grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Extent {
    pub rows: u32,
    pub cols: u32,
}

impl Extent {
    /// Build an extent, rejecting empty axes.
    pub fn new(rows: i64, cols: i64) -> Result<Self> {
        match (u32::try_from(rows), u32::try_from(cols)) {
            (Ok(r), Ok(c)) if r > 0 && c > 0 => Ok(Self { rows: r, cols: c }),
            _ => Err(Error::InvalidExtent { rows, cols }),
        }
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.row < self.rows && pos.col < self.cols
    }

    pub fn cells(&self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Validate a raw coordinate pair against this extent
    pub fn position(&self, row: i64, col: i64) -> Result<Position> {
        let in_range = |v: i64, limit: u32| v >= 0 && v < i64::from(limit);
        if in_range(row, self.rows) && in_range(col, self.cols) {
            Ok(Position::new(row as u32, col as u32))
        } else {
            Err(Error::InvalidPosition {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            })
        }
    }
}

impl fmt::Display for Extent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Cell on the grid, addressed as (row, col)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u32,
    pub col: u32,
}

impl Position {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    /// Move one cell toward `facing`, wrapping around the edges of `extent`.
    pub fn step(&self, facing: Facing, extent: Extent) -> Self {
        let Extent { rows, cols } = extent;
        match facing {
            Facing::North => Self::new(self.row.checked_sub(1).unwrap_or(rows - 1), self.col),
            Facing::South => Self::new((self.row + 1) % rows, self.col),
            Facing::East => Self::new(self.row, (self.col + 1) % cols),
            Facing::West => Self::new(self.row, self.col.checked_sub(1).unwrap_or(cols - 1)),
        }
    }
}

/// Direction an animal walks in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    North,
    East,
    South,
    West,
}

impl Facing {
    /// Decode the numeric facing used in scenario files.
    pub fn from_code(code: i64) -> Result<Self> {
        match code {
            0 => Ok(Facing::North),
            1 => Ok(Facing::East),
            2 => Ok(Facing::South),
            3 => Ok(Facing::West),
            other => Err(Error::InvalidFacing(other)),
        }
    }

    /// Next facing clockwise: north, east, south, west, north.
    pub fn rotated(&self) -> Self {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }
}

/// Prey ages at which an offspring is produced.
pub const PREY_BREEDING_AGES: [u32; 2] = [5, 10];

/// Food a predator must have eaten before it produces an offspring.
pub const PREDATOR_BREEDING_FOOD: u32 = 2;

/// The two kinds of animal on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    Prey,
    Predator,
}

/// Constants that differ between species
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesTraits {
    /// Cells walked per tick, one at a time along the same facing
    pub stride: u32,
    /// Age at which the animal is removed
    pub max_age: u32,
}

const PREY_TRAITS: SpeciesTraits = SpeciesTraits {
    stride: 1,
    max_age: 10,
};

const PREDATOR_TRAITS: SpeciesTraits = SpeciesTraits {
    stride: 2,
    max_age: 15,
};

impl Species {
    pub fn traits(&self) -> SpeciesTraits {
        match self {
            Species::Prey => PREY_TRAITS,
            Species::Predator => PREDATOR_TRAITS,
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Prey => write!(f, "prey"),
            Species::Predator => write!(f, "predator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_position_wraps_at_edges() {
        let extent = Extent { rows: 3, cols: 4 };
        let corner = Position::new(0, 0);

        assert_eq!(corner.step(Facing::North, extent), Position::new(2, 0));
        assert_eq!(corner.step(Facing::West, extent), Position::new(0, 3));
        assert_eq!(
            Position::new(2, 3).step(Facing::South, extent),
            Position::new(0, 3)
        );
        assert_eq!(
            Position::new(2, 3).step(Facing::East, extent),
            Position::new(2, 0)
        );
    }

    #[test]
    fn test_single_cell_grid_wraps_to_itself() {
        let extent = Extent { rows: 1, cols: 1 };
        for facing in [Facing::North, Facing::East, Facing::South, Facing::West] {
            assert_eq!(Position::new(0, 0).step(facing, extent), Position::new(0, 0));
        }
    }

    #[test]
    fn test_facing_codes() {
        let decoded: Vec<Facing> = (0..4).map(|c| Facing::from_code(c).unwrap()).collect();
        assert_eq!(
            decoded,
            vec![Facing::North, Facing::East, Facing::South, Facing::West]
        );
        assert!(matches!(Facing::from_code(4), Err(Error::InvalidFacing(4))));
        assert!(matches!(Facing::from_code(-1), Err(Error::InvalidFacing(-1))));
    }

    #[test]
    fn test_rotation_cycle() {
        let mut facing = Facing::North;
        let mut seen = Vec::new();
        for _ in 0..4 {
            facing = facing.rotated();
            seen.push(facing);
        }
        assert_eq!(
            seen,
            vec![Facing::East, Facing::South, Facing::West, Facing::North]
        );
    }

    #[test]
    fn test_extent_validation() {
        assert!(Extent::new(3, 4).is_ok());
        assert!(matches!(
            Extent::new(0, 4),
            Err(Error::InvalidExtent { rows: 0, cols: 4 })
        ));
        assert!(matches!(Extent::new(3, -2), Err(Error::InvalidExtent { .. })));

        let extent = Extent::new(3, 4).unwrap();
        assert_eq!(extent.position(2, 3).unwrap(), Position::new(2, 3));
        assert!(matches!(
            extent.position(3, 0),
            Err(Error::InvalidPosition { row: 3, .. })
        ));
        assert!(extent.position(0, -1).is_err());
    }

    #[test]
    fn test_species_traits() {
        assert_eq!(Species::Prey.traits().stride, 1);
        assert_eq!(Species::Prey.traits().max_age, 10);
        assert_eq!(Species::Predator.traits().stride, 2);
        assert_eq!(Species::Predator.traits().max_age, 15);
    }

    proptest! {
        #[test]
        fn step_stays_on_grid(
            rows in 1u32..20,
            cols in 1u32..20,
            row in 0u32..20,
            col in 0u32..20,
            code in 0i64..4,
        ) {
            let extent = Extent { rows, cols };
            let start = Position::new(row % rows, col % cols);
            let facing = Facing::from_code(code).unwrap();
            let next = start.step(facing, extent);
            prop_assert!(extent.contains(next));
        }
    }
}
