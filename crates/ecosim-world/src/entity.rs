//! Animal state and per-species behaviour.

use ecosim_core::{
    EntityId, Extent, Facing, Position, Species, SpeciesTraits, PREDATOR_BREEDING_FOOD,
    PREY_BREEDING_AGES,
};
use serde::{Deserialize, Serialize};

/// Species-specific state carried by an animal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Kind {
    Prey,
    Predator {
        /// Prey eaten since the last offspring
        food: u32,
    },
}

impl Kind {
    pub fn fresh(species: Species) -> Self {
        match species {
            Species::Prey => Kind::Prey,
            Species::Predator => Kind::Predator { food: 0 },
        }
    }

    pub fn species(&self) -> Species {
        match self {
            Kind::Prey => Species::Prey,
            Kind::Predator { .. } => Species::Predator,
        }
    }
}

/// An animal on the grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Animal {
    pub id: EntityId,
    pub position: Position,
    pub facing: Facing,
    /// Ticks between turns; 0 never turns
    pub stability: u32,
    pub age: u32,
    pub kind: Kind,
}

impl Animal {
    pub fn new(
        id: EntityId,
        species: Species,
        position: Position,
        facing: Facing,
        stability: u32,
    ) -> Self {
        Self {
            id,
            position,
            facing,
            stability,
            age: 0,
            kind: Kind::fresh(species),
        }
    }

    pub fn species(&self) -> Species {
        self.kind.species()
    }

    pub fn traits(&self) -> SpeciesTraits {
        self.species().traits()
    }

    pub fn food(&self) -> u32 {
        match self.kind {
            Kind::Prey => 0,
            Kind::Predator { food } => food,
        }
    }

    /// Walk this tick's stride, one cell at a time, along the current facing.
    pub fn advance(&mut self, extent: Extent) {
        for _ in 0..self.traits().stride {
            self.position = self.position.step(self.facing, extent);
        }
    }

    pub fn grow(&mut self) {
        self.age += 1;
    }

    /// Turn clockwise when the current age is a positive multiple of the
    /// stability period. Returns whether a turn happened.
    pub fn rotate_if_due(&mut self) -> bool {
        if self.stability > 0 && self.age > 0 && self.age % self.stability == 0 {
            self.facing = self.facing.rotated();
            true
        } else {
            false
        }
    }

    pub fn feed(&mut self, count: u32) {
        if let Kind::Predator { food } = &mut self.kind {
            *food += count;
        }
    }

    pub fn reset_food(&mut self) {
        if let Kind::Predator { food } = &mut self.kind {
            *food = 0;
        }
    }

    pub fn wants_offspring(&self) -> bool {
        match self.kind {
            Kind::Prey => PREY_BREEDING_AGES.contains(&self.age),
            Kind::Predator { food } => food >= PREDATOR_BREEDING_FOOD,
        }
    }

    /// A newborn of the same species, standing where the parent stands.
    pub fn offspring(&self, id: EntityId) -> Self {
        Self::new(id, self.species(), self.position, self.facing, self.stability)
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.traits().max_age
    }
}
