//! The complete simulation state at a tick boundary.

use crate::entity::Animal;
use ecosim_core::{EntityId, Error, Extent, Facing, Result, Species};
use serde::Serialize;

/// Grid extent plus the live prey and predator populations.
///
/// Both populations are kept in ascending id order. The world also owns the
/// id counter, so every animal ever created in it gets a distinct, increasing
/// id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct World {
    extent: Extent,
    prey: Vec<Animal>,
    predators: Vec<Animal>,
    next_id: EntityId,
}

impl World {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            prey: Vec::new(),
            predators: Vec::new(),
            next_id: EntityId::default(),
        }
    }

    /// Create an empty world from raw dimensions
    pub fn with_size(rows: i64, cols: i64) -> Result<Self> {
        Ok(Self::new(Extent::new(rows, cols)?))
    }

    /// Validate and place an animal, returning its id.
    pub fn spawn(
        &mut self,
        species: Species,
        row: i64,
        col: i64,
        facing_code: i64,
        stability: i64,
    ) -> Result<EntityId> {
        let position = self.extent.position(row, col)?;
        let facing = Facing::from_code(facing_code)?;
        let stability = u32::try_from(stability).map_err(|_| Error::InvalidStability(stability))?;

        let id = self.allocate_id();
        let animal = Animal::new(id, species, position, facing, stability);
        match species {
            Species::Prey => self.prey.push(animal),
            Species::Predator => self.predators.push(animal),
        }
        Ok(id)
    }

    /// Hand out the next identity.
    pub fn allocate_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }

    pub fn extent(&self) -> Extent {
        self.extent
    }

    pub fn prey(&self) -> &[Animal] {
        &self.prey
    }

    pub fn predators(&self) -> &[Animal] {
        &self.predators
    }

    pub fn next_id(&self) -> EntityId {
        self.next_id
    }

    /// Number of (prey, predators) alive
    pub fn population(&self) -> (usize, usize) {
        (self.prey.len(), self.predators.len())
    }

    pub fn is_empty(&self) -> bool {
        self.prey.is_empty() && self.predators.is_empty()
    }

    pub fn animals(&self) -> impl Iterator<Item = &Animal> + '_ {
        self.prey.iter().chain(self.predators.iter())
    }

    /// Swap in freshly built populations for the next tick.
    pub(crate) fn replace_populations(&mut self, prey: Vec<Animal>, predators: Vec<Animal>) {
        self.prey = prey;
        self.predators = predators;
    }

    pub(crate) fn take_populations(&mut self) -> (Vec<Animal>, Vec<Animal>) {
        (
            std::mem::take(&mut self.prey),
            std::mem::take(&mut self.predators),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecosim_core::Position;

    #[test]
    fn test_world_creation() {
        let world = World::with_size(4, 6).unwrap();
        assert_eq!(world.extent(), Extent { rows: 4, cols: 6 });
        assert!(world.is_empty());
        assert_eq!(world.next_id(), EntityId(0));
    }

    #[test]
    fn test_rejects_empty_extent() {
        assert!(matches!(
            World::with_size(0, 3),
            Err(Error::InvalidExtent { rows: 0, cols: 3 })
        ));
        assert!(World::with_size(3, -1).is_err());
    }

    #[test]
    fn test_spawn_assigns_increasing_ids_across_species() {
        let mut world = World::with_size(3, 3).unwrap();
        let a = world.spawn(Species::Prey, 0, 0, 0, 0).unwrap();
        let b = world.spawn(Species::Predator, 1, 1, 1, 2).unwrap();
        let c = world.spawn(Species::Prey, 2, 2, 3, 1).unwrap();

        assert_eq!((a, b, c), (EntityId(0), EntityId(1), EntityId(2)));
        assert_eq!(world.population(), (2, 1));

        let predator = &world.predators()[0];
        assert_eq!(predator.position, Position::new(1, 1));
        assert_eq!(predator.facing, Facing::East);
        assert_eq!(predator.stability, 2);
    }

    #[test]
    fn test_spawn_validation() {
        let mut world = World::with_size(3, 3).unwrap();

        assert!(matches!(
            world.spawn(Species::Prey, 3, 0, 0, 0),
            Err(Error::InvalidPosition { row: 3, col: 0, .. })
        ));
        assert!(matches!(
            world.spawn(Species::Prey, 0, -1, 0, 0),
            Err(Error::InvalidPosition { .. })
        ));
        assert!(matches!(
            world.spawn(Species::Predator, 0, 0, 4, 0),
            Err(Error::InvalidFacing(4))
        ));
        assert!(matches!(
            world.spawn(Species::Predator, 0, 0, 0, -2),
            Err(Error::InvalidStability(-2))
        ));

        // Failed spawns must not consume ids
        assert_eq!(world.next_id(), EntityId(0));
        assert!(world.is_empty());
    }
}
