//! Zombie roster entries and their advance-or-bite resolution.

use lawn_siege_core::{CellCoord, Health, ZombieId, ZombieKind};

use crate::plants::Plant;

/// Outcome of resolving a single zombie for one step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ZombieAction {
    /// Bit the living plant sharing the zombie's cell.
    Bit {
        /// Roster index of the bitten plant.
        plant_index: usize,
        /// Damage applied to the plant's health.
        damage: u32,
    },
    /// Advanced one column toward the defended edge.
    Advanced {
        /// Cell occupied before the advance.
        from: CellCoord,
        /// Cell occupied after the advance.
        to: CellCoord,
    },
    /// Accumulated toward the next advance without moving.
    Waited,
    /// Came due to advance past the defended edge.
    ReachedBoundary,
}

/// Zombie stored inside the world roster.
#[derive(Clone, Debug)]
pub(crate) struct Zombie {
    pub(crate) id: ZombieId,
    pub(crate) kind: ZombieKind,
    pub(crate) cell: CellCoord,
    pub(crate) health: Health,
    advance_clock: u32,
}

impl Zombie {
    pub(crate) fn new(id: ZombieId, kind: ZombieKind, cell: CellCoord) -> Self {
        Self {
            id,
            kind,
            cell,
            health: kind.initial_health(),
            advance_clock: 0,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub(crate) fn accumulated(&self) -> u32 {
        self.advance_clock
    }

    /// Resolves one step for the zombie: bite the plant blocking its cell, or
    /// accumulate toward the next one-column advance.
    ///
    /// The blocking plant is looked up fresh every step rather than remembered
    /// across steps; the plant found last step may be gone by now. Biting
    /// consumes the whole step and leaves the advance clock untouched.
    pub(crate) fn resolve_turn(&mut self, plants: &[Plant]) -> ZombieAction {
        let blocking = plants
            .iter()
            .position(|plant| plant.is_alive() && plant.cell == self.cell);
        if let Some(plant_index) = blocking {
            return ZombieAction::Bit {
                plant_index,
                damage: self.kind.bite_damage(),
            };
        }

        self.advance_clock += 1;
        if self.advance_clock < self.kind.advance_interval().get() {
            return ZombieAction::Waited;
        }

        let Some(next_column) = self.cell.column().checked_sub(1) else {
            return ZombieAction::ReachedBoundary;
        };
        self.advance_clock = 0;
        let from = self.cell;
        self.cell = CellCoord::new(next_column, from.row());
        ZombieAction::Advanced {
            from,
            to: self.cell,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Zombie, ZombieAction};
    use crate::plants::Plant;
    use lawn_siege_core::{CellCoord, PlantId, PlantKind, ZombieId, ZombieKind};

    fn walker_at(column: u32, row: u32) -> Zombie {
        Zombie::new(ZombieId::new(0), ZombieKind::Walker, CellCoord::new(column, row))
    }

    #[test]
    fn walker_advances_once_every_five_steps() {
        let mut zombie = walker_at(8, 0);
        let mut advances = Vec::new();

        for step in 1..=10 {
            if let ZombieAction::Advanced { .. } = zombie.resolve_turn(&[]) {
                advances.push(step);
            }
        }

        assert_eq!(advances, vec![5, 10]);
        assert_eq!(zombie.cell, CellCoord::new(6, 0));
    }

    #[test]
    fn sprinter_advances_once_every_two_steps() {
        let mut zombie = Zombie::new(ZombieId::new(0), ZombieKind::Sprinter, CellCoord::new(8, 2));
        let mut advances = 0;

        for _ in 0..10 {
            if let ZombieAction::Advanced { .. } = zombie.resolve_turn(&[]) {
                advances += 1;
            }
        }

        assert_eq!(advances, 5);
        assert_eq!(zombie.cell, CellCoord::new(3, 2));
    }

    #[test]
    fn biting_takes_precedence_over_a_ready_advance() {
        let mut zombie = walker_at(4, 1);
        zombie.advance_clock = 99;
        let plants = vec![Plant::new(
            PlantId::new(0),
            PlantKind::WallNut,
            CellCoord::new(4, 1),
        )];

        let action = zombie.resolve_turn(&plants);

        assert_eq!(
            action,
            ZombieAction::Bit {
                plant_index: 0,
                damage: 10,
            }
        );
        assert_eq!(zombie.cell, CellCoord::new(4, 1));
        assert_eq!(zombie.accumulated(), 99);
    }

    #[test]
    fn dead_plants_do_not_block() {
        let mut zombie = walker_at(4, 1);
        zombie.advance_clock = 4;
        let mut plants = vec![Plant::new(
            PlantId::new(0),
            PlantKind::WallNut,
            CellCoord::new(4, 1),
        )];
        plants[0].health = plants[0].health.damaged(u32::MAX);

        let action = zombie.resolve_turn(&plants);

        assert_eq!(
            action,
            ZombieAction::Advanced {
                from: CellCoord::new(4, 1),
                to: CellCoord::new(3, 1),
            }
        );
    }

    #[test]
    fn plants_in_other_cells_do_not_block() {
        let mut zombie = walker_at(4, 1);
        zombie.advance_clock = 4;
        let plants = vec![
            Plant::new(PlantId::new(0), PlantKind::WallNut, CellCoord::new(3, 1)),
            Plant::new(PlantId::new(1), PlantKind::WallNut, CellCoord::new(4, 0)),
        ];

        let action = zombie.resolve_turn(&plants);

        assert!(matches!(action, ZombieAction::Advanced { .. }));
    }

    #[test]
    fn boundary_is_reported_without_moving() {
        let mut zombie = walker_at(0, 3);

        for _ in 0..4 {
            assert_eq!(zombie.resolve_turn(&[]), ZombieAction::Waited);
        }
        assert_eq!(zombie.resolve_turn(&[]), ZombieAction::ReachedBoundary);
        assert_eq!(zombie.cell, CellCoord::new(0, 3));
    }
}
