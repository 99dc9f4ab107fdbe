//! Plant roster entries and their per-variant attack resolution.

use lawn_siege_core::{AttackProfile, CellCoord, Health, PlantId, PlantKind};

use crate::zombies::Zombie;

/// Record of a single blow dealt during plant attack resolution.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Strike {
    /// Roster index of the zombie that absorbed the blow.
    pub(crate) zombie_index: usize,
    /// Damage applied to the zombie's health.
    pub(crate) damage: u32,
}

/// Plant stored inside the world roster.
#[derive(Clone, Debug)]
pub(crate) struct Plant {
    pub(crate) id: PlantId,
    pub(crate) kind: PlantKind,
    pub(crate) cell: CellCoord,
    pub(crate) health: Health,
    cooldown_timer: u32,
    production_clock: u32,
    burst_spent: bool,
}

impl Plant {
    pub(crate) fn new(id: PlantId, kind: PlantKind, cell: CellCoord) -> Self {
        Self {
            id,
            kind,
            cell,
            health: kind.initial_health(),
            cooldown_timer: 0,
            production_clock: 0,
            burst_spent: false,
        }
    }

    pub(crate) fn is_alive(&self) -> bool {
        self.health.is_alive()
    }

    pub(crate) fn cooldown_remaining(&self) -> u32 {
        self.cooldown_timer
    }

    /// Advances the plant by one step and returns any sun yielded.
    ///
    /// Called once per step for every living plant, whether or not the plant
    /// attacks: the volley cooldown keeps counting down while a producer's
    /// clock keeps counting up.
    pub(crate) fn update(&mut self) -> u32 {
        self.cooldown_timer = self.cooldown_timer.saturating_sub(1);

        let Some(production) = self.kind.production() else {
            return 0;
        };
        self.production_clock += 1;
        if self.production_clock >= production.cadence.get() {
            self.production_clock = 0;
            production.amount
        } else {
            0
        }
    }

    /// Resolves the plant's attack against the zombie roster.
    ///
    /// Damage is not applied here; the returned strikes let the caller apply
    /// it while reconciling deaths, rewards, and notifications in one place.
    pub(crate) fn resolve_attack(&mut self, zombies: &[Zombie]) -> Vec<Strike> {
        match self.kind.attack_profile() {
            AttackProfile::Passive => Vec::new(),
            AttackProfile::Volley {
                power,
                range,
                cooldown,
            } => {
                if power == 0 || self.cooldown_timer > 0 {
                    return Vec::new();
                }
                // The cooldown rearms on every eligible volley, in range or not.
                self.cooldown_timer = cooldown.get();
                zombies
                    .iter()
                    .enumerate()
                    .filter(|(_, zombie)| {
                        zombie.is_alive() && volley_reaches(self.cell, range, zombie.cell)
                    })
                    .map(|(zombie_index, _)| Strike {
                        zombie_index,
                        damage: power,
                    })
                    .collect()
            }
            AttackProfile::Burst { power } => {
                if self.burst_spent {
                    return Vec::new();
                }
                self.burst_spent = true;
                self.health = Health::depleted();
                zombies
                    .iter()
                    .enumerate()
                    .filter(|(_, zombie)| {
                        zombie.is_alive() && self.cell.chebyshev_distance(zombie.cell) <= 1
                    })
                    .map(|(zombie_index, _)| Strike {
                        zombie_index,
                        damage: power,
                    })
                    .collect()
            }
        }
    }
}

/// A volley reaches every zombie on the plant's own row that stands at or
/// ahead of the plant's column, no further than `range` columns away.
fn volley_reaches(origin: CellCoord, range: u32, target: CellCoord) -> bool {
    target.row() == origin.row()
        && target.column() >= origin.column()
        && target.column() - origin.column() <= range
}
