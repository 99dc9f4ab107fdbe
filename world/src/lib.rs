#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative lawn state management for Lawn Siege.
//!
//! The world owns the plant and zombie rosters, the sun balance, and the
//! attempt phase machine. Drivers mutate it exclusively through [`apply`] and
//! observe it through the read-only [`query`] functions. One
//! [`Command::Step`] resolves a full simulation step in a fixed phase order;
//! reordering the phases changes game balance.

mod plants;
mod zombies;

use lawn_siege_core::{
    AttemptPhase, CellCoord, Command, Event, LawnGrid, PlacementError, PlantId, PlantKind,
    WaveProgression, ZombieId,
};
use plants::Plant;
use zombies::{Zombie, ZombieAction};

/// Parameters supplied by the external level component when an attempt begins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttemptConfig {
    grid: LawnGrid,
    starting_sun: u32,
}

impl AttemptConfig {
    /// Creates a new attempt configuration.
    #[must_use]
    pub const fn new(grid: LawnGrid, starting_sun: u32) -> Self {
        Self { grid, starting_sun }
    }

    /// Lawn dimensions for the attempt.
    #[must_use]
    pub const fn grid(&self) -> LawnGrid {
        self.grid
    }

    /// Sun available before the first producer yield.
    #[must_use]
    pub const fn starting_sun(&self) -> u32 {
        self.starting_sun
    }
}

/// Represents the authoritative state of one level attempt.
#[derive(Debug)]
pub struct World {
    phase: AttemptPhase,
    grid: LawnGrid,
    sun: u32,
    plants: Vec<Plant>,
    zombies: Vec<Zombie>,
    next_plant_id: u32,
    next_zombie_id: u32,
    schedule: Box<dyn WaveProgression>,
}

impl World {
    /// Creates a new world for a single level attempt.
    ///
    /// The wave schedule is consumed for the lifetime of the attempt; a fresh
    /// attempt needs a fresh schedule.
    #[must_use]
    pub fn new(config: AttemptConfig, schedule: Box<dyn WaveProgression>) -> Self {
        Self {
            phase: AttemptPhase::Idle,
            grid: config.grid(),
            sun: config.starting_sun(),
            plants: Vec::new(),
            zombies: Vec::new(),
            next_plant_id: 0,
            next_zombie_id: 0,
            schedule,
        }
    }

    fn allocate_plant_id(&mut self) -> PlantId {
        let id = PlantId::new(self.next_plant_id);
        self.next_plant_id = self.next_plant_id.wrapping_add(1);
        id
    }

    fn allocate_zombie_id(&mut self) -> ZombieId {
        let id = ZombieId::new(self.next_zombie_id);
        self.next_zombie_id = self.next_zombie_id.wrapping_add(1);
        id
    }

    /// Placement gate: checks run in a fixed order, and the sun balance is
    /// only touched once every check has passed.
    fn place_plant(&mut self, kind: PlantKind, cell: CellCoord) -> Result<PlantId, PlacementError> {
        if self.phase.is_terminal() {
            return Err(PlacementError::InvalidPhase);
        }
        if !self.grid.contains(cell) {
            return Err(PlacementError::OutOfBounds);
        }
        if self
            .plants
            .iter()
            .any(|plant| plant.is_alive() && plant.cell == cell)
        {
            return Err(PlacementError::Occupied);
        }
        let cost = kind.cost();
        if self.sun < cost {
            return Err(PlacementError::InsufficientSun);
        }

        self.sun -= cost;
        let id = self.allocate_plant_id();
        self.plants.push(Plant::new(id, kind, cell));
        Ok(id)
    }

    fn run_step(&mut self, spawn_row: u32, out_events: &mut Vec<Event>) {
        self.spawn_scheduled_zombie(spawn_row, out_events);
        self.update_plants(out_events);
        self.resolve_plant_attacks(out_events);
        self.clear_destroyed_plants(out_events);
        if self.resolve_zombies(out_events) {
            // A breach ends the attempt mid-step; nothing below may run.
            return;
        }
        self.clear_fallen_zombies();
        self.check_completion(out_events);
    }

    fn spawn_scheduled_zombie(&mut self, spawn_row: u32, out_events: &mut Vec<Event>) {
        let Some(kind) = self.schedule.next_zombie() else {
            return;
        };
        let (Some(column), Some(row)) = (self.grid.spawn_column(), self.grid.clamp_row(spawn_row))
        else {
            return;
        };

        let cell = CellCoord::new(column, row);
        let id = self.allocate_zombie_id();
        self.zombies.push(Zombie::new(id, kind, cell));
        out_events.push(Event::ZombieSpawned {
            zombie: id,
            kind,
            cell,
        });
    }

    fn update_plants(&mut self, out_events: &mut Vec<Event>) {
        for plant in self.plants.iter_mut().filter(|plant| plant.is_alive()) {
            let amount = plant.update();
            if amount > 0 {
                self.sun = self.sun.saturating_add(amount);
                out_events.push(Event::SunProduced {
                    plant: plant.id,
                    amount,
                    balance: self.sun,
                });
            }
        }
    }

    fn resolve_plant_attacks(&mut self, out_events: &mut Vec<Event>) {
        let plant_count = self.plants.len();
        for index in 0..plant_count {
            if !self.plants[index].is_alive() {
                continue;
            }
            let strikes = self.plants[index].resolve_attack(&self.zombies);
            if strikes.is_empty() {
                continue;
            }

            let plant_id = self.plants[index].id;
            for strike in &strikes {
                let zombie = &mut self.zombies[strike.zombie_index];
                zombie.health = zombie.health.damaged(strike.damage);
                out_events.push(Event::ZombieStruck {
                    plant: plant_id,
                    zombie: zombie.id,
                    damage: strike.damage,
                });
            }
            self.fell_struck_zombies(out_events);
        }
    }

    /// Removes zombies felled by the current volley, crediting their rewards
    /// and notifying the schedule, before the next plant picks its targets.
    fn fell_struck_zombies(&mut self, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.zombies.len() {
            if self.zombies[index].is_alive() {
                index += 1;
                continue;
            }
            let zombie = self.zombies.remove(index);
            let reward = zombie.kind.reward();
            self.sun = self.sun.saturating_add(reward);
            self.schedule.record_elimination();
            out_events.push(Event::ZombieFelled {
                zombie: zombie.id,
                kind: zombie.kind,
                reward,
            });
        }
    }

    fn clear_destroyed_plants(&mut self, out_events: &mut Vec<Event>) {
        let mut index = 0;
        while index < self.plants.len() {
            if self.plants[index].is_alive() {
                index += 1;
                continue;
            }
            let plant = self.plants.remove(index);
            out_events.push(Event::PlantDestroyed {
                plant: plant.id,
                kind: plant.kind,
                cell: plant.cell,
            });
        }
    }

    /// Resolves every living zombie. Returns `true` when a zombie breached
    /// the defended edge, in which case the attempt is already `Failed` and
    /// the remaining zombies were left unresolved.
    fn resolve_zombies(&mut self, out_events: &mut Vec<Event>) -> bool {
        let zombie_count = self.zombies.len();
        for index in 0..zombie_count {
            if !self.zombies[index].is_alive() {
                continue;
            }
            match self.zombies[index].resolve_turn(&self.plants) {
                ZombieAction::Bit {
                    plant_index,
                    damage,
                } => {
                    let zombie_id = self.zombies[index].id;
                    let plant = &mut self.plants[plant_index];
                    plant.health = plant.health.damaged(damage);
                    out_events.push(Event::PlantStruck {
                        zombie: zombie_id,
                        plant: plant.id,
                        damage,
                    });
                }
                ZombieAction::Advanced { from, to } => {
                    out_events.push(Event::ZombieAdvanced {
                        zombie: self.zombies[index].id,
                        from,
                        to,
                    });
                }
                ZombieAction::Waited => {}
                ZombieAction::ReachedBoundary => {
                    self.phase = AttemptPhase::Failed;
                    out_events.push(Event::LevelFailed {
                        zombie: self.zombies[index].id,
                    });
                    return true;
                }
            }
        }
        false
    }

    fn clear_fallen_zombies(&mut self) {
        self.zombies.retain(|zombie| zombie.is_alive());
    }

    fn check_completion(&mut self, out_events: &mut Vec<Event>) {
        if self.schedule.is_complete() {
            self.phase = AttemptPhase::Completed;
            out_events.push(Event::LevelCompleted);
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Start => {
            if world.phase == AttemptPhase::Idle {
                world.phase = AttemptPhase::Running;
                out_events.push(Event::AttemptStarted);
            }
        }
        Command::PlacePlant { kind, cell } => match world.place_plant(kind, cell) {
            Ok(plant) => out_events.push(Event::PlantPlaced { plant, kind, cell }),
            Err(reason) => out_events.push(Event::PlantPlacementRejected { kind, cell, reason }),
        },
        Command::Step { spawn_row } => {
            if world.phase == AttemptPhase::Running {
                world.run_step(spawn_row, out_events);
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use lawn_siege_core::{
        AttemptPhase, LawnGrid, PlantSnapshot, PlantView, WaveInfo, ZombieSnapshot, ZombieView,
    };

    /// Current phase of the level attempt.
    #[must_use]
    pub fn phase(world: &World) -> AttemptPhase {
        world.phase
    }

    /// Lawn dimensions supplied at attempt initialization.
    #[must_use]
    pub fn lawn(world: &World) -> LawnGrid {
        world.grid
    }

    /// Sun currently available for placement.
    #[must_use]
    pub fn sun_balance(world: &World) -> u32 {
        world.sun
    }

    /// Captures a read-only view of the plants on the lawn.
    #[must_use]
    pub fn plant_view(world: &World) -> PlantView {
        PlantView::from_snapshots(
            world
                .plants
                .iter()
                .map(|plant| PlantSnapshot {
                    id: plant.id,
                    kind: plant.kind,
                    cell: plant.cell,
                    health: plant.health,
                    cooldown_remaining: plant.cooldown_remaining(),
                })
                .collect(),
        )
    }

    /// Captures a read-only view of the zombies on the lawn.
    #[must_use]
    pub fn zombie_view(world: &World) -> ZombieView {
        ZombieView::from_snapshots(
            world
                .zombies
                .iter()
                .map(|zombie| ZombieSnapshot {
                    id: zombie.id,
                    kind: zombie.kind,
                    cell: zombie.cell,
                    health: zombie.health,
                    max_health: zombie.kind.initial_health(),
                    accumulated: zombie.accumulated(),
                })
                .collect(),
        )
    }

    /// Position within the wave schedule, forwarded from the collaborator.
    #[must_use]
    pub fn wave_info(world: &World) -> WaveInfo {
        world.schedule.wave_info()
    }
}
