#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lawn Siege engine.
//!
//! This crate defines the message surface that connects drivers to the
//! authoritative world. Drivers submit [`Command`] values describing desired
//! mutations, the world executes those commands via its `apply` entry point,
//! and then broadcasts [`Event`] values describing what actually happened.
//! The wave schedule that feeds the battle is consumed through the narrow
//! [`WaveProgression`] trait and never owned by this crate.

use std::{fmt, num::NonZeroU32, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lawn Siege.";

const fn non_zero(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(value) => value,
        None => panic!("constant must be non-zero"),
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Transitions an idle attempt into its running phase.
    Start,
    /// Requests placement of a plant on the provided lawn cell.
    PlacePlant {
        /// Variant of plant to grow at the cell.
        kind: PlantKind,
        /// Cell that should receive the plant.
        cell: CellCoord,
    },
    /// Advances the simulation by exactly one discrete step.
    Step {
        /// Row the driver selected for any zombie spawned this step. Rows
        /// beyond the lawn are clamped to the bottom row.
        spawn_row: u32,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that the attempt left the idle phase and began running.
    AttemptStarted,
    /// Confirms that a plant was grown on the lawn.
    PlantPlaced {
        /// Identifier allocated to the plant by the world.
        plant: PlantId,
        /// Variant of plant that was grown.
        kind: PlantKind,
        /// Cell the plant now occupies.
        cell: CellCoord,
    },
    /// Reports that a plant placement request was rejected.
    PlantPlacementRejected {
        /// Variant of plant requested for placement.
        kind: PlantKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a zombie shambled onto the lawn.
    ZombieSpawned {
        /// Identifier allocated to the zombie by the world.
        zombie: ZombieId,
        /// Variant of zombie that spawned.
        kind: ZombieKind,
        /// Cell the zombie occupies after spawning.
        cell: CellCoord,
    },
    /// Reports that a producer plant yielded sun.
    SunProduced {
        /// Plant that produced the sun.
        plant: PlantId,
        /// Amount of sun added to the balance.
        amount: u32,
        /// Sun balance after the yield was credited.
        balance: u32,
    },
    /// Reports that a plant struck a zombie.
    ZombieStruck {
        /// Plant that dealt the blow.
        plant: PlantId,
        /// Zombie that absorbed the blow.
        zombie: ZombieId,
        /// Damage applied to the zombie's health.
        damage: u32,
    },
    /// Confirms that a zombie was eliminated and its reward credited.
    ZombieFelled {
        /// Zombie that was eliminated.
        zombie: ZombieId,
        /// Variant of the eliminated zombie.
        kind: ZombieKind,
        /// Sun reward credited to the balance.
        reward: u32,
    },
    /// Reports that a zombie bit the plant sharing its cell.
    PlantStruck {
        /// Zombie that dealt the bite.
        zombie: ZombieId,
        /// Plant that absorbed the bite.
        plant: PlantId,
        /// Damage applied to the plant's health.
        damage: u32,
    },
    /// Confirms that a destroyed plant was cleared from the lawn.
    PlantDestroyed {
        /// Plant that was cleared.
        plant: PlantId,
        /// Variant of the cleared plant.
        kind: PlantKind,
        /// Cell the plant occupied.
        cell: CellCoord,
    },
    /// Confirms that a zombie advanced one column toward the defended edge.
    ZombieAdvanced {
        /// Zombie that advanced.
        zombie: ZombieId,
        /// Cell the zombie occupied before advancing.
        from: CellCoord,
        /// Cell the zombie occupies after advancing.
        to: CellCoord,
    },
    /// Announces that every scheduled zombie was spawned and eliminated.
    LevelCompleted,
    /// Announces that a zombie crossed the defended edge, ending the attempt.
    LevelFailed {
        /// Zombie that breached the defended edge.
        zombie: ZombieId,
    },
}

/// Unique identifier assigned to a plant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlantId(u32);

impl PlantId {
    /// Creates a new plant identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a zombie.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ZombieId(u32);

impl ZombieId {
    /// Creates a new zombie identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single lawn cell expressed as column and row coordinates.
///
/// Column zero is the defended edge; zombies spawn in the rightmost column
/// and advance toward column zero along their row.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new lawn cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Computes the Chebyshev distance between two cell coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.column()
            .abs_diff(other.column())
            .max(self.row().abs_diff(other.row()))
    }
}

/// Describes the discrete cell layout of the lawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LawnGrid {
    columns: u32,
    rows: u32,
}

impl LawnGrid {
    /// Creates a new lawn grid description.
    #[must_use]
    pub const fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// Number of columns contained in the lawn.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the lawn.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Reports whether the provided cell lies within the lawn.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.columns && cell.row() < self.rows
    }

    /// Rightmost column, where zombies enter the lawn. `None` when the lawn
    /// has no columns.
    #[must_use]
    pub const fn spawn_column(&self) -> Option<u32> {
        self.columns.checked_sub(1)
    }

    /// Clamps a driver-chosen row onto the lawn. `None` when the lawn has no
    /// rows.
    #[must_use]
    pub fn clamp_row(&self, row: u32) -> Option<u32> {
        let bottom = self.rows.checked_sub(1)?;
        Some(row.min(bottom))
    }
}

/// Current health of a unit, clamped at zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Health(u32);

impl Health {
    /// Creates a new health value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the remaining health points.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Returns the health left after absorbing the provided damage. Excess
    /// damage clamps at zero rather than wrapping.
    #[must_use]
    pub const fn damaged(self, amount: u32) -> Self {
        Self(self.0.saturating_sub(amount))
    }

    /// Returns the health value representing a destroyed unit.
    #[must_use]
    pub const fn depleted() -> Self {
        Self(0)
    }

    /// Reports whether the unit is still alive.
    #[must_use]
    pub const fn is_alive(&self) -> bool {
        self.0 > 0
    }
}

/// Variants of stationary defending plants.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantKind {
    /// Producer that periodically yields sun instead of attacking.
    Sunflower,
    /// Shooter that volleys down its own row at a limited range.
    Peashooter,
    /// Blocker with high health and no attack, a pure obstacle.
    WallNut,
    /// One-shot burst that levels its neighborhood and destroys itself.
    CherryBomb,
}

impl PlantKind {
    /// Sun cost deducted from the balance when the plant is placed.
    #[must_use]
    pub const fn cost(self) -> u32 {
        match self {
            Self::Sunflower => 50,
            Self::Peashooter => 100,
            Self::WallNut => 50,
            Self::CherryBomb => 150,
        }
    }

    /// Health the plant starts with when placed.
    #[must_use]
    pub const fn initial_health(self) -> Health {
        match self {
            Self::Sunflower => Health::new(30),
            Self::Peashooter => Health::new(30),
            Self::WallNut => Health::new(300),
            Self::CherryBomb => Health::new(30),
        }
    }

    /// Attack capability dispatched by the combat resolution.
    #[must_use]
    pub const fn attack_profile(self) -> AttackProfile {
        match self {
            Self::Sunflower | Self::WallNut => AttackProfile::Passive,
            Self::Peashooter => AttackProfile::Volley {
                power: 10,
                range: 3,
                cooldown: non_zero(1),
            },
            Self::CherryBomb => AttackProfile::Burst { power: 100 },
        }
    }

    /// Sun production capability, if the plant is a producer.
    #[must_use]
    pub const fn production(self) -> Option<Production> {
        match self {
            Self::Sunflower => Some(Production {
                amount: 25,
                cadence: non_zero(2),
            }),
            Self::Peashooter | Self::WallNut | Self::CherryBomb => None,
        }
    }

    /// Stable lowercase identifier used in configuration and display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sunflower => "sunflower",
            Self::Peashooter => "peashooter",
            Self::WallNut => "wallnut",
            Self::CherryBomb => "cherrybomb",
        }
    }
}

impl fmt::Display for PlantKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

impl FromStr for PlantKind {
    type Err = UnknownVariant;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        match identifier {
            "sunflower" => Ok(Self::Sunflower),
            "peashooter" => Ok(Self::Peashooter),
            "wallnut" => Ok(Self::WallNut),
            "cherrybomb" => Ok(Self::CherryBomb),
            _ => Err(UnknownVariant::new(identifier)),
        }
    }
}

/// Attack capability attached to a plant variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackProfile {
    /// Never attacks; the plant exists purely as a health buffer.
    Passive,
    /// Recurring volley limited to the plant's own row.
    Volley {
        /// Damage applied to every zombie caught in the volley.
        power: u32,
        /// Furthest column delta, ahead of the plant, that the volley reaches.
        range: u32,
        /// Steps that must elapse between volleys.
        cooldown: NonZeroU32,
    },
    /// One-shot burst covering the 3×3 neighborhood around the plant.
    Burst {
        /// Damage applied to every zombie caught in the burst.
        power: u32,
    },
}

/// Periodic sun yield attached to a producer plant variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Production {
    /// Sun granted on every yield.
    pub amount: u32,
    /// Steps that must elapse between yields.
    pub cadence: NonZeroU32,
}

/// Variants of mobile attacking zombies.
///
/// Variants differ only in their constants; every zombie follows the same
/// advance-or-bite state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZombieKind {
    /// Baseline shambler.
    Walker,
    /// Shambler reinforced with a traffic cone.
    Conehead,
    /// Shambler reinforced with a metal bucket.
    Buckethead,
    /// Fragile shambler that covers ground quickly.
    Sprinter,
}

impl ZombieKind {
    /// Health the zombie spawns with.
    #[must_use]
    pub const fn initial_health(self) -> Health {
        match self {
            Self::Walker => Health::new(100),
            Self::Conehead => Health::new(200),
            Self::Buckethead => Health::new(300),
            Self::Sprinter => Health::new(70),
        }
    }

    /// Damage dealt by each bite against a blocking plant.
    #[must_use]
    pub const fn bite_damage(self) -> u32 {
        match self {
            Self::Walker | Self::Conehead | Self::Buckethead | Self::Sprinter => 10,
        }
    }

    /// Steps the zombie must accumulate before advancing one column.
    #[must_use]
    pub const fn advance_interval(self) -> NonZeroU32 {
        match self {
            Self::Walker | Self::Conehead | Self::Buckethead => non_zero(5),
            Self::Sprinter => non_zero(2),
        }
    }

    /// Sun credited to the balance when the zombie is eliminated.
    #[must_use]
    pub const fn reward(self) -> u32 {
        match self {
            Self::Walker => 10,
            Self::Conehead => 15,
            Self::Buckethead => 20,
            Self::Sprinter => 15,
        }
    }

    /// Stable lowercase identifier used in configuration and display.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Walker => "walker",
            Self::Conehead => "conehead",
            Self::Buckethead => "buckethead",
            Self::Sprinter => "sprinter",
        }
    }
}

impl fmt::Display for ZombieKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.label())
    }
}

impl FromStr for ZombieKind {
    type Err = UnknownVariant;

    fn from_str(identifier: &str) -> Result<Self, Self::Err> {
        match identifier {
            "walker" => Ok(Self::Walker),
            "conehead" => Ok(Self::Conehead),
            "buckethead" => Ok(Self::Buckethead),
            "sprinter" => Ok(Self::Sprinter),
            _ => Err(UnknownVariant::new(identifier)),
        }
    }
}

/// Error produced when a unit identifier fails to parse.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown unit variant `{identifier}`")]
pub struct UnknownVariant {
    identifier: String,
}

impl UnknownVariant {
    /// Creates a new error recording the rejected identifier.
    #[must_use]
    pub fn new(identifier: &str) -> Self {
        Self {
            identifier: identifier.to_owned(),
        }
    }

    /// Identifier that failed to resolve to a unit variant.
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }
}

/// Reasons a plant placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
pub enum PlacementError {
    /// The attempt already reached a terminal phase, so placement is disabled.
    #[error("the attempt is over")]
    InvalidPhase,
    /// The requested cell lies beyond the lawn bounds.
    #[error("cell is outside the lawn")]
    OutOfBounds,
    /// A living plant already occupies the requested cell.
    #[error("cell is already planted")]
    Occupied,
    /// The sun balance cannot cover the plant's cost.
    #[error("not enough sun")]
    InsufficientSun,
}

/// Phases of a single level attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AttemptPhase {
    /// The attempt has not started; steps are ignored.
    Idle,
    /// The attempt is live and accepts steps.
    Running,
    /// Every scheduled zombie was spawned and eliminated. Terminal.
    Completed,
    /// A zombie crossed the defended edge. Terminal.
    Failed,
}

impl AttemptPhase {
    /// Reports whether the attempt reached a terminal outcome.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Position within the wave schedule, for display purposes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveInfo {
    /// One-based number of the wave currently releasing zombies.
    pub wave_number: u32,
    /// Total number of waves in the schedule.
    pub total_waves: u32,
}

/// Narrow interface through which the engine consumes wave progression.
///
/// The schedule is an external collaborator: the world asks it for spawns,
/// reports eliminations back, and polls its completion predicate. One
/// [`next_zombie`](Self::next_zombie) call corresponds to exactly one
/// simulation step, so implementations may use it as their clock.
pub trait WaveProgression: fmt::Debug {
    /// Returns the zombie variant scheduled for this step, if any.
    fn next_zombie(&mut self) -> Option<ZombieKind>;

    /// Records that one scheduled zombie was eliminated.
    fn record_elimination(&mut self);

    /// Reports whether every scheduled zombie was spawned and eliminated.
    fn is_complete(&self) -> bool;

    /// Describes the schedule position for display.
    fn wave_info(&self) -> WaveInfo;
}

/// Immutable representation of a single plant's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlantSnapshot {
    /// Identifier allocated to the plant by the world.
    pub id: PlantId,
    /// Variant of the plant.
    pub kind: PlantKind,
    /// Cell the plant occupies.
    pub cell: CellCoord,
    /// Remaining health of the plant.
    pub health: Health,
    /// Steps left until the plant may volley again.
    pub cooldown_remaining: u32,
}

/// Read-only snapshot describing all plants on the lawn.
#[derive(Clone, Debug, Default)]
pub struct PlantView {
    snapshots: Vec<PlantSnapshot>,
}

impl PlantView {
    /// Creates a new plant view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<PlantSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured plant snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &PlantSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<PlantSnapshot> {
        self.snapshots
    }
}

/// Immutable representation of a single zombie's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZombieSnapshot {
    /// Identifier allocated to the zombie by the world.
    pub id: ZombieId,
    /// Variant of the zombie.
    pub kind: ZombieKind,
    /// Cell the zombie occupies.
    pub cell: CellCoord,
    /// Remaining health of the zombie.
    pub health: Health,
    /// Health the zombie spawned with, for display ratios.
    pub max_health: Health,
    /// Steps accumulated toward the next advance.
    pub accumulated: u32,
}

/// Read-only snapshot describing all zombies on the lawn.
#[derive(Clone, Debug, Default)]
pub struct ZombieView {
    snapshots: Vec<ZombieSnapshot>,
}

impl ZombieView {
    /// Creates a new zombie view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<ZombieSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured zombie snapshots in deterministic order.
    pub fn iter(&self) -> impl Iterator<Item = &ZombieSnapshot> {
        self.snapshots.iter()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<ZombieSnapshot> {
        self.snapshots
    }
}
