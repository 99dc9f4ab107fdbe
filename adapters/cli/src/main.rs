#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays a scripted Lawn Siege level headlessly.
//!
//! The driver owns everything the engine deliberately does not: the step
//! cadence, the row chosen for each spawn, and a small placement policy that
//! grows producers before shooters and walls. Every event the world emits is
//! printed as a log line.

use std::collections::HashSet;
use std::num::NonZeroU32;

use anyhow::{bail, Result};
use clap::Parser;
use lawn_siege_core::{
    AttemptPhase, CellCoord, Command, Event, LawnGrid, PlantKind, ZombieKind, WELCOME_BANNER,
};
use lawn_siege_system_waves::{ScriptedWaves, WavePlan, WaveScript};
use lawn_siege_world::{self as world, query, AttemptConfig, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Command-line arguments accepted by the Lawn Siege driver.
#[derive(Debug, Parser)]
#[command(name = "lawn-siege", about = "Headless Lawn Siege battle driver")]
struct Args {
    /// Number of lawn columns.
    #[arg(long, default_value_t = 9)]
    columns: u32,

    /// Number of lawn rows.
    #[arg(long, default_value_t = 5)]
    rows: u32,

    /// Sun available before the first producer yield.
    #[arg(long, default_value_t = 50)]
    starting_sun: u32,

    /// Campaign level to play when no custom spawns are given.
    #[arg(long, default_value_t = 1)]
    level: u32,

    /// Comma-separated zombie kinds overriding the campaign script,
    /// e.g. `walker,walker,sprinter`.
    #[arg(long, value_delimiter = ',')]
    spawns: Option<Vec<ZombieKind>>,

    /// Seed for the spawn-row choice.
    #[arg(long, default_value_t = 0x5eed_1a3d)]
    seed: u64,

    /// Safety cap on the number of simulated steps.
    #[arg(long, default_value_t = 600)]
    max_steps: u32,
}

const fn cadence(value: u32) -> NonZeroU32 {
    match NonZeroU32::new(value) {
        Some(value) => value,
        None => panic!("cadence must be non-zero"),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    if args.columns == 0 || args.rows == 0 {
        bail!("the lawn needs at least one column and one row");
    }

    let script = match &args.spawns {
        Some(kinds) => custom_script(kinds),
        None => campaign_script(args.level)?,
    };
    let wave_count = script.waves().len();
    let schedule = ScriptedWaves::new(script);

    println!("{WELCOME_BANNER}");
    println!(
        "defending a {}x{} lawn against {} zombies in {} waves",
        args.columns,
        args.rows,
        schedule.scheduled_total(),
        wave_count,
    );

    let config = AttemptConfig::new(LawnGrid::new(args.columns, args.rows), args.starting_sun);
    let mut world = World::new(config, Box::new(schedule));
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut events = Vec::new();

    world::apply(&mut world, Command::Start, &mut events);
    report(0, &mut events);

    let mut last_wave = query::wave_info(&world);
    let mut steps = 0;
    while steps < args.max_steps && query::phase(&world) == AttemptPhase::Running {
        steps += 1;
        plan_placements(&mut world, &mut events);

        let spawn_row = rng.gen_range(0..args.rows);
        world::apply(&mut world, Command::Step { spawn_row }, &mut events);
        report(steps, &mut events);

        let wave = query::wave_info(&world);
        if wave != last_wave && wave.total_waves > 0 {
            println!("       -- wave {}/{} --", wave.wave_number, wave.total_waves);
            last_wave = wave;
        }
    }

    match query::phase(&world) {
        AttemptPhase::Completed => println!("level completed after {steps} steps"),
        AttemptPhase::Failed => println!("level failed after {steps} steps"),
        AttemptPhase::Idle | AttemptPhase::Running => {
            println!("step cap of {} reached before an outcome", args.max_steps);
        }
    }
    println!(
        "final balance: {} sun, {} plants standing, {} zombies on the lawn",
        query::sun_balance(&world),
        query::plant_view(&world).iter().count(),
        query::zombie_view(&world).iter().count(),
    );

    Ok(())
}

/// Grows a sunflower per row along the house column, then a peashooter per
/// row one column ahead, then wall-nuts in front of the shooters. Placement
/// wishes are only surfaced once the balance can afford them.
fn next_placement(world: &World) -> Option<(PlantKind, CellCoord)> {
    let lawn = query::lawn(world);
    let sun = query::sun_balance(world);
    let occupied: HashSet<CellCoord> = query::plant_view(world)
        .iter()
        .map(|plant| plant.cell)
        .collect();

    let shooter_column = (lawn.columns() - 1).min(1);
    let wall_column = (lawn.columns() - 1).min(2);
    let lanes = [
        (PlantKind::Sunflower, 0),
        (PlantKind::Peashooter, shooter_column),
        (PlantKind::WallNut, wall_column),
    ];
    for (kind, column) in lanes {
        for row in 0..lawn.rows() {
            let cell = CellCoord::new(column, row);
            if occupied.contains(&cell) {
                continue;
            }
            return (sun >= kind.cost()).then_some((kind, cell));
        }
    }
    None
}

fn plan_placements(world: &mut World, out: &mut Vec<Event>) {
    while let Some((kind, cell)) = next_placement(world) {
        world::apply(world, Command::PlacePlant { kind, cell }, out);
        if matches!(out.last(), Some(Event::PlantPlacementRejected { .. })) {
            break;
        }
    }
}

fn report(step: u32, events: &mut Vec<Event>) {
    for event in events.drain(..) {
        println!("[{step:>4}] {}", describe(&event));
    }
}

fn describe(event: &Event) -> String {
    match event {
        Event::AttemptStarted => "the battle begins".to_owned(),
        Event::PlantPlaced { plant, kind, cell } => format!(
            "planted {kind} #{} at {}",
            plant.get(),
            cell_label(*cell)
        ),
        Event::PlantPlacementRejected { kind, cell, reason } => {
            format!("could not plant {kind} at {}: {reason}", cell_label(*cell))
        }
        Event::ZombieSpawned { zombie, kind, cell } => {
            format!("{kind} #{} shambles into row {}", zombie.get(), cell.row())
        }
        Event::SunProduced {
            plant,
            amount,
            balance,
        } => format!(
            "sunflower #{} gathered {amount} sun ({balance} banked)",
            plant.get()
        ),
        Event::ZombieStruck {
            plant,
            zombie,
            damage,
        } => format!(
            "plant #{} hit zombie #{} for {damage}",
            plant.get(),
            zombie.get()
        ),
        Event::ZombieFelled {
            zombie,
            kind,
            reward,
        } => format!("{kind} #{} felled, {reward} sun recovered", zombie.get()),
        Event::PlantStruck {
            zombie,
            plant,
            damage,
        } => format!(
            "zombie #{} bit plant #{} for {damage}",
            zombie.get(),
            plant.get()
        ),
        Event::PlantDestroyed { plant, kind, cell } => format!(
            "{kind} #{} destroyed at {}",
            plant.get(),
            cell_label(*cell)
        ),
        Event::ZombieAdvanced { zombie, to, .. } => {
            format!("zombie #{} advanced to {}", zombie.get(), cell_label(*to))
        }
        Event::LevelCompleted => "the lawn held: level completed".to_owned(),
        Event::LevelFailed { zombie } => {
            format!("zombie #{} reached the house: level failed", zombie.get())
        }
    }
}

fn cell_label(cell: CellCoord) -> String {
    format!("({}, {})", cell.row(), cell.column())
}

fn custom_script(kinds: &[ZombieKind]) -> WaveScript {
    WaveScript::new(vec![WavePlan::new(kinds.to_vec(), cadence(3))])
}

fn campaign_script(level: u32) -> Result<WaveScript> {
    use ZombieKind::{Buckethead, Conehead, Sprinter, Walker};

    let waves = match level {
        1 => vec![
            WavePlan::new(vec![Walker, Walker, Walker], cadence(8)),
            WavePlan::new(vec![Walker, Conehead, Walker], cadence(6)),
        ],
        2 => vec![
            WavePlan::new(vec![Walker, Sprinter, Walker], cadence(7)),
            WavePlan::new(vec![Conehead, Sprinter, Conehead, Walker], cadence(5)),
        ],
        3 => vec![
            WavePlan::new(vec![Conehead, Walker, Sprinter, Walker], cadence(6)),
            WavePlan::new(vec![Buckethead, Conehead, Sprinter], cadence(5)),
            WavePlan::new(vec![Buckethead, Buckethead, Sprinter, Conehead], cadence(4)),
        ],
        _ => bail!("unknown campaign level {level}; expected 1, 2, or 3"),
    };
    Ok(WaveScript::new(waves))
}

#[cfg(test)]
mod tests {
    use super::{campaign_script, custom_script, next_placement, plan_placements};
    use lawn_siege_core::{CellCoord, Command, Event, LawnGrid, PlantKind, ZombieKind};
    use lawn_siege_system_waves::ScriptedWaves;
    use lawn_siege_world::{self as world, query, AttemptConfig, World};

    fn quiet_world(starting_sun: u32) -> World {
        let script = campaign_script(1).expect("level one exists");
        let mut instance = World::new(
            AttemptConfig::new(LawnGrid::new(9, 5), starting_sun),
            Box::new(ScriptedWaves::new(script)),
        );
        let mut events = Vec::new();
        world::apply(&mut instance, Command::Start, &mut events);
        instance
    }

    #[test]
    fn campaign_rejects_unknown_levels() {
        assert!(campaign_script(4).is_err());
    }

    #[test]
    fn custom_scripts_keep_the_requested_order() {
        let script = custom_script(&[ZombieKind::Sprinter, ZombieKind::Walker]);
        assert_eq!(script.waves().len(), 1);
        assert_eq!(
            script.waves()[0].spawns(),
            &[ZombieKind::Sprinter, ZombieKind::Walker]
        );
    }

    #[test]
    fn policy_grows_producers_first() {
        let world = quiet_world(50);
        assert_eq!(
            next_placement(&world),
            Some((PlantKind::Sunflower, CellCoord::new(0, 0)))
        );
    }

    #[test]
    fn policy_waits_when_sun_is_short() {
        let world = quiet_world(10);
        assert_eq!(next_placement(&world), None);
    }

    #[test]
    fn policy_fills_cells_without_retrying_rejections() {
        let mut instance = quiet_world(150);
        let mut events = Vec::new();

        plan_placements(&mut instance, &mut events);

        // 150 sun buys three sunflowers down the house column.
        let placed: Vec<CellCoord> = query::plant_view(&instance)
            .iter()
            .map(|plant| plant.cell)
            .collect();
        assert_eq!(
            placed,
            vec![
                CellCoord::new(0, 0),
                CellCoord::new(0, 1),
                CellCoord::new(0, 2),
            ]
        );
        assert!(events
            .iter()
            .all(|event| matches!(event, Event::PlantPlaced { .. })));
    }
}
