use std::num::NonZeroU32;

use lawn_siege_core::{
    AttemptPhase, CellCoord, Command, Event, LawnGrid, PlacementError, PlantKind, ZombieKind,
};
use lawn_siege_system_waves::{ScriptedWaves, WavePlan, WaveScript};
use lawn_siege_world::{self as world, query, AttemptConfig, World};

fn cadence(value: u32) -> NonZeroU32 {
    NonZeroU32::new(value).expect("cadence must be non-zero")
}

fn attempt(columns: u32, rows: u32, starting_sun: u32, script: WaveScript) -> World {
    let mut world = World::new(
        AttemptConfig::new(LawnGrid::new(columns, rows), starting_sun),
        Box::new(ScriptedWaves::new(script)),
    );
    let mut events = Vec::new();
    world::apply(&mut world, Command::Start, &mut events);
    assert_eq!(events, vec![Event::AttemptStarted]);
    world
}

fn place(world: &mut World, kind: PlantKind, cell: CellCoord, out: &mut Vec<Event>) {
    world::apply(world, Command::PlacePlant { kind, cell }, out);
}

fn step(world: &mut World, out: &mut Vec<Event>) {
    world::apply(world, Command::Step { spawn_row: 0 }, out);
}

#[test]
fn defended_lawn_completes_the_level() {
    let script = WaveScript::new(vec![WavePlan::new(vec![ZombieKind::Walker], cadence(1))]);
    let mut world = attempt(9, 1, 200, script);
    let mut events = Vec::new();

    place(&mut world, PlantKind::Peashooter, CellCoord::new(0, 0), &mut events);
    assert!(matches!(events.last(), Some(Event::PlantPlaced { .. })));

    let mut steps = 0;
    while query::phase(&world) == AttemptPhase::Running && steps < 100 {
        step(&mut world, &mut events);
        steps += 1;
    }

    assert_eq!(query::phase(&world), AttemptPhase::Completed);
    assert!(events.iter().any(|event| matches!(
        event,
        Event::ZombieFelled {
            kind: ZombieKind::Walker,
            reward: 10,
            ..
        }
    )));
    assert!(events
        .iter()
        .any(|event| matches!(event, Event::LevelCompleted)));
    assert!(query::zombie_view(&world).into_vec().is_empty());
    // 200 starting, 100 spent on the shooter, 10 earned back.
    assert_eq!(query::sun_balance(&world), 110);
}

#[test]
fn undefended_lawn_fails_when_the_edge_is_breached() {
    let script = WaveScript::new(vec![WavePlan::new(vec![ZombieKind::Walker], cadence(1))]);
    let mut world = attempt(3, 1, 50, script);

    let mut failing_batch = None;
    for _ in 0..40 {
        let mut events = Vec::new();
        step(&mut world, &mut events);
        if events
            .iter()
            .any(|event| matches!(event, Event::LevelFailed { .. }))
        {
            failing_batch = Some(events);
            break;
        }
    }

    let events = failing_batch.expect("expected the walker to breach the edge");
    assert!(
        matches!(events.last(), Some(Event::LevelFailed { .. })),
        "failure must be the final event of its step: {events:?}"
    );
    assert_eq!(query::phase(&world), AttemptPhase::Failed);
    assert_eq!(query::zombie_view(&world).into_vec().len(), 1);
}

#[test]
fn economy_gates_placement_until_producers_catch_up() {
    // A schedule that stays quiet long enough for the scenario to play out.
    let script = WaveScript::new(vec![WavePlan::new(vec![ZombieKind::Walker], cadence(100))]);
    let mut world = attempt(9, 5, 50, script);
    let mut events = Vec::new();

    place(&mut world, PlantKind::Sunflower, CellCoord::new(0, 0), &mut events);
    assert_eq!(query::sun_balance(&world), 0);

    place(&mut world, PlantKind::WallNut, CellCoord::new(1, 0), &mut events);
    assert!(matches!(
        events.last(),
        Some(Event::PlantPlacementRejected {
            reason: PlacementError::InsufficientSun,
            ..
        })
    ));
    assert_eq!(query::sun_balance(&world), 0);

    // Two yields of 25 sun arrive on steps two and four.
    for _ in 0..4 {
        step(&mut world, &mut events);
    }
    assert_eq!(query::sun_balance(&world), 50);

    place(&mut world, PlantKind::WallNut, CellCoord::new(1, 0), &mut events);
    assert!(matches!(events.last(), Some(Event::PlantPlaced { .. })));
    assert_eq!(query::sun_balance(&world), 0);
}

#[test]
fn identically_driven_attempts_replay_identically() {
    let script = || {
        WaveScript::new(vec![
            WavePlan::new(vec![ZombieKind::Walker, ZombieKind::Sprinter], cadence(2)),
            WavePlan::new(vec![ZombieKind::Conehead], cadence(3)),
        ])
    };
    let drive = |world: &mut World| {
        let mut events = Vec::new();
        place(world, PlantKind::Sunflower, CellCoord::new(0, 0), &mut events);
        place(world, PlantKind::Peashooter, CellCoord::new(1, 0), &mut events);
        for _ in 0..60 {
            step(world, &mut events);
        }
        events
    };

    let mut first = attempt(9, 1, 200, script());
    let mut second = attempt(9, 1, 200, script());

    assert_eq!(drive(&mut first), drive(&mut second));
    assert_eq!(query::phase(&first), query::phase(&second));
    assert_eq!(
        query::plant_view(&first).into_vec(),
        query::plant_view(&second).into_vec()
    );
    assert_eq!(
        query::zombie_view(&first).into_vec(),
        query::zombie_view(&second).into_vec()
    );
}
