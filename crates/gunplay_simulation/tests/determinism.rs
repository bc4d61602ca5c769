//! Тесты детерминизма
//!
//! Одинаковый scripted input + фиксированный dt → идентичный мир

use std::time::Duration;

use bevy::prelude::*;
use gunplay_simulation::{
    create_headless_app, enemy_bundle, floor_bundle, player_bundle, run_fixed_tick,
    weapon_pickup_bundle, world_snapshot, ActorInput, ActorTuning, EnemyTuning, Health,
    InputSnapshot, Inventory, MovementController, NextWeaponId, WeaponTuning,
};

const TICK_COUNT: u32 = 600;

/// Scripted input: бег, прыжки, pickup, стрельба, переключение, drop
fn scripted_input(tick: u32) -> InputSnapshot {
    InputSnapshot {
        move_axes: match tick % 120 {
            0..=29 => Vec2::new(0.0, 1.0),
            30..=59 => Vec2::new(1.0, 1.0),
            _ => Vec2::ZERO,
        },
        sprint_held: tick % 90 < 45,
        jump_pressed: tick % 150 == 10 || tick % 150 == 20,
        interact_pressed: tick % 25 == 0,
        fire_held: tick > 100,
        reload_pressed: tick % 200 == 199,
        scroll_delta: if tick % 70 == 0 { 0.5 } else { 0.0 },
        drop_pressed: tick == 450,
        ..default()
    }
}

/// Запускает симуляцию и возвращает snapshot мира
fn run_simulation(tick_count: u32) -> Vec<u8> {
    let mut app = create_headless_app();

    let world = app.world_mut();
    world.spawn(floor_bundle(Vec3::new(100.0, 0.5, 100.0), 0.0));
    let player = world
        .spawn(player_bundle(&ActorTuning::default(), Vec3::ZERO))
        .id();
    for i in 0..3 {
        world.spawn(enemy_bundle(
            &EnemyTuning::default(),
            Vec3::new(i as f32 * 2.0 - 2.0, 0.0, -8.0),
        ));
    }
    for i in 0..3 {
        let bundle = {
            let mut ids = world.resource_mut::<NextWeaponId>();
            weapon_pickup_bundle(
                &mut ids,
                &WeaponTuning::default(),
                Vec3::new(0.0, 1.6, -2.0 - i as f32),
            )
        };
        world.spawn(bundle);
    }

    let delta = Duration::from_secs_f64(1.0 / 60.0);
    for tick in 0..tick_count {
        if let Some(mut input) = app.world_mut().get_mut::<ActorInput>(player) {
            input.0 = scripted_input(tick);
        }
        run_fixed_tick(&mut app, delta);
    }

    let world = app.world_mut();
    let mut snapshot = world_snapshot::<Transform>(world);
    snapshot.extend(world_snapshot::<Health>(world));
    snapshot.extend(world_snapshot::<MovementController>(world));
    snapshot.extend(world_snapshot::<Inventory>(world));
    snapshot
}

#[test]
fn test_determinism_same_input() {
    let snapshot1 = run_simulation(TICK_COUNT);
    let snapshot2 = run_simulation(TICK_COUNT);

    assert_eq!(
        snapshot1, snapshot2,
        "Симуляция с одинаковым input дала разные результаты!"
    );
}

#[test]
fn test_determinism_multiple_runs() {
    // Запускаем 3 раза: все должны быть идентичны
    let snapshots: Vec<_> = (0..3).map(|_| run_simulation(TICK_COUNT)).collect();

    for (i, snapshot) in snapshots.iter().enumerate().skip(1) {
        assert_eq!(
            snapshots[0], *snapshot,
            "Прогон {} дал результат отличный от прогона 0",
            i
        );
    }
}

#[test]
fn test_scripted_run_changes_world() {
    let before = run_simulation(0);
    let after = run_simulation(TICK_COUNT);
    assert_ne!(before, after);
}
