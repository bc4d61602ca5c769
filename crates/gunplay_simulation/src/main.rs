//! Headless демо gunplay симуляции
//!
//! Scripted input: игрок подходит к оружию, подбирает его, стреляет во врага
//! до смерти, выбрасывает оружие. Первый аргумент: опциональный TOML config.

use std::time::Duration;

use bevy::prelude::*;
use gunplay_simulation::{
    create_headless_app, enemy_bundle, floor_bundle, log_error, log_info, player_bundle,
    run_fixed_tick, weapon_pickup_bundle, ActorInput, GameplayConfig, Health, InputSnapshot,
    Inventory, NextWeaponId,
};

const TICKS: u32 = 300;

fn load_config() -> GameplayConfig {
    let Some(path) = std::env::args().nth(1) else {
        return GameplayConfig::default();
    };

    match GameplayConfig::load(&path) {
        Ok(config) => {
            log_info(&format!("Loaded config from {}", path));
            config
        }
        Err(err) => {
            log_error(&format!("Config {}: {} (using defaults)", path, err));
            GameplayConfig::default()
        }
    }
}

/// Input игрока на тик `tick`
fn scripted_input(tick: u32) -> InputSnapshot {
    match tick {
        // Идём вперёд к оружию
        0..=29 => InputSnapshot {
            move_axes: Vec2::Y,
            ..default()
        },
        // Подбираем
        120 => InputSnapshot {
            interact_pressed: true,
            ..default()
        },
        // Стреляем
        130..=269 => InputSnapshot {
            fire_held: true,
            ..default()
        },
        275 => InputSnapshot {
            reload_pressed: true,
            ..default()
        },
        285 => InputSnapshot {
            drop_pressed: true,
            ..default()
        },
        // Прыжок + двойной прыжок
        290 | 295 => InputSnapshot {
            jump_pressed: true,
            ..default()
        },
        _ => InputSnapshot::default(),
    }
}

fn main() {
    let config = load_config();
    log_info("Starting gunplay headless simulation");

    let mut app = create_headless_app();
    app.insert_resource(config.clone());

    let world = app.world_mut();
    world.spawn(floor_bundle(Vec3::new(50.0, 0.5, 50.0), 0.0));
    let player = world.spawn(player_bundle(&config.player, Vec3::ZERO)).id();
    let enemy = world
        .spawn(enemy_bundle(&config.enemy, Vec3::new(0.0, 0.0, -8.0)))
        .id();

    // Оружие на уровне глаз в 4м перед стартом игрока
    let eye = config.player.eye_height;
    for tuning in &config.weapons {
        let bundle = {
            let mut ids = world.resource_mut::<NextWeaponId>();
            weapon_pickup_bundle(&mut ids, tuning, Vec3::new(0.0, eye, -4.0))
        };
        world.spawn(bundle);
    }

    let delta = Duration::from_secs_f64(1.0 / 60.0);
    for tick in 0..TICKS {
        if let Some(mut input) = app.world_mut().get_mut::<ActorInput>(player) {
            input.0 = scripted_input(tick);
        }

        run_fixed_tick(&mut app, delta);

        if tick % 30 == 0 {
            let world = app.world();
            let position = world.get::<Transform>(player).map(|t| t.translation);
            let enemy_health = world.get::<Health>(enemy).map(|h| h.current);
            let weapons = world.get::<Inventory>(player).map(|i| i.len());
            log_info(&format!(
                "Tick {}: player at {:?}, weapons {:?}, enemy health {:?}",
                tick, position, weapons, enemy_health
            ));
        }
    }

    log_info(&format!(
        "Simulation complete! {} entities",
        app.world().entities().len()
    ));
}
