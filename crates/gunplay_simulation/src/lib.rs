//! Gunplay Simulation Core
//!
//! Gameplay-ядро first-person прототипа на Bevy 0.16 ECS:
//! kinematic movement + multi-jump, инвентарь оружия, hit-scan урон,
//! interaction probe.
//!
//! Хост (рендер, камера, UI, физический движок) это внешние collaborators,
//! ядро потребляет только raycast capability (`PhysicsQuery`) и input snapshot.

use std::time::Duration;

use bevy::prelude::*;

// Публичные модули
pub mod actor;
pub mod combat;
pub mod config;
pub mod input;
pub mod interaction;
pub mod inventory;
pub mod logger;
pub mod movement;
pub mod physics;

// Re-export основных типов
pub use actor::{
    enemy_bundle, floor_bundle, player_bundle, weapon_pickup_bundle, Actor, ActorPlugin, Aim,
    Enemy, NextWeaponId, Player,
};
pub use combat::{
    CombatPlugin, DamageDealt, Damageable, EntityDied, FireResult, Health, KillIntent,
    TraceEffects, Weapon, WeaponFired, WeaponId,
};
pub use config::{ActorTuning, ConfigError, EnemyTuning, GameplayConfig, WeaponTuning};
pub use input::{consume_input_edges, ActorInput, InputSnapshot};
pub use interaction::{Interactable, InteractionPlugin, InteractionProbe, InteractionTargetChanged};
pub use inventory::{ActiveWeaponChanged, Inventory, InventoryPlugin, WeaponDropped, WeaponPickedUp};
pub use logger::*;
pub use movement::{JumpState, MovementController, MovementPlugin};
pub use physics::{PhysicsQuery, ProbeVolume, RayFilter, RayHit};

/// Фазы одного simulation tick (FixedUpdate), строго по порядку
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Input → MovementController → displacement
    Movement,
    /// Interaction probe + pickup
    Interaction,
    /// Cooldowns, reload, hit-scan, kill
    Combat,
    /// Scroll / slot select / drop
    Switching,
    /// Dead → despawn, потребление input edges
    Cleanup,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .init_resource::<GameplayConfig>()
            .configure_sets(
                FixedUpdate,
                (
                    GameplaySet::Movement,
                    GameplaySet::Interaction,
                    GameplaySet::Combat,
                    GameplaySet::Switching,
                    GameplaySet::Cleanup,
                )
                    .chain(),
            )
            .add_plugins((
                MovementPlugin,
                InteractionPlugin,
                CombatPlugin,
                InventoryPlugin,
                ActorPlugin,
            ))
            // Последней в тике: следующий FixedUpdate того же кадра не повторит нажатие
            .add_systems(
                FixedUpdate,
                consume_input_edges
                    .after(actor::despawn_dead)
                    .in_set(GameplaySet::Cleanup),
            );
    }
}

/// Создаёт minimal Bevy App для headless симуляции
pub fn create_headless_app() -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins((MinimalPlugins, SimulationPlugin));

    app
}

/// Один детерминированный simulation tick длиной `delta`
///
/// Не зависит от wall clock: `Time<Fixed>` продвигается ровно на `delta`.
pub fn run_fixed_tick(app: &mut App, delta: Duration) {
    let world = app.world_mut();
    world.resource_mut::<Time<Fixed>>().advance_by(delta);
    world.run_schedule(FixedUpdate);
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
