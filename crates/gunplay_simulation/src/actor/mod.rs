//! Actor domain: композиция компонентов, spawn, lifecycle (Dead → despawn)

use bevy::prelude::*;

pub mod components;
pub mod spawn;
pub mod systems;

// Re-export
pub use components::{Actor, Aim, Enemy, NextWeaponId, Player};
pub use spawn::{
    enemy_bundle, floor_bundle, player_bundle, weapon_pickup_bundle, ACTOR_HEIGHT, ACTOR_RADIUS,
    ENEMY_FACTION, PLAYER_FACTION,
};
pub use systems::despawn_dead;

use crate::GameplaySet;

/// Actor Plugin
///
/// Cleanup: despawn_dead (после всех фаз, которые могли убить)
pub struct ActorPlugin;

impl Plugin for ActorPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NextWeaponId>()
            .add_systems(FixedUpdate, despawn_dead.in_set(GameplaySet::Cleanup));
    }
}
