//! Spawn bundles: игрок, враг, оружие в мире, пол

use bevy::prelude::*;

use super::components::{Actor, Aim, Enemy, NextWeaponId, Player};
use crate::combat::{Health, Weapon};
use crate::config::{ActorTuning, EnemyTuning, WeaponTuning};
use crate::interaction::InteractionProbe;
use crate::inventory::loose_weapon;
use crate::movement::MovementController;
use crate::physics::ProbeVolume;

pub const PLAYER_FACTION: u64 = 1;
pub const ENEMY_FACTION: u64 = 2;

/// Габариты актора (совпадают с capsule из character_body)
pub const ACTOR_RADIUS: f32 = 0.4;
pub const ACTOR_HEIGHT: f32 = 1.8;

/// Игрок в точке `at` (pivot = ноги)
pub fn player_bundle(tuning: &ActorTuning, at: Vec3) -> impl Bundle {
    (
        Name::new("Player"),
        Actor {
            faction_id: PLAYER_FACTION,
        },
        Player,
        Health::new(tuning.health),
        MovementController::from_tuning(tuning),
        InteractionProbe::new(tuning.interact_range),
        Aim::new(tuning.eye_height),
        Transform::from_translation(at),
        ProbeVolume::standing(ACTOR_RADIUS, ACTOR_HEIGHT),
    )
}

/// Враг: movement/eye defaults, health из config
pub fn enemy_bundle(tuning: &EnemyTuning, at: Vec3) -> impl Bundle {
    (
        Name::new("Enemy"),
        Actor {
            faction_id: ENEMY_FACTION,
        },
        Enemy,
        Health::new(tuning.health),
        Transform::from_translation(at),
        ProbeVolume::standing(ACTOR_RADIUS, ACTOR_HEIGHT),
    )
}

/// Новое (заряженное) оружие, лежащее в мире
pub fn weapon_pickup_bundle(
    ids: &mut NextWeaponId,
    tuning: &WeaponTuning,
    at: Vec3,
) -> impl Bundle {
    loose_weapon(Weapon::from_tuning(ids.allocate(), tuning), at)
}

/// Статичный пол: верхняя грань на высоте `top`
pub fn floor_bundle(half_extents: Vec3, top: f32) -> impl Bundle {
    (
        Name::new("Floor"),
        Transform::from_xyz(0.0, top - half_extents.y, 0.0),
        ProbeVolume::cuboid(half_extents),
    )
}
