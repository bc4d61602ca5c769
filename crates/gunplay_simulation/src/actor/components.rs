//! Actor components: Actor, Player/Enemy маркеры, Aim

use bevy::prelude::*;

use crate::combat::{Health, WeaponId};
use crate::input::ActorInput;
use crate::interaction::InteractionProbe;
use crate::inventory::Inventory;
use crate::movement::MovementController;
use crate::physics::Displacement;

/// Актор (игрок, враг): композиция movement + inventory + damageable + probe
///
/// Автоматически добавляет всё остальное через Required Components;
/// spawn bundles перезаписывают значения из config.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(
    Health,
    Aim,
    ActorInput,
    Displacement,
    MovementController,
    Inventory,
    InteractionProbe
)]
pub struct Actor {
    /// Stable ID фракции
    pub faction_id: u64,
}

/// Маркер: управляется игроком
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Маркер: враг (AI нет, стоит на месте и получает урон)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Точка зрения актора (screen-center equivalent)
///
/// Yaw берётся из Transform актора, pitch хранится здесь (mouse-look снаружи).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Aim {
    pub eye_height: f32,
    /// Радианы, + вверх
    pub pitch: f32,
}

impl Default for Aim {
    fn default() -> Self {
        Self::new(1.6)
    }
}

impl Aim {
    pub fn new(eye_height: f32) -> Self {
        Self {
            eye_height,
            pitch: 0.0,
        }
    }

    pub fn eye_origin(&self, transform: &Transform) -> Vec3 {
        transform.translation + Vec3::Y * self.eye_height
    }

    pub fn eye_rotation(&self, transform: &Transform) -> Quat {
        transform.rotation * Quat::from_rotation_x(self.pitch)
    }

    /// Forward ray из глаз (interaction probe)
    pub fn eye_ray(&self, transform: &Transform) -> Ray3d {
        let direction =
            Dir3::new(self.eye_rotation(transform) * Vec3::NEG_Z).unwrap_or(Dir3::NEG_Z);
        Ray3d::new(self.eye_origin(transform), direction)
    }
}

/// Allocator стабильных WeaponId
#[derive(Resource, Debug, Default)]
pub struct NextWeaponId(u32);

impl NextWeaponId {
    pub fn allocate(&mut self) -> WeaponId {
        self.0 += 1;
        WeaponId(self.0)
    }
}
