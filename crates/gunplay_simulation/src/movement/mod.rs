//! Movement domain: kinematic motion, ground detection, multi-jump
//!
//! Содержит:
//! - MovementController (FSM прыжков + gravity)
//! - drive_movement system (input → displacement)
//! - Jumped event

use bevy::prelude::*;

pub mod controller;
pub mod systems;

#[cfg(test)]
mod controller_tests;

// Re-export
pub use controller::{JumpState, MoveIntent, MovementController, Pace};
pub use systems::{drive_movement, Jumped};

use crate::physics::{apply_displacement_headless, apply_displacement_to_character_bodies};
use crate::GameplaySet;

/// Movement Plugin
///
/// Порядок в фазе Movement:
/// 1. drive_movement: controller tick → Displacement
/// 2. apply_displacement_*: displacement → rapier controller / Transform
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Jumped>().add_systems(
            FixedUpdate,
            (
                drive_movement,
                (apply_displacement_to_character_bodies, apply_displacement_headless),
            )
                .chain()
                .in_set(GameplaySet::Movement),
        );
    }
}
