//! Inventory domain: упорядоченный список оружия, selection, pickup/drop

use bevy::prelude::*;

pub mod component;
pub mod systems;


// Re-export
pub use component::{DuplicateWeapon, Inventory};
pub use systems::{
    drop_point, drop_weapons, loose_weapon, pick_up_weapons, spawn_dropped_weapon,
    switch_weapons, ActiveWeaponChanged, WeaponDropped, WeaponPickedUp, PICKUP_HALF_EXTENTS,
};

use crate::interaction::report_interactions;
use crate::GameplaySet;

/// Inventory Plugin
///
/// - Interaction: pick_up_weapons (после probe + report_interactions)
/// - Switching: switch_weapons → drop_weapons
pub struct InventoryPlugin;

impl Plugin for InventoryPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponPickedUp>()
            .add_event::<WeaponDropped>()
            .add_event::<ActiveWeaponChanged>();

        app.add_systems(
            FixedUpdate,
            pick_up_weapons
                .after(report_interactions)
                .in_set(GameplaySet::Interaction),
        );

        app.add_systems(
            FixedUpdate,
            (switch_weapons, drop_weapons)
                .chain()
                .in_set(GameplaySet::Switching),
        );
    }
}
