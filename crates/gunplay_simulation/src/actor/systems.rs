//! Actor lifecycle (фаза Cleanup)

use bevy::prelude::*;

use crate::combat::{EntityDied, Health};
use crate::inventory::{spawn_dropped_weapon, Inventory, WeaponDropped};

/// Высота, с которой падает оружие умершего актора
const DEATH_DROP_HEIGHT: f32 = 1.0;

/// System: EntityDied → выбросить оружие → despawn
///
/// Dead это terminal state, entity удаляется в том же тике, в котором умер.
pub fn despawn_dead(
    mut died: EventReader<EntityDied>,
    mut bodies: Query<(&Transform, Option<&mut Inventory>), With<Health>>,
    mut commands: Commands,
    mut dropped: EventWriter<WeaponDropped>,
) {
    for event in died.read() {
        let Ok((transform, inventory)) = bodies.get_mut(event.entity) else {
            crate::log_warning(&format!(
                "EntityDied: {:?} already removed or has no Transform",
                event.entity
            ));
            continue;
        };

        let at = transform.translation + Vec3::Y * DEATH_DROP_HEIGHT;
        if let Some(mut inventory) = inventory {
            for weapon in inventory.drain() {
                let id = weapon.id;
                let pickup = spawn_dropped_weapon(&mut commands, weapon, at);
                dropped.write(WeaponDropped {
                    actor: event.entity,
                    weapon: id,
                    pickup,
                });
            }
        }

        crate::log_info(&format!(
            "Entity {:?} despawned (killer: {:?})",
            event.entity, event.killer
        ));
        commands.entity(event.entity).despawn();
    }
}
