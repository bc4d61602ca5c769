//! Inventory systems: pickup (фаза Interaction), switch + drop (фаза Switching)

use bevy::prelude::*;

use super::component::{DuplicateWeapon, Inventory};
use crate::combat::{Weapon, WeaponId};
use crate::input::ActorInput;
use crate::interaction::{Interactable, InteractionProbe};
use crate::physics::{loose_weapon_body, ProbeVolume};

/// Куда падает выброшенное оружие относительно актора
const DROP_DISTANCE: f32 = 1.0;
const DROP_HEIGHT: f32 = 1.0;

/// Query volume оружия в мире (для interaction probe)
pub const PICKUP_HALF_EXTENTS: Vec3 = Vec3::splat(0.3);

/// Event: оружие перешло из мира в инвентарь
#[derive(Event, Debug, Clone)]
pub struct WeaponPickedUp {
    pub actor: Entity,
    pub weapon: WeaponId,
    /// World entity, которое держало оружие (despawn)
    pub pickup: Entity,
}

/// Event: оружие выброшено в мир
#[derive(Event, Debug, Clone)]
pub struct WeaponDropped {
    pub actor: Entity,
    pub weapon: WeaponId,
    /// Новое world entity с оружием
    pub pickup: Entity,
}

/// Event: активное оружие сменилось (viewmodel, HUD)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct ActiveWeaponChanged {
    pub actor: Entity,
    pub previous: Option<WeaponId>,
    pub current: Option<WeaponId>,
}

/// Bundle оружия, лежащего в мире (free physical state)
pub fn loose_weapon(weapon: Weapon, at: Vec3) -> impl Bundle {
    (
        Name::new(format!("Pickup: {}", weapon.name)),
        Interactable::weapon(weapon),
        ProbeVolume::cuboid(PICKUP_HALF_EXTENTS),
        Transform::from_translation(at),
        loose_weapon_body(),
    )
}

/// Выбросить оружие в мир (weapon.drop() + новый world entity)
pub fn spawn_dropped_weapon(commands: &mut Commands, mut weapon: Weapon, at: Vec3) -> Entity {
    weapon.drop();
    commands.spawn(loose_weapon(weapon, at)).id()
}

/// Точка, куда актор выбрасывает оружие
pub fn drop_point(transform: &Transform) -> Vec3 {
    transform.translation + transform.forward() * DROP_DISTANCE + Vec3::Y * DROP_HEIGHT
}

/// System: interact по pickup'у → оружие в инвентарь
///
/// Передача атомарна: Option::take у Interactable + push в Inventory в одном тике,
/// world entity despawn'ится через Commands.
pub fn pick_up_weapons(
    mut actors: Query<(Entity, &ActorInput, &InteractionProbe, &mut Inventory)>,
    mut pickups: Query<&mut Interactable>,
    mut commands: Commands,
    mut picked_up: EventWriter<WeaponPickedUp>,
    mut active_changed: EventWriter<ActiveWeaponChanged>,
) {
    for (entity, input, interaction, mut inventory) in actors.iter_mut() {
        if !input.0.interact_pressed {
            continue;
        }
        let Some(target) = interaction.current else {
            continue;
        };
        let Ok(mut pickup) = pickups.get_mut(target) else {
            continue;
        };
        // Уже подобрано другим актором в этом тике
        let Some(mut weapon) = pickup.weapon.take() else {
            continue;
        };

        let id = weapon.id;
        weapon.pickup(entity);
        let name = weapon.name.clone();

        let previous = match inventory.pickup(weapon) {
            Ok(previous) => previous,
            Err(DuplicateWeapon(mut weapon)) => {
                crate::log_warning(&format!(
                    "Actor {:?} already carries {:?}, pickup {:?} left in world",
                    entity, id, target
                ));
                weapon.drop();
                pickup.weapon = Some(weapon);
                continue;
            }
        };
        crate::log_info(&format!(
            "🔫 Actor {:?} picked up {} ({:?})",
            entity, name, id
        ));
        commands.entity(target).despawn();

        picked_up.write(WeaponPickedUp {
            actor: entity,
            weapon: id,
            pickup: target,
        });
        active_changed.write(ActiveWeaponChanged {
            actor: entity,
            previous,
            current: Some(id),
        });
    }
}

/// System: scroll cycle / прямой выбор слота
///
/// select_slot важнее scroll; invalid selection молча игнорируется.
pub fn switch_weapons(
    mut actors: Query<(Entity, &ActorInput, &mut Inventory)>,
    mut active_changed: EventWriter<ActiveWeaponChanged>,
) {
    for (entity, input, mut inventory) in actors.iter_mut() {
        let previous = inventory.active_id();

        let switched = match input.0.select_slot {
            Some(slot) => inventory.select(slot),
            None => inventory.cycle(input.0.cycle_direction()),
        };
        if !switched {
            continue;
        }

        let current = inventory.active_id();
        crate::log(&format!(
            "Actor {:?} switched weapon {:?} → {:?} (slot {:?})",
            entity,
            previous,
            current,
            inventory.selected_index()
        ));
        active_changed.write(ActiveWeaponChanged {
            actor: entity,
            previous,
            current,
        });
    }
}

/// System: drop input → активное оружие в мир (selection сбрасывается)
pub fn drop_weapons(
    mut actors: Query<(Entity, &Transform, &ActorInput, &mut Inventory)>,
    mut commands: Commands,
    mut dropped: EventWriter<WeaponDropped>,
    mut active_changed: EventWriter<ActiveWeaponChanged>,
) {
    for (entity, transform, input, mut inventory) in actors.iter_mut() {
        if !input.0.drop_pressed {
            continue;
        }
        let Some(weapon) = inventory.drop_active() else {
            continue;
        };

        let id = weapon.id;
        crate::log_info(&format!("Actor {:?} dropped {} ({:?})", entity, weapon.name, id));
        let pickup = spawn_dropped_weapon(&mut commands, weapon, drop_point(transform));

        dropped.write(WeaponDropped {
            actor: entity,
            weapon: id,
            pickup,
        });
        active_changed.write(ActiveWeaponChanged {
            actor: entity,
            previous: Some(id),
            current: None,
        });
    }
}
