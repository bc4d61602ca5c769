//! Combat systems (FixedUpdate, фаза Combat)

use bevy::prelude::*;

use super::damage::{DamageDealt, Damageable, EntityDied, Health};
use super::weapon::{FireResult, WeaponId};
use crate::actor::Aim;
use crate::input::ActorInput;
use crate::interaction::Interactable;
use crate::inventory::Inventory;
use crate::physics::{RayFilter, SceneQuery};

/// Event: выстрел состоялся (ECS → rendering/audio collaborators)
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub weapon: WeaponId,
    /// Дуло
    pub from: Vec3,
    /// Точка попадания или конец range
    pub to: Vec3,
    /// Damageable, в который попали
    pub target: Option<Entity>,
    pub line_delay: f32,
}

/// System: weapon cooldowns (в инвентарях и лежащие в мире)
pub fn tick_weapon_cooldowns(
    mut inventories: Query<&mut Inventory>,
    mut pickups: Query<&mut Interactable>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for mut inventory in inventories.iter_mut() {
        for weapon in inventory.weapons_mut() {
            weapon.tick(delta);
        }
    }

    for mut pickup in pickups.iter_mut() {
        if let Some(weapon) = pickup.weapon.as_mut() {
            weapon.tick(delta);
        }
    }
}

/// System: reload активного оружия по input edge
pub fn reload_weapons(mut actors: Query<(Entity, &ActorInput, &mut Inventory)>) {
    for (entity, input, mut inventory) in actors.iter_mut() {
        if !input.0.reload_pressed {
            continue;
        }
        let Some(weapon) = inventory.active_mut() else {
            continue;
        };

        let moved = weapon.reload();
        crate::log(&format!(
            "Actor {:?} reloaded {} (+{} → clip {}/{}, reserve {})",
            entity, weapon.name, moved, weapon.clip, weapon.max_clip, weapon.ammo_reserve
        ));
    }
}

/// System: fire активного оружия (fire_held)
///
/// Ray: глаза актора + muzzle offset, forward взгляда. Собственное тело исключено.
/// Мёртвые стрелки (убиты ранее в этом же тике) не стреляют.
pub fn fire_weapons(
    scene: SceneQuery,
    mut shooters: Query<(Entity, &Transform, &Aim, &ActorInput, &mut Inventory)>,
    mut targets: Query<&mut Health>,
    mut fired: EventWriter<WeaponFired>,
    mut dealt: EventWriter<DamageDealt>,
    mut died: EventWriter<EntityDied>,
) {
    let physics = scene.snapshot();

    for (entity, transform, aim, input, mut inventory) in shooters.iter_mut() {
        if !input.0.fire_held {
            continue;
        }
        if targets.get(entity).is_ok_and(|health| health.is_dead()) {
            continue;
        }
        let Some(weapon) = inventory.active_mut() else {
            continue;
        };

        let muzzle = weapon.muzzle_ray(aim.eye_origin(transform), aim.eye_rotation(transform));
        let result = weapon.fire(
            muzzle,
            &physics,
            &RayFilter::excluding(entity),
            &mut targets,
        );

        let Some(end) = result.trace_end() else {
            if result == FireResult::Empty {
                crate::log(&format!("Actor {:?}: {} clip empty", entity, weapon.name));
            }
            continue;
        };

        let target = match result {
            FireResult::Hit {
                target,
                damage,
                killed,
                ..
            } => {
                dealt.write(DamageDealt {
                    attacker: entity,
                    target,
                    damage,
                    target_died: killed,
                });
                if killed {
                    crate::log_info(&format!("💀 Entity {:?} killed by {:?}", target, entity));
                    died.write(EntityDied {
                        entity: target,
                        killer: Some(entity),
                    });
                }
                Some(target)
            }
            _ => None,
        };

        fired.write(WeaponFired {
            shooter: entity,
            weapon: weapon.id,
            from: muzzle.origin,
            to: end,
            target,
            line_delay: weapon.line_delay,
        });
    }
}
