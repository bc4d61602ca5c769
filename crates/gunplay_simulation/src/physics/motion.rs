//! Physical motion collaborator
//!
//! MovementController выдаёт displacement за тик, применяет его этот модуль:
//! - Rapier (`KinematicCharacterController`): displacement → `translation`,
//!   collision response делает rapier
//! - Headless (без rapier): displacement → Transform напрямую + простой
//!   snap на первый ProbeVolume под ногами (иначе актор проваливается)

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::query::{PhysicsQuery, RayFilter, SceneQuery};

/// Displacement текущего тика (пишет movement, читает motion)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Displacement(pub Vec3);

/// System: применить displacement к rapier character controller'ам
pub fn apply_displacement_to_character_bodies(
    mut bodies: Query<(&mut Displacement, &mut KinematicCharacterController)>,
) {
    for (mut displacement, mut controller) in bodies.iter_mut() {
        controller.translation = Some(displacement.0);
        displacement.0 = Vec3::ZERO;
    }
}

/// System: headless интеграция displacement → Transform
///
/// Падение ограничивается верхней гранью первого volume под ногами.
/// Горизонтальные коллизии не обрабатываются (это работа физического движка).
pub fn apply_displacement_headless(
    mut params: ParamSet<(
        SceneQuery,
        Query<
            (Entity, &mut Displacement, &mut Transform),
            Without<KinematicCharacterController>,
        >,
    )>,
) {
    let scene = params.p0().snapshot();

    for (entity, mut displacement, mut transform) in params.p1().iter_mut() {
        let delta = displacement.0;
        displacement.0 = Vec3::ZERO;
        if delta == Vec3::ZERO {
            continue;
        }

        let mut target = transform.translation + delta;
        if delta.y < 0.0 {
            let feet = transform.translation + Vec3::new(delta.x, 0.0, delta.z);
            let ray = Ray3d::new(feet, Dir3::NEG_Y);
            if let Some(hit) = scene.raycast(ray, -delta.y, &RayFilter::excluding(entity)) {
                target.y = hit.point.y;
            }
        }
        transform.translation = target;
    }
}

/// Rapier тело персонажа (для хостов, где запущен RapierPhysicsPlugin)
///
/// Capsule: высота 1.8m, радиус 0.4m.
pub fn character_body() -> impl Bundle {
    (
        RigidBody::KinematicPositionBased,
        Collider::capsule_y(0.5, 0.4),
        KinematicCharacterController::default(),
    )
}

/// Rapier тело свободно лежащего оружия (независимая физика)
pub fn loose_weapon_body() -> impl Bundle {
    (
        RigidBody::Dynamic,
        Collider::cuboid(0.3, 0.1, 0.05),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::ProbeVolume;

    fn headless_world() -> (World, Schedule) {
        let world = World::new();
        let mut schedule = Schedule::default();
        schedule.add_systems(apply_displacement_headless);
        (world, schedule)
    }

    #[test]
    fn test_headless_applies_displacement() {
        let (mut world, mut schedule) = headless_world();
        let actor = world
            .spawn((Transform::from_xyz(0.0, 5.0, 0.0), Displacement(Vec3::new(1.0, -0.5, 0.0))))
            .id();

        schedule.run(&mut world);

        let transform = world.get::<Transform>(actor).unwrap();
        assert_eq!(transform.translation, Vec3::new(1.0, 4.5, 0.0));
        assert_eq!(world.get::<Displacement>(actor).unwrap().0, Vec3::ZERO);
    }

    #[test]
    fn test_headless_snaps_onto_floor() {
        let (mut world, mut schedule) = headless_world();
        world.spawn((
            Transform::from_xyz(0.0, -0.5, 0.0),
            ProbeVolume::cuboid(Vec3::new(10.0, 0.5, 10.0)),
        ));
        let actor = world
            .spawn((Transform::from_xyz(0.0, 0.2, 0.0), Displacement(Vec3::new(0.0, -1.0, 0.0))))
            .id();

        schedule.run(&mut world);

        let transform = world.get::<Transform>(actor).unwrap();
        assert!(transform.translation.y.abs() < 1e-5, "y = {}", transform.translation.y);
    }

    #[test]
    fn test_character_body_receives_translation() {
        let mut world = World::new();
        let mut schedule = Schedule::default();
        schedule.add_systems(apply_displacement_to_character_bodies);

        let actor = world
            .spawn((
                Transform::default(),
                Displacement(Vec3::new(0.0, 0.0, -0.1)),
                character_body(),
            ))
            .id();

        schedule.run(&mut world);

        let controller = world.get::<KinematicCharacterController>(actor).unwrap();
        assert_eq!(controller.translation, Some(Vec3::new(0.0, 0.0, -0.1)));
    }
}
