//! Interactable capability + forward interaction probe

use bevy::prelude::*;

use crate::combat::Weapon;
use crate::physics::{PhysicsQuery, RayFilter};

/// Capability: "можно взаимодействовать"
///
/// `weapon: Some` = pickup affordance (оружие лежит в мире и принадлежит этому entity).
#[derive(Component, Debug)]
pub struct Interactable {
    pub title: String,
    pub weapon: Option<Weapon>,
}

impl Interactable {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            weapon: None,
        }
    }

    /// Оружие в мире (title = имя оружия)
    pub fn weapon(weapon: Weapon) -> Self {
        Self {
            title: weapon.name.clone(),
            weapon: Some(weapon),
        }
    }

    pub fn is_pickup(&self) -> bool {
        self.weapon.is_some()
    }
}

/// Probe актора: последний найденный target
///
/// `current` нужен только для подавления повторных уведомлений UI,
/// сам probe каждый тик считается заново.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
pub struct InteractionProbe {
    pub range: f32,
    pub current: Option<Entity>,
}

impl Default for InteractionProbe {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl InteractionProbe {
    pub fn new(range: f32) -> Self {
        Self {
            range,
            current: None,
        }
    }

    /// Запомнить target этого тика; true если он изменился
    pub fn update(&mut self, target: Option<Entity>) -> bool {
        if self.current == target {
            return false;
        }
        self.current = target;
        true
    }
}

/// Первая поверхность вдоль ray; Some только если она interactable
///
/// Не-interactable поверхность (стена) блокирует всё, что за ней.
pub fn probe(
    physics: &dyn PhysicsQuery,
    ray: Ray3d,
    max_range: f32,
    filter: &RayFilter,
    is_interactable: impl Fn(Entity) -> bool,
) -> Option<Entity> {
    let hit = physics.raycast(ray, max_range, filter)?;
    is_interactable(hit.surface).then_some(hit.surface)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::VolumeScene;

    fn crate_box() -> Entity {
        Entity::from_raw(20)
    }

    fn wall() -> Entity {
        Entity::from_raw(21)
    }

    fn eye_ray() -> Ray3d {
        Ray3d::new(Vec3::new(0.0, 1.6, 0.0), Dir3::NEG_Z)
    }

    fn is_crate(entity: Entity) -> bool {
        entity == crate_box()
    }

    #[test]
    fn test_probe_finds_interactable_in_range() {
        let scene = VolumeScene::new().with_box(crate_box(), Vec3::new(0.0, 1.5, -4.0), Vec3::splat(0.5));

        let target = probe(&scene, eye_ray(), 10.0, &RayFilter::default(), is_crate);
        assert_eq!(target, Some(crate_box()));

        let too_far = probe(&scene, eye_ray(), 3.0, &RayFilter::default(), is_crate);
        assert_eq!(too_far, None);
    }

    #[test]
    fn test_probe_blocked_by_wall() {
        let scene = VolumeScene::new()
            .with_box(crate_box(), Vec3::new(0.0, 1.5, -4.0), Vec3::splat(0.5))
            .with_box(wall(), Vec3::new(0.0, 1.5, -2.0), Vec3::new(3.0, 2.0, 0.2));

        let target = probe(&scene, eye_ray(), 10.0, &RayFilter::default(), is_crate);
        assert_eq!(target, None);
    }

    #[test]
    fn test_update_reports_only_changes() {
        let mut probe = InteractionProbe::new(10.0);
        assert!(!probe.update(None));
        assert!(probe.update(Some(crate_box())));
        assert!(!probe.update(Some(crate_box())));
        assert!(probe.update(None));
    }
}
