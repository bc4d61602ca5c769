//! Physics query capability (raycast) + headless backend
//!
//! Gameplay код зависит только от `PhysicsQuery` trait, не от физического движка.
//! Headless backend: `ProbeVolume` (AABB вокруг Transform) → `VolumeScene`.

use bevy::ecs::system::SystemParam;
use bevy::math::bounding::{Aabb3d, RayCast3d};
use bevy::prelude::*;

/// Результат raycast: первая блокирующая поверхность
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub distance: f32,
    /// Surface ref: по нему ищутся capabilities (Health, Interactable)
    pub surface: Entity,
}

/// Фильтр raycast (обычно исключаем тело самого актора)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RayFilter {
    pub exclude: Option<Entity>,
}

impl RayFilter {
    pub fn excluding(entity: Entity) -> Self {
        Self {
            exclude: Some(entity),
        }
    }

    pub fn accepts(&self, surface: Entity) -> bool {
        self.exclude != Some(surface)
    }
}

/// Physics query capability (blocking, в пределах одного тика)
pub trait PhysicsQuery {
    fn raycast(&self, ray: Ray3d, max_distance: f32, filter: &RayFilter) -> Option<RayHit>;
}

/// Ground probe capability для MovementController
pub trait GroundProbe {
    /// Есть ли поверхность под ногами в пределах `max_distance`
    fn is_grounded(&self, max_distance: f32) -> bool;
}

/// Фиксированный ответ (тесты, хосты со своим ground check)
impl GroundProbe for bool {
    fn is_grounded(&self, _max_distance: f32) -> bool {
        *self
    }
}

/// Downward raycast от ног актора
pub struct RaycastGroundProbe<'a> {
    pub physics: &'a dyn PhysicsQuery,
    pub feet: Vec3,
    pub filter: RayFilter,
}

impl GroundProbe for RaycastGroundProbe<'_> {
    fn is_grounded(&self, max_distance: f32) -> bool {
        let ray = Ray3d::new(self.feet, Dir3::NEG_Y);
        self.physics
            .raycast(ray, max_distance, &self.filter)
            .is_some()
    }
}

/// Axis-aligned query volume вокруг entity Transform
///
/// Rotation игнорируется (AABB). Для акторов pivot на уровне ног,
/// поэтому `offset` обычно поднимает центр на половину роста.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct ProbeVolume {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl ProbeVolume {
    pub fn cuboid(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            offset: Vec3::ZERO,
        }
    }

    /// Box стоящего актора (pivot на ногах)
    pub fn standing(radius: f32, height: f32) -> Self {
        Self {
            half_extents: Vec3::new(radius, height * 0.5, radius),
            offset: Vec3::new(0.0, height * 0.5, 0.0),
        }
    }

    pub fn aabb_at(&self, translation: Vec3) -> Aabb3d {
        Aabb3d::new(translation + self.offset, self.half_extents)
    }
}

/// Snapshot всех query volumes на момент вызова
///
/// Owned копия → можно держать, пока мутируем Transform'ы.
#[derive(Debug, Clone, Default)]
pub struct VolumeScene {
    volumes: Vec<(Entity, Aabb3d)>,
}

impl VolumeScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, entity: Entity, aabb: Aabb3d) {
        self.volumes.push((entity, aabb));
    }

    /// Builder для тестов
    pub fn with_box(mut self, entity: Entity, center: Vec3, half_extents: Vec3) -> Self {
        self.insert(entity, Aabb3d::new(center, half_extents));
        self
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }
}

impl PhysicsQuery for VolumeScene {
    fn raycast(&self, ray: Ray3d, max_distance: f32, filter: &RayFilter) -> Option<RayHit> {
        if max_distance.is_nan() || max_distance <= 0.0 {
            return None;
        }
        let cast = RayCast3d::from_ray(ray, max_distance);

        let mut best: Option<(f32, Entity)> = None;
        for (entity, aabb) in &self.volumes {
            if !filter.accepts(*entity) {
                continue;
            }
            let Some(distance) = cast.aabb_intersection_at(aabb) else {
                continue;
            };
            // Ближайший; при равенстве: меньший entity index (детерминизм)
            let closer = match best {
                None => true,
                Some((best_distance, best_entity)) => {
                    distance < best_distance
                        || (distance == best_distance && entity.index() < best_entity.index())
                }
            };
            if closer {
                best = Some((distance, *entity));
            }
        }

        best.map(|(distance, surface)| RayHit {
            point: ray.get_point(distance),
            distance,
            surface,
        })
    }
}

/// SystemParam: доступ к ProbeVolume'ам мира
///
/// Читает `Transform`: в системах, которые мутируют Transform, используем
/// `ParamSet` и работаем со snapshot'ом (`VolumeScene`).
#[derive(SystemParam)]
pub struct SceneQuery<'w, 's> {
    volumes: Query<'w, 's, (Entity, &'static ProbeVolume, &'static Transform)>,
}

impl SceneQuery<'_, '_> {
    pub fn snapshot(&self) -> VolumeScene {
        let mut scene = VolumeScene::new();
        for (entity, volume, transform) in self.volumes.iter() {
            scene.insert(entity, volume.aabb_at(transform.translation));
        }
        scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn floor() -> Entity {
        Entity::from_raw(1)
    }

    fn wall() -> Entity {
        Entity::from_raw(2)
    }

    fn scene() -> VolumeScene {
        VolumeScene::new()
            // Пол: верхняя грань на y = 0
            .with_box(floor(), Vec3::new(0.0, -0.5, 0.0), Vec3::new(50.0, 0.5, 50.0))
            // Стена в 5м перед origin (по -Z), передняя грань на z = -5
            .with_box(wall(), Vec3::new(0.0, 1.0, -5.5), Vec3::new(2.0, 1.0, 0.5))
    }

    #[test]
    fn test_raycast_hits_nearest_surface() {
        let ray = Ray3d::new(Vec3::new(0.0, 1.0, 0.0), Dir3::NEG_Z);
        let hit = scene().raycast(ray, 10.0, &RayFilter::default()).unwrap();

        assert_eq!(hit.surface, wall());
        assert!((hit.distance - 5.0).abs() < 1e-4, "distance = {}", hit.distance);
        assert!((hit.point.z + 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_raycast_respects_max_distance() {
        let ray = Ray3d::new(Vec3::new(0.0, 1.0, 0.0), Dir3::NEG_Z);
        assert!(scene().raycast(ray, 4.0, &RayFilter::default()).is_none());
    }

    #[test]
    fn test_raycast_filter_excludes_surface() {
        let ray = Ray3d::new(Vec3::new(0.0, 1.0, 0.0), Dir3::NEG_Z);
        let hit = scene().raycast(ray, 10.0, &RayFilter::excluding(wall()));
        assert!(hit.is_none());
    }

    #[test]
    fn test_ground_probe_distance() {
        let scene = scene();

        let standing = RaycastGroundProbe {
            physics: &scene,
            feet: Vec3::new(0.0, 0.5, 0.0),
            filter: RayFilter::default(),
        };
        assert!(standing.is_grounded(1.1));

        let airborne = RaycastGroundProbe {
            physics: &scene,
            feet: Vec3::new(0.0, 3.0, 0.0),
            filter: RayFilter::default(),
        };
        assert!(!airborne.is_grounded(1.1));
    }

    #[test]
    fn test_standing_volume_offsets_center() {
        let volume = ProbeVolume::standing(0.4, 1.8);
        let aabb = volume.aabb_at(Vec3::new(1.0, 0.0, 0.0));
        assert!((aabb.min.y - 0.0).abs() < 1e-6);
        assert!((aabb.max.y - 1.8).abs() < 1e-6);
        assert!((aabb.min.x - 0.6).abs() < 1e-6);
    }
}
