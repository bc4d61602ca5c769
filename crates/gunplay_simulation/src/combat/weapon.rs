//! Weapon: ammo/clip, cooldown, hit-scan fire
//!
//! Weapon не entity и не Clone, им владеет ровно одно место
//! (Inventory актора или Interactable в мире). Передача = move значения,
//! поэтому оружие не может быть активным в двух инвентарях одновременно.

use bevy::prelude::*;

use super::damage::DamageTargets;
use crate::config::WeaponTuning;
use crate::physics::{PhysicsQuery, RayFilter};

/// Cooldown меньше этого считается истёкшим (накопленная ошибка f32 от fixed dt)
const COOLDOWN_EPSILON: f32 = 1e-5;

/// Стабильный id оружия (переживает pickup/drop)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Reflect)]
pub struct WeaponId(pub u32);

/// Физическое состояние тела оружия
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
pub enum PhysicalState {
    /// Лежит в мире, независимая физика
    #[default]
    Free,
    /// В инвентаре, физика выключена
    Carried,
}

/// Результат нажатия на спуск
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FireResult {
    /// Попали в Damageable
    Hit {
        target: Entity,
        point: Vec3,
        damage: u32,
        killed: bool,
    },
    /// Выстрел был, Damageable не задет; `end`: конец трассы
    Miss { end: Vec3 },
    /// cooldown_remaining > 0, ничего не изменилось
    OnCooldown,
    /// Клип пуст (cooldown всё равно сброшен)
    Empty,
    /// Оружие не экипировано
    Holstered,
}

impl FireResult {
    /// Выстрел реально произошёл (патрон потрачен, raycast сделан)
    pub fn fired(&self) -> bool {
        matches!(self, FireResult::Hit { .. } | FireResult::Miss { .. })
    }

    /// Конец трассы для cosmetic trace
    pub fn trace_end(&self) -> Option<Vec3> {
        match self {
            FireResult::Hit { point, .. } => Some(*point),
            FireResult::Miss { end } => Some(*end),
            _ => None,
        }
    }
}

/// Ranged hit-scan оружие
///
/// Инварианты:
/// - 0 ≤ clip ≤ max_clip
/// - cooldown_remaining ≥ 0; стрелять можно только при cooldown_remaining == 0
/// - Carried ⇔ owner.is_some()
#[derive(Debug)]
pub struct Weapon {
    pub id: WeaponId,
    pub name: String,

    // === Tunables ===
    pub damage: u32,
    pub max_ammo: u32,
    pub max_clip: u32,
    pub range: f32,
    /// Секунды между выстрелами
    pub shoot_rate: f32,
    /// Сколько секунд видна трасса
    pub line_delay: f32,
    /// Позиция дула относительно глаз (camera space)
    pub muzzle_offset: Vec3,

    // === Runtime state ===
    pub ammo_reserve: u32,
    pub clip: u32,
    pub cooldown_remaining: f32,
    owner: Option<Entity>,
    state: PhysicalState,
    equipped: bool,
}

impl Weapon {
    /// Новое оружие, заряженное: clip = max_clip, reserve = max_ammo
    pub fn from_tuning(id: WeaponId, tuning: &WeaponTuning) -> Self {
        Self {
            id,
            name: tuning.name.clone(),
            damage: tuning.damage,
            max_ammo: tuning.max_ammo,
            max_clip: tuning.max_clip,
            range: tuning.range,
            shoot_rate: tuning.shoot_rate,
            line_delay: tuning.line_delay,
            muzzle_offset: tuning.muzzle_offset(),
            ammo_reserve: tuning.max_ammo,
            clip: tuning.max_clip,
            cooldown_remaining: 0.0,
            owner: None,
            state: PhysicalState::Free,
            equipped: false,
        }
    }

    pub fn owner(&self) -> Option<Entity> {
        self.owner
    }

    pub fn state(&self) -> PhysicalState {
        self.state
    }

    pub fn is_equipped(&self) -> bool {
        self.equipped
    }

    /// Вызывается только Inventory (selection)
    pub(crate) fn set_equipped(&mut self, equipped: bool) {
        self.equipped = equipped;
    }

    pub fn is_ready(&self) -> bool {
        self.cooldown_remaining == 0.0
    }

    /// Cooldown → 0, никогда не отрицательный
    pub fn tick(&mut self, delta: f32) {
        if self.cooldown_remaining == 0.0 {
            return;
        }
        let remaining = (self.cooldown_remaining - delta).max(0.0);
        self.cooldown_remaining = if remaining < COOLDOWN_EPSILON {
            0.0
        } else {
            remaining
        };
    }

    /// Carried: физика тела выключена, owner = actor
    pub fn pickup(&mut self, owner: Entity) {
        self.state = PhysicalState::Carried;
        self.owner = Some(owner);
        self.equipped = false;
    }

    /// Free: физика тела снова включена, owner сброшен
    pub fn drop(&mut self) {
        self.state = PhysicalState::Free;
        self.owner = None;
        self.equipped = false;
    }

    /// Перезарядка: переносит min(max_clip - clip, reserve) патронов
    ///
    /// Возвращает сколько патронов перенесено (0 = нечего/некуда).
    pub fn reload(&mut self) -> u32 {
        let moved = self.max_clip.saturating_sub(self.clip).min(self.ammo_reserve);
        self.clip += moved;
        self.ammo_reserve -= moved;
        moved
    }

    /// Ray дула: от глаз + muzzle_offset вдоль forward (-Z) взгляда
    pub fn muzzle_ray(&self, eye_origin: Vec3, eye_rotation: Quat) -> Ray3d {
        let origin = eye_origin + eye_rotation * self.muzzle_offset;
        let direction = Dir3::new(eye_rotation * Vec3::NEG_Z).unwrap_or(Dir3::NEG_Z);
        Ray3d::new(origin, direction)
    }

    /// Нажатие на спуск
    ///
    /// 1. не экипировано → Holstered
    /// 2. cooldown > 0 → OnCooldown (без мутаций)
    /// 3. cooldown = shoot_rate
    /// 4. clip == 0 → Empty
    /// 5. clip -= 1, raycast в пределах range: Damageable → Hit, иначе Miss
    pub fn fire(
        &mut self,
        muzzle: Ray3d,
        physics: &dyn PhysicsQuery,
        filter: &RayFilter,
        targets: &mut dyn DamageTargets,
    ) -> FireResult {
        if !self.equipped {
            return FireResult::Holstered;
        }
        if !self.is_ready() {
            return FireResult::OnCooldown;
        }

        self.cooldown_remaining = self.shoot_rate;

        if self.clip == 0 {
            return FireResult::Empty;
        }
        self.clip -= 1;

        let Some(hit) = physics.raycast(muzzle, self.range, filter) else {
            return FireResult::Miss {
                end: muzzle.get_point(self.range),
            };
        };

        match targets.damageable(hit.surface) {
            Some(target) => {
                let outcome = target.apply_damage(self.damage);
                FireResult::Hit {
                    target: hit.surface,
                    point: hit.point,
                    damage: outcome.applied,
                    killed: outcome.died,
                }
            }
            // Стена / пол: пуля остановилась, урона нет
            None => FireResult::Miss { end: hit.point },
        }
    }
}
