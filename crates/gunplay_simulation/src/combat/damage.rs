//! Damageable capability + death
//!
//! Health (u32) реализует `Damageable`. Dead (terminal state) означает health == 0,
//! переход случается ровно один раз, дальше entity удаляется в фазе Cleanup.

use bevy::ecs::query::QueryFilter;
use bevy::prelude::*;

/// Здоровье актора / разрушаемой цели
///
/// Инвариант: 0 ≤ current ≤ max, current == 0 ⇔ Dead
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100)
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }
}

/// Результат одного damage/kill вызова
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Сколько health реально снято
    pub applied: u32,
    /// Этот вызов перевёл цель в Dead
    pub died: bool,
}

/// Capability: "можно повредить"
pub trait Damageable {
    /// health -= amount (saturating); `died` = true только на переходе в Dead
    fn apply_damage(&mut self, amount: u32) -> DamageOutcome;

    /// Немедленный terminal переход, идемпотентный
    fn kill(&mut self) -> DamageOutcome;

    fn is_dead(&self) -> bool;
}

impl Damageable for Health {
    fn apply_damage(&mut self, amount: u32) -> DamageOutcome {
        let was_alive = self.is_alive();
        let before = self.current;
        self.current = self.current.saturating_sub(amount);

        DamageOutcome {
            applied: before - self.current,
            died: was_alive && !self.is_alive(),
        }
    }

    fn kill(&mut self) -> DamageOutcome {
        let remaining = self.current;
        self.apply_damage(remaining)
    }

    fn is_dead(&self) -> bool {
        !self.is_alive()
    }
}

/// Lookup Damageable capability по surface ref (Entity из raycast)
pub trait DamageTargets {
    fn damageable(&mut self, surface: Entity) -> Option<&mut dyn Damageable>;
}

impl<F: QueryFilter> DamageTargets for Query<'_, '_, &mut Health, F> {
    fn damageable(&mut self, surface: Entity) -> Option<&mut dyn Damageable> {
        self.get_mut(surface)
            .ok()
            .map(|health| health.into_inner() as &mut dyn Damageable)
    }
}

/// Событие: урон нанесен (UI, звуки, hit markers)
#[derive(Event, Debug, Clone)]
pub struct DamageDealt {
    pub attacker: Entity,
    pub target: Entity,
    pub damage: u32,
    pub target_died: bool,
}

/// Событие: entity умер (ровно одно на entity)
#[derive(Event, Debug, Clone)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Запрос: убить entity без урона (скрипты, kill volumes, debug)
#[derive(Event, Debug, Clone)]
pub struct KillIntent {
    pub entity: Entity,
}

/// System: KillIntent → terminal transition
pub fn process_kill_intents(
    mut intents: EventReader<KillIntent>,
    mut targets: Query<&mut Health>,
    mut died: EventWriter<EntityDied>,
) {
    for intent in intents.read() {
        let Ok(mut health) = targets.get_mut(intent.entity) else {
            crate::log_warning(&format!(
                "KillIntent: {:?} has no Health component",
                intent.entity
            ));
            continue;
        };

        if health.kill().died {
            crate::log_info(&format!("💀 Entity {:?} killed (KillIntent)", intent.entity));
            died.write(EntityDied {
                entity: intent.entity,
                killer: None,
            });
        }
    }
}
