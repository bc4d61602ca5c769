//! Combat domain: hit-scan weapons, Damageable/Health, death, shot traces
//!
//! ECS ответственность:
//! - Weapon state: clip/reserve, cooldown, equipped
//! - Combat rules: hit-scan raycast → Damageable
//! - Events: WeaponFired, DamageDealt, EntityDied
//!
//! Rendering collaborator: TraceShown/TraceHidden (Update, реальное время)

use bevy::prelude::*;

pub mod damage;
pub mod systems;
pub mod trace;
pub mod weapon;


// Re-export основных типов
pub use damage::{
    process_kill_intents, DamageDealt, DamageOutcome, DamageTargets, Damageable, EntityDied,
    Health, KillIntent,
};
pub use systems::{fire_weapons, reload_weapons, tick_weapon_cooldowns, WeaponFired};
pub use trace::{
    expire_traces, hide_dropped_traces, schedule_traces, ActiveTrace, TraceEffects, TraceHidden,
    TraceShown,
};
pub use weapon::{FireResult, PhysicalState, Weapon, WeaponId};

use crate::GameplaySet;

/// Combat Plugin
///
/// FixedUpdate, фаза Combat:
/// 1. tick_weapon_cooldowns: cooldown до выстрела этого тика
/// 2. reload_weapons
/// 3. fire_weapons: hit-scan → DamageDealt / EntityDied
/// 4. process_kill_intents
///
/// Update: schedule_traces → hide_dropped_traces → expire_traces
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<WeaponFired>()
            .add_event::<DamageDealt>()
            .add_event::<EntityDied>()
            .add_event::<KillIntent>()
            .add_event::<TraceShown>()
            .add_event::<TraceHidden>()
            .init_resource::<TraceEffects>();

        app.add_systems(
            FixedUpdate,
            (
                tick_weapon_cooldowns,
                reload_weapons,
                fire_weapons,
                process_kill_intents,
            )
                .chain()
                .in_set(GameplaySet::Combat),
        );

        app.add_systems(
            Update,
            (schedule_traces, hide_dropped_traces, expire_traces).chain(),
        );
    }
}
