//! Cosmetic shot traces (rendering timeline)
//!
//! Трасса выстрела видна `line_delay` секунд. Это не часть simulation tick:
//! таймеры тикают в `Update` по реальному `Time`, и никогда не блокируют FixedUpdate.
//! Новый выстрел того же оружия отменяет ещё видимую трассу (cancel-on-retrigger),
//! выброшенное оружие (drop или смерть владельца) свою трассу прячет сразу.

use std::collections::BTreeMap;
use std::time::Duration;

use bevy::prelude::*;

use super::weapon::WeaponId;
use super::WeaponFired;
use crate::inventory::WeaponDropped;

/// Одна видимая трасса
#[derive(Debug, Clone)]
pub struct ActiveTrace {
    pub from: Vec3,
    pub to: Vec3,
    pub timer: Timer,
}

/// Scheduled trace effects: максимум одна трасса на оружие
#[derive(Resource, Debug, Default)]
pub struct TraceEffects {
    active: BTreeMap<WeaponId, ActiveTrace>,
}

impl TraceEffects {
    /// Показать трассу на `duration` секунд
    ///
    /// Возвращает true если предыдущая трасса этого оружия была отменена.
    pub fn schedule(&mut self, weapon: WeaponId, from: Vec3, to: Vec3, duration: f32) -> bool {
        let trace = ActiveTrace {
            from,
            to,
            timer: Timer::from_seconds(duration.max(0.0), TimerMode::Once),
        };
        self.active.insert(weapon, trace).is_some()
    }

    /// Отменить трассу (оружие выброшено)
    pub fn cancel(&mut self, weapon: WeaponId) -> bool {
        self.active.remove(&weapon).is_some()
    }

    /// Продвинуть таймеры; возвращает оружие, чьи трассы истекли (по порядку id)
    pub fn tick(&mut self, delta: Duration) -> Vec<WeaponId> {
        let mut expired = Vec::new();
        for (weapon, trace) in self.active.iter_mut() {
            trace.timer.tick(delta);
            if trace.timer.finished() {
                expired.push(*weapon);
            }
        }
        for weapon in &expired {
            self.active.remove(weapon);
        }
        expired
    }

    pub fn get(&self, weapon: WeaponId) -> Option<&ActiveTrace> {
        self.active.get(&weapon)
    }

    pub fn is_visible(&self, weapon: WeaponId) -> bool {
        self.active.contains_key(&weapon)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// Event: показать трассу (rendering collaborator рисует линию)
#[derive(Event, Debug, Clone)]
pub struct TraceShown {
    pub weapon: WeaponId,
    pub from: Vec3,
    pub to: Vec3,
}

/// Event: спрятать трассу (истекла, отменена новым выстрелом или оружие выброшено)
#[derive(Event, Debug, Clone)]
pub struct TraceHidden {
    pub weapon: WeaponId,
}

/// System (Update): WeaponFired → schedule trace
pub fn schedule_traces(
    mut fired: EventReader<WeaponFired>,
    mut traces: ResMut<TraceEffects>,
    mut shown: EventWriter<TraceShown>,
    mut hidden: EventWriter<TraceHidden>,
) {
    for event in fired.read() {
        if traces.schedule(event.weapon, event.from, event.to, event.line_delay) {
            hidden.write(TraceHidden {
                weapon: event.weapon,
            });
        }
        shown.write(TraceShown {
            weapon: event.weapon,
            from: event.from,
            to: event.to,
        });
    }
}

/// System (Update): WeaponDropped → cancel trace
///
/// После schedule_traces: выстрел и drop в одном кадре не оставляют висящую трассу.
pub fn hide_dropped_traces(
    mut dropped: EventReader<WeaponDropped>,
    mut traces: ResMut<TraceEffects>,
    mut hidden: EventWriter<TraceHidden>,
) {
    for event in dropped.read() {
        if traces.cancel(event.weapon) {
            hidden.write(TraceHidden {
                weapon: event.weapon,
            });
        }
    }
}

/// System (Update): tick timers → TraceHidden
pub fn expire_traces(
    time: Res<Time>,
    mut traces: ResMut<TraceEffects>,
    mut hidden: EventWriter<TraceHidden>,
) {
    for weapon in traces.tick(time.delta()) {
        hidden.write(TraceHidden { weapon });
    }
}
