//! Inventory: упорядоченный список Weapon актора + selection
//!
//! Инварианты:
//! - items в порядке pickup, id уникальны (Weapon не Clone)
//! - selected: None (-1) или 0 ≤ i < len
//! - equipped ровно у items[selected], у остальных нет

use bevy::prelude::*;
use thiserror::Error;

use crate::combat::{Weapon, WeaponId};

/// Pickup отклонён: оружие с таким id уже в инвентаре (возвращаем его владельцу)
#[derive(Debug, Error)]
#[error("weapon {:?} is already in inventory", .0.id)]
pub struct DuplicateWeapon(pub Weapon);

#[derive(Component, Debug, Default)]
pub struct Inventory {
    items: Vec<Weapon>,
    selected: Option<usize>,
}

impl Inventory {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.items
    }

    pub fn weapons_mut(&mut self) -> impl Iterator<Item = &mut Weapon> {
        self.items.iter_mut()
    }

    pub fn contains(&self, id: WeaponId) -> bool {
        self.items.iter().any(|weapon| weapon.id == id)
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn active(&self) -> Option<&Weapon> {
        self.selected.and_then(|index| self.items.get(index))
    }

    pub fn active_mut(&mut self) -> Option<&mut Weapon> {
        self.selected.and_then(|index| self.items.get_mut(index))
    }

    pub fn active_id(&self) -> Option<WeaponId> {
        self.active().map(|weapon| weapon.id)
    }

    /// Добавить в конец и сразу экипировать
    ///
    /// Возвращает id ранее активного оружия (которое было деактивировано).
    /// Повторный id отклоняется без изменений: `drop(id)` должен быть однозначен.
    pub fn pickup(&mut self, mut weapon: Weapon) -> Result<Option<WeaponId>, DuplicateWeapon> {
        if self.contains(weapon.id) {
            return Err(DuplicateWeapon(weapon));
        }

        let previous = self.deactivate_current();

        weapon.set_equipped(true);
        self.items.push(weapon);
        self.selected = Some(self.items.len() - 1);

        Ok(previous)
    }

    /// Убрать оружие по id
    ///
    /// Если оно было выбрано → selection сбрасывается (без auto-reselect).
    pub fn drop(&mut self, id: WeaponId) -> Option<Weapon> {
        let index = self.items.iter().position(|weapon| weapon.id == id)?;
        let mut weapon = self.items.remove(index);
        weapon.set_equipped(false);

        self.selected = match self.selected {
            Some(selected) if selected == index => None,
            // Индексы после удалённого сдвигаются
            Some(selected) if selected > index => Some(selected - 1),
            other => other,
        };

        Some(weapon)
    }

    pub fn drop_active(&mut self) -> Option<Weapon> {
        let id = self.active_id()?;
        self.drop(id)
    }

    /// Прямой выбор слота; out of range → no-op
    ///
    /// Возвращает true если активное оружие сменилось.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() || self.selected == Some(index) {
            return false;
        }

        self.deactivate_current();
        self.items[index].set_equipped(true);
        self.selected = Some(index);
        true
    }

    /// (selected + direction) mod len с wraparound в обе стороны
    ///
    /// Нет selection = -1. len ≤ 1 или direction == 0 → no-op.
    pub fn cycle(&mut self, direction: i32) -> bool {
        let len = self.items.len() as i64;
        if len <= 1 || direction == 0 {
            return false;
        }

        let current = self.selected.map_or(-1, |index| index as i64);
        let next = (current + direction.signum() as i64).rem_euclid(len) as usize;
        self.select(next)
    }

    /// Забрать всё (смерть актора)
    pub fn drain(&mut self) -> Vec<Weapon> {
        self.selected = None;
        let mut weapons = std::mem::take(&mut self.items);
        for weapon in &mut weapons {
            weapon.set_equipped(false);
        }
        weapons
    }

    fn deactivate_current(&mut self) -> Option<WeaponId> {
        let weapon = self.active_mut()?;
        weapon.set_equipped(false);
        Some(weapon.id)
    }
}
