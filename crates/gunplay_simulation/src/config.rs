//! Gameplay tunables (static configuration, not runtime state)
//!
//! Загружается из TOML (все поля опциональны, недостающие берутся из default).
//! Defaults повторяют прототип: run 7.5, walk 6, gravity 10, jump 20, 2 прыжка.
//!
//! ```toml
//! [player]
//! walk_speed = 6.0
//! max_jumps = 3
//!
//! [[weapons]]
//! name = "Rifle"
//! damage = 10
//! shoot_rate = 0.2
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Ошибка загрузки конфига: единственный fallible путь в crate
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: String, reason: String },
}

/// Полный набор tunables для симуляции
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    pub player: ActorTuning,
    pub enemy: EnemyTuning,
    /// Оружие, доступное для spawn (по имени)
    pub weapons: Vec<WeaponTuning>,
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            player: ActorTuning::default(),
            enemy: EnemyTuning::default(),
            weapons: vec![WeaponTuning::default()],
        }
    }
}

/// Movement + interaction tunables игрока
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorTuning {
    pub health: u32,
    pub run_speed: f32,
    pub walk_speed: f32,
    pub crouch_speed: f32,
    pub gravity: f32,
    pub jump_height: f32,
    pub max_jumps: u32,
    pub interact_range: f32,
    /// Длина downward probe от pivot'а (ноги)
    pub ground_ray_distance: f32,
    /// Высота глаз над pivot'ом (origin для interaction/fire rays)
    pub eye_height: f32,
}

impl Default for ActorTuning {
    fn default() -> Self {
        Self {
            health: 100,
            run_speed: 7.5,
            walk_speed: 6.0,
            crouch_speed: 4.0,
            gravity: 10.0,
            jump_height: 20.0,
            max_jumps: 2,
            interact_range: 10.0,
            ground_ray_distance: 1.1,
            eye_height: 1.6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub health: u32,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self { health: 100 }
    }
}

/// Hit-scan weapon tunables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeaponTuning {
    /// Title для interaction prompt
    pub name: String,
    pub damage: u32,
    pub max_ammo: u32,
    pub max_clip: u32,
    /// Эффективная дальность hit-scan (метры)
    pub range: f32,
    /// Cooldown между выстрелами (секунды)
    pub shoot_rate: f32,
    /// Сколько секунд виден trace после выстрела
    pub line_delay: f32,
    /// Смещение дула относительно глаз (view space, -Z вперёд)
    pub muzzle_offset: [f32; 3],
}

impl Default for WeaponTuning {
    fn default() -> Self {
        Self {
            name: "Rifle".to_string(),
            damage: 10,
            max_ammo: 500,
            max_clip: 30,
            range: 10.0,
            shoot_rate: 0.2,
            line_delay: 0.1,
            muzzle_offset: [0.3, -0.2, -0.5],
        }
    }
}

impl WeaponTuning {
    pub fn muzzle_offset(&self) -> Vec3 {
        Vec3::from_array(self.muzzle_offset)
    }
}

impl GameplayConfig {
    /// Parse + validate TOML text
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameplayConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Weapon tuning по имени (case-sensitive)
    pub fn weapon(&self, name: &str) -> Option<&WeaponTuning> {
        self.weapons.iter().find(|weapon| weapon.name == name)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let player = &self.player;
        positive("player.run_speed", player.run_speed)?;
        positive("player.walk_speed", player.walk_speed)?;
        positive("player.crouch_speed", player.crouch_speed)?;
        positive("player.gravity", player.gravity)?;
        non_negative("player.jump_height", player.jump_height)?;
        positive("player.interact_range", player.interact_range)?;
        positive("player.ground_ray_distance", player.ground_ray_distance)?;
        if player.max_jumps == 0 {
            return Err(invalid("player.max_jumps", "must be at least 1"));
        }
        if player.health == 0 {
            return Err(invalid("player.health", "must be at least 1"));
        }
        if self.enemy.health == 0 {
            return Err(invalid("enemy.health", "must be at least 1"));
        }

        for (index, weapon) in self.weapons.iter().enumerate() {
            let field = |name: &str| format!("weapons[{}].{}", index, name);
            if weapon.max_clip == 0 {
                return Err(invalid(&field("max_clip"), "must be at least 1"));
            }
            positive(&field("range"), weapon.range)?;
            non_negative(&field("shoot_rate"), weapon.shoot_rate)?;
            non_negative(&field("line_delay"), weapon.line_delay)?;
        }

        Ok(())
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be a positive number, got {}", value)))
    }
}

fn non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, &format!("must be >= 0, got {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_prototype() {
        let config = GameplayConfig::default();
        assert_eq!(config.player.health, 100);
        assert_eq!(config.player.run_speed, 7.5);
        assert_eq!(config.player.walk_speed, 6.0);
        assert_eq!(config.player.gravity, 10.0);
        assert_eq!(config.player.jump_height, 20.0);
        assert_eq!(config.player.ground_ray_distance, 1.1);

        let weapon = WeaponTuning::default();
        assert_eq!(weapon.damage, 10);
        assert_eq!(weapon.max_ammo, 500);
        assert_eq!(weapon.max_clip, 30);
        assert_eq!(weapon.shoot_rate, 0.2);
        assert_eq!(weapon.line_delay, 0.1);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = GameplayConfig::from_toml_str(
            r#"
            [player]
            max_jumps = 3
            walk_speed = 5.0

            [[weapons]]
            name = "Pistol"
            damage = 25
            "#,
        )
        .unwrap();

        assert_eq!(config.player.max_jumps, 3);
        assert_eq!(config.player.walk_speed, 5.0);
        assert_eq!(config.player.run_speed, 7.5);

        let pistol = config.weapon("Pistol").unwrap();
        assert_eq!(pistol.damage, 25);
        assert_eq!(pistol.max_clip, 30);
        assert!(config.weapon("Rifle").is_none());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = GameplayConfig::from_toml_str("[player]\nmax_jumps = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "player.max_jumps"));

        let err = GameplayConfig::from_toml_str("[player]\ngravity = -1.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "player.gravity"));

        let err =
            GameplayConfig::from_toml_str("[[weapons]]\nmax_clip = 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { ref field, .. } if field == "weapons[0].max_clip"));
    }

    #[test]
    fn test_malformed_toml_is_parse_error() {
        let err = GameplayConfig::from_toml_str("[player\nhealth = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = GameplayConfig::load("/definitely/not/here/gameplay.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
