//! Data-driven game balance
//!
//! Every gameplay constant lives here so a JSON file can rebalance a run
//! without recompiling. Distances are pixels, speeds are pixels per tick,
//! durations are milliseconds unless the field name says ticks.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{CANVAS_HEIGHT, GROUND_HEIGHT};
use crate::error::{Error, Result};

/// Player ship tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    pub height: f32,
    /// Sprite width / height
    pub aspect: f32,
    pub speed: f32,
    pub max_health: u8,
    /// Left padding at spawn
    pub start_x: f32,
    pub invincibility_ms: u32,
    pub sprite: String,
    pub bullet_sprite: String,
    pub shoot_sound: String,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            height: 40.0,
            aspect: 1.0,
            speed: 5.0,
            max_health: 3,
            start_x: 20.0,
            invincibility_ms: 2000,
            sprite: "heroes/spaceship1.png".into(),
            bullet_sprite: "heroes/herobim1.png".into(),
            shoot_sound: "heroes/h1.mp3".into(),
        }
    }
}

/// Projectile tuning (shared shape for both sides)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectileTuning {
    pub width: f32,
    pub height: f32,
    /// Horizontal speed magnitude; direction depends on who fired
    pub speed: f32,
}

impl ProjectileTuning {
    pub const PLAYER: Self = Self {
        width: 20.0,
        height: 10.0,
        speed: 7.0,
    };

    pub const ENEMY: Self = Self {
        width: 20.0,
        height: 10.0,
        speed: 5.0,
    };
}

impl Default for ProjectileTuning {
    fn default() -> Self {
        Self::PLAYER
    }
}

/// One entry of the enemy roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnemyType {
    pub name: String,
    pub sprite: String,
    pub bullet_sprite: String,
    pub sound: String,
    pub speed: f32,
    pub height: f32,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    pub shoot_interval_ms: u32,
    pub max_health: u8,
    #[serde(default = "default_score")]
    pub score: u64,
}

fn default_aspect() -> f32 {
    1.0
}

fn default_score() -> u64 {
    100
}

impl EnemyType {
    fn stock(index: u32, speed: f32, height: f32, shoot_interval_ms: u32) -> Self {
        Self {
            name: format!("raider-{index}"),
            sprite: format!("enemies/enemyspaceship{index}.png"),
            bullet_sprite: format!("enemies/enemybim{index}.png"),
            sound: format!("enemies/e{index}.mp3"),
            speed,
            height,
            aspect: default_aspect(),
            shoot_interval_ms,
            max_health: 3,
            score: default_score(),
        }
    }

    pub fn width(&self) -> f32 {
        self.height * self.aspect
    }
}

/// Enemy behaviour shared by every type
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub invincibility_ms: u32,
    /// Ticks between horizontal heading flips
    pub flip_period_ticks: u32,
    /// Vertical speed as a fraction of base speed
    pub vertical_speed_factor: f32,
    pub types: Vec<EnemyType>,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            invincibility_ms: 500,
            flip_period_ticks: 120,
            vertical_speed_factor: 0.5,
            types: vec![
                EnemyType::stock(1, 2.0, 40.0, 2000),
                EnemyType::stock(2, 3.0, 35.0, 2500),
                EnemyType::stock(3, 1.5, 45.0, 3000),
                EnemyType::stock(4, 4.0, 30.0, 2200),
                EnemyType::stock(5, 2.5, 42.0, 2800),
            ],
        }
    }
}

/// Wave spawner timing
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerTuning {
    pub interval_ms: u32,
    pub min_count: u32,
    pub max_count: u32,
    /// Delay between consecutive spawns inside one wave
    pub stagger_ms: u32,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            interval_ms: 5000,
            min_count: 1,
            max_count: 2,
            stagger_ms: 1000,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub player: PlayerTuning,
    pub player_bullet: ProjectileTuning,
    pub enemy_bullet: ProjectileTuning,
    pub enemies: EnemyTuning,
    pub spawner: SpawnerTuning,
    /// Opacity lost per tick
    pub explosion_fade: f32,
    pub background_speed: f32,
    /// Fraction of each box kept for hit tests (forgiving collisions)
    pub collision_shrink: f32,
    /// Full on/off period of the invincibility flicker
    pub flicker_ms: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player: PlayerTuning::default(),
            player_bullet: ProjectileTuning::PLAYER,
            enemy_bullet: ProjectileTuning::ENEMY,
            enemies: EnemyTuning::default(),
            spawner: SpawnerTuning::default(),
            explosion_fade: 0.05,
            background_speed: 1.0,
            collision_shrink: 0.7,
            flicker_ms: 100,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning JSON. Missing fields take defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load and validate a tuning file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let tuning = Self::from_json(&json)?;
        log::info!(
            "Loaded tuning from {} ({} enemy types)",
            path.display(),
            tuning.enemies.types.len()
        );
        Ok(tuning)
    }

    /// Reject balance values the simulation can't run with. NaN fails every
    /// positivity check.
    pub fn validate(&self) -> Result<()> {
        fn invalid(msg: impl Into<String>) -> Result<()> {
            Err(Error::InvalidTuning(msg.into()))
        }
        fn positive(v: f32) -> bool {
            v > 0.0
        }
        // Ships must fit between the ceiling and the ground
        let fits = |height: f32| positive(height) && height < CANVAS_HEIGHT - GROUND_HEIGHT;

        if self.enemies.types.is_empty() {
            return invalid("enemy roster is empty");
        }
        for ty in &self.enemies.types {
            if !fits(ty.height) || !positive(ty.aspect) {
                return invalid(format!("enemy '{}' does not fit the arena", ty.name));
            }
            if !positive(ty.speed) {
                return invalid(format!("enemy '{}' has a non-positive speed", ty.name));
            }
            if ty.shoot_interval_ms == 0 {
                return invalid(format!("enemy '{}' has a zero shoot interval", ty.name));
            }
            if ty.max_health == 0 {
                return invalid(format!("enemy '{}' has zero health", ty.name));
            }
        }
        if !fits(self.player.height) || !positive(self.player.aspect) {
            return invalid("player does not fit the arena");
        }
        if !positive(self.player.speed) {
            return invalid("player speed must be positive");
        }
        if self.player.max_health == 0 {
            return invalid("player has zero health");
        }
        for (who, p) in [("player", &self.player_bullet), ("enemy", &self.enemy_bullet)] {
            if !positive(p.width) || !positive(p.height) || !positive(p.speed) {
                return invalid(format!("{who} bullet needs positive size and speed"));
            }
        }
        if !(positive(self.collision_shrink) && self.collision_shrink <= 1.0) {
            return invalid("collision_shrink must be in (0, 1]");
        }
        if !positive(self.background_speed) {
            return invalid("background_speed must be positive");
        }
        if self.spawner.interval_ms == 0 {
            return invalid("spawner interval must be positive");
        }
        if self.spawner.min_count == 0 || self.spawner.min_count > self.spawner.max_count {
            return invalid("spawner counts must satisfy 1 <= min <= max");
        }
        if self.enemies.flip_period_ticks == 0 {
            return invalid("enemy flip period must be positive");
        }
        if !positive(self.explosion_fade) {
            return invalid("explosion_fade must be positive");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let tuning = Tuning::default();
        assert!(tuning.validate().is_ok());
        assert_eq!(tuning.enemies.types.len(), 5);

        let speeds: Vec<f32> = tuning.enemies.types.iter().map(|t| t.speed).collect();
        assert_eq!(speeds, vec![2.0, 3.0, 1.5, 4.0, 2.5]);
        assert_eq!(tuning.enemies.types[3].sound, "enemies/e4.mp3");
        assert!(tuning.enemies.types.iter().all(|t| t.max_health == 3));
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "background_speed": 2.0, "player": { "speed": 6.0 } }"#)
            .unwrap();
        assert_eq!(tuning.background_speed, 2.0);
        assert_eq!(tuning.player.speed, 6.0);
        assert_eq!(tuning.player.max_health, 3);
        assert_eq!(tuning.spawner.interval_ms, 5000);
    }

    #[test]
    fn test_rejects_empty_roster() {
        let err = Tuning::from_json(r#"{ "enemies": { "types": [] } }"#).unwrap_err();
        assert!(matches!(err, Error::InvalidTuning(_)));
    }

    #[test]
    fn test_rejects_bad_shrink() {
        let mut tuning = Tuning::default();
        tuning.collision_shrink = 1.5;
        assert!(tuning.validate().is_err());
        tuning.collision_shrink = 0.0;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_inverted_spawn_counts() {
        let mut tuning = Tuning::default();
        tuning.spawner.min_count = 3;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_partial_projectile_fills_defaults() {
        let tuning = Tuning::from_json(r#"{ "player_bullet": { "speed": 9.0 } }"#).unwrap();
        assert_eq!(tuning.player_bullet.speed, 9.0);
        assert_eq!(tuning.player_bullet.width, 20.0);
        assert_eq!(tuning.player_bullet.height, 10.0);
    }

    #[test]
    fn test_rejects_non_positive_speeds() {
        let mut tuning = Tuning::default();
        tuning.player.speed = -5.0;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.background_speed = 0.0;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.player.speed = f32::NAN;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_shoot_interval() {
        let mut tuning = Tuning::default();
        tuning.enemies.types[2].shoot_interval_ms = 0;
        let err = tuning.validate().unwrap_err();
        assert!(err.to_string().contains("raider-3"));
    }

    #[test]
    fn test_rejects_ships_taller_than_the_sky() {
        let mut tuning = Tuning::default();
        tuning.enemies.types[0].height = 600.0;
        assert!(tuning.validate().is_err());

        let mut tuning = Tuning::default();
        tuning.player.height = CANVAS_HEIGHT - GROUND_HEIGHT;
        assert!(tuning.validate().is_err());
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Tuning::from_json("{"), Err(Error::Json(_))));
    }
}
