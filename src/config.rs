//! Tunable game constants and sprite dimensions.
//!
//! Defaults reproduce the classic arcade feel at 800×600 and 60 ticks per
//! second.  A TOML file may override any subset of fields.

use std::f64::consts::PI;
use std::path::Path;
use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::AsteroidSize;
use crate::error::ConfigError;
use crate::geometry::{Rect, Vector};

// ── Sprite catalog ───────────────────────────────────────────────────────────

/// Largest width or height accepted for any sprite, in pixels.
pub const MAX_SPRITE_DIMENSION: f64 = 16_384.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteSize {
    pub width: f64,
    pub height: f64,
}

impl SpriteSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Half extents, i.e. the pivot an image is rotated around.
    pub fn middle(&self) -> Vector {
        Vector::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Dimensions of every image the renderer owns.  The simulation only needs
/// the sizes: they drive colliders and the perimeter spawn radius.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpriteCatalog {
    /// Number of engine-flame animation frames drawn behind the ship.
    pub engine_flame_frames: u32,
    pub player: SpriteSize,
    pub laser: SpriteSize,
    pub background: SpriteSize,
    pub engine_flame: SpriteSize,
    pub big: Vec<SpriteSize>,
    pub medium: Vec<SpriteSize>,
    pub small: Vec<SpriteSize>,
    pub tiny: Vec<SpriteSize>,
}

impl Default for SpriteCatalog {
    fn default() -> Self {
        Self {
            engine_flame_frames: 3,
            player: SpriteSize::new(99.0, 75.0),
            laser: SpriteSize::new(9.0, 54.0),
            background: SpriteSize::new(256.0, 256.0),
            engine_flame: SpriteSize::new(14.0, 31.0),
            big: vec![
                SpriteSize::new(101.0, 84.0),
                SpriteSize::new(120.0, 98.0),
                SpriteSize::new(89.0, 82.0),
                SpriteSize::new(98.0, 96.0),
            ],
            medium: vec![SpriteSize::new(43.0, 43.0), SpriteSize::new(45.0, 40.0)],
            small: vec![SpriteSize::new(28.0, 28.0), SpriteSize::new(29.0, 26.0)],
            tiny: vec![SpriteSize::new(18.0, 18.0), SpriteSize::new(16.0, 15.0)],
        }
    }
}

impl SpriteCatalog {
    pub fn pool(&self, size: AsteroidSize) -> &[SpriteSize] {
        match size {
            AsteroidSize::Big => &self.big,
            AsteroidSize::Medium => &self.medium,
            AsteroidSize::Small => &self.small,
            AsteroidSize::Tiny => &self.tiny,
        }
    }

    /// Pick a random sprite variant for `size`, returning its index and
    /// dimensions.  Pools are checked non-empty by [`GameConfig::validate`].
    pub fn pick_asteroid(&self, size: AsteroidSize, rng: &mut impl Rng) -> (usize, SpriteSize) {
        let pool = self.pool(size);
        debug_assert!(!pool.is_empty(), "empty {size} asteroid sprite pool");
        let variant = rng.gen_range(0..pool.len());
        (variant, pool[variant])
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, sprite) in [
            ("sprites.player", self.player),
            ("sprites.laser", self.laser),
            ("sprites.background", self.background),
            ("sprites.engine_flame", self.engine_flame),
        ] {
            check_sprite(name, sprite)?;
        }
        if self.engine_flame_frames == 0 {
            return Err(ConfigError::EmptySpritePool("sprites.engine_flame_frames"));
        }
        for (name, pool) in [
            ("sprites.big", &self.big),
            ("sprites.medium", &self.medium),
            ("sprites.small", &self.small),
            ("sprites.tiny", &self.tiny),
        ] {
            if pool.is_empty() {
                return Err(ConfigError::EmptySpritePool(name));
            }
            for sprite in pool {
                check_sprite(name, *sprite)?;
            }
        }
        Ok(())
    }
}

fn check_sprite(field: &'static str, sprite: SpriteSize) -> Result<(), ConfigError> {
    let in_range = |v: f64| v > 0.0 && v <= MAX_SPRITE_DIMENSION;
    if in_range(sprite.width) && in_range(sprite.height) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!(
                "sprite must be between 0 and {MAX_SPRITE_DIMENSION} pixels per side, got {}×{}",
                sprite.width, sprite.height
            ),
        })
    }
}

// ── Game config ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen_width: f64,
    pub screen_height: f64,
    pub ticks_per_second: u32,

    /// Time between two perimeter spawns.
    pub asteroid_spawn_ms: u64,
    /// Sizes a perimeter spawn chooses from.  Tiny only appears as debris.
    pub spawn_sizes: Vec<AsteroidSize>,
    /// Initial base spawn velocity, in pixels per tick.
    pub base_velocity: f64,
    /// Added to the base velocity every `speed_up_ms`.
    pub speed_up_amount: f64,
    pub speed_up_ms: u64,

    pub shoot_cooldown_ms: u64,
    pub rotation_per_second: f64,
    pub bullet_speed_per_second: f64,
    /// Distance in front of the ship where bullets appear.
    pub bullet_spawn_offset: f64,
    /// Bullets further than this outside the screen are dropped.  Negative
    /// disables culling.
    pub bullet_cull_margin: f64,

    /// Debris velocity is the parent's velocity divided by this.
    pub split_divisor: f64,
    /// Debris is offset from the parent by up to this many pixels per axis.
    pub debris_jitter: f64,
    pub rotation_speed_min: f64,
    pub rotation_speed_max: f64,

    pub sprites: SpriteCatalog,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 800.0,
            screen_height: 600.0,
            ticks_per_second: 60,
            asteroid_spawn_ms: 2_000,
            spawn_sizes: vec![AsteroidSize::Big, AsteroidSize::Medium, AsteroidSize::Small],
            base_velocity: 0.35,
            speed_up_amount: 0.1,
            speed_up_ms: 5_000,
            shoot_cooldown_ms: 350,
            rotation_per_second: PI,
            bullet_speed_per_second: 350.0,
            bullet_spawn_offset: 50.0,
            bullet_cull_margin: 100.0,
            split_divisor: 3.0,
            debris_jitter: 10.0,
            rotation_speed_min: -0.02,
            rotation_speed_max: 0.02,
            sprites: SpriteCatalog::default(),
        }
    }
}

impl GameConfig {
    /// Read, parse and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::info!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("base_velocity", self.base_velocity),
            ("speed_up_amount", self.speed_up_amount),
            ("rotation_per_second", self.rotation_per_second),
            ("bullet_speed_per_second", self.bullet_speed_per_second),
            ("bullet_spawn_offset", self.bullet_spawn_offset),
            ("bullet_cull_margin", self.bullet_cull_margin),
            ("split_divisor", self.split_divisor),
            ("debris_jitter", self.debris_jitter),
            ("rotation_speed_min", self.rotation_speed_min),
            ("rotation_speed_max", self.rotation_speed_max),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a finite number, got {value}"),
                });
            }
        }
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(invalid("screen_width", "screen must be larger than zero"));
        }
        if self.ticks_per_second == 0 {
            return Err(invalid("ticks_per_second", "must be at least 1"));
        }
        if !(self.split_divisor >= 1.0) {
            return Err(invalid("split_divisor", "must be at least 1"));
        }
        if !(self.rotation_speed_min <= self.rotation_speed_max) {
            return Err(invalid(
                "rotation_speed_min",
                "must not exceed rotation_speed_max",
            ));
        }
        if self.debris_jitter < 0.0 {
            return Err(invalid("debris_jitter", "must not be negative"));
        }
        if self.spawn_sizes.is_empty() {
            return Err(ConfigError::EmptySpritePool("spawn_sizes"));
        }
        if self.spawn_sizes.contains(&AsteroidSize::Tiny) {
            return Err(invalid("spawn_sizes", "tiny asteroids only appear as debris"));
        }
        self.sprites.validate()
    }

    // ── Derived per-tick constants ───────────────────────────────────────────

    pub fn tick_rate(&self) -> f64 {
        f64::from(self.ticks_per_second)
    }

    pub fn rotation_per_tick(&self) -> f64 {
        self.rotation_per_second / self.tick_rate()
    }

    pub fn bullet_speed_per_tick(&self) -> f64 {
        self.bullet_speed_per_second / self.tick_rate()
    }

    pub fn asteroid_spawn_time(&self) -> Duration {
        Duration::from_millis(self.asteroid_spawn_ms)
    }

    pub fn speed_up_time(&self) -> Duration {
        Duration::from_millis(self.speed_up_ms)
    }

    pub fn shoot_cooldown(&self) -> Duration {
        Duration::from_millis(self.shoot_cooldown_ms)
    }

    pub fn screen_center(&self) -> Vector {
        Vector::new(self.screen_width / 2.0, self.screen_height / 2.0)
    }

    pub fn screen_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.screen_width, self.screen_height)
    }

    /// Distance from the screen centre at which a perimeter spawn appears.
    pub fn spawn_radius(&self, sprite_width: f64) -> f64 {
        self.screen_width / 2.0 + sprite_width
    }
}

fn invalid(field: &'static str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.to_string(),
    }
}
