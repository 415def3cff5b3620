//! Game entities and the aggregate game state.
//!
//! Entities own their own motion step but never reach back into the game:
//! anything that would spawn something (a fired bullet, debris from a hit)
//! is returned as plain data for `compute` to act on.

use std::fmt;
use std::rc::Rc;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::{GameConfig, SpriteSize, MAX_SPRITE_DIMENSION};
use crate::geometry::{Rect, Vector};
use crate::interfaces::{AudioSink, InputState, SoundCue};
use crate::timer::Timer;

// ── Asteroid size ────────────────────────────────────────────────────────────

/// Size tiers, largest first.  The derived ordering is Big < Medium < Small < Tiny.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AsteroidSize {
    Big,
    Medium,
    Small,
    Tiny,
}

impl AsteroidSize {
    pub const ALL: [AsteroidSize; 4] = [
        AsteroidSize::Big,
        AsteroidSize::Medium,
        AsteroidSize::Small,
        AsteroidSize::Tiny,
    ];

    /// The two pieces a destroyed asteroid breaks into.
    ///
    /// | destroyed | debris          |
    /// |-----------|-----------------|
    /// | Big       | Medium + Small  |
    /// | Medium    | Small + Tiny    |
    /// | Small     | —               |
    /// | Tiny      | —               |
    pub fn fragments(self) -> Option<[AsteroidSize; 2]> {
        match self {
            AsteroidSize::Big => Some([AsteroidSize::Medium, AsteroidSize::Small]),
            AsteroidSize::Medium => Some([AsteroidSize::Small, AsteroidSize::Tiny]),
            AsteroidSize::Small | AsteroidSize::Tiny => None,
        }
    }
}

impl fmt::Display for AsteroidSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AsteroidSize::Big => "Big",
            AsteroidSize::Medium => "Medium",
            AsteroidSize::Small => "Small",
            AsteroidSize::Tiny => "Tiny",
        };
        f.write_str(name)
    }
}

// ── Asteroid ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Asteroid {
    /// Top-left corner of the sprite.
    pub position: Vector,
    /// Displacement applied every tick.
    pub movement: Vector,
    pub rotation: f64,
    pub rotation_speed: f64,
    /// Speed in pixels per tick; the length of `movement` unless it was
    /// spawned exactly on the screen centre.
    pub velocity: f64,
    pub size: AsteroidSize,
    pub sprite: SpriteSize,
    /// Index into the sprite pool of `size`.
    pub variant: usize,
}

/// What is left of an asteroid after a hit: enough to spawn its debris.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fragmentation {
    pub size: AsteroidSize,
    pub origin: Vector,
    pub velocity: f64,
    pub children: Option<[AsteroidSize; 2]>,
}

impl Asteroid {
    /// Spawn just outside the screen at a random angle, drifting toward the
    /// centre at `base_velocity * U(0, 1.5)`.
    pub fn from_perimeter(
        size: AsteroidSize,
        base_velocity: f64,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let (variant, sprite) = config.sprites.pick_asteroid(size, rng);

        let angle = rng.gen::<f64>() * std::f64::consts::TAU;
        let radius = config.spawn_radius(sprite.width);
        let position = config
            .screen_center()
            .add(Vector::new(angle.cos(), angle.sin()).scale(radius));

        let velocity = base_velocity * rng.gen::<f64>() * 1.5;

        Self::launch(size, variant, sprite, position, velocity, config, rng)
    }

    /// Spawn one piece of debris near the parent's last position, moving at
    /// a fraction of its speed.
    pub fn from_debris(
        size: AsteroidSize,
        parent: &Fragmentation,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let (variant, sprite) = config.sprites.pick_asteroid(size, rng);

        let jitter = Vector::new(
            rng.gen::<f64>() * config.debris_jitter,
            rng.gen::<f64>() * config.debris_jitter,
        );
        let position = parent.origin.add(jitter);
        let velocity = parent.velocity / config.split_divisor;

        Self::launch(size, variant, sprite, position, velocity, config, rng)
    }

    fn launch(
        size: AsteroidSize,
        variant: usize,
        sprite: SpriteSize,
        position: Vector,
        velocity: f64,
        config: &GameConfig,
        rng: &mut impl Rng,
    ) -> Self {
        let direction = config.screen_center().sub(position).normalize();
        let rotation_speed = config.rotation_speed_min
            + rng.gen::<f64>() * (config.rotation_speed_max - config.rotation_speed_min);

        Self {
            position,
            movement: direction.scale(velocity),
            rotation: 0.0,
            rotation_speed,
            velocity,
            size,
            sprite,
            variant,
        }
    }

    pub fn update(&mut self) {
        self.position = self.position.add(self.movement);
        self.rotation += self.rotation_speed;
    }

    pub fn collider(&self) -> Rect {
        Rect::new(
            self.position.x,
            self.position.y,
            self.sprite.width,
            self.sprite.height,
        )
    }

    /// Report the destruction of this asteroid.  The caller removes it and
    /// spawns whatever `children` lists.
    pub fn hit(&self) -> Fragmentation {
        Fragmentation {
            size: self.size,
            origin: self.position,
            velocity: self.velocity,
            children: self.size.fragments(),
        }
    }
}

// ── Bullet ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    /// Centre of the laser sprite.
    pub position: Vector,
    pub rotation: f64,
    /// Fixed at creation; bullets neither curve nor slow down.
    pub movement: Vector,
    pub sprite: SpriteSize,
}

impl Bullet {
    pub fn new(position: Vector, rotation: f64, speed_per_tick: f64, sprite: SpriteSize) -> Self {
        Self {
            position,
            rotation,
            movement: Vector::from_heading(rotation).scale(speed_per_tick),
            sprite,
        }
    }

    pub fn update(&mut self) {
        self.position = self.position.add(self.movement);
    }

    /// Square the width of the laser, centred on the bullet.
    pub fn collider(&self) -> Rect {
        Rect::centered(self.position, self.sprite.width, self.sprite.width)
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Centre of the ship; fixed at the screen centre.
    pub position: Vector,
    pub rotation: f64,
    pub sprite: SpriteSize,
    pub shoot_cooldown: Timer,
    /// Engine-flame animation frame picked this tick.
    pub engine_flame: usize,
}

impl Player {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            position: config.screen_center(),
            rotation: 0.0,
            sprite: config.sprites.player,
            shoot_cooldown: Timer::new(config.shoot_cooldown(), config.ticks_per_second),
            engine_flame: 0,
        }
    }

    /// Apply one tick of input.  Returns the bullet fired this tick, if any.
    pub fn update(
        &mut self,
        input: &InputState,
        config: &GameConfig,
        rng: &mut impl Rng,
        audio: &mut impl AudioSink,
    ) -> Option<Bullet> {
        self.rotate(input, config.rotation_per_tick());

        self.shoot_cooldown.update();
        let fired = if self.shoot_cooldown.is_ready() && input.fire {
            self.shoot_cooldown.reset();
            audio.play(SoundCue::Laser);
            Some(Bullet::new(
                self.muzzle(config.bullet_spawn_offset),
                self.rotation,
                config.bullet_speed_per_tick(),
                config.sprites.laser,
            ))
        } else {
            None
        };

        let frames = config.sprites.engine_flame_frames as usize;
        debug_assert!(frames > 0, "no engine flame frames");
        self.engine_flame = rng.gen_range(0..frames);

        fired
    }

    fn rotate(&mut self, input: &InputState, speed: f64) {
        if input.rotate_left {
            self.rotation -= speed;
        }
        if input.rotate_right {
            self.rotation += speed;
        }
    }

    /// Where a bullet fired right now would appear.
    pub fn muzzle(&self, offset: f64) -> Vector {
        self.position
            .add(Vector::from_heading(self.rotation).scale(offset))
    }

    pub fn collider(&self) -> Rect {
        Rect::centered(self.position, self.sprite.width, self.sprite.height)
    }
}

// ── Background ───────────────────────────────────────────────────────────────

/// Slowly scrolling tiled backdrop.  Offsets are kept in 1/16 pixel steps.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Background {
    pub x16: i64,
    pub y16: i64,
    tile_width: i64,
    tile_height: i64,
}

impl Background {
    pub fn new(tile: SpriteSize) -> Self {
        Self {
            x16: 0,
            y16: 0,
            tile_width: clamp_tile(tile.width),
            tile_height: clamp_tile(tile.height),
        }
    }

    pub fn update(&mut self) {
        self.x16 = (self.x16 + self.tile_width / 32) % (self.tile_width * 16);
        self.y16 = (self.y16 + self.tile_height / 32) % (self.tile_height * 16);
    }

    /// Translation applied to the top-left tile, in pixels.
    pub fn offset(&self) -> Vector {
        Vector::new(-(self.x16 as f64) / 16.0, -(self.y16 as f64) / 16.0)
    }

    pub fn tile_size(&self) -> (i64, i64) {
        (self.tile_width, self.tile_height)
    }
}

fn clamp_tile(side: f64) -> i64 {
    (side as i64).clamp(1, MAX_SPRITE_DIMENSION as i64)
}

// ── Master game state ────────────────────────────────────────────────────────

/// The whole session.  Cloneable so `compute::tick` can hand back a fresh
/// copy while the caller keeps the previous frame.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: Rc<GameConfig>,
    pub background: Background,
    pub player: Player,
    pub asteroids: Vec<Asteroid>,
    pub bullets: Vec<Bullet>,
    pub spawn_timer: Timer,
    pub velocity_timer: Timer,
    pub score: u32,
    /// Speed scalar new perimeter spawns are derived from.
    pub base_velocity: f64,
    /// Ticks simulated since start-up; survives resets.
    pub frame: u64,
}
