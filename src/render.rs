//! Presentation math: where each sprite goes and how it is turned.
//!
//! Nothing here mutates game state.  The terminal renderer in the binary
//! and any pixel renderer share these transforms.

use crate::config::{GameConfig, SpriteSize};
use crate::entities::{Asteroid, Background, Bullet, Player};
use crate::geometry::Vector;

// ── Affine transform ─────────────────────────────────────────────────────────

/// Row-major 2×3 affine matrix.  Operations compose left to right: each call
/// applies after everything recorded so far.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    tx: f64,
    ty: f64,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    pub const IDENTITY: Transform2D = Transform2D {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    pub fn translate(self, offset: Vector) -> Self {
        Self {
            tx: self.tx + offset.x,
            ty: self.ty + offset.y,
            ..self
        }
    }

    /// Rotate clockwise on screen (y grows downward) by `theta` radians.
    pub fn rotate(self, theta: f64) -> Self {
        let (sin, cos) = theta.sin_cos();
        Self {
            a: cos * self.a - sin * self.c,
            b: cos * self.b - sin * self.d,
            c: sin * self.a + cos * self.c,
            d: sin * self.b + cos * self.d,
            tx: cos * self.tx - sin * self.ty,
            ty: sin * self.tx + cos * self.ty,
        }
    }

    pub fn apply(&self, p: Vector) -> Vector {
        Vector::new(
            self.a * p.x + self.b * p.y + self.tx,
            self.c * p.x + self.d * p.y + self.ty,
        )
    }

    /// Where the middle of a sprite of `size` lands.
    pub fn sprite_center(&self, size: SpriteSize) -> Vector {
        self.apply(size.middle())
    }

}

// ── Per-entity placement ─────────────────────────────────────────────────────

/// Spin around the sprite's middle, then place its top-left at the
/// asteroid's position.
pub fn asteroid_transform(asteroid: &Asteroid) -> Transform2D {
    let mid = asteroid.sprite.middle();
    Transform2D::IDENTITY
        .translate(mid.scale(-1.0))
        .rotate(asteroid.rotation)
        .translate(mid)
        .translate(asteroid.position)
}

/// Centre the ship on its position, pointing along its rotation.
pub fn player_transform(player: &Player) -> Transform2D {
    Transform2D::IDENTITY
        .translate(player.sprite.middle().scale(-1.0))
        .rotate(player.rotation)
        .translate(player.position)
}

/// The flame hangs off the back edge of the ship and turns with it.
pub fn engine_flame_transform(player: &Player, flame: SpriteSize) -> Transform2D {
    let ship_mid = player.sprite.middle();
    Transform2D::IDENTITY
        .translate(Vector::new(-flame.width / 2.0, ship_mid.y))
        .rotate(player.rotation)
        .translate(player.position)
}

pub fn bullet_transform(bullet: &Bullet) -> Transform2D {
    Transform2D::IDENTITY
        .translate(bullet.sprite.middle().scale(-1.0))
        .rotate(bullet.rotation)
        .translate(bullet.position)
}

/// Tile (`col`, `row`) of the scrolling backdrop.
pub fn background_tile_transform(background: &Background, col: i64, row: i64) -> Transform2D {
    let (w, h) = background.tile_size();
    Transform2D::IDENTITY
        .translate(Vector::new(
            w.saturating_mul(col) as f64,
            h.saturating_mul(row) as f64,
        ))
        .translate(background.offset())
}

/// Tiles needed to cover the screen while scrolling, per axis.
pub fn background_tile_counts(background: &Background, config: &GameConfig) -> (i64, i64) {
    let (w, h) = background.tile_size();
    (
        (config.screen_width as i64 / w).saturating_add(2),
        (config.screen_height as i64 / h).saturating_add(2),
    )
}

// ── Terminal projection ──────────────────────────────────────────────────────

/// A block of terminal cells the world is squeezed into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub left: u16,
    pub top: u16,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    /// Map a world point to a cell, or `None` if it falls outside.
    pub fn project(&self, world: Vector, config: &GameConfig) -> Option<(u16, u16)> {
        let col = (world.x / config.screen_width * f64::from(self.cols)).floor();
        let row = (world.y / config.screen_height * f64::from(self.rows)).floor();
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        if col >= f64::from(self.cols) || row >= f64::from(self.rows) {
            return None;
        }
        Some((self.left + col as u16, self.top + row as u16))
    }
}
