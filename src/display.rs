//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; world coordinates are squeezed
//! into the terminal through a [`Viewport`].

use std::f64::consts::TAU;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};

use asteroid_shooter::entities::{Asteroid, AsteroidSize, GameState};
use asteroid_shooter::geometry::{Rect, Vector};
use asteroid_shooter::render::{
    asteroid_transform, background_tile_counts, background_tile_transform, bullet_transform,
    engine_flame_transform, player_transform, Viewport,
};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_TPS: Color = Color::DarkGrey;
const C_STAR: Color = Color::DarkMagenta;
const C_PLAYER: Color = Color::White;
const C_FLAME: Color = Color::Red;
const C_ASTEROID_BIG: Color = Color::DarkYellow;
const C_ASTEROID_SMALL: Color = Color::Grey;
const C_BULLET: Color = Color::Cyan;
const C_COLLIDER: Color = Color::Green;
const C_HINT: Color = Color::DarkGrey;

/// Ship glyphs for eight headings, starting straight up and turning clockwise.
const SHIP_GLYPHS: [&str; 8] = ["▲", "◥", "▶", "◢", "▼", "◣", "◀", "◤"];
const FLAME_GLYPHS: [&str; 3] = ["'", "*", "\""];

/// Host-side extras drawn over the game.
pub struct Overlay {
    pub show_colliders: bool,
    pub tps: f64,
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame into a `width`×`height` terminal.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    overlay: &Overlay,
    width: u16,
    height: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let view = Viewport {
        left: 1,
        top: 2,
        cols: width.saturating_sub(2),
        rows: height.saturating_sub(4),
    };

    draw_border(out, width, height)?;
    draw_background(out, state, &view)?;

    for asteroid in &state.asteroids {
        draw_asteroid(out, state, asteroid, &view, overlay.show_colliders)?;
    }
    for bullet in &state.bullets {
        let center = bullet_transform(bullet).sprite_center(bullet.sprite);
        put(out, state, &view, center, C_BULLET, "•")?;
    }

    draw_player(out, state, &view, overlay.show_colliders)?;
    draw_hud(out, state, overlay, width)?;
    draw_controls_hint(out, height)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Print `glyph` at a world position if it falls inside the viewport.
fn put<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    world: Vector,
    color: Color,
    glyph: &str,
) -> std::io::Result<()> {
    if let Some((col, row)) = view.project(world, &state.config) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, width: u16, height: u16) -> std::io::Result<()> {
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;

    // Row 1 — top bar
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;

    // Row h-2 — bottom bar
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    // Side walls
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }

    Ok(())
}

// ── Backdrop ──────────────────────────────────────────────────────────────────

/// One faint star per background tile, scrolling with the tile offset.
fn draw_background<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let bg = &state.background;
    let tile = state.config.sprites.background;
    let (cols, rows) = background_tile_counts(bg, &state.config);
    for col in 0..cols {
        for row in 0..rows {
            let star = background_tile_transform(bg, col, row).sprite_center(tile);
            put(out, state, view, star, C_STAR, "·")?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    state: &GameState,
    overlay: &Overlay,
    width: u16,
) -> std::io::Result<()> {
    // Score — centre, zero padded
    let score = format!("{:06}", state.score);
    let sx = (width / 2).saturating_sub(score.len() as u16 / 2);
    out.queue(cursor::MoveTo(sx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(&score))?;

    // Tick rate — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_TPS))?;
    out.queue(Print(format!("TPS: {:0.2}", overlay.tps)))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    show_colliders: bool,
) -> std::io::Result<()> {
    let p = &state.player;

    let flame_sprite = state.config.sprites.engine_flame;
    let flame = engine_flame_transform(p, flame_sprite).sprite_center(flame_sprite);
    let flame_glyph = FLAME_GLYPHS[p.engine_flame % FLAME_GLYPHS.len()];
    put(out, state, view, flame, C_FLAME, flame_glyph)?;

    let center = player_transform(p).sprite_center(p.sprite);
    put(out, state, view, center, C_PLAYER, ship_glyph(p.rotation))?;

    if show_colliders {
        let aim = p.muzzle(state.config.bullet_spawn_offset * 2.0);
        put(out, state, view, aim, C_COLLIDER, "·")?;
        draw_collider(out, state, view, p.collider())?;
    }
    Ok(())
}

fn ship_glyph(rotation: f64) -> &'static str {
    let turn = rotation.rem_euclid(TAU) / TAU;
    let octant = (turn * 8.0).round() as usize % SHIP_GLYPHS.len();
    SHIP_GLYPHS[octant]
}

fn draw_asteroid<W: Write>(
    out: &mut W,
    state: &GameState,
    asteroid: &Asteroid,
    view: &Viewport,
    show_colliders: bool,
) -> std::io::Result<()> {
    let (color, glyph) = match asteroid.size {
        AsteroidSize::Big => (C_ASTEROID_BIG, "@"),
        AsteroidSize::Medium => (C_ASTEROID_BIG, "O"),
        AsteroidSize::Small => (C_ASTEROID_SMALL, "o"),
        AsteroidSize::Tiny => (C_ASTEROID_SMALL, "∘"),
    };
    let center = asteroid_transform(asteroid).sprite_center(asteroid.sprite);
    put(out, state, view, center, color, glyph)?;

    if show_colliders {
        draw_collider(out, state, view, asteroid.collider())?;
    }
    Ok(())
}

/// Mark the four corners of a collider box.
fn draw_collider<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    rect: Rect,
) -> std::io::Result<()> {
    let corners = [
        (Vector::new(rect.x, rect.y), "┌"),
        (Vector::new(rect.max_x(), rect.y), "┐"),
        (Vector::new(rect.max_x(), rect.max_y()), "┘"),
        (Vector::new(rect.x, rect.max_y()), "└"),
    ];
    for (corner, glyph) in corners {
        put(out, state, view, corner, C_COLLIDER, glyph)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "← → / A D : Turn   SPACE : Fire   C : Colliders   Q : Quit",
    ))?;
    Ok(())
}
