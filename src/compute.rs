//! Game-logic functions.
//!
//! `tick` takes an immutable reference to the current `GameState` plus the
//! input sampled for this tick and returns a brand-new `GameState`.  Side
//! effects are limited to the injected RNG and audio sink.

use std::rc::Rc;

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    Asteroid, AsteroidSize, Background, Bullet, Fragmentation, GameState, Player,
};
use crate::interfaces::{AudioSink, InputState, SoundCue};
use crate::timer::Timer;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state.  The config is assumed to be validated.
pub fn init_state(config: GameConfig) -> GameState {
    new_session(Rc::new(config))
}

/// Start over after the player died: fresh player at the centre, no
/// asteroids or bullets, zero score, both timers re-armed and the base
/// velocity back at its initial value.
pub fn reset_state(state: &GameState) -> GameState {
    GameState {
        background: state.background.clone(),
        frame: state.frame,
        ..new_session(Rc::clone(&state.config))
    }
}

fn new_session(config: Rc<GameConfig>) -> GameState {
    let tps = config.ticks_per_second;
    GameState {
        background: Background::new(config.sprites.background),
        player: Player::new(&config),
        asteroids: Vec::new(),
        bullets: Vec::new(),
        spawn_timer: Timer::new(config.asteroid_spawn_time(), tps),
        velocity_timer: Timer::new(config.speed_up_time(), tps),
        score: 0,
        base_velocity: config.base_velocity,
        frame: 0,
        config,
    }
}

// ── Spawning ─────────────────────────────────────────────────────────────────

/// Pick a random perimeter-spawn size from the configured list.
pub fn random_spawn_size(config: &GameConfig, rng: &mut impl Rng) -> AsteroidSize {
    debug_assert!(!config.spawn_sizes.is_empty(), "no spawn sizes configured");
    config.spawn_sizes[rng.gen_range(0..config.spawn_sizes.len())]
}

/// A new asteroid on the screen perimeter at the current base velocity.
pub fn spawn_asteroid(state: &GameState, size: AsteroidSize, rng: &mut impl Rng) -> Asteroid {
    let asteroid = Asteroid::from_perimeter(size, state.base_velocity, &state.config, rng);
    log::debug!(
        "new {} asteroid at ({:.1}, {:.1}), velocity {:.3}",
        asteroid.size,
        asteroid.position.x,
        asteroid.position.y,
        asteroid.velocity
    );
    asteroid
}

/// The debris a destroyed asteroid leaves behind (none for Small and Tiny).
pub fn spawn_debris(
    fragment: &Fragmentation,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> Vec<Asteroid> {
    let Some(children) = fragment.children else {
        return Vec::new();
    };
    log::debug!(
        "{} asteroid splits into {} + {}",
        fragment.size,
        children[0],
        children[1]
    );
    children
        .iter()
        .map(|&size| Asteroid::from_debris(size, fragment, config, rng))
        .collect()
}

// ── Collision ────────────────────────────────────────────────────────────────

/// Pair every asteroid with the first still-unused bullet that overlaps it.
///
/// Each asteroid and each bullet appears in at most one pair.  When several
/// bullets overlap the same asteroid only the lowest-indexed one is spent;
/// the others fly on.
pub fn find_bullet_hits(asteroids: &[Asteroid], bullets: &[Bullet]) -> Vec<(usize, usize)> {
    let bullet_boxes: Vec<_> = bullets.iter().map(Bullet::collider).collect();
    let mut spent = vec![false; bullets.len()];
    let mut hits = Vec::new();

    for (ai, asteroid) in asteroids.iter().enumerate() {
        let rock = asteroid.collider();
        let hit = bullet_boxes
            .iter()
            .enumerate()
            .find(|(bi, bullet)| !spent[*bi] && rock.intersects(bullet));
        if let Some((bi, _)) = hit {
            spent[bi] = true;
            hits.push((ai, bi));
        }
    }
    hits
}

/// Apply bullet hits, then check the player.  A player hit returns a reset
/// session instead of the updated one.
pub fn resolve_collisions(
    mut state: GameState,
    rng: &mut impl Rng,
    audio: &mut impl AudioSink,
) -> GameState {
    // ── 1. Bullets ↔ asteroids (collect, then remove) ────────────────────────
    let hits = find_bullet_hits(&state.asteroids, &state.bullets);

    let mut destroyed = vec![false; state.asteroids.len()];
    let mut spent = vec![false; state.bullets.len()];
    let mut fragments = Vec::with_capacity(hits.len());

    for &(ai, bi) in &hits {
        destroyed[ai] = true;
        spent[bi] = true;
        log::debug!("asteroid {ai} hit by bullet {bi}");
        audio.play(SoundCue::AsteroidExplosion);
        fragments.push(state.asteroids[ai].hit());
    }

    state.score += hits.len() as u32;

    state.asteroids = state
        .asteroids
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !destroyed[*i])
        .map(|(_, a)| a)
        .collect();

    state.bullets = state
        .bullets
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !spent[*i])
        .map(|(_, b)| b)
        .collect();

    let config = Rc::clone(&state.config);
    for fragment in &fragments {
        state.asteroids.extend(spawn_debris(fragment, &config, rng));
    }

    // ── 2. Asteroids ↔ player ────────────────────────────────────────────────
    let ship = state.player.collider();
    if let Some(i) = state
        .asteroids
        .iter()
        .position(|a| a.collider().intersects(&ship))
    {
        log::info!(
            "player hit by asteroid {i} on frame {}, score {} lost",
            state.frame,
            state.score
        );
        audio.play(SoundCue::PlayerExplosion);
        return reset_state(&state);
    }

    state
}

/// Drop bullets that wandered off the screen by more than the cull margin.
fn cull_bullets(bullets: Vec<Bullet>, config: &GameConfig) -> Vec<Bullet> {
    if config.bullet_cull_margin < 0.0 {
        return bullets;
    }
    let bounds = config.screen_rect().expanded(config.bullet_cull_margin);
    bullets
        .into_iter()
        .filter(|b| bounds.contains(b.position))
        .collect()
}

// ── Per-tick update ──────────────────────────────────────────────────────────

/// Advance the simulation by one tick.
///
/// Order: velocity ramp, background, player (rotation, cooldown, firing),
/// perimeter spawn, motion of every asteroid and bullet, then collisions.
/// All randomness comes through `rng` so callers control determinism.
pub fn tick(
    state: &GameState,
    input: &InputState,
    rng: &mut impl Rng,
    audio: &mut impl AudioSink,
) -> GameState {
    let mut next = state.clone();
    let config = Rc::clone(&next.config);
    next.frame += 1;

    // ── 1. Difficulty ramp ───────────────────────────────────────────────────
    next.velocity_timer.update();
    if next.velocity_timer.is_ready() {
        next.velocity_timer.reset();
        next.base_velocity += config.speed_up_amount;
        log::trace!("base velocity now {:.2}", next.base_velocity);
    }

    next.background.update();

    // ── 2. Player ────────────────────────────────────────────────────────────
    if let Some(bullet) = next.player.update(input, &config, rng, audio) {
        next.bullets.push(bullet);
    }

    // ── 3. Perimeter spawn ───────────────────────────────────────────────────
    next.spawn_timer.update();
    if next.spawn_timer.is_ready() {
        next.spawn_timer.reset();
        let size = random_spawn_size(&config, rng);
        let asteroid = spawn_asteroid(&next, size, rng);
        next.asteroids.push(asteroid);
    }

    // ── 4. Motion ────────────────────────────────────────────────────────────
    for asteroid in &mut next.asteroids {
        asteroid.update();
    }
    for bullet in &mut next.bullets {
        bullet.update();
    }
    next.bullets = cull_bullets(next.bullets, &config);

    // ── 5. Collisions ────────────────────────────────────────────────────────
    resolve_collisions(next, rng, audio)
}
