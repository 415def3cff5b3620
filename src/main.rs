mod display;

use std::collections::HashMap;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::Print,
    terminal, ExecutableCommand, QueueableCommand,
};
use rand::thread_rng;

use asteroid_shooter::compute::{init_state, tick};
use asteroid_shooter::config::GameConfig;
use asteroid_shooter::interfaces::{AudioSink, InputState, SoundCue};

use display::Overlay;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  Covers terminals that don't emit key-release events: the OS
/// key-repeat rate is ≥ 15 Hz, so ~130 ms is always refreshed before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(130);

/// Returns true if `key` was seen within the last `HOLD_WINDOW`.
fn is_held(key_seen: &HashMap<KeyCode, Instant>, key: &KeyCode, now: Instant) -> bool {
    key_seen
        .get(key)
        .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_seen: &HashMap<KeyCode, Instant>, keys: &[KeyCode], now: Instant) -> bool {
    keys.iter().any(|k| is_held(key_seen, k, now))
}

fn sample_input(key_seen: &HashMap<KeyCode, Instant>, now: Instant) -> InputState {
    InputState {
        rotate_left: any_held(
            key_seen,
            &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
            now,
        ),
        rotate_right: any_held(
            key_seen,
            &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
            now,
        ),
        fire: is_held(key_seen, &KeyCode::Char(' '), now),
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// The terminal has no mixer: cues are logged and a player explosion rings
/// the bell on the next frame.
#[derive(Default)]
struct TerminalAudio {
    bell: bool,
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, cue: SoundCue) {
        log::debug!("sound cue {cue:?}");
        if cue == SoundCue::PlayerExplosion {
            self.bell = true;
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: instead of acting on each key event individually, we keep
/// the instant each key was last pressed or repeated and, every tick, sample
/// which keys are still "fresh".  Space and the turn keys can be held at the
/// same time with no interference.
fn game_loop<W: Write>(
    out: &mut W,
    config: GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let tick_length = Duration::from_secs(1) / config.ticks_per_second;
    let mut state = init_state(config);
    let mut rng = thread_rng();
    let mut audio = TerminalAudio::default();

    let mut key_seen: HashMap<KeyCode, Instant> = HashMap::new();
    let mut overlay = Overlay {
        show_colliders: false,
        tps: 0.0,
    };
    let mut window_start = Instant::now();
    let mut window_ticks: u32 = 0;

    loop {
        let tick_start = Instant::now();

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent {
                code,
                kind,
                modifiers,
                ..
            }) = ev
            else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_seen.insert(code, tick_start);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        KeyCode::Char('c') | KeyCode::Char('C') => {
                            overlay.show_colliders = !overlay.show_colliders;
                        }
                        _ => {}
                    }
                }
                // Repeat: refresh timestamp so key stays "held"
                KeyEventKind::Repeat => {
                    key_seen.insert(code, tick_start);
                }
                // Release: remove key immediately (keyboard-enhancement path)
                KeyEventKind::Release => {
                    key_seen.remove(&code);
                }
            }
        }

        let input = sample_input(&key_seen, tick_start);
        state = tick(&state, &input, &mut rng, &mut audio);

        window_ticks += 1;
        let window = window_start.elapsed();
        if window >= Duration::from_secs(1) {
            overlay.tps = f64::from(window_ticks) / window.as_secs_f64();
            window_start = Instant::now();
            window_ticks = 0;
        }

        let (width, height) = terminal::size()?;
        display::render(out, &state, &overlay, width, height)?;
        if audio.bell {
            audio.bell = false;
            out.queue(Print("\x07"))?;
            out.flush()?;
        }

        let elapsed = tick_start.elapsed();
        if elapsed < tick_length {
            thread::sleep(tick_length - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = match std::env::args_os().nth(1) {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break; // receiver dropped → program exiting
            }
        }
    });

    let result = game_loop(&mut out, config, &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result.map_err(Into::into)
}
