mod display;

use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
        PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use eco_duck::config::{ConfigError, GameConfig};
use eco_duck::player::MoveInput;
use eco_duck::session::{FrameInput, GameEvent, Screen, Session};
use eco_duck::world::TICKS_PER_SECOND;

use display::GlyphCache;

// ── Held-key tracking ─────────────────────────────────────────────────────────

/// Frames a direction key counts as held after its last press or repeat.
/// Terminals without release events rely on OS key repeat (at least 15 Hz)
/// to refresh it, so the window spans roughly 130 ms.
const HOLD_WINDOW: u64 = TICKS_PER_SECOND as u64 * 2 / 15;

/// Wall-clock length of one simulation frame.
fn frame_time() -> Duration {
    Duration::from_secs(1) / TICKS_PER_SECOND
}

/// Returns true if `key` was seen within the last `window` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64, window: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= window)
        .unwrap_or(false)
}

fn held_any(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64, window: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame, window))
}

// ── Errors ────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so logs go to a file or nowhere.
fn init_tracing(config: &GameConfig) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .compact();

    match &config.log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| AppError::LogFile {
                    path: path.clone(),
                    source,
                })?;
            builder.with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(std::io::sink).init(),
    }
    Ok(())
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Runs until the player quits.
///
/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key.  Each frame the directional keys still
/// within the hold window become the `MoveInput`; a fresh Space press becomes
/// the one-frame interact pulse.
fn game_loop<W: Write>(
    out: &mut W,
    session: &mut Session,
    config: &GameConfig,
    rx: &mpsc::Receiver<Event>,
) -> Result<(), AppError> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut glyphs = GlyphCache::new(config.glyphs);
    let frame_len = frame_time();

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    loop {
        let frame_start = Instant::now();
        frame += 1;
        let mut interact = false;

        // Non-blocking drain of everything the input thread has read
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
                    key_frame.insert(code, frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(());
                        }
                        _ => {}
                    }
                    if handle_screen_key(session, code, &mut rng) {
                        interact = true;
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code, frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let movement = MoveInput {
            up: held_any(
                &key_frame,
                &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')],
                frame,
                HOLD_WINDOW,
            ),
            down: held_any(
                &key_frame,
                &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')],
                frame,
                HOLD_WINDOW,
            ),
            left: held_any(
                &key_frame,
                &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')],
                frame,
                HOLD_WINDOW,
            ),
            right: held_any(
                &key_frame,
                &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')],
                frame,
                HOLD_WINDOW,
            ),
        };

        for event in session.step(&FrameInput { movement, interact }, &mut rng) {
            log_event(&event);
        }

        let shake = session.shake_offset(&mut rng);
        display::render(out, session, &mut glyphs, shake, frame)?;

        let elapsed = frame_start.elapsed();
        if elapsed < frame_len {
            thread::sleep(frame_len - elapsed);
        }
    }
}

/// Screen navigation keys.  Returns true when the key is the interact pulse
/// for the playing screen.
fn handle_screen_key(session: &mut Session, code: KeyCode, rng: &mut StdRng) -> bool {
    match (session.screen, code) {
        (Screen::Playing, KeyCode::Char(' ')) => return true,
        (Screen::Playing, KeyCode::Esc) | (Screen::Help, KeyCode::Esc) => session.return_to_menu(),
        (Screen::Menu, KeyCode::Enter | KeyCode::Char(' ')) => session.start_new_game(rng),
        (Screen::Menu, KeyCode::Char('h') | KeyCode::Char('H')) => session.open_help(),
        (Screen::LevelUp, KeyCode::Enter | KeyCode::Char(' ')) => {
            session.advance_level(rng);
        }
        (Screen::Win | Screen::GameOver, KeyCode::Char('r') | KeyCode::Char('R')) => {
            session.retry(rng);
        }
        (Screen::Win | Screen::GameOver, KeyCode::Esc) => session.return_to_menu(),
        _ => {}
    }
    false
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelComplete { level, score } => {
            info!(level = level.number(), score, "level complete")
        }
        GameEvent::Won { total_score } => info!(total_score, "game won"),
        GameEvent::GameOver => info!("game over"),
        GameEvent::PlayerHurt { lives_left } => info!(lives_left, "player hurt"),
        other => tracing::debug!(event = ?other, "gameplay event"),
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let config = match GameConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("eco_duck: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = init_tracing(&config) {
        eprintln!("eco_duck: {err}");
        std::process::exit(1);
    }
    info!(
        tick_rate = TICKS_PER_SECOND,
        seed = ?config.seed,
        glyphs = ?config.glyphs,
        "=== Eco Duck startup ==="
    );

    if let Err(err) = run(&config) {
        error!(error = %err, "fatal");
        eprintln!("eco_duck: {err}");
        std::process::exit(1);
    }
}

fn run(config: &GameConfig) -> Result<(), AppError> {
    let mut out = BufWriter::new(stdout());

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Ask for release/repeat events; without them the hold window takes over.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Blocking reads happen on their own thread so the frame clock never stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        while let Ok(ev) = event::read() {
            if tx.send(ev).is_err() {
                break;
            }
        }
    });

    let mut setup_rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config.bounds, &mut setup_rng);
    let result = game_loop(&mut out, &mut session, config, &rx);

    // Restore the terminal even when the loop failed
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result?;
    info!("quit");
    Ok(())
}
