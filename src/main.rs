mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use kokaton_shooter::assets::AssetManifest;
use kokaton_shooter::compute::{init_state, tick, Command, FrameInput};
use kokaton_shooter::config::{GameConfig, DEFAULT_FPS};
use kokaton_shooter::entities::GameStatus;
use kokaton_shooter::player::{DirectionKeys, WeaponTier};

use display::Screen;

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 6 frames (≈120 ms at 50 FPS) is
/// refreshed before expiry.
const HOLD_WINDOW: u64 = 6;

#[derive(Parser, Debug)]
#[command(name = "kokaton_shooter", about = "Side-scrolling arcade shooter for the terminal")]
struct Cli {
    /// Seed for the game's random source (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// Logical ticks per second.
    #[arg(long, default_value_t = DEFAULT_FPS)]
    fps: u32,

    /// Write tracing output to this file (filter with RUST_LOG).
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Sprite manifest overriding the built-in one.
    #[arg(long)]
    assets: Option<PathBuf>,
}

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, key: &KeyCode, frame: u64) -> bool {
    key_frame
        .get(key)
        .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
        .unwrap_or(false)
}

fn any_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|k| is_held(key_frame, k, frame))
}

fn held_directions(key_frame: &HashMap<KeyCode, u64>, frame: u64) -> DirectionKeys {
    use KeyCode::Char;
    DirectionKeys {
        up: any_held(key_frame, &[KeyCode::Up, Char('w'), Char('W')], frame),
        down: any_held(key_frame, &[KeyCode::Down, Char('s'), Char('S')], frame),
        left: any_held(key_frame, &[KeyCode::Left, Char('a'), Char('A')], frame),
        right: any_held(key_frame, &[KeyCode::Right, Char('d'), Char('D')], frame),
    }
}

/// One-shot command for a key press, if any.
fn command_for(code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
    match code {
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
        KeyCode::Char(' ') => Some(Command::Fire),
        KeyCode::Char(c @ '0'..='2') => {
            WeaponTier::from_index(c as u8 - b'0').map(Command::SelectTier)
        }
        _ => None,
    }
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

// ── Game-over wait ────────────────────────────────────────────────────────────

/// Block until a fresh key press arrives. Presses queued before the overlay
/// appeared do not count.
fn wait_for_key(rx: &mpsc::Receiver<Event>) {
    while rx.try_recv().is_ok() {}
    while let Ok(ev) = rx.recv() {
        if let Event::Key(KeyEvent {
            kind: KeyEventKind::Press,
            ..
        }) = ev
        {
            return;
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame of the last press/repeat
/// event for every key, so direction keys count as held while fresh and can
/// combine into diagonals. Space, 0/1/2 and quit keys become one-shot
/// commands on press.
fn game_loop<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    assets: &AssetManifest,
    cli: &Cli,
) -> Result<()> {
    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let config = GameConfig::default();
    let viewport = config.viewport;
    let mut state = init_state(config);
    let frame_time = Duration::from_secs(1) / cli.fps.max(1);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;

    tracing::info!(seed = ?cli.seed, fps = cli.fps, "game started");

    loop {
        let frame_start = Instant::now();
        frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        let mut input = FrameInput::default();
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
                    if let Some(command) = command_for(code, modifiers) {
                        input.commands.push(command);
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
        input.held = held_directions(&key_frame, frame);

        let report = tick(&mut state, &input, &mut rng);
        if report.status == GameStatus::Quit {
            return Ok(());
        }

        let (width, height) = terminal::size().context("cannot query terminal size")?;
        let screen = Screen::new(width, height, viewport);
        display::render(out, &screen, assets, &report.draws).context("render failed")?;

        if report.status == GameStatus::GameOver {
            wait_for_key(rx);
            return Ok(());
        }

        let elapsed = frame_start.elapsed();
        if elapsed < frame_time {
            thread::sleep(frame_time - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    // Missing sprites are fatal before the terminal is touched.
    let assets = match &cli.assets {
        Some(path) => AssetManifest::load(path),
        None => AssetManifest::builtin(),
    }
    .context("failed to load sprite manifest")?;

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break; // receiver dropped → program exiting
                }
            }
            Err(_) => break,
        }
    });

    let result = game_loop(&mut out, &rx, &assets, &cli);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(err) = &result {
        tracing::error!(error = %err, "game loop aborted");
    }
    result
}
