mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    style::{self, Color, Print},
    terminal,
    ExecutableCommand, QueueableCommand,
};

use capitol_run::config::Tuning;
use capitol_run::game::{Game, GameStatus};
use capitol_run::input::{Action, Input};
use capitol_run::level::EducationalMarker;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

const LOG_FILE: &str = "capitol_run.log";

/// How long an educational banner stays up.
const BANNER_TIME: Duration = Duration::from_secs(5);

// ── Held-key input ────────────────────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames.  Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so a window of 8 frames (≈133 ms) is
/// always refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Maps each held key → the frame it was last seen (press or repeat).
struct HeldKeys {
    key_frame: HashMap<KeyCode, u64>,
    frame: u64,
    /// Space jumps on stages where it does not shoot.
    space_jumps: bool,
}

impl HeldKeys {
    fn new() -> Self {
        Self { key_frame: HashMap::new(), frame: 0, space_jumps: true }
    }

    fn press(&mut self, code: KeyCode) {
        self.key_frame.insert(normalize(code), self.frame);
    }

    fn release(&mut self, code: KeyCode) {
        self.key_frame.remove(&normalize(code));
    }

    /// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
    fn is_held(&self, key: KeyCode) -> bool {
        self.key_frame
            .get(&key)
            .map(|&last| self.frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }
}

fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

impl Input for HeldKeys {
    fn is_pressed(&self, action: Action) -> bool {
        match action {
            Action::Left => self.is_held(KeyCode::Left) || self.is_held(KeyCode::Char('a')),
            Action::Right => self.is_held(KeyCode::Right) || self.is_held(KeyCode::Char('d')),
            Action::Jump => {
                self.is_held(KeyCode::Up)
                    || self.is_held(KeyCode::Char('w'))
                    || (self.space_jumps && self.is_held(KeyCode::Char(' ')))
            }
            Action::Shoot => !self.space_jumps && self.is_held(KeyCode::Char(' ')),
        }
    }
}

// ── Menu ──────────────────────────────────────────────────────────────────────

enum MenuResult {
    Start(usize),
    Quit,
}

fn show_menu<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    game: &Game,
) -> std::io::Result<MenuResult> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let title = "★  CAPITOL  RUN  ★";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        cy.saturating_sub(6),
    ))?;
    out.queue(style::SetForegroundColor(Color::Cyan))?;
    out.queue(Print(title))?;

    let subtitle = "Carry your bill from introduction to law";
    out.queue(cursor::MoveTo(
        cx.saturating_sub(subtitle.chars().count() as u16 / 2),
        cy.saturating_sub(5),
    ))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print(subtitle))?;

    out.queue(cursor::MoveTo(cx.saturating_sub(20), cy.saturating_sub(3)))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print("Select stage:"))?;

    let colors = [Color::Green, Color::Blue, Color::Red, Color::Yellow];
    for (i, level) in game.levels.iter().enumerate() {
        let row = cy.saturating_sub(1) + i as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(20), row))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!("[{}] ", i + 1)))?;
        out.queue(style::SetForegroundColor(colors[i % colors.len()]))?;
        out.queue(Print(format!("{:<30}", level.name)))?;
        out.queue(style::SetForegroundColor(Color::DarkGrey))?;
        out.queue(Print(format!(" {} votes", level.required_votes)))?;
    }

    out.queue(cursor::MoveTo(cx.saturating_sub(20), cy + 5))?;
    out.queue(style::SetForegroundColor(Color::DarkGrey))?;
    out.queue(Print("← → / A D : Move   ↑ / W : Jump   Q : Quit"))?;

    out.queue(style::ResetColor)?;
    out.flush()?;

    // Block until the user makes a choice
    loop {
        let Ok(event) = rx.recv() else {
            return Ok(MenuResult::Quit);
        };
        if let Event::Key(KeyEvent { code, kind: KeyEventKind::Press, .. }) = event {
            match code {
                KeyCode::Char(c @ '1'..='9') => {
                    let index = c as usize - '1' as usize;
                    if index < game.levels.len() {
                        return Ok(MenuResult::Start(index));
                    }
                }
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                    return Ok(MenuResult::Quit);
                }
                _ => {}
            }
        }
    }
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Returns `true` → quit program,  `false` → back to menu.
///
/// Keys are tracked as held rather than acted on per event, so movement,
/// jumping and shooting combine freely. Terminals with keyboard enhancement
/// send releases; elsewhere keys expire after `HOLD_WINDOW` frames.
fn game_loop<W: Write>(
    out: &mut W,
    game: &mut Game,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<bool> {
    let mut keys = HeldKeys::new();
    let mut banner: Option<(EducationalMarker, Instant)> = None;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        keys.frame += 1;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(event) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = event else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    keys.press(code.clone());
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                            return Ok(true);
                        }
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(true);
                        }
                        KeyCode::Char('r') | KeyCode::Char('R')
                            if matches!(game.status(), GameStatus::GameOver | GameStatus::GameComplete) =>
                        {
                            game.restart();
                            return Ok(false);
                        }
                        KeyCode::Enter if game.status() == GameStatus::LevelComplete => {
                            game.next_level();
                            banner = None;
                        }
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => keys.press(code),
                KeyEventKind::Release => keys.release(code),
            }
        }

        keys.space_jumps = !game.player.can_shoot;
        let now = Instant::now();
        game.step(now.duration_since(last).as_secs_f32(), &keys);
        last = now;

        if let Some(marker) = game.take_notices().pop() {
            banner = Some((marker, now));
        }
        if banner.as_ref().is_some_and(|(_, shown)| now.duration_since(*shown) > BANNER_TIME) {
            banner = None;
        }

        display::render(out, game, banner.as_ref().map(|(marker, _)| marker))?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            std::thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

/// Log to a file: the terminal is busy with the game.
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    let mut builder = env_logger::Builder::from_env(env);
    if let Ok(file) = File::create(LOG_FILE) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

fn load_tuning() -> Tuning {
    let Some(path) = std::env::args().nth(1) else {
        return Tuning::default();
    };
    match Tuning::load(&path) {
        Ok(tuning) => {
            log::info!("loaded tuning from {}", path);
            tuning
        }
        Err(e) => {
            log::warn!("could not load tuning from {}: {}; using defaults", path, e);
            Tuning::default()
        }
    }
}

fn main() -> std::io::Result<()> {
    init_logging();
    let tuning = load_tuning();

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    // Ghostty / kitty-protocol terminals support this; others fall back gracefully.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(
            KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
        ))
        .is_ok();

    // Dedicate a thread exclusively to blocking event reads, sending them
    // through a channel so the game loop never has to block on I/O.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || {
        loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(_) => break,
            }
        }
    });

    let result = run(&mut out, &rx, tuning);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("terminal error: {}", e);
    }
    result
}

fn run<W: Write>(
    out: &mut W,
    rx: &mpsc::Receiver<Event>,
    tuning: Tuning,
) -> std::io::Result<()> {
    let mut game = Game::new(tuning);
    display::dress(&mut game);

    loop {
        match show_menu(out, rx, &game)? {
            MenuResult::Quit => break,
            MenuResult::Start(index) => {
                game.player.reset();
                game.start_level(index);
                if game_loop(out, &mut game, rx)? {
                    break;
                }
                // Otherwise loop back to the menu
            }
        }
    }
    Ok(())
}
