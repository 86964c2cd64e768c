//! Terminal rendering. Nothing outside this module writes to the screen
//! during play.
//!
//! The simulation draws in world pixels onto a `TerminalSurface`, which
//! rasterises into a grid of coloured cells. `render` then writes the grid
//! plus the HUD, the educational banner and any overlay to the terminal.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use capitol_run::enemy::EnemyKind;
use capitol_run::game::{Game, GameStatus};
use capitol_run::level::EducationalMarker;
use capitol_run::sprite::{FrameClock, Sprite};
use capitol_run::surface::{self, Surface};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD_VOTES: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_HUD_LEVEL: Color = Color::Cyan;
const C_HINT: Color = Color::DarkGrey;
const C_BANNER: Color = Color::White;
const C_BANNER_TITLE: Color = Color::Yellow;

/// Rows taken by the HUD (top) and the controls hint (bottom).
const HUD_ROWS: u16 = 1;
const HINT_ROWS: u16 = 1;

fn to_term(c: surface::Color) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

// ── Cell surface ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
struct Cell {
    ch: char,
    fg: surface::Color,
    bg: surface::Color,
}

/// A `Surface` backed by a character grid. World pixels are scaled so the
/// whole viewport fits the grid.
pub struct TerminalSurface {
    cols: u16,
    rows: u16,
    px_per_col: f32,
    px_per_row: f32,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(cols: u16, rows: u16, view_width: f32, view_height: f32) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            px_per_col: view_width / cols as f32,
            px_per_row: view_height / rows as f32,
            cells: vec![Cell { ch: ' ', fg: surface::Color::WHITE, bg: surface::Color::BLACK }; cols as usize * rows as usize],
        }
    }

    fn col(&self, x: f32) -> i32 {
        (x / self.px_per_col).floor() as i32
    }

    fn row(&self, y: f32) -> i32 {
        (y / self.px_per_row).floor() as i32
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return None;
        }
        let idx = row as usize * self.cols as usize + col as usize;
        self.cells.get_mut(idx)
    }

    /// Cell span covered by `[start, start + len)` pixels, at least one cell.
    fn span(start: i32, end_exclusive: i32) -> std::ops::Range<i32> {
        start..end_exclusive.max(start + 1)
    }

    /// Write the grid starting at terminal row `top`, batching runs of equal colours.
    pub fn flush<W: Write>(&self, out: &mut W, top: u16) -> std::io::Result<()> {
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, top + row))?;
            let start = row as usize * self.cols as usize;
            let line = &self.cells[start..start + self.cols as usize];

            let mut run = String::new();
            let mut colors: Option<(surface::Color, surface::Color)> = None;
            for cell in line {
                if colors != Some((cell.fg, cell.bg)) {
                    if let Some((fg, bg)) = colors {
                        queue_run(out, &run, fg, bg)?;
                        run.clear();
                    }
                    colors = Some((cell.fg, cell.bg));
                }
                run.push(cell.ch);
            }
            if let Some((fg, bg)) = colors {
                queue_run(out, &run, fg, bg)?;
            }
        }
        out.queue(style::ResetColor)?;
        Ok(())
    }
}

fn queue_run<W: Write>(out: &mut W, run: &str, fg: surface::Color, bg: surface::Color) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(to_term(fg)))?;
    out.queue(style::SetBackgroundColor(to_term(bg)))?;
    out.queue(Print(run))?;
    Ok(())
}

impl Surface for TerminalSurface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: surface::Color) {
        let cols = Self::span(self.col(x), self.col(x + width));
        let rows = Self::span(self.row(y), self.row(y + height));
        for row in rows {
            for col in cols.clone() {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ' ';
                    cell.bg = color;
                }
            }
        }
    }

    fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: surface::Color) {
        let (c0, c1) = (self.col(x), self.col(x + width).max(self.col(x)));
        let (r0, r1) = (self.row(y), self.row(y + height).max(self.row(y)));
        for col in c0..=c1 {
            for row in [r0, r1] {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = color;
                }
            }
        }
        for row in r0..=r1 {
            for col in [c0, c1] {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.bg = color;
                }
            }
        }
    }

    fn fill_ellipse(&mut self, cx: f32, cy: f32, rx: f32, ry: f32, color: surface::Color) {
        let cols = Self::span(self.col(cx - rx), self.col(cx + rx));
        let rows = Self::span(self.row(cy - ry), self.row(cy + ry));
        for row in rows {
            for col in cols.clone() {
                // Test the cell centre against the ellipse.
                let px = (col as f32 + 0.5) * self.px_per_col;
                let py = (row as f32 + 0.5) * self.px_per_row;
                let dx = (px - cx) / rx.max(self.px_per_col / 2.0);
                let dy = (py - cy) / ry.max(self.px_per_row / 2.0);
                if dx * dx + dy * dy <= 1.0 {
                    if let Some(cell) = self.cell_mut(col, row) {
                        cell.ch = ' ';
                        cell.bg = color;
                    }
                }
            }
        }
    }

    fn text(&mut self, cx: f32, y: f32, text: &str, color: surface::Color) {
        let len = text.chars().count() as i32;
        let start = self.col(cx) - len / 2;
        let row = self.row(y);
        for (i, ch) in text.chars().enumerate() {
            if let Some(cell) = self.cell_mut(start + i as i32, row) {
                cell.ch = ch;
                cell.fg = color;
            }
        }
    }
}

// ── Glyph sprites ─────────────────────────────────────────────────────────────

/// A coloured block with an animated glyph on top, mirrored when facing left.
#[derive(Debug)]
pub struct GlyphSprite {
    clock: FrameClock,
    right: &'static [&'static str],
    left: &'static [&'static str],
    color: surface::Color,
}

impl GlyphSprite {
    fn new(right: &'static [&'static str], left: &'static [&'static str], color: surface::Color) -> Self {
        let mut clock = FrameClock::new(right.len(), 0.15);
        clock.add_animation("idle", 0, 0);
        Self { clock, right, left, color }
    }

    pub fn player() -> Self {
        let mut sprite = GlyphSprite::new(&["@>", "@»"], &["<@", "«@"], surface::Color::rgb(65, 105, 225));
        sprite.clock.add_animation("jump", 1, 1);
        sprite
    }

    pub fn walker() -> Self {
        let mut sprite = GlyphSprite::new(&["ò>", "ó>"], &["<ò", "<ó"], surface::Color::rgb(139, 69, 19));
        sprite.clock.set_animation("run");
        sprite
    }

    pub fn flyer() -> Self {
        let mut sprite = GlyphSprite::new(&["^v", "v^"], &["v^", "^v"], surface::Color::rgb(128, 0, 128));
        sprite.clock.set_animation("run");
        sprite
    }
}

impl Sprite for GlyphSprite {
    fn set_animation(&mut self, name: &str) {
        self.clock.set_animation(name);
    }

    fn update(&mut self, dt: f32) {
        self.clock.update(dt);
    }

    fn draw(&self, surface: &mut dyn Surface, x: f32, y: f32, width: f32, height: f32, flip_x: bool) {
        surface.fill_rect(x, y, width, height, self.color);
        let frames = if flip_x { self.left } else { self.right };
        if let Some(glyph) = frames.get(self.clock.frame() % frames.len().max(1)) {
            surface.text(x + width / 2.0, y + height / 3.0, glyph, surface::Color::WHITE);
        }
    }
}

/// Give the player and every enemy of every level a glyph sprite.
pub fn dress(game: &mut Game) {
    game.player.body.sprite = Some(Box::new(GlyphSprite::player()));
    for level in game.levels.iter_mut() {
        for enemy in level.enemies.iter_mut() {
            let sprite = match enemy.kind {
                EnemyKind::Flyer { .. } => GlyphSprite::flyer(),
                _ => GlyphSprite::walker(),
            };
            enemy.body.sprite = Some(Box::new(sprite));
        }
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    game: &Game,
    banner: Option<&EducationalMarker>,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    let play_rows = height.saturating_sub(HUD_ROWS + HINT_ROWS);

    let mut surface = TerminalSurface::new(width, play_rows, game.tuning.view.width, game.tuning.view.height);
    game.draw(&mut surface);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    surface.flush(out, HUD_ROWS)?;

    draw_hud(out, game, width)?;
    draw_controls_hint(out, game, height)?;

    if let Some(marker) = banner {
        draw_banner(out, marker, width, height)?;
    }

    match game.status() {
        GameStatus::Playing => {}
        GameStatus::LevelComplete => draw_overlay(
            out,
            width,
            height,
            &["BILL  PASSED", &format!("Votes: {}", game.player.score), "ENTER - Next stage  Q - Quit"],
            Color::Green,
        )?,
        GameStatus::GameOver => draw_overlay(
            out,
            width,
            height,
            &["GAME  OVER", &format!("Votes: {}", game.player.score), "R - Play Again  Q - Quit"],
            Color::Red,
        )?,
        GameStatus::GameComplete => draw_overlay(
            out,
            width,
            height,
            &["SIGNED  INTO  LAW", &format!("Votes: {}", game.player.score), "R - Play Again  Q - Quit"],
            Color::Yellow,
        )?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, game: &Game, width: u16) -> std::io::Result<()> {
    let Some(level) = game.level() else {
        return Ok(());
    };

    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_VOTES))?;
    out.queue(Print(format!("Votes:{:>4}/{:<4}", game.player.score, level.required_votes)))?;

    let name = format!("[ {} ]", level.name);
    out.queue(cursor::MoveTo((width / 2).saturating_sub(name.chars().count() as u16 / 2), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LEVEL))?;
    out.queue(Print(&name))?;

    let mut right = format!("Lives:{}", "♥".repeat(game.player.lives as usize));
    if let Some(boss) = level.bosses.iter().find(|b| b.body.active) {
        right = format!("{} P{} {}/{}  {}", boss.name, boss.phase.number(), boss.health, boss.max_health, right);
    }
    out.queue(cursor::MoveTo(width.saturating_sub(right.chars().count() as u16 + 1), 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&right))?;
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, game: &Game, height: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    if game.player.can_shoot {
        out.queue(Print("← → / A D : Move   ↑ / W : Jump   SPACE : Shoot   Q : Quit"))?;
    } else {
        out.queue(Print("← → / A D : Move   ↑ / W / SPACE : Jump   Q : Quit"))?;
    }
    Ok(())
}

// ── Educational banner ────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, marker: &EducationalMarker, width: u16, height: u16) -> std::io::Result<()> {
    let inner = width.saturating_sub(6).max(10) as usize;
    let mut lines = vec![String::new()];
    for word in marker.content.split_whitespace() {
        let Some(last) = lines.last_mut() else { break };
        if !last.is_empty() && last.chars().count() + word.chars().count() + 1 > inner {
            lines.push(word.to_string());
        } else {
            if !last.is_empty() {
                last.push(' ');
            }
            last.push_str(word);
        }
    }

    let top = height.saturating_sub(HINT_ROWS + lines.len() as u16 + 2);
    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(cursor::MoveTo(2, top))?;
    out.queue(style::SetForegroundColor(C_BANNER_TITLE))?;
    out.queue(Print(format!("{:<width$}", marker.title, width = inner)))?;
    out.queue(style::SetForegroundColor(C_BANNER))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(2, top + 1 + i as u16))?;
        out.queue(Print(format!("{:<width$}", line, width = inner)))?;
    }
    out.queue(style::ResetColor)?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_overlay<W: Write>(out: &mut W, width: u16, height: u16, lines: &[&str], color: Color) -> std::io::Result<()> {
    let inner = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
    let cx = width / 2;
    let start_row = (height / 2).saturating_sub(lines.len() as u16 / 2 + 1);
    let col = cx.saturating_sub(inner as u16 / 2 + 1);

    out.queue(style::SetBackgroundColor(Color::Black))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col, start_row))?;
    out.queue(Print(format!("╔{}╗", "═".repeat(inner))))?;
    for (i, line) in lines.iter().enumerate() {
        out.queue(cursor::MoveTo(col, start_row + 1 + i as u16))?;
        out.queue(Print(format!("║{:^width$}║", line, width = inner)))?;
    }
    out.queue(cursor::MoveTo(col, start_row + 1 + lines.len() as u16))?;
    out.queue(Print(format!("╚{}╝", "═".repeat(inner))))?;
    out.queue(style::ResetColor)?;
    Ok(())
}
