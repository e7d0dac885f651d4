/// Rendering layer — all terminal output lives here.
///
/// The game draws in a fixed 480×800 pixel playfield.  `Viewport` maps that
/// pixel space onto the terminal's character grid and `TerminalSurface`
/// turns each sprite frame into a small block of glyphs.  No game logic is
/// performed; this module only translates draw calls into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, ExecutableCommand, QueueableCommand,
};
use log::{debug, trace};

use airplane_wars::assets::{
    AssetLoader, Frame, SheetInfo, SoundBank, SpriteKind, BACKGROUND_PATH, BULLET_SOUND_PATH,
    ENEMY_DOWN_SOUND_PATH, GAME_OVER_PATH, GAME_OVER_SOUND_PATH, PLANE_SHEET_PATH,
};
use airplane_wars::entities::{Point, Rect};
use airplane_wars::error::AssetError;
use airplane_wars::surface::{Audio, RenderSurface, Rgb, SoundCue};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_STAR: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::White;
const C_PLAYER_DOWN: Color = Color::Yellow;
const C_ENEMY: Color = Color::Green;
const C_ENEMY_DOWN: Color = Color::Yellow;
const C_BULLET: Color = Color::Cyan;
const C_GAME_OVER: Color = Color::Red;

// ── Sprite art ────────────────────────────────────────────────────────────────

// Spaces are transparent.
const PLAYER_ART: [&[&str]; 6] = [
    &["  ▲  ", " /█\\ ", "/═╩═\\"],
    &["  ♦  ", " /█\\ ", "/═╩═\\"],
    &["  *  ", " \\█/ ", "/ ╩ \\"],
    &[" * * ", "  ✶  ", " * * "],
    &["  ·  ", " ✹ ✹ ", "  ·  "],
    &["     ", "  ·  ", "     "],
];
const BULLET_ART: &[&str] = &["║"];
const ENEMY_ART: &[&str] = &["«▼»", "╚═╝"];
const ENEMY_DOWN_ART: [&[&str]; 4] = [
    &["\\|/", "-*-"],
    &["✶✶✶", " ✶ "],
    &[" ✹ ", "·✹·"],
    &[" · ", "   "],
];
const GAME_OVER_ART: &[&str] = &[
    "╔════════════════════╗",
    "║    GAME  OVER      ║",
    "╚════════════════════╝",
];

/// Stars per background sheet.
const STAR_COUNT: i32 = 48;

// ── Viewport ──────────────────────────────────────────────────────────────────

/// Maps playfield pixels to terminal cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub width: i32,
    pub height: i32,
}

impl Viewport {
    pub fn new(cols: u16, rows: u16, width: i32, height: i32) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
            width: width.max(1),
            height: height.max(1),
        }
    }

    fn col(&self, x: i32) -> i32 {
        (i64::from(x) * i64::from(self.cols)).div_euclid(i64::from(self.width)) as i32
    }

    fn row(&self, y: i32) -> i32 {
        (i64::from(y) * i64::from(self.rows)).div_euclid(i64::from(self.height)) as i32
    }

    fn cell(&self, p: Point) -> (i32, i32) {
        (self.col(p.x), self.row(p.y))
    }

    fn visible(&self, col: i32, row: i32) -> bool {
        col >= 0 && row >= 0 && col < i32::from(self.cols) && row < i32::from(self.rows)
    }

    /// Center of a terminal cell in playfield pixels.
    pub fn to_pixel(&self, col: u16, row: u16) -> Point {
        let x = (2 * i32::from(col) + 1) * self.width / (2 * i32::from(self.cols));
        let y = (2 * i32::from(row) + 1) * self.height / (2 * i32::from(self.rows));
        Point::new(x, y)
    }

    /// Pixels covered by the block of `cols × rows` cells starting at
    /// `(col, row)`.  The center of every cell in the block, as returned by
    /// `to_pixel`, lies inside the result.
    fn span(&self, col: i32, row: i32, cols: i32, rows: i32) -> Rect {
        let (w, h) = (i64::from(self.width), i64::from(self.height));
        let (tc, tr) = (i64::from(self.cols), i64::from(self.rows));
        let floor = |n: i64, d: i64| n.div_euclid(d) as i32;
        let ceil = |n: i64, d: i64| -(-n).div_euclid(d) as i32;

        let left = floor(i64::from(col) * w, tc);
        let top = floor(i64::from(row) * h, tr);
        let right = ceil(i64::from(col + cols) * w, tc);
        let bottom = ceil(i64::from(row + rows) * h, tr);
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Pixel size of `cols × rows` cells, rounded up.
    fn pixels(&self, cols: i32, rows: i32) -> (i32, i32) {
        let w = (cols * self.width + i32::from(self.cols) - 1) / i32::from(self.cols);
        let h = (rows * self.height + i32::from(self.rows) - 1) / i32::from(self.rows);
        (w, h)
    }
}

// ── Surface ───────────────────────────────────────────────────────────────────

pub struct TerminalSurface<W: Write> {
    out: W,
    viewport: Viewport,
    needs_clear: bool,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, viewport: Viewport) -> Self {
        Self {
            out,
            viewport,
            needs_clear: true,
        }
    }

    fn begin(&mut self) -> std::io::Result<()> {
        if self.needs_clear {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.needs_clear = false;
        }
        Ok(())
    }

    /// Print `art` centered on the cell span of `area`, skipping spaces and
    /// anything outside the terminal.
    fn draw_art(&mut self, art: &[&str], area: Rect, color: Color) -> std::io::Result<()> {
        let (c0, r0) = self.viewport.cell(area.top_left());
        let (c1, r1) = self.viewport.cell(Point::new(area.right(), area.bottom()));
        let art_w = art.iter().map(|l| l.chars().count()).max().unwrap_or(0) as i32;
        let art_h = art.len() as i32;
        let left = c0 + ((c1 - c0) - art_w).max(0) / 2;
        let top = r0 + ((r1 - r0) - art_h).max(0) / 2;

        self.out.queue(style::SetForegroundColor(color))?;
        for (dy, line) in art.iter().enumerate() {
            let row = top + dy as i32;
            for (dx, ch) in line.chars().enumerate() {
                let col = left + dx as i32;
                if ch == ' ' || !self.viewport.visible(col, row) {
                    continue;
                }
                self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
                self.out.queue(Print(ch))?;
            }
        }
        Ok(())
    }

    /// Deterministic starfield scattered over the background sheet.
    fn draw_stars(&mut self, sheet: Rect, pos: Point) -> std::io::Result<()> {
        self.out.queue(style::SetForegroundColor(C_STAR))?;
        for i in 0..STAR_COUNT {
            let x = pos.x + (i * 97 + 13) % sheet.width.max(1);
            let y = pos.y + (i * 389 + 41) % sheet.height.max(1);
            let (col, row) = self.viewport.cell(Point::new(x, y));
            if !self.viewport.visible(col, row) {
                continue;
            }
            self.out.queue(cursor::MoveTo(col as u16, row as u16))?;
            self.out.queue(Print(if i % 5 == 0 { '*' } else { '.' }))?;
        }
        Ok(())
    }
}

impl<W: Write> RenderSurface for TerminalSurface<W> {
    fn present(&mut self, frame: &Frame, pos: Point) -> std::io::Result<()> {
        self.begin()?;
        let area = Rect::new(pos.x, pos.y, frame.source.width, frame.source.height);
        match frame.kind {
            SpriteKind::Background => self.draw_stars(frame.source, pos),
            SpriteKind::GameOver => {
                let banner = Rect::new(pos.x, pos.y, area.width, area.height / 2);
                self.draw_art(GAME_OVER_ART, banner, C_GAME_OVER)
            }
            SpriteKind::Player => {
                let art = PLAYER_ART[frame.index.min(PLAYER_ART.len() - 1)];
                let color = if frame.index < 2 { C_PLAYER } else { C_PLAYER_DOWN };
                self.draw_art(art, area, color)
            }
            SpriteKind::Bullet => self.draw_art(BULLET_ART, area, C_BULLET),
            SpriteKind::Enemy => self.draw_art(ENEMY_ART, area, C_ENEMY),
            SpriteKind::EnemyDown => {
                let art = ENEMY_DOWN_ART[frame.index.min(ENEMY_DOWN_ART.len() - 1)];
                self.draw_art(art, area, C_ENEMY_DOWN)
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Point, color: Rgb) -> std::io::Result<()> {
        self.begin()?;
        let (col, row) = self.viewport.cell(pos);
        if !self.viewport.visible(col.max(0), row) {
            return Ok(());
        }
        let room = (i32::from(self.viewport.cols) - col.max(0)) as usize;
        let skip = (-col).max(0) as usize;
        let visible: String = text.chars().skip(skip).take(room).collect();

        let Rgb(r, g, b) = color;
        self.out.queue(cursor::MoveTo(col.max(0) as u16, row as u16))?;
        self.out.queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
        self.out.queue(Print(visible))?;
        Ok(())
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        self.viewport.pixels(text.chars().count() as i32, 1)
    }

    fn text_area(&self, text: &str, pos: Point) -> Rect {
        let (col, row) = self.viewport.cell(pos);
        self.viewport.span(col, row, text.chars().count() as i32, 1)
    }

    fn flip(&mut self) -> std::io::Result<()> {
        self.begin()?;
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        self.out.flush()?;
        self.needs_clear = true;
        Ok(())
    }
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// The terminal has no mixer: cues are logged and the collision sound rings
/// the bell on `out`.
pub struct TerminalAudio<W: Write> {
    sounds: SoundBank,
    out: W,
}

impl<W: Write> TerminalAudio<W> {
    pub fn new(sounds: SoundBank, out: W) -> Self {
        Self { sounds, out }
    }
}

impl<W: Write> Audio for TerminalAudio<W> {
    fn play(&mut self, cue: SoundCue) {
        let Some(sound) = self.sounds.get(cue) else {
            return;
        };
        trace!("play {} at volume {}", sound.path, sound.volume);
        if cue == SoundCue::GameOver {
            if let Err(e) = self.out.execute(Print('\x07')) {
                debug!("bell failed: {e}");
            }
        }
    }
}

// ── Assets ────────────────────────────────────────────────────────────────────

/// Sheets and sounds bundled with the terminal build.  Sprite art is
/// compiled in, so "loading" resolves a path to its known dimensions.
pub struct BuiltinAssets;

impl AssetLoader for BuiltinAssets {
    fn load_sheet(&mut self, path: &str) -> Result<SheetInfo, AssetError> {
        match path {
            BACKGROUND_PATH | GAME_OVER_PATH => Ok(SheetInfo { width: 480, height: 800 }),
            PLANE_SHEET_PATH => Ok(SheetInfo { width: 1024, height: 1024 }),
            _ => Err(AssetError::Image {
                path: path.to_string(),
                reason: "not bundled with the terminal build".to_string(),
            }),
        }
    }

    fn load_sound(&mut self, path: &str) -> Result<(), AssetError> {
        match path {
            BULLET_SOUND_PATH | ENEMY_DOWN_SOUND_PATH | GAME_OVER_SOUND_PATH => Ok(()),
            _ => Err(AssetError::Sound {
                path: path.to_string(),
                reason: "not bundled with the terminal build".to_string(),
            }),
        }
    }
}
