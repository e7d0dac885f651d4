/// Draw passes.  Each function reads state and issues collaborator calls;
/// no game state is mutated here.

use std::io;

use crate::assets::{Assets, SpriteKind};
use crate::entities::{GameState, Point, Rect};
use crate::surface::{RenderSurface, Rgb, GREY, RED};

pub const TITLE: &str = "Airplane Wars";
pub const START_LABEL: &str = "Start Game";
pub const QUIT_LABEL: &str = "Quit";

fn sprite<S: RenderSurface>(
    surface: &mut S,
    assets: &Assets,
    kind: SpriteKind,
    index: usize,
    pos: Point,
) -> io::Result<()> {
    match assets.frames.frame(kind, index) {
        Some(frame) => surface.present(frame, pos),
        None => Ok(()),
    }
}

/// Background drawn twice so the wrap seam is never visible.
fn draw_background<S: RenderSurface>(
    surface: &mut S,
    assets: &Assets,
    offset: f32,
) -> io::Result<()> {
    let Some(frame) = assets.frames.frame(SpriteKind::Background, 0) else {
        return Ok(());
    };
    let y = offset as i32;
    surface.present(frame, Point::new(0, y))?;
    surface.present(frame, Point::new(0, y - frame.source.height))
}

/// Text rectangle centered on `center`, as the menu lays out its buttons.
pub fn centered_text_rect<S: RenderSurface>(surface: &S, text: &str, center: Point) -> Rect {
    let (w, h) = surface.text_size(text);
    Rect::new(center.x - w / 2, center.y - h / 2, w, h)
}

fn draw_centered<S: RenderSurface>(
    surface: &mut S,
    text: &str,
    center: Point,
    color: Rgb,
) -> io::Result<Rect> {
    let pos = centered_text_rect(surface, text, center).top_left();
    surface.draw_text(text, pos, color)?;
    Ok(surface.text_area(text, pos))
}

// ── Playing ───────────────────────────────────────────────────────────────────

/// Render one complete gameplay frame.
pub fn draw_frame<S: RenderSurface>(
    surface: &mut S,
    assets: &Assets,
    state: &GameState,
) -> io::Result<()> {
    draw_background(surface, assets, state.background_y)?;

    for bullet in &state.player.bullets {
        sprite(surface, assets, SpriteKind::Bullet, 0, bullet.rect.top_left())?;
    }
    for enemy in &state.enemies {
        sprite(surface, assets, SpriteKind::Enemy, 0, enemy.rect.top_left())?;
    }
    for enemy in &state.exploding {
        sprite(surface, assets, SpriteKind::EnemyDown, enemy.img_index, enemy.rect.top_left())?;
    }

    sprite(
        surface,
        assets,
        SpriteKind::Player,
        state.player.img_index,
        state.player.rect.top_left(),
    )?;

    surface.draw_text(&state.score.to_string(), Point::new(10, 10), GREY)?;
    surface.flip()
}

// ── Menu ──────────────────────────────────────────────────────────────────────

/// Areas covered by the menu buttons, for hit-testing clicks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuLayout {
    pub start: Rect,
    pub quit: Rect,
}

pub fn draw_menu<S: RenderSurface>(
    surface: &mut S,
    assets: &Assets,
    offset: f32,
    width: i32,
    height: i32,
) -> io::Result<MenuLayout> {
    draw_background(surface, assets, offset)?;

    let (title_w, _) = surface.text_size(TITLE);
    surface.draw_text(TITLE, Point::new(width / 2 - title_w / 2, height / 4), GREY)?;

    let start = draw_centered(surface, START_LABEL, Point::new(width / 2, height / 2), GREY)?;
    let quit = draw_centered(surface, QUIT_LABEL, Point::new(width / 2, height / 2 + 100), GREY)?;

    surface.flip()?;
    Ok(MenuLayout { start, quit })
}

// ── Game over ─────────────────────────────────────────────────────────────────

pub fn draw_game_over<S: RenderSurface>(
    surface: &mut S,
    assets: &Assets,
    score: u32,
    width: i32,
    height: i32,
) -> io::Result<()> {
    sprite(surface, assets, SpriteKind::GameOver, 0, Point::new(0, 0))?;
    let text = format!("Score: {score}");
    draw_centered(surface, &text, Point::new(width / 2, height / 2 + 24), RED)?;
    surface.flip()
}
