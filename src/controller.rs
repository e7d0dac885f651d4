/// Frame controller for the three screens: menu, play and game over.
///
/// Each function runs one rendered frame against the collaborator traits.
/// The binary owns the clock and decides how many simulation ticks a frame
/// covers.

use std::io;

use log::info;
use rand::Rng;

use crate::assets::Assets;
use crate::compute::{scroll_background, tick};
use crate::consts::MENU_SCROLL_SPEED;
use crate::entities::{GameState, GameStatus, Point, Rect};
use crate::render::{draw_frame, draw_game_over, draw_menu};
use crate::surface::{Audio, Input, InputEvent, RenderSurface};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    Quit,
}

/// What the play loop should do after a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    GameOver,
    Quit,
}

fn contains(rect: &Rect, p: Point) -> bool {
    p.x >= rect.left && p.x < rect.right() && p.y >= rect.top && p.y < rect.bottom()
}

fn quit_requested(events: &[InputEvent]) -> bool {
    events.iter().any(|e| *e == InputEvent::Quit)
}

/// Scroll the menu background by `steps` ticks, draw it and handle clicks.
/// Returns the new scroll offset and the user's choice, if any.
pub fn menu_frame<S: RenderSurface, I: Input>(
    surface: &mut S,
    input: &mut I,
    assets: &Assets,
    background_y: f32,
    steps: u32,
    width: i32,
    height: i32,
) -> io::Result<(f32, Option<MenuChoice>)> {
    let mut offset = background_y;
    for _ in 0..steps {
        offset = scroll_background(offset, MENU_SCROLL_SPEED, height as f32);
    }

    let layout = draw_menu(surface, assets, offset, width, height)?;

    let mut choice = None;
    for event in input.poll_events() {
        match event {
            InputEvent::Quit => choice = Some(MenuChoice::Quit),
            InputEvent::Confirm => choice = choice.or(Some(MenuChoice::Start)),
            InputEvent::MouseDown(pos) if contains(&layout.start, pos) => {
                choice = choice.or(Some(MenuChoice::Start));
            }
            InputEvent::MouseDown(pos) if contains(&layout.quit, pos) => {
                choice = Some(MenuChoice::Quit);
            }
            InputEvent::MouseDown(_) => {}
        }
        if choice == Some(MenuChoice::Quit) {
            break;
        }
    }
    if let Some(choice) = choice {
        info!("menu choice: {choice:?}");
    }
    Ok((offset, choice))
}

/// Simulate `steps` ticks, draw the result once, then check for quit.
pub fn play_frame<S: RenderSurface, I: Input, A: Audio>(
    state: &GameState,
    steps: u32,
    assets: &Assets,
    surface: &mut S,
    input: &mut I,
    audio: &mut A,
    rng: &mut impl Rng,
) -> io::Result<(GameState, FrameOutcome)> {
    let mut state = state.clone();
    for _ in 0..steps {
        let keys = input.key_state();
        state = tick(&state, &keys, rng, audio);
    }

    draw_frame(surface, assets, &state)?;

    let outcome = if quit_requested(&input.poll_events()) {
        FrameOutcome::Quit
    } else if state.status == GameStatus::GameOver {
        FrameOutcome::GameOver
    } else {
        FrameOutcome::Continue
    };
    Ok((state, outcome))
}

/// Show the final score.  Returns `true` once quit is requested.
pub fn game_over_frame<S: RenderSurface, I: Input>(
    surface: &mut S,
    input: &mut I,
    assets: &Assets,
    state: &GameState,
) -> io::Result<bool> {
    draw_game_over(surface, assets, state.score, state.width, state.height)?;
    Ok(quit_requested(&input.poll_events()))
}
