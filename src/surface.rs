/// Collaborator contracts between the simulation and the outside world.
///
/// The game core only ever talks to these traits.  The binary provides
/// terminal implementations; tests provide recording fakes.

use std::io;

use crate::assets::Frame;
use crate::entities::{HeldKeys, Point, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const GREY: Rgb = Rgb(128, 128, 128);
pub const RED: Rgb = Rgb(255, 0, 0);

/// Something that can show sprites and text in playfield pixel space.
pub trait RenderSurface {
    /// Draw `frame` with its top-left corner at `pos`.
    fn present(&mut self, frame: &Frame, pos: Point) -> io::Result<()>;

    fn draw_text(&mut self, text: &str, pos: Point, color: Rgb) -> io::Result<()>;

    /// Pixel extent `(width, height)` that `text` occupies when drawn.
    fn text_size(&self, text: &str) -> (i32, i32);

    /// Area actually covered by `text` drawn at `pos`.  Surfaces that snap
    /// text to a grid report the snapped cells here.
    fn text_area(&self, text: &str, pos: Point) -> Rect {
        let (w, h) = self.text_size(text);
        Rect::new(pos.x, pos.y, w, h)
    }

    /// Commit everything drawn since the previous flip.
    fn flip(&mut self) -> io::Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Bullet,
    EnemyDown,
    GameOver,
}

/// Fire-and-forget sound playback.
pub trait Audio {
    fn play(&mut self, cue: SoundCue);
}

/// Plays nothing.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play(&mut self, _cue: SoundCue) {}
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Window closed or quit key pressed.
    Quit,
    /// Left button pressed at a playfield position.
    MouseDown(Point),
    /// Keyboard shortcut for the menu's start button.
    Confirm,
}

pub trait Input {
    /// Discrete events received since the last call.
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Directional keys currently held down.
    fn key_state(&mut self) -> HeldKeys;
}
