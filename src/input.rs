/// Keyboard and mouse input from the terminal.
///
/// Input model: instead of acting on each key event individually, we keep a
/// `key_seen` map that records when the last press/repeat event for every
/// key arrived.  A key counts as held while that timestamp is fresh, which
/// gives the level-triggered key set the simulation samples each tick.
///
/// Works on two classes of terminal:
/// * **Keyboard-enhancement capable** (Ghostty, kitty, etc.): proper
///   `Press` / `Repeat` / `Release` events → keys are removed on release.
/// * **Classic terminals**: only `Press` events (OS key-repeat shows as
///   repeated `Press`).  Keys expire after `HOLD_WINDOW` of silence.

use std::collections::HashMap;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use log::debug;

use airplane_wars::entities::HeldKeys;
use airplane_wars::surface::{Input, InputEvent};

use crate::display::Viewport;

/// A key is considered "held" if its last press/repeat event arrived within
/// this window.  OS key-repeat runs at ≥ 15 Hz, so a live key is refreshed
/// well before expiry.
const HOLD_WINDOW: Duration = Duration::from_millis(150);

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    viewport: Viewport,
    key_seen: HashMap<KeyCode, Instant>,
    pending: Vec<InputEvent>,
    /// Set when the event thread hung up; reported as a quit.
    disconnected: bool,
}

impl TerminalInput {
    pub fn new(rx: mpsc::Receiver<Event>, viewport: Viewport) -> Self {
        Self {
            rx,
            viewport,
            key_seen: HashMap::new(),
            pending: Vec::new(),
            disconnected: false,
        }
    }

    fn is_held(&self, keys: &[KeyCode], now: Instant) -> bool {
        keys.iter().any(|key| {
            self.key_seen
                .get(key)
                .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
                .unwrap_or(false)
        })
    }

    /// Drain all pending terminal events (non-blocking).
    fn pump(&mut self) {
        let now = Instant::now();
        loop {
            let event = match self.rx.try_recv() {
                Ok(event) => event,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if !self.disconnected {
                        debug!("input thread disconnected");
                        self.disconnected = true;
                        self.pending.push(InputEvent::Quit);
                    }
                    break;
                }
            };
            match event {
                Event::Key(key) => self.on_key(key, now),
                Event::Mouse(MouseEvent {
                    kind: MouseEventKind::Down(MouseButton::Left),
                    column,
                    row,
                    ..
                }) => {
                    let pos = self.viewport.to_pixel(column, row);
                    self.pending.push(InputEvent::MouseDown(pos));
                }
                _ => {}
            }
        }
    }

    fn on_key(&mut self, key: KeyEvent, now: Instant) {
        let KeyEvent {
            code,
            kind,
            modifiers,
            ..
        } = key;
        match kind {
            // Press: record key + handle one-shot actions
            KeyEventKind::Press => {
                self.key_seen.insert(code, now);
                match code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                        self.pending.push(InputEvent::Quit);
                    }
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        self.pending.push(InputEvent::Quit);
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => {
                        self.pending.push(InputEvent::Confirm);
                    }
                    _ => {}
                }
            }
            // Repeat: refresh timestamp so key stays "held"
            KeyEventKind::Repeat => {
                self.key_seen.insert(code, now);
            }
            // Release: remove key immediately (keyboard-enhancement path)
            KeyEventKind::Release => {
                self.key_seen.remove(&code);
            }
        }
    }
}

impl Input for TerminalInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.pump();
        std::mem::take(&mut self.pending)
    }

    fn key_state(&mut self) -> HeldKeys {
        self.pump();
        let now = Instant::now();
        HeldKeys {
            up: self.is_held(&[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], now),
            down: self.is_held(&[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], now),
            left: self.is_held(&[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], now),
            right: self.is_held(&[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], now),
        }
    }
}
