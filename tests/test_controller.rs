use std::collections::VecDeque;
use std::io;

use airplane_wars::assets::*;
use airplane_wars::compute::init_state;
use airplane_wars::controller::*;
use airplane_wars::entities::*;
use airplane_wars::error::AssetError;
use airplane_wars::surface::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

// ── Fakes ─────────────────────────────────────────────────────────────────────

struct FixedLoader;

impl AssetLoader for FixedLoader {
    fn load_sheet(&mut self, path: &str) -> Result<SheetInfo, AssetError> {
        if path == PLANE_SHEET_PATH {
            Ok(SheetInfo { width: 1024, height: 1024 })
        } else {
            Ok(SheetInfo { width: 480, height: 800 })
        }
    }

    fn load_sound(&mut self, _path: &str) -> Result<(), AssetError> {
        Ok(())
    }
}

fn assets() -> Assets {
    load_assets(&mut FixedLoader).unwrap()
}

#[derive(Debug, PartialEq)]
enum Draw {
    Sprite(SpriteKind, usize, Point),
    Text(String, Point, Rgb),
    Flip,
}

/// Records every draw call; text is 10 px per char and 20 px tall.
#[derive(Default)]
struct Canvas {
    calls: Vec<Draw>,
}

impl Canvas {
    fn sprites(&self, kind: SpriteKind) -> Vec<(usize, Point)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Draw::Sprite(k, i, p) if *k == kind => Some((*i, *p)),
                _ => None,
            })
            .collect()
    }

    fn texts(&self) -> Vec<(String, Point, Rgb)> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                Draw::Text(t, p, color) => Some((t.clone(), *p, *color)),
                _ => None,
            })
            .collect()
    }
}

impl RenderSurface for Canvas {
    fn present(&mut self, frame: &Frame, pos: Point) -> io::Result<()> {
        self.calls.push(Draw::Sprite(frame.kind, frame.index, pos));
        Ok(())
    }

    fn draw_text(&mut self, text: &str, pos: Point, color: Rgb) -> io::Result<()> {
        self.calls.push(Draw::Text(text.to_string(), pos, color));
        Ok(())
    }

    fn text_size(&self, text: &str) -> (i32, i32) {
        (text.chars().count() as i32 * 10, 20)
    }

    fn flip(&mut self) -> io::Result<()> {
        self.calls.push(Draw::Flip);
        Ok(())
    }
}

/// Replays one batch of events per `poll_events` call.
#[derive(Default)]
struct Script {
    batches: VecDeque<Vec<InputEvent>>,
    keys: HeldKeys,
    key_samples: usize,
}

impl Script {
    fn with(events: Vec<InputEvent>) -> Self {
        Self {
            batches: VecDeque::from(vec![events]),
            ..Self::default()
        }
    }
}

impl Input for Script {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.batches.pop_front().unwrap_or_default()
    }

    fn key_state(&mut self) -> HeldKeys {
        self.key_samples += 1;
        self.keys
    }
}

fn rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── play_frame ────────────────────────────────────────────────────────────────

#[test]
fn play_frame_ticks_then_draws_in_order() {
    let assets = assets();
    let mut canvas = Canvas::default();
    let mut input = Script::default();
    let state = init_state(480, 800);

    let (next, outcome) =
        play_frame(&state, 1, &assets, &mut canvas, &mut input, &mut Silent, &mut rng()).unwrap();

    assert_eq!(outcome, FrameOutcome::Continue);
    assert_eq!(next.tick, 1);

    let kinds: Vec<SpriteKind> = canvas
        .calls
        .iter()
        .filter_map(|c| match c {
            Draw::Sprite(k, _, _) => Some(*k),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            SpriteKind::Background,
            SpriteKind::Background,
            SpriteKind::Bullet,
            SpriteKind::Enemy,
            SpriteKind::Player,
        ]
    );
    assert_eq!(canvas.texts(), vec![("0".to_string(), Point::new(10, 10), GREY)]);
    assert_eq!(canvas.calls.last(), Some(&Draw::Flip));
}

#[test]
fn background_is_drawn_twice_for_wrap() {
    let assets = assets();
    let mut canvas = Canvas::default();
    let mut state = init_state(480, 800);
    state.background_y = 99.5;

    play_frame(&state, 1, &assets, &mut canvas, &mut Script::default(), &mut Silent, &mut rng())
        .unwrap();

    let bg = canvas.sprites(SpriteKind::Background);
    assert_eq!(bg, vec![(0, Point::new(0, 100)), (0, Point::new(0, -700))]);
}

#[test]
fn play_frame_samples_keys_every_tick() {
    let assets = assets();
    let mut canvas = Canvas::default();
    let mut input = Script {
        keys: HeldKeys { left: true, ..HeldKeys::default() },
        ..Script::default()
    };
    let state = init_state(480, 800);

    let (next, _) =
        play_frame(&state, 3, &assets, &mut canvas, &mut input, &mut Silent, &mut rng()).unwrap();

    assert_eq!(input.key_samples, 3);
    assert_eq!(next.tick, 3);
    assert_eq!(next.player.rect.left, 200 - 3 * 8);
    assert_eq!(canvas.calls.iter().filter(|c| **c == Draw::Flip).count(), 1);
}

#[test]
fn play_frame_without_steps_only_redraws() {
    let assets = assets();
    let state = init_state(480, 800);
    let (next, outcome) = play_frame(
        &state,
        0,
        &assets,
        &mut Canvas::default(),
        &mut Script::default(),
        &mut Silent,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(next.tick, 0);
    assert_eq!(outcome, FrameOutcome::Continue);
}

#[test]
fn play_frame_reports_quit() {
    let assets = assets();
    let mut input = Script::with(vec![InputEvent::MouseDown(Point::new(1, 1)), InputEvent::Quit]);
    let (_, outcome) = play_frame(
        &init_state(480, 800),
        1,
        &assets,
        &mut Canvas::default(),
        &mut input,
        &mut Silent,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(outcome, FrameOutcome::Quit);
}

#[test]
fn play_frame_reports_game_over() {
    let assets = assets();
    let mut state = init_state(480, 800);
    state.player.is_hit = true;
    state.death_counter = 47;

    let (next, outcome) = play_frame(
        &state,
        1,
        &assets,
        &mut Canvas::default(),
        &mut Script::default(),
        &mut Silent,
        &mut rng(),
    )
    .unwrap();
    assert_eq!(next.status, GameStatus::GameOver);
    assert_eq!(outcome, FrameOutcome::GameOver);
}

#[test]
fn explosion_frame_is_drawn_at_enemy_position() {
    let assets = assets();
    let mut canvas = Canvas::default();
    let mut state = init_state(480, 800);
    state.shoot_counter = 1;
    state.spawn_counter = 1;
    let mut enemy = airplane_wars::compute::new_enemy(Point::new(30, 200));
    enemy.down_index = Some(4);
    state.exploding.push(enemy);

    play_frame(&state, 1, &assets, &mut canvas, &mut Script::default(), &mut Silent, &mut rng())
        .unwrap();

    assert_eq!(canvas.sprites(SpriteKind::EnemyDown), vec![(2, Point::new(30, 200))]);
}

// ── menu_frame ────────────────────────────────────────────────────────────────

fn menu(events: Vec<InputEvent>) -> (Canvas, f32, Option<MenuChoice>) {
    let assets = assets();
    let mut canvas = Canvas::default();
    let mut input = Script::with(events);
    let (offset, choice) =
        menu_frame(&mut canvas, &mut input, &assets, 0.0, 1, 480, 800).unwrap();
    (canvas, offset, choice)
}

#[test]
fn menu_draws_title_and_buttons() {
    let (canvas, offset, choice) = menu(vec![]);
    assert_eq!(offset, 2.0);
    assert_eq!(choice, None);
    let texts: Vec<String> = canvas.texts().into_iter().map(|(t, _, _)| t).collect();
    assert_eq!(texts, vec!["Airplane Wars", "Start Game", "Quit"]);
    // "Start Game" is 100×20, centered on (240, 400)
    assert_eq!(canvas.texts()[1].1, Point::new(190, 390));
}

#[test]
fn menu_click_on_start() {
    let (_, _, choice) = menu(vec![InputEvent::MouseDown(Point::new(240, 400))]);
    assert_eq!(choice, Some(MenuChoice::Start));
}

#[test]
fn menu_click_on_quit() {
    let (_, _, choice) = menu(vec![InputEvent::MouseDown(Point::new(230, 505))]);
    assert_eq!(choice, Some(MenuChoice::Quit));
}

#[test]
fn menu_click_elsewhere_is_ignored() {
    let (_, _, choice) = menu(vec![InputEvent::MouseDown(Point::new(10, 10))]);
    assert_eq!(choice, None);
}

#[test]
fn menu_keyboard_and_close() {
    assert_eq!(menu(vec![InputEvent::Confirm]).2, Some(MenuChoice::Start));
    assert_eq!(menu(vec![InputEvent::Quit]).2, Some(MenuChoice::Quit));
    assert_eq!(
        menu(vec![InputEvent::Confirm, InputEvent::Quit]).2,
        Some(MenuChoice::Quit)
    );
}

#[test]
fn menu_background_wraps() {
    let assets = assets();
    let (offset, _) = menu_frame(
        &mut Canvas::default(),
        &mut Script::default(),
        &assets,
        799.0,
        1,
        480,
        800,
    )
    .unwrap();
    assert_eq!(offset, 0.0);
}

// ── game_over_frame ───────────────────────────────────────────────────────────

#[test]
fn game_over_shows_image_and_score() {
    let assets = assets();
    let mut canvas = Canvas::default();
    let mut state = init_state(480, 800);
    state.score = 3000;

    let quit = game_over_frame(&mut canvas, &mut Script::default(), &assets, &state).unwrap();

    assert!(!quit);
    assert_eq!(canvas.sprites(SpriteKind::GameOver), vec![(0, Point::new(0, 0))]);
    // "Score: 3000" is 110×20, centered on (240, 424)
    assert_eq!(
        canvas.texts(),
        vec![("Score: 3000".to_string(), Point::new(185, 414), RED)]
    );
}

#[test]
fn game_over_only_reacts_to_quit() {
    let assets = assets();
    let state = init_state(480, 800);
    let mut input = Script::with(vec![InputEvent::Confirm, InputEvent::MouseDown(Point::new(240, 400))]);
    assert!(!game_over_frame(&mut Canvas::default(), &mut input, &assets, &state).unwrap());

    let mut input = Script::with(vec![InputEvent::Quit]);
    assert!(game_over_frame(&mut Canvas::default(), &mut input, &assets, &state).unwrap());
}
