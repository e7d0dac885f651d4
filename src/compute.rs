/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle and an audio sink) and
/// returns a brand-new `GameState`.  Side effects are limited to the
/// injected RNG and the sounds handed to `audio`.

use log::{debug, info, trace};
use rand::Rng;

use crate::consts::*;
use crate::entities::{
    Bullet, Enemy, GameState, GameStatus, HeldKeys, Player, PlayerSettings, Point, Rect,
};
use crate::surface::{Audio, SoundCue};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the initial game state for a playfield of the given size.
pub fn init_state(width: i32, height: i32) -> GameState {
    let (w, h) = PLAYER_SIZE;
    GameState {
        player: Player {
            rect: Rect::new(PLAYER_START.0, PLAYER_START.1, w, h),
            settings: PlayerSettings {
                speed: PLAYER_SPEED,
                bullet_speed: BULLET_SPEED,
            },
            bullets: Vec::new(),
            img_index: 0,
            is_hit: false,
        },
        enemies: Vec::new(),
        exploding: Vec::new(),
        score: 0,
        shoot_counter: 0,
        spawn_counter: 0,
        death_counter: DEATH_FIRST,
        background_y: 0.0,
        status: GameStatus::Playing,
        tick: 0,
        width,
        height,
    }
}

/// A bullet whose bottom-center sits on `anchor`.
pub fn new_bullet(anchor: Point, speed: i32) -> Bullet {
    let (w, h) = BULLET_SIZE;
    Bullet {
        rect: Rect::new(anchor.x - w / 2, anchor.y - h, w, h),
        speed,
    }
}

/// An alive enemy with its top-left corner at `pos`.
pub fn new_enemy(pos: Point) -> Enemy {
    let (w, h) = ENEMY_SIZE;
    Enemy {
        rect: Rect::new(pos.x, pos.y, w, h),
        speed: ENEMY_SPEED,
        down_index: None,
        img_index: 0,
    }
}

// ── Player movement (clamped to the playfield) ───────────────────────────────

fn step_up(player: &mut Player) {
    player.rect.top = (player.rect.top - player.settings.speed).max(0);
}

fn step_down(player: &mut Player, height: i32) {
    let floor = height - player.rect.height;
    player.rect.top = (player.rect.top + player.settings.speed).min(floor);
}

fn step_left(player: &mut Player) {
    player.rect.left = (player.rect.left - player.settings.speed).max(0);
}

fn step_right(player: &mut Player, width: i32) {
    let wall = width - player.rect.width;
    player.rect.left = (player.rect.left + player.settings.speed).min(wall);
}

fn shoot(player: &mut Player) {
    let bullet = new_bullet(player.rect.mid_top(), player.settings.bullet_speed);
    player.bullets.push(bullet);
}

fn with_player(state: &GameState, f: impl FnOnce(&mut Player)) -> GameState {
    let mut player = state.player.clone();
    f(&mut player);
    GameState {
        player,
        ..state.clone()
    }
}

pub fn move_player_up(state: &GameState) -> GameState {
    with_player(state, step_up)
}

pub fn move_player_down(state: &GameState) -> GameState {
    with_player(state, |p| step_down(p, state.height))
}

pub fn move_player_left(state: &GameState) -> GameState {
    with_player(state, step_left)
}

pub fn move_player_right(state: &GameState) -> GameState {
    with_player(state, |p| step_right(p, state.width))
}

/// Fire a bullet from the player's nose.  No rate limit here; `tick` owns the fire timer.
pub fn player_shoot(state: &GameState) -> GameState {
    with_player(state, shoot)
}

pub fn add_player_bullet(state: &GameState, bullet: Bullet) -> GameState {
    with_player(state, |p| p.bullets.push(bullet))
}

/// Drop the player's bullet at `index`; out-of-range indices are ignored.
pub fn remove_player_bullet(state: &GameState, index: usize) -> GameState {
    with_player(state, |p| {
        if index < p.bullets.len() {
            p.bullets.remove(index);
        }
    })
}

/// Negative speeds are treated as zero so the edge clamps keep holding.
pub fn set_player_speed(state: &GameState, speed: i32) -> GameState {
    with_player(state, |p| p.settings.speed = speed.max(0))
}

/// Clear the hit latch.  Gameplay never calls this.
pub fn reset_player_hit(state: &GameState) -> GameState {
    with_player(state, |p| p.is_hit = false)
}

pub fn player_bullet_count(state: &GameState) -> usize {
    state.player.bullets.len()
}

pub fn player_position(state: &GameState) -> Point {
    state.player.rect.top_left()
}

// ── Bullet & enemy steps ─────────────────────────────────────────────────────

pub fn move_bullet(bullet: &Bullet) -> Bullet {
    let mut rect = bullet.rect;
    rect.top -= bullet.speed;
    Bullet { rect, ..bullet.clone() }
}

pub fn move_enemy(enemy: &Enemy) -> Enemy {
    let mut rect = enemy.rect;
    rect.top += enemy.speed;
    Enemy { rect, ..enemy.clone() }
}

/// Put an enemy back at `pos` without touching its explosion state.
pub fn reset_enemy(enemy: &Enemy, pos: Point) -> Enemy {
    let mut rect = enemy.rect;
    rect.left = pos.x;
    rect.top = pos.y;
    Enemy { rect, ..enemy.clone() }
}

// ── Collision tests ──────────────────────────────────────────────────────────

/// Strict rectangle overlap; touching edges do not collide.
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    a.width > 0
        && a.height > 0
        && b.width > 0
        && b.height > 0
        && a.left < b.right()
        && b.left < a.right()
        && a.top < b.bottom()
        && b.top < a.bottom()
}

/// Bounding-circle test: each rectangle is approximated by the circle
/// through its corners, centered on the rectangle center.
pub fn collide_circle(a: &Rect, b: &Rect) -> bool {
    let radius = |r: &Rect| 0.5 * f64::from(r.width).hypot(f64::from(r.height));
    let (ca, cb) = (a.center(), b.center());
    let dx = f64::from(ca.x - cb.x);
    let dy = f64::from(ca.y - cb.y);
    let reach = radius(a) + radius(b);
    dx * dx + dy * dy <= reach * reach
}

// ── Background ───────────────────────────────────────────────────────────────

/// Advance a scroll offset, wrapping to 0 once it reaches `height`.
pub fn scroll_background(offset: f32, speed: f32, height: f32) -> f32 {
    let next = offset + speed;
    if next >= height { 0.0 } else { next }
}

// ── Per-frame tick (nearly pure — RNG and audio are injected) ───────────────

/// Advance the simulation by one tick.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameState,
    keys: &HeldKeys,
    rng: &mut impl Rng,
    audio: &mut impl Audio,
) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    let mut player = state.player.clone();
    let mut status = state.status;
    let mut score = state.score;
    let mut death_counter = state.death_counter;

    // ── 1. Scroll the background ─────────────────────────────────────────────
    let background_y =
        scroll_background(state.background_y, GAME_SCROLL_SPEED, state.height as f32);

    // ── 2. Fire on the timer ─────────────────────────────────────────────────
    let mut shoot_counter = state.shoot_counter;
    if shoot_counter % FIRE_PERIOD == 0 {
        audio.play(SoundCue::Bullet);
        shoot(&mut player);
    }
    shoot_counter += 1;
    if shoot_counter >= FIRE_PERIOD {
        shoot_counter = 0;
    }

    // ── 3. Apply every held direction ────────────────────────────────────────
    if keys.up {
        step_up(&mut player);
    }
    if keys.down {
        step_down(&mut player, state.height);
    }
    if keys.left {
        step_left(&mut player);
    }
    if keys.right {
        step_right(&mut player, state.width);
    }

    // ── 4. Move bullets, drop those above the screen ─────────────────────────
    player.bullets = player
        .bullets
        .iter()
        .map(move_bullet)
        .filter(|b| b.rect.bottom() >= 0)
        .collect();

    // ── 5. Player animation / death sequence ─────────────────────────────────
    if !player.is_hit {
        player.img_index = (shoot_counter / PLAYER_TICKS_PER_FRAME) as usize;
    } else {
        player.img_index = (death_counter / PLAYER_TICKS_PER_FRAME) as usize;
        death_counter += 1;
        if death_counter > DEATH_LAST {
            info!("player destroyed at tick {}, score {}", state.tick, score);
            status = GameStatus::GameOver;
        }
    }

    // ── 6. Spawn an enemy on the timer ───────────────────────────────────────
    let mut enemies = state.enemies.clone();
    let mut spawn_counter = state.spawn_counter;
    if spawn_counter % SPAWN_PERIOD == 0 {
        let max_left = (state.width - ENEMY_SIZE.0).max(0);
        let x = rng.gen_range(0..=max_left);
        debug!("enemy spawned at x={x}");
        enemies.push(new_enemy(Point::new(x, 0)));
    }
    spawn_counter += 1;
    if spawn_counter >= SPAWN_PERIOD {
        spawn_counter = 0;
    }

    // ── 7. Move enemies; first enemy touching the player wins ────────────────
    let mut exploding = state.exploding.clone();
    let mut gone: Vec<usize> = Vec::new();
    for (i, enemy) in enemies.iter_mut().enumerate() {
        *enemy = move_enemy(enemy);
        if collide_circle(&enemy.rect, &player.rect) {
            gone.push(i);
            exploding.push(Enemy {
                down_index: Some(0),
                ..enemy.clone()
            });
            player.is_hit = true;
            audio.play(SoundCue::GameOver);
            break;
        }
        if enemy.rect.top > state.height {
            gone.push(i);
        }
    }
    let enemies: Vec<Enemy> = enemies
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !gone.contains(i))
        .map(|(_, e)| e)
        .collect();

    // ── 8. Collision: bullets ↔ enemies (all pairs) ──────────────────────────
    let mut used_bullets: Vec<usize> = Vec::new();
    let mut survivors: Vec<Enemy> = Vec::with_capacity(enemies.len());
    for enemy in enemies {
        let hits: Vec<usize> = player
            .bullets
            .iter()
            .enumerate()
            .filter(|(bi, b)| !used_bullets.contains(bi) && rects_overlap(&b.rect, &enemy.rect))
            .map(|(bi, _)| bi)
            .collect();
        if hits.is_empty() {
            survivors.push(enemy);
        } else {
            used_bullets.extend(hits);
            exploding.push(Enemy {
                down_index: Some(0),
                ..enemy
            });
        }
    }
    let enemies = survivors;
    player.bullets = player
        .bullets
        .into_iter()
        .enumerate()
        .filter(|(i, _)| !used_bullets.contains(i))
        .map(|(_, b)| b)
        .collect();

    // ── 9. Explosion animation and scoring ───────────────────────────────────
    let mut finished = 0;
    let exploding: Vec<Enemy> = exploding
        .into_iter()
        .filter_map(|mut enemy| {
            let index = enemy.down_index.unwrap_or(0);
            if index == 0 {
                audio.play(SoundCue::EnemyDown);
            }
            if index > EXPLOSION_LAST {
                finished += 1;
                return None;
            }
            enemy.img_index = (index / EXPLOSION_TICKS_PER_FRAME) as usize;
            enemy.down_index = Some(index + 1);
            Some(enemy)
        })
        .collect();
    if finished > 0 {
        score += finished * KILL_SCORE;
        debug!("{finished} enemies destroyed, score {score}");
    }

    trace!(
        "tick {}: {} bullets, {} enemies, {} exploding",
        state.tick,
        player.bullets.len(),
        enemies.len(),
        exploding.len()
    );

    GameState {
        player,
        enemies,
        exploding,
        score,
        shoot_counter,
        spawn_counter,
        death_counter,
        background_y,
        status,
        tick: state.tick + 1,
        ..state.clone()
    }
}
