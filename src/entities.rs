/// All game entity types — pure data, no logic.

// ── Geometry ──────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in playfield pixels (top-left origin, y down).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub const fn center(&self) -> Point {
        Point::new(self.left + self.width / 2, self.top + self.height / 2)
    }

    pub const fn mid_top(&self) -> Point {
        Point::new(self.left + self.width / 2, self.top)
    }
}

// ── Status ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
}

/// Directional keys held during the current frame (levels, not edges).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub rect: Rect,
    /// Pixels travelled upward per tick.
    pub speed: i32,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

/// Tunable player parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSettings {
    pub speed: i32,
    pub bullet_speed: i32,
}

#[derive(Clone, Debug)]
pub struct Player {
    pub rect: Rect,
    pub settings: PlayerSettings,
    /// Bullets fired by this player that are still on screen.
    pub bullets: Vec<Bullet>,
    /// Index into the player frame table.
    pub img_index: usize,
    /// One-way latch set by the first enemy collision.
    pub is_hit: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub rect: Rect,
    /// Pixels travelled downward per tick.
    pub speed: i32,
    /// Explosion counter; `None` while the enemy is alive.
    pub down_index: Option<u32>,
    /// Explosion frame to display.
    pub img_index: usize,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    /// Enemies still flying.
    pub enemies: Vec<Enemy>,
    /// Enemies playing their destruction animation.
    pub exploding: Vec<Enemy>,
    pub score: u32,
    /// Cyclic fire counter, `0..FIRE_PERIOD`.
    pub shoot_counter: u32,
    /// Cyclic spawn counter, `0..SPAWN_PERIOD`.
    pub spawn_counter: u32,
    /// Death animation counter, starts at `DEATH_FIRST`.
    pub death_counter: u32,
    /// Vertical background scroll offset in pixels.
    pub background_y: f32,
    pub status: GameStatus,
    pub tick: u64,
    pub width: i32,
    pub height: i32,
}
