//! Airplane Wars: a single-screen vertical shoot-em-up.
//!
//! - `entities`: plain game data
//! - `compute`: per-tick simulation (pure functions, injected RNG and audio)
//! - `controller`: menu, play and game-over frames over the collaborator traits
//! - `render`: draw passes in playfield pixel space
//! - `assets`: sprite frame table and sound bank
//! - `surface`: render, audio and input collaborator traits
//! - `clock`: fixed-timestep simulation clock

pub mod assets;
pub mod clock;
pub mod compute;
pub mod controller;
pub mod entities;
pub mod error;
pub mod render;
pub mod surface;

/// Compiled-in game constants.
pub mod consts {
    use std::time::Duration;

    pub const SCREEN_WIDTH: i32 = 480;
    pub const SCREEN_HEIGHT: i32 = 800;

    /// Simulation rate in ticks per second.
    pub const TICK_RATE: u32 = 45;
    pub const TICK: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);
    /// Most ticks simulated for a single rendered frame before the clock drops time.
    pub const MAX_CATCHUP_TICKS: u32 = 5;

    /// Ticks between two automatic shots.
    pub const FIRE_PERIOD: u32 = 15;
    /// Ticks between two enemy spawns.
    pub const SPAWN_PERIOD: u32 = 100;
    pub const KILL_SCORE: u32 = 1000;

    pub const PLAYER_START: (i32, i32) = (200, 600);
    pub const PLAYER_SIZE: (i32, i32) = (102, 126);
    pub const PLAYER_SPEED: i32 = 8;
    pub const BULLET_SIZE: (i32, i32) = (9, 21);
    pub const BULLET_SPEED: i32 = 10;
    pub const ENEMY_SIZE: (i32, i32) = (57, 43);
    pub const ENEMY_SPEED: i32 = 2;

    /// Counter ticks per displayed player frame.
    pub const PLAYER_TICKS_PER_FRAME: u32 = 8;
    /// Death animation counter range; frames 2..=5 of the player sheet.
    pub const DEATH_FIRST: u32 = 16;
    pub const DEATH_LAST: u32 = 47;

    pub const EXPLOSION_TICKS_PER_FRAME: u32 = 2;
    /// Last explosion counter value that is still displayed.
    pub const EXPLOSION_LAST: u32 = 7;

    pub const GAME_SCROLL_SPEED: f32 = 0.5;
    pub const MENU_SCROLL_SPEED: f32 = 2.0;
    pub const SOUND_VOLUME: f32 = 0.3;
}
