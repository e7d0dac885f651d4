/// Sprite frame table and sound bank.
///
/// Every animation frame is an immutable source rectangle inside a named
/// sheet, looked up by `(SpriteKind, index)`.  Loading goes through an
/// `AssetLoader` so the front end decides what "an image" is; any failure is
/// fatal and reported before the game loop starts.

use std::collections::HashMap;

use log::{debug, info};

use crate::consts::SOUND_VOLUME;
use crate::entities::Rect;
use crate::error::AssetError;
use crate::surface::SoundCue;

pub const BACKGROUND_PATH: &str = "resources/image/background.png";
pub const PLANE_SHEET_PATH: &str = "resources/image/shoot.png";
pub const GAME_OVER_PATH: &str = "resources/image/gameover.png";
pub const BULLET_SOUND_PATH: &str = "resources/sound/bullet.wav";
pub const ENEMY_DOWN_SOUND_PATH: &str = "resources/sound/enemy1_down.wav";
pub const GAME_OVER_SOUND_PATH: &str = "resources/sound/game_over.wav";

// ── Plane sheet layout ────────────────────────────────────────────────────────

/// Frames 0-1: flying (muzzle flash cycle).  Frames 2-5: death animation.
const PLAYER_FRAMES: [Rect; 6] = [
    Rect::new(0, 99, 102, 126),
    Rect::new(165, 360, 102, 126),
    Rect::new(165, 234, 102, 126),
    Rect::new(330, 624, 102, 126),
    Rect::new(330, 498, 102, 126),
    Rect::new(432, 624, 102, 126),
];
const BULLET_FRAME: Rect = Rect::new(1004, 987, 9, 21);
const ENEMY_FRAME: Rect = Rect::new(534, 612, 57, 43);
const ENEMY_DOWN_FRAMES: [Rect; 4] = [
    Rect::new(267, 347, 57, 43),
    Rect::new(873, 697, 57, 43),
    Rect::new(267, 296, 57, 43),
    Rect::new(930, 697, 57, 43),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    Background,
    Player,
    Bullet,
    Enemy,
    EnemyDown,
    GameOver,
}

/// One animation frame: which sprite it belongs to and where it lives in its sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Frame {
    pub kind: SpriteKind,
    pub index: usize,
    pub source: Rect,
}

/// Pixel dimensions reported by the loader for an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SheetInfo {
    pub width: i32,
    pub height: i32,
}

/// Front-end specific access to images and sounds.
pub trait AssetLoader {
    fn load_sheet(&mut self, path: &str) -> Result<SheetInfo, AssetError>;
    fn load_sound(&mut self, path: &str) -> Result<(), AssetError>;
}

// ── Frame table ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct FrameTable {
    frames: HashMap<SpriteKind, Vec<Frame>>,
}

impl FrameTable {
    pub fn frame(&self, kind: SpriteKind, index: usize) -> Option<&Frame> {
        self.frames.get(&kind).and_then(|frames| frames.get(index))
    }

    /// Number of frames registered for `kind`.
    pub fn frame_count(&self, kind: SpriteKind) -> usize {
        self.frames.get(&kind).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.frames.values().all(Vec::is_empty)
    }

    /// Register `rects` as the frames of `kind`, checking each lies inside the sheet.
    fn insert(
        &mut self,
        kind: SpriteKind,
        rects: &[Rect],
        sheet: &str,
        info: SheetInfo,
    ) -> Result<(), AssetError> {
        let mut frames = Vec::with_capacity(rects.len());
        for (index, rect) in rects.iter().enumerate() {
            let inside = rect.left >= 0
                && rect.top >= 0
                && rect.right() <= info.width
                && rect.bottom() <= info.height;
            if !inside {
                return Err(AssetError::FrameOutOfBounds {
                    kind,
                    index,
                    rect: *rect,
                    sheet: sheet.to_string(),
                    width: info.width,
                    height: info.height,
                });
            }
            frames.push(Frame { kind, index, source: *rect });
        }
        self.frames.insert(kind, frames);
        Ok(())
    }
}

// ── Sounds ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Sound {
    pub path: &'static str,
    pub volume: f32,
}

#[derive(Clone, Debug, Default)]
pub struct SoundBank {
    sounds: HashMap<SoundCue, Sound>,
}

impl SoundBank {
    pub fn get(&self, cue: SoundCue) -> Option<&Sound> {
        self.sounds.get(&cue)
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Assets {
    pub frames: FrameTable,
    pub sounds: SoundBank,
}

fn whole(info: SheetInfo) -> Rect {
    Rect::new(0, 0, info.width, info.height)
}

/// Load every image and sound the game needs, in startup order.
pub fn load_assets(loader: &mut impl AssetLoader) -> Result<Assets, AssetError> {
    let mut assets = Assets::default();

    let background = loader.load_sheet(BACKGROUND_PATH)?;
    assets
        .frames
        .insert(SpriteKind::Background, &[whole(background)], BACKGROUND_PATH, background)?;

    let plane = loader.load_sheet(PLANE_SHEET_PATH)?;
    assets.frames.insert(SpriteKind::Player, &PLAYER_FRAMES, PLANE_SHEET_PATH, plane)?;
    assets.frames.insert(SpriteKind::Bullet, &[BULLET_FRAME], PLANE_SHEET_PATH, plane)?;
    assets.frames.insert(SpriteKind::Enemy, &[ENEMY_FRAME], PLANE_SHEET_PATH, plane)?;
    assets
        .frames
        .insert(SpriteKind::EnemyDown, &ENEMY_DOWN_FRAMES, PLANE_SHEET_PATH, plane)?;

    let sounds = [
        (SoundCue::Bullet, BULLET_SOUND_PATH),
        (SoundCue::EnemyDown, ENEMY_DOWN_SOUND_PATH),
    ];
    for (cue, path) in sounds {
        loader.load_sound(path)?;
        assets.sounds.sounds.insert(cue, Sound { path, volume: SOUND_VOLUME });
    }

    let game_over = loader.load_sheet(GAME_OVER_PATH)?;
    assets
        .frames
        .insert(SpriteKind::GameOver, &[whole(game_over)], GAME_OVER_PATH, game_over)?;
    loader.load_sound(GAME_OVER_SOUND_PATH)?;
    assets.sounds.sounds.insert(
        SoundCue::GameOver,
        Sound { path: GAME_OVER_SOUND_PATH, volume: SOUND_VOLUME },
    );

    debug!("background sheet {}x{}", background.width, background.height);
    info!("assets loaded");
    Ok(assets)
}
