use std::collections::HashMap;

use airplane_wars::assets::*;
use airplane_wars::error::AssetError;
use airplane_wars::surface::SoundCue;

/// Loader backed by an in-memory table; anything missing fails.
struct TableLoader {
    sheets: HashMap<&'static str, SheetInfo>,
    sounds: Vec<&'static str>,
    calls: Vec<String>,
}

impl TableLoader {
    fn complete() -> Self {
        let mut sheets = HashMap::new();
        sheets.insert(BACKGROUND_PATH, SheetInfo { width: 480, height: 852 });
        sheets.insert(PLANE_SHEET_PATH, SheetInfo { width: 1024, height: 1024 });
        sheets.insert(GAME_OVER_PATH, SheetInfo { width: 480, height: 800 });
        Self {
            sheets,
            sounds: vec![BULLET_SOUND_PATH, ENEMY_DOWN_SOUND_PATH, GAME_OVER_SOUND_PATH],
            calls: Vec::new(),
        }
    }
}

impl AssetLoader for TableLoader {
    fn load_sheet(&mut self, path: &str) -> Result<SheetInfo, AssetError> {
        self.calls.push(path.to_string());
        self.sheets.get(path).copied().ok_or_else(|| AssetError::Image {
            path: path.to_string(),
            reason: "missing".to_string(),
        })
    }

    fn load_sound(&mut self, path: &str) -> Result<(), AssetError> {
        self.calls.push(path.to_string());
        if self.sounds.iter().any(|s| *s == path) {
            Ok(())
        } else {
            Err(AssetError::Sound {
                path: path.to_string(),
                reason: "missing".to_string(),
            })
        }
    }
}

#[test]
fn frame_table_has_every_animation() {
    let assets = load_assets(&mut TableLoader::complete()).unwrap();
    assert_eq!(assets.frames.frame_count(SpriteKind::Player), 6);
    assert_eq!(assets.frames.frame_count(SpriteKind::Bullet), 1);
    assert_eq!(assets.frames.frame_count(SpriteKind::Enemy), 1);
    assert_eq!(assets.frames.frame_count(SpriteKind::EnemyDown), 4);
    assert_eq!(assets.frames.frame_count(SpriteKind::Background), 1);
    assert_eq!(assets.frames.frame_count(SpriteKind::GameOver), 1);
    assert!(!assets.frames.is_empty());
}

#[test]
fn empty_table_counts_are_per_kind() {
    let table = FrameTable::default();
    assert!(table.is_empty());
    assert_eq!(table.frame_count(SpriteKind::Player), 0);

    let assets = load_assets(&mut TableLoader::complete()).unwrap();
    assert_eq!(assets.frames.frame(SpriteKind::Bullet, 0).map(|f| f.index), Some(0));
    assert_eq!(assets.frames.frame_count(SpriteKind::Bullet), 1);
}

#[test]
fn frames_carry_kind_index_and_source() {
    let assets = load_assets(&mut TableLoader::complete()).unwrap();
    let bullet = assets.frames.frame(SpriteKind::Bullet, 0).unwrap();
    assert_eq!(bullet.kind, SpriteKind::Bullet);
    assert_eq!((bullet.source.width, bullet.source.height), (9, 21));

    let down = assets.frames.frame(SpriteKind::EnemyDown, 3).unwrap();
    assert_eq!(down.index, 3);
    assert_eq!((down.source.width, down.source.height), (57, 43));

    assert!(assets.frames.frame(SpriteKind::Player, 6).is_none());
}

#[test]
fn whole_image_frames_use_sheet_size() {
    let assets = load_assets(&mut TableLoader::complete()).unwrap();
    let bg = assets.frames.frame(SpriteKind::Background, 0).unwrap();
    assert_eq!(bg.source.height, 852);
}

#[test]
fn sounds_loaded_at_low_volume() {
    let assets = load_assets(&mut TableLoader::complete()).unwrap();
    for cue in [SoundCue::Bullet, SoundCue::EnemyDown, SoundCue::GameOver] {
        let sound = assets.sounds.get(cue).unwrap();
        assert!((sound.volume - 0.3).abs() < f32::EPSILON);
    }
    assert_eq!(assets.sounds.get(SoundCue::Bullet).unwrap().path, BULLET_SOUND_PATH);
}

#[test]
fn missing_background_stops_loading_immediately() {
    let mut loader = TableLoader::complete();
    loader.sheets.remove(BACKGROUND_PATH);
    let err = load_assets(&mut loader).unwrap_err();
    assert!(matches!(err, AssetError::Image { ref path, .. } if path == BACKGROUND_PATH));
    assert_eq!(loader.calls, vec![BACKGROUND_PATH.to_string()]);
}

#[test]
fn missing_sound_is_fatal() {
    let mut loader = TableLoader::complete();
    loader.sounds.retain(|p| *p != GAME_OVER_SOUND_PATH);
    let err = load_assets(&mut loader).unwrap_err();
    assert!(matches!(err, AssetError::Sound { ref path, .. } if path == GAME_OVER_SOUND_PATH));
}

#[test]
fn undersized_sheet_is_rejected() {
    let mut loader = TableLoader::complete();
    loader
        .sheets
        .insert(PLANE_SHEET_PATH, SheetInfo { width: 512, height: 512 });
    let err = load_assets(&mut loader).unwrap_err();
    match err {
        AssetError::FrameOutOfBounds { kind, index, .. } => {
            assert_eq!(kind, SpriteKind::Player);
            assert_eq!(index, 3); // (330, 624) starts below 512
        }
        other => panic!("unexpected error: {other}"),
    }
}
