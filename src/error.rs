use thiserror::Error;

use crate::assets::SpriteKind;
use crate::entities::Rect;

/// Failures while loading images and sounds.  Always fatal.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Cannot load image {path}: {reason}")]
    Image { path: String, reason: String },

    #[error("Cannot load sound {path}: {reason}")]
    Sound { path: String, reason: String },

    #[error("Frame {kind:?}[{index}] at {rect:?} lies outside {sheet} ({width}x{height})")]
    FrameOutOfBounds {
        kind: SpriteKind,
        index: usize,
        rect: Rect,
        sheet: String,
        width: i32,
        height: i32,
    },
}

/// Top-level error of the game binary.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("Asset load failed: {0}")]
    Asset(#[from] AssetError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}
