use thiserror::Error;

use super::ClipValidationError;

/// Possible errors produced by the animation clip asset loader.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum AssetLoaderError {
    #[error("could not read animation clip: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse RON: {0}")]
    RonSpannedError(#[from] ron::error::SpannedError),
    #[error("animation clip is invalid: {0}")]
    InvalidClip(#[from] ClipValidationError),
}
