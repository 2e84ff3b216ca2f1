use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::assets::SpriteId;

/// Startup failures while loading the sprite manifest. All of them are fatal.
#[derive(Debug)]
pub enum AssetError {
    Io { path: PathBuf, source: io::Error },
    Parse(serde_json::Error),
    MissingSprite(SpriteId),
    EmptyGlyph(SpriteId),
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read asset manifest {}: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "malformed asset manifest: {err}"),
            Self::MissingSprite(id) => write!(f, "asset manifest has no entry for sprite `{id}`"),
            Self::EmptyGlyph(id) => write!(f, "sprite `{id}` has an empty glyph"),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for AssetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}
