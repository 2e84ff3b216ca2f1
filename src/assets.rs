/// Sprite identifiers and the manifest that maps them to terminal glyphs.
///
/// The game core only ever talks about `SpriteId`s. The manifest is JSON:
///
/// ```json
/// { "sprites": { "player-right": { "glyph": "=>", "tint": "yellow" } } }
/// ```
///
/// Every id must be present; a partial manifest is rejected at startup.
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AssetError;

const BUILTIN_MANIFEST: &str = include_str!("../assets/sprites.json");

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpriteId {
    PlayerRight,
    PlayerUpRight,
    PlayerUp,
    PlayerUpLeft,
    PlayerLeft,
    PlayerDownLeft,
    PlayerDown,
    PlayerDownRight,
    PlayerHappy,
    PlayerHit,
    Beam,
    Beam1,
    Beam2,
    Alien1,
    Alien2,
    Alien3,
    Boss,
    Bomb,
    Pickup,
    Explosion,
    ExplosionFlipped,
    Background,
    BackgroundFlipped,
    LifeIcon,
}

impl SpriteId {
    pub const ALL: [SpriteId; 24] = [
        SpriteId::PlayerRight,
        SpriteId::PlayerUpRight,
        SpriteId::PlayerUp,
        SpriteId::PlayerUpLeft,
        SpriteId::PlayerLeft,
        SpriteId::PlayerDownLeft,
        SpriteId::PlayerDown,
        SpriteId::PlayerDownRight,
        SpriteId::PlayerHappy,
        SpriteId::PlayerHit,
        SpriteId::Beam,
        SpriteId::Beam1,
        SpriteId::Beam2,
        SpriteId::Alien1,
        SpriteId::Alien2,
        SpriteId::Alien3,
        SpriteId::Boss,
        SpriteId::Bomb,
        SpriteId::Pickup,
        SpriteId::Explosion,
        SpriteId::ExplosionFlipped,
        SpriteId::Background,
        SpriteId::BackgroundFlipped,
        SpriteId::LifeIcon,
    ];

    /// Manifest key for this sprite.
    pub fn name(&self) -> &'static str {
        match self {
            SpriteId::PlayerRight => "player-right",
            SpriteId::PlayerUpRight => "player-up-right",
            SpriteId::PlayerUp => "player-up",
            SpriteId::PlayerUpLeft => "player-up-left",
            SpriteId::PlayerLeft => "player-left",
            SpriteId::PlayerDownLeft => "player-down-left",
            SpriteId::PlayerDown => "player-down",
            SpriteId::PlayerDownRight => "player-down-right",
            SpriteId::PlayerHappy => "player-happy",
            SpriteId::PlayerHit => "player-hit",
            SpriteId::Beam => "beam",
            SpriteId::Beam1 => "beam1",
            SpriteId::Beam2 => "beam2",
            SpriteId::Alien1 => "alien1",
            SpriteId::Alien2 => "alien2",
            SpriteId::Alien3 => "alien3",
            SpriteId::Boss => "boss",
            SpriteId::Bomb => "bomb",
            SpriteId::Pickup => "pickup",
            SpriteId::Explosion => "explosion",
            SpriteId::ExplosionFlipped => "explosion-flipped",
            SpriteId::Background => "background",
            SpriteId::BackgroundFlipped => "background-flipped",
            SpriteId::LifeIcon => "life-icon",
        }
    }
}

impl fmt::Display for SpriteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Renderer-neutral colour names.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tint {
    White,
    Grey,
    DarkGrey,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Glyph {
    pub glyph: String,
    pub tint: Tint,
}

#[derive(Debug, Deserialize)]
struct RawManifest {
    sprites: HashMap<SpriteId, Glyph>,
}

#[derive(Clone, Debug)]
pub struct AssetManifest {
    sprites: HashMap<SpriteId, Glyph>,
}

impl AssetManifest {
    /// The manifest compiled into the binary.
    pub fn builtin() -> Result<Self, AssetError> {
        Self::parse(BUILTIN_MANIFEST)
    }

    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let text = fs::read_to_string(path).map_err(|source| AssetError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, AssetError> {
        let raw: RawManifest = serde_json::from_str(text)?;
        for id in SpriteId::ALL {
            match raw.sprites.get(&id) {
                None => return Err(AssetError::MissingSprite(id)),
                Some(g) if g.glyph.is_empty() => return Err(AssetError::EmptyGlyph(id)),
                Some(_) => {}
            }
        }
        tracing::debug!(sprites = raw.sprites.len(), "asset manifest validated");
        Ok(AssetManifest {
            sprites: raw.sprites,
        })
    }

    pub fn glyph(&self, id: SpriteId) -> Option<&Glyph> {
        self.sprites.get(&id)
    }
}
