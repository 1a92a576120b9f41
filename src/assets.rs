//! Sprite silhouettes and audio handles
//!
//! The core only needs shape metadata (collision masks) and opaque audio
//! handles. Everything is fetched once at startup; a missing asset is fatal.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::sim::{CollisionMask, SpriteSet};

/// Sprite silhouettes the simulation needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    PlayerRun,
    PlayerDuck,
    Cactus,
    Bird,
}

impl SpriteId {
    pub const ALL: [SpriteId; 4] = [
        SpriteId::PlayerRun,
        SpriteId::PlayerDuck,
        SpriteId::Cactus,
        SpriteId::Bird,
    ];
}

/// Audio tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AudioId {
    BackgroundMusic,
}

/// Opaque reference to an audio resource; only the audio backend interprets `source`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioHandle {
    pub id: AudioId,
    pub source: String,
}

/// Supplies sprite shapes and audio handles
pub trait AssetProvider {
    fn sprite(&self, id: SpriteId) -> Option<CollisionMask>;
    fn audio(&self, id: AudioId) -> Option<AudioHandle>;
}

/// Validated asset bundle for a game
#[derive(Debug, Clone)]
pub struct Assets {
    pub sprites: SpriteSet,
    pub music: AudioHandle,
}

impl Assets {
    /// Fetch every asset up front, failing on the first one missing
    pub fn load(provider: &dyn AssetProvider) -> Result<Self> {
        let sprite = |id: SpriteId| -> Result<Arc<CollisionMask>> {
            let mask = provider.sprite(id).ok_or(GameError::MissingSprite(id))?;
            if mask.count() == 0 {
                return Err(GameError::EmptySprite(id));
            }
            log::debug!("Loaded sprite {:?} ({}x{})", id, mask.width(), mask.height());
            Ok(Arc::new(mask))
        };

        let sprites = SpriteSet {
            player_run: sprite(SpriteId::PlayerRun)?,
            player_duck: sprite(SpriteId::PlayerDuck)?,
            cactus: sprite(SpriteId::Cactus)?,
            bird: sprite(SpriteId::Bird)?,
        };
        let music = provider
            .audio(AudioId::BackgroundMusic)
            .ok_or(GameError::MissingAudio(AudioId::BackgroundMusic))?;

        log::info!("Loaded {} sprites and background music", SpriteId::ALL.len());
        Ok(Self { sprites, music })
    }
}

const PLAYER_RUN_ART: &str = "
    ......#####
    .....##.###
    .....######
    .....###...
    #...#####..
    ##.######..
    ##########.
    .########..
    ..######...
    ...##.##...
    ...#...#...
    ...##..##..
";

const PLAYER_DUCK_ART: &str = "
    ..........#####
    #.......###.###
    ###############
    .#############.
    ..###########..
    ...##.....##...
    ...##.....##...
";

const CACTUS_ART: &str = "
    ..##..
    ..##..
    ..##.#
    #.##.#
    #.##.#
    #.####
    ####..
    ..##..
    ..##..
    ..##..
    ..##..
    ..##..
";

const BIRD_ART: &str = "
    ...#........
    ...##.......
    ...###......
    .#####......
    ######......
    ...#########
    ....#######.
    .....####...
    .....##.....
    .....#......
";

/// Pixel size of one art cell
pub const DEFAULT_ART_SCALE: u32 = 4;

/// Silhouettes compiled into the binary, so the game runs without image files
#[derive(Debug, Clone)]
pub struct BuiltinAssets {
    scale: u32,
    music_source: String,
}

impl Default for BuiltinAssets {
    fn default() -> Self {
        Self {
            scale: DEFAULT_ART_SCALE,
            music_source: "builtin:background-loop".to_string(),
        }
    }
}

impl BuiltinAssets {
    pub fn with_scale(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            ..Default::default()
        }
    }
}

impl AssetProvider for BuiltinAssets {
    fn sprite(&self, id: SpriteId) -> Option<CollisionMask> {
        let art = match id {
            SpriteId::PlayerRun => PLAYER_RUN_ART,
            SpriteId::PlayerDuck => PLAYER_DUCK_ART,
            SpriteId::Cactus => CACTUS_ART,
            SpriteId::Bird => BIRD_ART,
        };
        Some(CollisionMask::from_ascii(art).scaled(self.scale))
    }

    fn audio(&self, id: AudioId) -> Option<AudioHandle> {
        Some(AudioHandle {
            id,
            source: self.music_source.clone(),
        })
    }
}
