//! Drawing and audio sinks

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::assets::AudioHandle;
use crate::sim::EntityView;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0);
    pub const WHITE: Color = Color(255, 255, 255);
    pub const RED: Color = Color(255, 0, 0);
    pub const GREEN: Color = Color(0, 255, 0);
    /// Play-field background
    pub const SKY: Color = Color(247, 247, 247);
}

/// Draws a frame. Nothing flows back into the simulation.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw(&mut self, entity: &EntityView<'_>);
    /// Draw `text` with its top edge centred on `pos`
    fn draw_text(&mut self, text: &str, size: u32, color: Color, pos: Vec2);
    fn present(&mut self);
}

/// Plays music tracks
pub trait AudioOut {
    fn play_music(&mut self, track: &AudioHandle, volume: f32, looped: bool);
    fn stop_music(&mut self);
}

/// Audio backend for headless runs; logs instead of playing
#[derive(Debug, Default)]
pub struct SilentAudio {
    playing: Option<AudioHandle>,
}

impl SilentAudio {
    pub fn playing(&self) -> Option<&AudioHandle> {
        self.playing.as_ref()
    }
}

impl AudioOut for SilentAudio {
    fn play_music(&mut self, track: &AudioHandle, volume: f32, looped: bool) {
        log::debug!(
            "Music {:?} from {} (volume {:.2}, looped: {})",
            track.id,
            track.source,
            volume,
            looped
        );
        self.playing = Some(track.clone());
    }

    fn stop_music(&mut self) {
        self.playing = None;
    }
}
