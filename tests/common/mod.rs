// Native stand-ins for the browser seams, shared by the integration tests.
#![allow(dead_code)]

use cat_toy::audio::AudioSink;
use cat_toy::content::{ImageHandle, ImageKey, ImageSource, SoundEffect, Track};
use cat_toy::draw::{Surface, TextStyle};
use cat_toy::{Circle, GameError, Point, Rect, Triangle};

/// Every image reports the same size unless overridden.
#[derive(Clone, Debug, Default)]
pub struct StaticImages {
    sizes: Vec<(ImageKey, Point)>,
}

impl StaticImages {
    pub fn uniform(size: Point) -> Self {
        Self {
            sizes: ImageKey::ALL.iter().map(|&k| (k, size)).collect(),
        }
    }

    pub fn with(mut self, key: ImageKey, size: Point) -> Self {
        self.sizes.retain(|(k, _)| *k != key);
        self.sizes.push((key, size));
        self
    }
}

impl ImageSource for StaticImages {
    fn image(&self, key: ImageKey) -> ImageHandle {
        let size = self
            .sizes
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, s)| *s)
            .unwrap_or_default();
        ImageHandle { key, size }
    }
}

#[derive(Default)]
pub struct RecordingAudio {
    pub music_volume: Option<f64>,
    pub music: Vec<(Track, bool)>,
    pub effects: Vec<SoundEffect>,
}

impl AudioSink for RecordingAudio {
    fn set_music_volume(&mut self, volume: f64) -> Result<(), GameError> {
        self.music_volume = Some(volume);
        Ok(())
    }
    fn play_music(&mut self, track: Track, looped: bool) {
        self.music.push((track, looped));
    }
    fn play_effect(&mut self, effect: SoundEffect) {
        self.effects.push(effect);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(Point),
    Rect(Rect, String),
    Triangle(Triangle, String),
    Circle(Circle, String),
    Image(ImageKey, Rect),
    Text(String, Point, TextStyle),
}

/// Text is measured at 8px per character.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn images(&self) -> impl Iterator<Item = (ImageKey, Rect)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Image(k, r) => Some((*k, *r)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, size: Point) {
        self.calls.push(DrawCall::Clear(size));
    }
    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.calls.push(DrawCall::Rect(rect, color.to_string()));
    }
    fn fill_triangle(&mut self, triangle: Triangle, color: &str) {
        self.calls.push(DrawCall::Triangle(triangle, color.to_string()));
    }
    fn fill_circle(&mut self, circle: Circle, color: &str) {
        self.calls.push(DrawCall::Circle(circle, color.to_string()));
    }
    fn draw_image(&mut self, image: ImageKey, at: Rect) {
        self.calls.push(DrawCall::Image(image, at));
    }
    fn measure_text(&mut self, _font: &str, text: &str) -> f64 {
        text.chars().count() as f64 * 8.0
    }
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.calls.push(DrawCall::Text(text.to_string(), at, style.clone()));
    }
}
