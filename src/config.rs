//! Runtime knobs for the toy. Defaults reproduce the shipped game; with the
//! `serde_json` feature a host page can override them at startup.

use crate::error::GameError;
use crate::geometry::Point;

/// Upper bound accepted for `max_cats`. Every live cat is checked against
/// every other one per frame, so the cap has to stay small.
pub const MAX_CATS_LIMIT: usize = 10_000;

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// DOM id of the target canvas.
    pub canvas_id: String,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Live cats beyond this evict the oldest.
    pub max_cats: usize,
    pub music_volume: f64,
    pub sfx_volume: f64,
    pub credits_path: String,
    pub prompt_text: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            canvas_id: "canvas".to_string(),
            canvas_width: 320,
            canvas_height: 240,
            max_cats: 99,
            music_volume: 0.5,
            sfx_volume: 1.0,
            credits_path: "./CREDITS.txt".to_string(),
            prompt_text: "click to make cat".to_string(),
        }
    }
}

impl GameConfig {
    pub fn bounds(&self) -> Point {
        Point::new(self.canvas_width as f64, self.canvas_height as f64)
    }

    /// Reject values the runtime cannot honour.
    pub fn validate(&self) -> Result<(), GameError> {
        if !(1..=MAX_CATS_LIMIT).contains(&self.max_cats) {
            return Err(GameError::InvalidCatLimit {
                value: self.max_cats,
                limit: MAX_CATS_LIMIT,
            });
        }
        Ok(())
    }

    #[cfg(feature = "serde_json")]
    pub fn from_json(json: &str) -> Result<Self, GameError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
