use super::{CatSpawner, Click, Composite, Frame, GameState, NodeKind, sealed};
use crate::audio::AudioSink;
use crate::config::GameConfig;
use crate::content::{ImageKey, Track};
use crate::draw::{Sprite, Surface};
use crate::error::GameError;
use crate::geometry::Point;

/// The playfield: background plus the cat spawner.
pub struct GameScreen {
    children: Composite,
    bounds: Point,
    music_volume: f64,
    dead: bool,
}

impl GameScreen {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        let bounds = config.bounds();
        let mut children = Composite::new();
        children.add_child(NodeKind::Background(Sprite::new(
            ImageKey::Background,
            Point::ZERO,
            bounds,
        )));
        children.add_child(NodeKind::Spawner(Box::new(CatSpawner::new(config)?)));
        Ok(Self {
            children,
            bounds,
            music_volume: config.music_volume,
            dead: false,
        })
    }

    pub fn spawner(&self) -> Option<&CatSpawner> {
        self.children.iter().find_map(|n| match n.kind() {
            NodeKind::Spawner(s) => Some(s.as_ref()),
            _ => None,
        })
    }

    pub fn spawner_mut(&mut self) -> Option<&mut CatSpawner> {
        self.children.iter_mut().find_map(|n| match n.kind_mut() {
            NodeKind::Spawner(s) => Some(s.as_mut()),
            _ => None,
        })
    }

    fn play_ambience(&self, audio: &mut dyn AudioSink) -> Result<(), GameError> {
        audio.set_music_volume(self.music_volume)?;
        audio.play_music(Track::Ambience, true);
        Ok(())
    }
}

impl sealed::Sealed for GameScreen {}

impl GameState for GameScreen {
    fn update(&mut self, frame: &mut Frame<'_>) {
        self.children.update(frame);
    }

    fn draw(&self, surface: &mut dyn Surface) {
        surface.clear(self.bounds);
        self.children.draw(surface);
    }

    fn on_mouse_down(&mut self, click: &mut Click<'_>) -> Result<(), GameError> {
        let first = match self.spawner_mut() {
            Some(spawner) => spawner.on_click(click),
            None => return Ok(()),
        };
        if first {
            self.play_ambience(click.audio)?;
        }
        Ok(())
    }

    fn close(&mut self) {
        self.dead = true;
    }

    fn is_dead(&self) -> bool {
        self.dead
    }
}
