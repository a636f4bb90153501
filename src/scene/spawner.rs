use std::collections::VecDeque;

use super::{Cat, CatKind, Click, Composite, Frame, Node, NodeKind};
use crate::config::GameConfig;
use crate::content::SoundEffect;
use crate::draw::{Label, Surface};
use crate::error::GameError;
use crate::geometry::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnerPhase {
    /// Prompt visible, ambience not started.
    AwaitingFirstInput,
    Spawning,
}

/// Turns clicks into cats and owns them for their whole life. Live cats are
/// kept in spawn order; once `max_cats` is reached the oldest is evicted.
pub struct CatSpawner {
    phase: SpawnerPhase,
    max_cats: usize,
    cats: VecDeque<Cat>,
    hud: Composite,
}

impl CatSpawner {
    pub fn new(config: &GameConfig) -> Result<Self, GameError> {
        config.validate()?;
        let bounds = config.bounds();
        let prompt = Label::new(
            config.prompt_text.as_str(),
            Point::new(bounds.x / 2.0, bounds.y / 2.0),
            "Arial",
            20.0,
            "white",
        )?
        .aligned("center", "middle")
        .with_background("rgba(0, 0, 0, 0)");

        let mut hud = Composite::new();
        hud.add_child(NodeKind::Label(prompt));
        Ok(Self {
            phase: SpawnerPhase::AwaitingFirstInput,
            max_cats: config.max_cats,
            cats: VecDeque::with_capacity(config.max_cats),
            hud,
        })
    }

    pub fn phase(&self) -> SpawnerPhase {
        self.phase
    }

    pub fn cats(&self) -> &VecDeque<Cat> {
        &self.cats
    }

    pub fn cats_mut(&mut self) -> &mut VecDeque<Cat> {
        &mut self.cats
    }

    pub fn max_cats(&self) -> usize {
        self.max_cats
    }

    /// True while the "click to make cat" prompt is still in the tree.
    pub fn prompt_visible(&self) -> bool {
        self.hud
            .iter()
            .any(|n| matches!(n.kind(), NodeKind::Label(_)) && !n.is_dead())
    }

    /// Handle a mouse-down. Returns `true` only for the click that leaves
    /// `AwaitingFirstInput`, so the caller can start the ambience exactly once.
    pub fn on_click(&mut self, click: &mut Click<'_>) -> bool {
        let first = self.phase == SpawnerPhase::AwaitingFirstInput;
        if first {
            self.phase = SpawnerPhase::Spawning;
            self.hud.iter_mut().for_each(Node::kill);
            log::info!("first click, spawning enabled");
        }
        let kind = CatKind::random(click.dice);
        self.spawn(kind, click);
        first
    }

    /// Add one cat of `kind` at the click position, evicting the oldest at capacity.
    /// Returns the evicted cat, if any.
    pub fn spawn(&mut self, kind: CatKind, click: &mut Click<'_>) -> Option<Cat> {
        let evicted = if self.cats.len() >= self.max_cats {
            self.cats.pop_front()
        } else {
            None
        };
        if evicted.is_some() {
            log::debug!("cat cap {} reached, evicted oldest", self.max_cats);
        }
        let image = click.images.image(kind.image());
        self.cats.push_back(Cat::new(click.position, image, Point::ZERO));
        click.audio.play_effect(SoundEffect::Nyaa);
        log::debug!("spawned {:?} cat at ({}, {}), {} live", kind, click.position.x, click.position.y, self.cats.len());
        evicted
    }

    /// Step every cat in spawn order. Each cat sees earlier cats at their
    /// already-updated positions.
    pub fn update(&mut self, frame: &mut Frame<'_>) {
        self.hud.update(frame);
        let canvas = frame.bounds;
        for i in 0..self.cats.len() {
            self.cats[i].apply_gravity(canvas);
            let rect = self.cats[i].bounds();
            let overlaps = self
                .cats
                .iter()
                .enumerate()
                .filter(|(j, other)| *j != i && rect.intersects(&other.bounds()))
                .count();
            let cat = &mut self.cats[i];
            cat.collide_with_cats(overlaps, frame.dice);
            cat.collide_with_boundaries(canvas);
            cat.advance();
            cat.round_position();
            cat.apply_damping();
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.hud.draw(surface);
        for cat in &self.cats {
            cat.draw(surface);
        }
    }
}
