//! Scene graph: a closed set of node variants composed into trees, and the
//! stack of game states the frame loop drives.
//!
//! Only the state at index 0 of a [`StateStack`] is updated and drawn. A node
//! or state flagged dead is dropped at the start of its owner's next update,
//! never during draw.

use crate::audio::AudioSink;
use crate::content::ImageSource;
use crate::dice::Dice;
use crate::draw::{Label, Shape, Sprite, Surface};
use crate::error::GameError;
use crate::geometry::Point;
use crate::input::Input;

mod cat;
mod screen;
mod spawner;

pub use cat::{Cat, CatKind};
pub use screen::GameScreen;
pub use spawner::{CatSpawner, SpawnerPhase};

/// Per-frame context handed down the tree during update.
pub struct Frame<'a> {
    /// Canvas width / height in pixels.
    pub bounds: Point,
    pub input: &'a Input,
    pub dice: &'a mut Dice,
}

/// A mouse-down already mapped into canvas space, plus the services a click may use.
pub struct Click<'a> {
    pub position: Point,
    pub dice: &'a mut Dice,
    pub audio: &'a mut dyn AudioSink,
    pub images: &'a dyn ImageSource,
}

pub enum NodeKind {
    Background(Sprite),
    Sprite(Sprite),
    Label(Label),
    Shape(Shape),
    Spawner(Box<CatSpawner>),
}

/// Tree element: one of the known variants plus its dead flag.
pub struct Node {
    kind: NodeKind,
    dead: bool,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self { kind, dead: false }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn kind_mut(&mut self) -> &mut NodeKind {
        &mut self.kind
    }

    /// Flag for removal on the owner's next update.
    pub fn kill(&mut self) {
        self.dead = true;
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) {
        if let NodeKind::Spawner(spawner) = &mut self.kind {
            spawner.update(frame);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match &self.kind {
            NodeKind::Background(sprite) | NodeKind::Sprite(sprite) => sprite.draw(surface),
            NodeKind::Label(label) => label.draw(surface),
            NodeKind::Shape(shape) => shape.draw(surface),
            NodeKind::Spawner(spawner) => spawner.draw(surface),
        }
    }
}

impl From<NodeKind> for Node {
    fn from(kind: NodeKind) -> Self {
        Node::new(kind)
    }
}

/// Ordered child list with dead-child eviction.
#[derive(Default)]
pub struct Composite {
    children: Vec<Node>,
}

impl Composite {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_child(&mut self, node: impl Into<Node>) {
        self.children.push(node.into());
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Node> {
        self.children.iter_mut()
    }

    pub fn remove_dead(&mut self) {
        self.children.retain(|c| !c.is_dead());
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) {
        self.remove_dead();
        for child in &mut self.children {
            child.update(frame);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        for child in &self.children {
            child.draw(surface);
        }
    }
}

mod sealed {
    pub trait Sealed {}
}

/// A full-screen mode of the game. Sealed: only this crate defines states.
pub trait GameState: sealed::Sealed {
    fn update(&mut self, frame: &mut Frame<'_>);
    fn draw(&self, surface: &mut dyn Surface);
    fn on_mouse_down(&mut self, _click: &mut Click<'_>) -> Result<(), GameError> {
        Ok(())
    }
    /// Mark this state for removal at the next stack update.
    fn close(&mut self);
    fn is_dead(&self) -> bool;
}

/// States in priority order; index 0 is the active one.
#[derive(Default)]
pub struct StateStack {
    states: Vec<Box<dyn GameState>>,
}

impl StateStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: Box<dyn GameState>) {
        self.states.push(state);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn top_mut(&mut self) -> Option<&mut (dyn GameState + 'static)> {
        self.states.first_mut().map(|s| s.as_mut())
    }

    pub fn update(&mut self, frame: &mut Frame<'_>) {
        self.states.retain(|s| !s.is_dead());
        if let Some(top) = self.states.first_mut() {
            top.update(frame);
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(top) = self.states.first() {
            top.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageKey;
    use crate::draw::{DrawCall, RecordingSurface};
    use crate::geometry::{Circle, Rect};

    fn sprite(key: ImageKey) -> Node {
        NodeKind::Sprite(Sprite::new(key, Point::ZERO, Point::new(4.0, 4.0))).into()
    }

    #[test]
    fn update_removes_dead_children_in_stable_order() {
        let mut tree = Composite::new();
        tree.add_child(sprite(ImageKey::Cat));
        tree.add_child(sprite(ImageKey::Pallas));
        tree.add_child(sprite(ImageKey::BlueCat));
        tree.iter_mut().nth(1).unwrap().kill();

        let input = Input::new();
        let mut dice = Dice::with_seed(1);
        let mut frame = Frame { bounds: Point::new(320.0, 240.0), input: &input, dice: &mut dice };
        tree.update(&mut frame);

        let keys: Vec<_> = tree
            .iter()
            .map(|n| match n.kind() {
                NodeKind::Sprite(s) => s.image,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(keys, vec![ImageKey::Cat, ImageKey::BlueCat]);
    }

    #[test]
    fn draw_keeps_dead_children_until_next_update() {
        let mut tree = Composite::new();
        tree.add_child(NodeKind::Shape(Shape::circle(Circle::new(Point::ZERO, 1.0), "red")));
        tree.add_child(sprite(ImageKey::Cat));
        tree.iter_mut().for_each(Node::kill);

        let mut surface = RecordingSurface::new();
        tree.draw(&mut surface);
        assert_eq!(surface.calls.len(), 2);
        assert!(matches!(surface.calls[0], DrawCall::Circle(..)));
        assert!(matches!(surface.calls[1], DrawCall::Image(ImageKey::Cat, _)));
    }

    #[test]
    fn stack_only_runs_top_and_drops_closed_states() {
        let cfg = crate::GameConfig::default();
        let mut stack = StateStack::new();
        stack.push(Box::new(GameScreen::new(&cfg).unwrap()));
        stack.push(Box::new(GameScreen::new(&cfg).unwrap()));

        let mut surface = RecordingSurface::new();
        stack.draw(&mut surface);
        let clears = surface.calls.iter().filter(|c| matches!(c, DrawCall::Clear(_))).count();
        assert_eq!(clears, 1);

        stack.top_mut().unwrap().close();
        assert_eq!(stack.len(), 2);
        let input = Input::new();
        let mut dice = Dice::with_seed(3);
        let mut frame = Frame { bounds: cfg.bounds(), input: &input, dice: &mut dice };
        stack.update(&mut frame);
        assert_eq!(stack.len(), 1);
        assert!(!stack.top_mut().unwrap().is_dead());
    }

    #[test]
    fn background_draws_over_full_rect() {
        let node: Node = NodeKind::Background(Sprite::new(
            ImageKey::Background,
            Point::ZERO,
            Point::new(320.0, 240.0),
        ))
        .into();
        let mut surface = RecordingSurface::new();
        node.draw(&mut surface);
        assert_eq!(
            surface.calls,
            vec![DrawCall::Image(
                ImageKey::Background,
                Rect::new(Point::ZERO, Point::new(320.0, 240.0))
            )]
        );
    }
}
