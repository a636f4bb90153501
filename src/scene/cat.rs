use crate::content::{ImageHandle, ImageKey};
use crate::dice::Dice;
use crate::draw::{Sprite, Surface};
use crate::geometry::{Point, Rect};

/// Fraction of (velocity + bias) added each airborne frame.
const GRAVITY: f64 = 0.01;
const GRAVITY_BIAS: f64 = 10.0;
/// Scale of the random per-axis shove from each overlapping cat.
const NUDGE: f64 = 0.1;
/// Horizontal push back into the canvas at the side walls.
const WALL_PUSH: f64 = 0.2;
const DAMPING: f64 = 0.99;

/// Cat variants with their spawn odds out of ten.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatKind {
    Default,
    Pallas,
    Orange,
    Blue,
}

impl CatKind {
    /// Map a 1..=10 roll: 1 pallas, 2 orange, 3 blue, anything else the default cat.
    pub fn from_roll(roll: i32) -> Self {
        match roll {
            1 => CatKind::Pallas,
            2 => CatKind::Orange,
            3 => CatKind::Blue,
            _ => CatKind::Default,
        }
    }

    pub fn random(dice: &mut Dice) -> Self {
        Self::from_roll(dice.roll(1, 10))
    }

    pub fn image(self) -> ImageKey {
        match self {
            CatKind::Default => ImageKey::Cat,
            CatKind::Pallas => ImageKey::Pallas,
            CatKind::Orange => ImageKey::OrangeCat,
            CatKind::Blue => ImageKey::BlueCat,
        }
    }
}

/// A falling cat. Size is fixed from its image at spawn time.
#[derive(Clone, Debug, PartialEq)]
pub struct Cat {
    pub position: Point,
    pub delta: Point,
    sprite: Sprite,
    damping: f64,
}

impl Cat {
    pub fn new(position: Point, image: ImageHandle, delta: Point) -> Self {
        Self {
            position,
            delta,
            sprite: Sprite::new(image.key, position, image.size),
            damping: DAMPING,
        }
    }

    pub fn image(&self) -> ImageKey {
        self.sprite.image
    }

    pub fn size(&self) -> Point {
        self.sprite.bounds.size
    }

    /// Collision rectangle at the current position.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size())
    }

    pub fn apply_gravity(&mut self, canvas: Point) {
        let size = self.size();
        if self.position.y + size.y < canvas.y {
            self.delta.y += GRAVITY * (self.delta.y + GRAVITY_BIAS);
        } else {
            self.position.y = canvas.y - size.y;
            self.delta.y = 0.0;
        }
    }

    /// One random shove per overlapping neighbour, each axis in {-NUDGE, 0, NUDGE}.
    pub fn collide_with_cats(&mut self, overlaps: usize, dice: &mut Dice) {
        for _ in 0..overlaps {
            self.delta.x += dice.roll(-1, 1) as f64 * NUDGE;
            self.delta.y += dice.roll(-1, 1) as f64 * NUDGE;
        }
    }

    pub fn collide_with_boundaries(&mut self, canvas: Point) {
        if self.position.x <= 0.0 {
            self.delta.x += WALL_PUSH;
        } else if self.position.x + self.size().x > canvas.x {
            self.delta.x -= WALL_PUSH;
        }
    }

    pub fn advance(&mut self) {
        self.position += self.delta;
    }

    /// Snap to whole pixels so sprites stay crisp.
    pub fn round_position(&mut self) {
        self.position.x = self.position.x.round();
        self.position.y = self.position.y.floor();
    }

    pub fn apply_damping(&mut self) {
        self.delta *= self.damping;
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.sprite.draw_at(surface, self.position);
    }
}
