//! Drawable leaves (sprites, labels, flat shapes) and the raster surface they
//! paint into.

use web_sys::CanvasRenderingContext2d;

use crate::content::{ContentManager, ImageKey};
use crate::error::{GameError, ensure_finite};
use crate::geometry::{Circle, Point, Rect, Triangle};

pub const CLEAR_COLOR: &str = "#000";

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// CSS font shorthand, e.g. `20px Arial`.
    pub font: String,
    pub color: String,
    pub align: &'static str,
    pub baseline: &'static str,
}

/// Minimal 2D raster API used by the scene graph.
pub trait Surface {
    /// Wipe the whole surface to black.
    fn clear(&mut self, size: Point);
    fn fill_rect(&mut self, rect: Rect, color: &str);
    fn fill_triangle(&mut self, triangle: Triangle, color: &str);
    fn fill_circle(&mut self, circle: Circle, color: &str);
    fn draw_image(&mut self, image: ImageKey, at: Rect);
    fn measure_text(&mut self, font: &str, text: &str) -> f64;
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle);
}

/// `Surface` over a canvas 2D context, resolving images through the content manager.
pub struct CanvasSurface<'a> {
    pub ctx: &'a CanvasRenderingContext2d,
    pub content: &'a ContentManager,
}

impl Surface for CanvasSurface<'_> {
    fn clear(&mut self, size: Point) {
        self.ctx.clear_rect(0.0, 0.0, size.x, size.y);
        self.ctx.begin_path();
        self.ctx.rect(0.0, 0.0, size.x, size.y);
        self.ctx.set_fill_style_str(CLEAR_COLOR);
        self.ctx.fill();
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.position.x, rect.position.y, rect.size.x, rect.size.y);
    }

    fn fill_triangle(&mut self, triangle: Triangle, color: &str) {
        let [apex, right, left] = triangle.vertices();
        self.ctx.begin_path();
        self.ctx.move_to(apex.x, apex.y);
        self.ctx.line_to(right.x, right.y);
        self.ctx.line_to(left.x, left.y);
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn fill_circle(&mut self, circle: Circle, color: &str) {
        self.ctx.begin_path();
        self.ctx.set_fill_style_str(color);
        self.ctx
            .arc(circle.center.x, circle.center.y, circle.radius, 0.0, std::f64::consts::TAU)
            .ok();
        self.ctx.fill();
    }

    fn draw_image(&mut self, image: ImageKey, at: Rect) {
        if let Some(img) = self.content.element(image) {
            self.ctx
                .draw_image_with_html_image_element_and_dw_and_dh(
                    img,
                    at.position.x,
                    at.position.y,
                    at.size.x,
                    at.size.y,
                )
                .ok();
        }
    }

    fn measure_text(&mut self, font: &str, text: &str) -> f64 {
        self.ctx.set_font(font);
        self.ctx.measure_text(text).map(|m| m.width()).unwrap_or(0.0)
    }

    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.ctx.set_font(&style.font);
        self.ctx.set_fill_style_str(&style.color);
        self.ctx.set_text_align(style.align);
        self.ctx.set_text_baseline(style.baseline);
        self.ctx.fill_text(text, at.x, at.y).ok();
    }
}

/// Image stretched over a rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct Sprite {
    pub image: ImageKey,
    pub bounds: Rect,
}

impl Sprite {
    pub fn new(image: ImageKey, position: Point, size: Point) -> Self {
        Self {
            image,
            bounds: Rect::new(position, size),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        self.draw_at(surface, self.bounds.position);
    }

    pub fn draw_at(&self, surface: &mut dyn Surface, position: Point) {
        surface.draw_image(self.image, Rect::new(position, self.bounds.size));
    }
}

/// Single line of text with an optional backing box sized to the measured text.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub position: Point,
    pub font_size: f64,
    pub style: TextStyle,
    pub background: Option<String>,
}

impl Label {
    pub fn new(
        text: impl Into<String>,
        position: Point,
        font_family: &str,
        font_size: f64,
        color: impl Into<String>,
    ) -> Result<Self, GameError> {
        ensure_finite(font_size, "font size")?;
        if font_size <= 0.0 {
            return Err(GameError::InvalidFontSize(font_size));
        }
        Ok(Self {
            text: text.into(),
            position,
            font_size,
            style: TextStyle {
                font: format!("{font_size}px {font_family}"),
                color: color.into(),
                align: "left",
                baseline: "top",
            },
            background: None,
        })
    }

    pub fn aligned(mut self, align: &'static str, baseline: &'static str) -> Self {
        self.style.align = align;
        self.style.baseline = baseline;
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background = Some(color.into());
        self
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        if let Some(bg) = &self.background {
            let width = surface.measure_text(&self.style.font, &self.text);
            // Backing box is anchored at the text origin regardless of alignment.
            surface.fill_rect(Rect::new(self.position, Point::new(width, self.font_size)), bg);
        }
        surface.fill_text(&self.text, self.position, &self.style);
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ShapeKind {
    Rect(Rect),
    Triangle(Triangle),
    Circle(Circle),
}

/// Flat-colored geometric primitive.
#[derive(Clone, Debug, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub color: String,
}

impl Shape {
    pub fn rect(rect: Rect, color: impl Into<String>) -> Self {
        Self { kind: ShapeKind::Rect(rect), color: color.into() }
    }

    pub fn triangle(triangle: Triangle, color: impl Into<String>) -> Self {
        Self { kind: ShapeKind::Triangle(triangle), color: color.into() }
    }

    pub fn circle(circle: Circle, color: impl Into<String>) -> Self {
        Self { kind: ShapeKind::Circle(circle), color: color.into() }
    }

    pub fn contains(&self, p: Point) -> bool {
        match &self.kind {
            ShapeKind::Rect(r) => r.contains(p),
            ShapeKind::Triangle(t) => t.contains(p),
            ShapeKind::Circle(c) => c.contains(p),
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) {
        match self.kind {
            ShapeKind::Rect(r) => surface.fill_rect(r, &self.color),
            ShapeKind::Triangle(t) => surface.fill_triangle(t, &self.color),
            ShapeKind::Circle(c) => surface.fill_circle(c, &self.color),
        }
    }
}

/// Records draw calls instead of rasterizing. Text is measured at a fixed
/// advance per character.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    pub char_width: f64,
}

#[cfg(test)]
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum DrawCall {
    Clear(Point),
    Rect(Rect, String),
    Triangle(Triangle, String),
    Circle(Circle, String),
    Image(ImageKey, Rect),
    Text(String, Point, TextStyle),
}

#[cfg(test)]
impl RecordingSurface {
    pub fn new() -> Self {
        Self { calls: Vec::new(), char_width: 8.0 }
    }

    pub fn images(&self) -> impl Iterator<Item = (ImageKey, Rect)> + '_ {
        self.calls.iter().filter_map(|c| match c {
            DrawCall::Image(k, r) => Some((*k, *r)),
            _ => None,
        })
    }
}

#[cfg(test)]
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
        text.chars().count() as f64 * self.char_width
    }
    fn fill_text(&mut self, text: &str, at: Point, style: &TextStyle) {
        self.calls.push(DrawCall::Text(text.to_string(), at, style.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_rejects_bad_font_size() {
        assert!(matches!(
            Label::new("x", Point::ZERO, "Arial", 0.0, "white"),
            Err(GameError::InvalidFontSize(_))
        ));
        assert!(Label::new("x", Point::ZERO, "Arial", f64::INFINITY, "white").is_err());
    }

    #[test]
    fn label_draws_background_sized_to_text() {
        let label = Label::new("meow", Point::new(10.0, 20.0), "Arial", 20.0, "white")
            .unwrap()
            .aligned("center", "middle")
            .with_background("rgba(0, 0, 0, 0)");
        let mut surface = RecordingSurface::new();
        label.draw(&mut surface);
        assert_eq!(
            surface.calls[0],
            DrawCall::Rect(
                Rect::new(Point::new(10.0, 20.0), Point::new(32.0, 20.0)),
                "rgba(0, 0, 0, 0)".to_string()
            )
        );
        match &surface.calls[1] {
            DrawCall::Text(text, at, style) => {
                assert_eq!(text, "meow");
                assert_eq!(*at, Point::new(10.0, 20.0));
                assert_eq!(style.font, "20px Arial");
                assert_eq!(style.align, "center");
                assert_eq!(style.baseline, "middle");
            }
            other => panic!("expected text, got {other:?}"),
        }
    }

    #[test]
    fn sprite_draw_at_keeps_size() {
        let sprite = Sprite::new(ImageKey::Cat, Point::new(1.0, 2.0), Point::new(16.0, 12.0));
        let mut surface = RecordingSurface::new();
        sprite.draw_at(&mut surface, Point::new(5.0, 5.0));
        assert_eq!(
            surface.images().collect::<Vec<_>>(),
            vec![(ImageKey::Cat, Rect::new(Point::new(5.0, 5.0), Point::new(16.0, 12.0)))]
        );
    }

    #[test]
    fn shapes_dispatch_to_matching_primitive() {
        let mut surface = RecordingSurface::new();
        let tri = Triangle::new(Point::ZERO, Point::new(4.0, 4.0));
        let circle = Circle::new(Point::new(2.0, 2.0), 1.0);
        Shape::triangle(tri, "red").draw(&mut surface);
        Shape::circle(circle, "blue").draw(&mut surface);
        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Triangle(tri, "red".to_string()),
                DrawCall::Circle(circle, "blue".to_string()),
            ]
        );
        assert!(Shape::circle(circle, "blue").contains(Point::new(2.5, 2.0)));
    }
}
