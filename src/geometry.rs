//! Plain value types for positions, sizes and hit tests.

/// 2D point / vector in canvas pixels. Also used for sizes (x = width, y = height).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(a: Point, b: Point) -> f64 {
        ((a.x - b.x).powi(2) + (a.y - b.y).powi(2)).sqrt()
    }

    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Scale to unit length in place. The zero vector is left untouched.
    pub fn normalize(&mut self) {
        let m = self.magnitude();
        if m != 0.0 {
            self.x /= m;
            self.y /= m;
        }
    }
}

impl std::ops::Add for Point {
    type Output = Point;
    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl std::ops::MulAssign<f64> for Point {
    fn mul_assign(&mut self, rhs: f64) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub position: Point,
    pub size: Point,
}

impl Rect {
    pub const fn new(position: Point, size: Point) -> Self {
        Self { position, size }
    }

    pub fn right(&self) -> f64 {
        self.position.x + self.size.x
    }

    pub fn bottom(&self) -> f64 {
        self.position.y + self.size.y
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.position.x + self.size.x / 2.0,
            self.position.y + self.size.y / 2.0,
        )
    }

    /// Edges are inclusive.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.position.x && p.x <= self.right() && p.y >= self.position.y && p.y <= self.bottom()
    }

    /// Overlap test; rectangles that only touch along an edge still intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.position.x > other.right() || other.position.x > self.right() {
            return false;
        }
        if self.position.y > other.bottom() || other.position.y > self.bottom() {
            return false;
        }
        true
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    pub fn contains(&self, p: Point) -> bool {
        Point::distance(self.center, p) <= self.radius
    }

    pub fn intersects(&self, other: &Circle) -> bool {
        Point::distance(self.center, other.center) <= self.radius + other.radius
    }
}

/// Upward-pointing isosceles triangle inscribed in the box `position`..`position + size`:
/// apex at the top-center, base along the bottom edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub position: Point,
    pub size: Point,
}

impl Triangle {
    pub const fn new(position: Point, size: Point) -> Self {
        Self { position, size }
    }

    pub fn vertices(&self) -> [Point; 3] {
        let Point { x, y } = self.position;
        [
            Point::new(x + self.size.x / 2.0, y),
            Point::new(x + self.size.x, y + self.size.y),
            Point::new(x, y + self.size.y),
        ]
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.position, self.size)
    }

    pub fn contains(&self, p: Point) -> bool {
        let [a, b, c] = self.vertices();
        let edge = |u: Point, v: Point| (v.x - u.x) * (p.y - u.y) - (v.y - u.y) * (p.x - u.x);
        let (d1, d2, d3) = (edge(a, b), edge(b, c), edge(c, a));
        let has_neg = d1 < 0.0 || d2 < 0.0 || d3 < 0.0;
        let has_pos = d1 > 0.0 || d2 > 0.0 || d3 > 0.0;
        !(has_neg && has_pos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        assert!((Point::distance(Point::new(0.0, 0.0), Point::new(3.0, 4.0)) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn normalize_scales_to_unit_and_keeps_zero() {
        let mut p = Point::new(3.0, 4.0);
        p.normalize();
        assert!((p.x - 0.6).abs() < 1e-12 && (p.y - 0.8).abs() < 1e-12);
        let mut z = Point::ZERO;
        z.normalize();
        assert_eq!(z, Point::ZERO);
    }

    #[test]
    fn rect_intersection_is_separating_axis() {
        let a = Rect::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        let touching = Rect::new(Point::new(10.0, 0.0), Point::new(5.0, 5.0));
        let apart_x = Rect::new(Point::new(10.5, 0.0), Point::new(5.0, 5.0));
        let apart_y = Rect::new(Point::new(2.0, 11.0), Point::new(5.0, 5.0));
        assert!(a.intersects(&touching));
        assert!(touching.intersects(&a));
        assert!(!a.intersects(&apart_x));
        assert!(!a.intersects(&apart_y));
    }

    #[test]
    fn rect_contains_and_center() {
        let r = Rect::new(Point::new(2.0, 4.0), Point::new(10.0, 6.0));
        assert_eq!(r.center(), Point::new(7.0, 7.0));
        assert!(r.contains(Point::new(12.0, 10.0)));
        assert!(!r.contains(Point::new(12.1, 10.0)));
    }

    #[test]
    fn circles() {
        let a = Circle::new(Point::new(0.0, 0.0), 2.0);
        let b = Circle::new(Point::new(3.0, 0.0), 1.0);
        let c = Circle::new(Point::new(3.5, 0.0), 1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.contains(Point::new(0.0, 2.0)));
        assert!(!a.contains(Point::new(2.0, 2.0)));
    }

    #[test]
    fn triangle_contains_apex_region_only() {
        let t = Triangle::new(Point::new(0.0, 0.0), Point::new(10.0, 10.0));
        assert!(t.contains(Point::new(5.0, 5.0)));
        assert!(t.contains(Point::new(5.0, 0.0)));
        assert!(!t.contains(Point::new(0.5, 0.5)));
        assert!(!t.contains(Point::new(9.5, 1.0)));
    }
}
