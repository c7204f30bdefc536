//! Geometric primitives for the simulation
//!
//! All coordinates are quantized to whole pixels: a `Point` rounds on
//! construction and on every mutation, and equality compares rounded values.
//! Corner matching and collision classification downstream rely on that
//! quantization, so it must never be bypassed.

use glam::Vec2;

/// A 2-D point on the arena, quantized to whole pixels
///
/// Deliberately not serializable: every point must pass through the rounding
/// constructors.
#[derive(Debug, Clone, Copy)]
pub struct Point(Vec2);

impl Point {
    /// Create a point, rounding both coordinates to the nearest pixel
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x.round(), y.round()))
    }

    /// Quantize an unrounded vector into a point
    pub fn from_vec2(v: Vec2) -> Self {
        Self::new(v.x, v.y)
    }

    #[inline]
    pub fn x(&self) -> f32 {
        self.0.x
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.0.y
    }

    /// Replace the x coordinate (rounded, like construction)
    pub fn set_x(&mut self, x: f32) {
        self.0.x = x.round();
    }

    /// Replace the y coordinate (rounded, like construction)
    pub fn set_y(&mut self, y: f32) {
        self.0.y = y.round();
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f32 {
        self.0.distance(other.0)
    }

    #[inline]
    pub fn to_vec2(&self) -> Vec2 {
        self.0
    }
}

impl PartialEq for Point {
    /// Two points are equal iff their rounded coordinates match
    fn eq(&self, other: &Self) -> bool {
        self.0.x.round() == other.0.x.round() && self.0.y.round() == other.0.y.round()
    }
}

/// A directed line segment from `start` to `end`
///
/// Immutable after construction; a ball's per-tick trajectory is one of these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    start: Point,
    end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    #[inline]
    pub fn start(&self) -> Point {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Point {
        self.end
    }

    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Intersection point of two segments, or `None` if they don't cross
    ///
    /// Parametric two-line intersection restricted to both segments' [0, 1]
    /// parameter ranges. Parallel and degenerate (zero-length) segments never
    /// intersect.
    pub fn intersection_with(&self, other: &Line) -> Option<Point> {
        let (x1, y1) = (self.start.x(), self.start.y());
        let (x2, y2) = (self.end.x(), self.end.y());
        let (x3, y3) = (other.start.x(), other.start.y());
        let (x4, y4) = (other.end.x(), other.end.y());

        let denom = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);
        if denom.abs() < f32::EPSILON {
            return None;
        }

        let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denom;
        let u = ((x1 - x3) * (y1 - y2) - (y1 - y3) * (x1 - x2)) / denom;
        if !(0.0..=1.0).contains(&t) || !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some(Point::new(x1 + t * (x2 - x1), y1 + t * (y2 - y1)))
    }

    /// Closest intersection between this segment and a rectangle's boundary
    ///
    /// Checks the four boundary segments in a fixed order (top, bottom, left,
    /// right) and keeps the intersection nearest to `start`. Distance
    /// comparison is strictly-less-than, so among exact ties the first
    /// boundary checked wins. An intersection sitting exactly on `start`
    /// (distance zero) is skipped: a ball resting on a boundary must not
    /// collide with it again on the same tick.
    pub fn closest_intersection_to_start(&self, rect: &Rect) -> Option<Point> {
        let mut closest: Option<Point> = None;
        let mut min_distance = f32::INFINITY;

        for boundary in rect.boundary_segments() {
            let Some(hit) = self.intersection_with(&boundary) else {
                continue;
            };
            let distance = self.start.distance(hit);
            if distance == 0.0 {
                continue;
            }
            if distance < min_distance {
                min_distance = distance;
                closest = Some(hit);
            }
        }

        closest
    }
}

/// An axis-aligned rectangle: upper-left corner plus width and height
///
/// Screen coordinates grow downward, so "upper" means smaller y. The other
/// three corners are derived on demand and therefore always quantized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    upper_left: Point,
    width: f32,
    height: f32,
}

impl Rect {
    pub fn new(upper_left: Point, width: f32, height: f32) -> Self {
        Self {
            upper_left,
            width,
            height,
        }
    }

    /// Convenience constructor from raw coordinates
    pub fn from_coords(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(Point::new(x, y), width, height)
    }

    #[inline]
    pub fn upper_left(&self) -> Point {
        self.upper_left
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn set_upper_left(&mut self, p: Point) {
        self.upper_left = p;
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
    }

    pub fn upper_right(&self) -> Point {
        Point::new(self.upper_left.x() + self.width, self.upper_left.y())
    }

    pub fn lower_left(&self) -> Point {
        Point::new(self.upper_left.x(), self.upper_left.y() + self.height)
    }

    pub fn lower_right(&self) -> Point {
        Point::new(
            self.upper_left.x() + self.width,
            self.upper_left.y() + self.height,
        )
    }

    /// Whether the point matches one of the two lower corners
    pub fn is_lower_corner(&self, point: Point) -> bool {
        point == self.lower_left() || point == self.lower_right()
    }

    /// Whether the point matches one of the two upper corners
    pub fn is_upper_corner(&self, point: Point) -> bool {
        point == self.upper_left() || point == self.upper_right()
    }

    /// The four boundary segments in classification order: top, bottom,
    /// left, right
    pub fn boundary_segments(&self) -> [Line; 4] {
        let ul = self.upper_left;
        let ur = self.upper_right();
        let ll = self.lower_left();
        let lr = self.lower_right();
        [
            Line::new(ul, ur),
            Line::new(ll, lr),
            Line::new(ul, ll),
            Line::new(ur, lr),
        ]
    }
}
