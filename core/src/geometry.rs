//! Basic stroke geometry: points, strokes, glyphs and layout rectangles.
//!
//! All template geometry is expressed in normalized coordinates, where
//! `(0, 0)` is the top-left corner of a glyph block (or canvas) and `(1, 1)`
//! the bottom-right. Live pointer tracking converts to pixel space through a
//! [`Viewport`].

use serde::{Deserialize, Serialize};

/// A 2D point. Normalized unless stated otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Linear interpolation towards `other` (`t = 0` is `self`).
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point::new(
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
    }

    /// Same point moved by `(dx, dy)`.
    pub fn offset(self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

impl From<Point> for [f64; 2] {
    fn from(p: Point) -> Self {
        [p.x, p.y]
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Total arc length of a polyline.
pub fn path_length(path: &[Point]) -> f64 {
    path.windows(2).map(|w| w[0].distance(w[1])).sum()
}

/// Axis-aligned bounds of a path as `(min, max)`, or `None` when empty.
pub fn bounds(path: &[Point]) -> Option<(Point, Point)> {
    let first = *path.first()?;
    Some(path.iter().fold((first, first), |(lo, hi), p| {
        (
            Point::new(lo.x.min(p.x), lo.y.min(p.y)),
            Point::new(hi.x.max(p.x), hi.y.max(p.y)),
        )
    }))
}

/// Mean of all points, or `None` when empty.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let (sx, sy) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
    Some(Point::new(sx / n, sy / n))
}

/// Shape tag carried by a stroke. It is kept for rendering hints only;
/// matching treats both kinds as polylines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrokeKind {
    #[default]
    Line,
    Curve,
}

/// An ordered run of points drawn in one pen-down motion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    #[serde(default)]
    pub kind: StrokeKind,
    pub points: Vec<Point>,
}

impl Stroke {
    pub fn new(kind: StrokeKind, points: Vec<Point>) -> Self {
        Self { kind, points }
    }

    pub fn line<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(StrokeKind::Line, points.into_iter().map(Into::into).collect())
    }

    pub fn curve<P: Into<Point>>(points: impl IntoIterator<Item = P>) -> Self {
        Self::new(StrokeKind::Curve, points.into_iter().map(Into::into).collect())
    }

    /// Arc length of the stroke.
    pub fn length(&self) -> f64 {
        path_length(&self.points)
    }

    /// Copy of the stroke shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Stroke {
        Stroke::new(
            self.kind,
            self.points.iter().map(|p| p.offset(dx, dy)).collect(),
        )
    }

    /// Copy of the stroke with every point mapped from local `[0,1]²` into `rect`.
    pub fn placed_in(&self, rect: &Rect) -> Stroke {
        Stroke::new(self.kind, self.points.iter().map(|&p| rect.map(p)).collect())
    }
}

/// Idealized stroke paths of one letter in local `[0,1]²` space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Glyph {
    pub strokes: Vec<Stroke>,
}

impl Glyph {
    pub fn new(strokes: Vec<Stroke>) -> Self {
        Self { strokes }
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Copy of the glyph with every stroke shifted by `(dx, dy)`.
    pub fn translated(&self, dx: f64, dy: f64) -> Glyph {
        Glyph::new(self.strokes.iter().map(|s| s.translated(dx, dy)).collect())
    }

    /// Append the strokes of `other` after our own.
    pub fn extend(&mut self, other: Glyph) {
        self.strokes.extend(other.strokes);
    }

    /// Map the glyph into `rect`, yielding strokes in the rect's parent space.
    pub fn place(&self, rect: &Rect) -> Vec<Stroke> {
        self.strokes.iter().map(|s| s.placed_in(rect)).collect()
    }
}

/// Axis-aligned rectangle in normalized block space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> f64 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.h
    }

    /// Map a local `[0,1]²` point into this rectangle.
    pub fn map(&self, p: Point) -> Point {
        Point::new(self.x + p.x * self.w, self.y + p.y * self.h)
    }

    /// Whether `other` lies fully inside this rectangle (with tolerance `eps`).
    pub fn contains_rect(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.right() <= self.right() + eps
            && other.bottom() <= self.bottom() + eps
    }
}

/// Render surface size used to convert normalized points into pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn to_pixels(&self, p: Point) -> Point {
        Point::new(p.x * self.width, p.y * self.height)
    }

    pub fn to_normalized(&self, p: Point) -> Point {
        Point::new(p.x / self.width, p.y / self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 500.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_length_sums_segments() {
        let path = [Point::new(0.0, 0.0), Point::new(3.0, 4.0), Point::new(3.0, 0.0)];
        assert!((path_length(&path) - 9.0).abs() < 1e-12);
        assert_eq!(path_length(&path[..1]), 0.0);
    }

    #[test]
    fn rect_maps_local_corners() {
        let r = Rect::new(0.1, 0.2, 0.5, 0.4);
        assert_eq!(r.map(Point::new(0.0, 0.0)), Point::new(0.1, 0.2));
        let far = r.map(Point::new(1.0, 1.0));
        assert!((far.x - 0.6).abs() < 1e-12);
        assert!((far.y - 0.6).abs() < 1e-12);
    }

    #[test]
    fn point_serializes_as_pair() {
        let json = serde_json::to_string(&Point::new(0.25, 0.5)).unwrap();
        assert_eq!(json, "[0.25,0.5]");
        let back: Point = serde_json::from_str("[1.0, 2.0]").unwrap();
        assert_eq!(back, Point::new(1.0, 2.0));
    }

    #[test]
    fn bounds_and_centroid() {
        let pts = [Point::new(1.0, 5.0), Point::new(3.0, -1.0)];
        let (lo, hi) = bounds(&pts).unwrap();
        assert_eq!(lo, Point::new(1.0, -1.0));
        assert_eq!(hi, Point::new(3.0, 5.0));
        assert_eq!(centroid(&pts), Some(Point::new(2.0, 2.0)));
        assert!(bounds(&[]).is_none());
    }
}
