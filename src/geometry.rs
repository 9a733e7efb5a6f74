//! Polygon geometry for annotated scenes.
//!
//! This module provides the core geometric types:
//! - Points and axis-aligned bounding boxes
//! - Labeled polygon regions with their derived facts (normalized area,
//!   quadrant, nearest neighbour, relation matrix row)

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::quadrant::Quadrant;
use crate::relation::SpatialRelation;

// ============================================================================
// Core Geometry Types
// ============================================================================

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Calculate distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Top-left corner X coordinate
    pub x: f64,
    /// Top-left corner Y coordinate
    pub y: f64,
    /// Width of the box
    pub width: f64,
    /// Height of the box
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Compute the bounding box of a point sequence.
    pub fn from_points(points: &[Point]) -> Option<Self> {
        if points.is_empty() {
            return None;
        }

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        Some(Self::new(min_x, min_y, max_x - min_x, max_y - min_y))
    }

    /// Get the center point of the box.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the box.
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Check if another box lies entirely inside this one.
    pub fn contains_box(&self, other: &BoundingBox) -> bool {
        self.contains(&other.top_left()) && self.contains(&other.bottom_right())
    }

    /// Get the top-left corner.
    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Get the bottom-right corner.
    pub fn bottom_right(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }
}

// ============================================================================
// Polygon
// ============================================================================

/// A labeled polygon region of an annotated image.
///
/// The boundary is implicitly closed (last vertex connects to first). The
/// derived fields start out unset and are filled in by the owning scene's
/// derivation stages; `nearest` is an index into the owning scene's polygon
/// sequence rather than a reference, so no cycles exist between polygons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    /// Object category of this region.
    pub label: String,
    /// The vertices of the boundary in order.
    pub points: Vec<Point>,
    /// Arithmetic mean of the boundary vertices.
    pub centroid: Point,
    /// Fraction of the image area covered by this polygon, in `[0, 1]`.
    pub normalized_area: Option<f64>,
    /// Coarse position relative to the image center.
    pub quadrant: Option<Quadrant>,
    /// Distance from the centroid to the image center.
    pub distance_from_center: Option<f64>,
    /// Index of the paired polygon within the owning scene.
    pub nearest: Option<usize>,
    /// This polygon's relation to every polygon in the scene (itself
    /// included), aligned positionally with the scene's polygon sequence.
    #[serde(default)]
    pub relations: Vec<SpatialRelation>,
}

impl Polygon {
    /// Create a polygon from a label and its boundary vertices.
    pub fn new(label: impl Into<String>, points: Vec<Point>) -> Self {
        let centroid = centroid_of(&points);
        Self {
            label: label.into(),
            points,
            centroid,
            normalized_area: None,
            quadrant: None,
            distance_from_center: None,
            nearest: None,
            relations: Vec::new(),
        }
    }

    /// Raw pixel area of the boundary (shoelace formula).
    ///
    /// Degenerate boundaries with fewer than 3 vertices have zero area.
    pub fn area(&self) -> f64 {
        if self.points.len() < 3 {
            return 0.0;
        }

        let n = self.points.len();
        let mut area = 0.0;
        for i in 0..n {
            let j = (i + 1) % n;
            area += self.points[i].x * self.points[j].y;
            area -= self.points[j].x * self.points[i].y;
        }
        area.abs() / 2.0
    }

    /// Centroid-to-centroid distance to another polygon.
    pub fn distance_to(&self, other: &Polygon) -> f64 {
        self.centroid.distance_to(&other.centroid)
    }

    /// Get the bounding box of the boundary.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_points(&self.points)
    }
}

impl fmt::Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} centroid=({:.1}, {:.1})",
            self.label, self.centroid.x, self.centroid.y
        )?;
        if let Some(area) = self.normalized_area {
            write!(f, " area={:.4}", area)?;
        }
        if let Some(quadrant) = self.quadrant {
            write!(f, " quadrant={}", quadrant.name())?;
        }
        if let Some(nearest) = self.nearest {
            write!(f, " nearest={}", nearest)?;
        }
        Ok(())
    }
}

/// Arithmetic mean of a point sequence; the origin for an empty sequence.
pub fn centroid_of(points: &[Point]) -> Point {
    if points.is_empty() {
        return Point::new(0.0, 0.0);
    }
    let n = points.len() as f64;
    let sum_x: f64 = points.iter().map(|p| p.x).sum();
    let sum_y: f64 = points.iter().map(|p| p.y).sum();
    Point::new(sum_x / n, sum_y / n)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn square(label: &str, x: f64, y: f64, side: f64) -> Polygon {
        Polygon::new(
            label,
            vec![
                Point::new(x, y),
                Point::new(x + side, y),
                Point::new(x + side, y + side),
                Point::new(x, y + side),
            ],
        )
    }

    #[test]
    fn test_point_distance() {
        let p1 = Point::new(0.0, 0.0);
        let p2 = Point::new(3.0, 4.0);
        assert!((p1.distance_to(&p2) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_bounding_box_from_points() {
        let points = vec![
            Point::new(50.0, 80.0),
            Point::new(10.0, 20.0),
            Point::new(30.0, 40.0),
        ];
        let bbox = BoundingBox::from_points(&points).unwrap();
        assert_eq!(bbox.x, 10.0);
        assert_eq!(bbox.y, 20.0);
        assert_eq!(bbox.width, 40.0);
        assert_eq!(bbox.height, 60.0);

        assert!(BoundingBox::from_points(&[]).is_none());
    }

    #[test]
    fn test_bounding_box_center() {
        let bbox = BoundingBox::new(10.0, 20.0, 40.0, 60.0);
        assert_eq!(bbox.center(), Point::new(30.0, 50.0));
    }

    #[test]
    fn test_bounding_box_contains() {
        let bbox = BoundingBox::new(10.0, 10.0, 100.0, 100.0);
        assert!(bbox.contains(&Point::new(50.0, 50.0)));
        assert!(bbox.contains(&Point::new(10.0, 10.0))); // Edge
        assert!(!bbox.contains(&Point::new(5.0, 50.0)));
    }

    #[test]
    fn test_bounding_box_contains_box() {
        let outer = BoundingBox::new(0.0, 0.0, 100.0, 100.0);
        let inner = BoundingBox::new(20.0, 20.0, 30.0, 30.0);
        assert!(outer.contains_box(&inner));
        assert!(!inner.contains_box(&outer));
        assert!(outer.contains_box(&outer));
    }

    #[test]
    fn test_polygon_area_unit_square() {
        let poly = square("box", 0.0, 0.0, 1.0);
        assert!((poly.area() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_area_vertex_order_independent() {
        let clockwise = Polygon::new(
            "cw",
            vec![
                Point::new(0.0, 0.0),
                Point::new(0.0, 10.0),
                Point::new(10.0, 10.0),
                Point::new(10.0, 0.0),
            ],
        );
        assert!((clockwise.area() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_area_degenerate() {
        let line = Polygon::new("line", vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert_eq!(line.area(), 0.0);
    }

    #[test]
    fn test_polygon_centroid() {
        let poly = square("box", 0.0, 0.0, 10.0);
        assert!((poly.centroid.x - 5.0).abs() < 1e-9);
        assert!((poly.centroid.y - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_centroid_of_empty() {
        let c = centroid_of(&[]);
        assert_eq!(c, Point::new(0.0, 0.0));
    }

    #[test]
    fn test_polygon_distance() {
        let a = square("a", 0.0, 0.0, 2.0);
        let b = square("b", 3.0, 4.0, 2.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_polygon_display_plain() {
        let poly = square("dog", 0.0, 0.0, 10.0);
        let line = poly.to_string();
        assert!(line.starts_with("dog centroid=(5.0, 5.0)"));
        assert!(!line.contains("quadrant"));
    }
}
