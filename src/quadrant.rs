//! Quadrant classification relative to the image center.

use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// Coarse position of a polygon within its image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quadrant {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Quadrant {
    /// Classify a centroid against the center of a `width` x `height` image.
    ///
    /// Points on a dividing axis fall toward the top/left.
    pub fn of(centroid: &Point, width: f64, height: f64) -> Self {
        let cx = width / 2.0;
        let cy = height / 2.0;
        match (centroid.x <= cx, centroid.y <= cy) {
            (true, true) => Quadrant::TopLeft,
            (false, true) => Quadrant::TopRight,
            (true, false) => Quadrant::BottomLeft,
            (false, false) => Quadrant::BottomRight,
        }
    }

    /// Get the display name for this quadrant.
    pub fn name(&self) -> &'static str {
        match self {
            Quadrant::TopLeft => "top-left",
            Quadrant::TopRight => "top-right",
            Quadrant::BottomLeft => "bottom-left",
            Quadrant::BottomRight => "bottom-right",
        }
    }
}

/// Euclidean distance from a centroid to the image's geometric center.
pub fn distance_from_center(centroid: &Point, width: f64, height: f64) -> f64 {
    centroid.distance_to(&Point::new(width / 2.0, height / 2.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_four_quadrants() {
        let w = 200.0;
        let h = 100.0;
        assert_eq!(Quadrant::of(&Point::new(10.0, 10.0), w, h), Quadrant::TopLeft);
        assert_eq!(Quadrant::of(&Point::new(150.0, 10.0), w, h), Quadrant::TopRight);
        assert_eq!(Quadrant::of(&Point::new(10.0, 90.0), w, h), Quadrant::BottomLeft);
        assert_eq!(Quadrant::of(&Point::new(150.0, 90.0), w, h), Quadrant::BottomRight);
    }

    #[test]
    fn test_center_falls_top_left() {
        // Axis ties resolve toward the top/left.
        assert_eq!(Quadrant::of(&Point::new(100.0, 50.0), 200.0, 100.0), Quadrant::TopLeft);
    }

    #[test]
    fn test_distance_from_center() {
        let d = distance_from_center(&Point::new(0.0, 0.0), 200.0, 200.0);
        assert!((d - (2.0f64).sqrt() * 100.0).abs() < 1e-9);

        let at_center = distance_from_center(&Point::new(100.0, 50.0), 200.0, 100.0);
        assert_eq!(at_center, 0.0);
    }
}
