//! Pairwise spatial relations between polygons.
//!
//! A relation describes one polygon's position with respect to another:
//! containment is decided from the bounding boxes, everything else from the
//! dominant axis of the centroid offset. The function is total and
//! deterministic; it makes no symmetry promise (`between(a, b)` and
//! `between(b, a)` are computed independently).

use serde::{Deserialize, Serialize};

use crate::geometry::Polygon;

/// How one polygon relates positionally to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpatialRelation {
    Above,
    Below,
    LeftOf,
    RightOf,
    /// The other polygon's bounds lie entirely inside this one's.
    Surrounds,
    /// This polygon's bounds lie entirely inside the other's.
    Inside,
    /// The two polygons occupy the same bounds.
    Overlaps,
}

impl SpatialRelation {
    /// Compute the relation of `a` to `b`.
    ///
    /// `between(p, p)` is `Overlaps`, which defines the self cell of a
    /// scene's relation matrix.
    pub fn between(a: &Polygon, b: &Polygon) -> Self {
        if let (Some(box_a), Some(box_b)) = (a.bounding_box(), b.bounding_box()) {
            if box_a == box_b {
                return SpatialRelation::Overlaps;
            }
            if box_a.contains_box(&box_b) {
                return SpatialRelation::Surrounds;
            }
            if box_b.contains_box(&box_a) {
                return SpatialRelation::Inside;
            }
        }

        let dx = a.centroid.x - b.centroid.x;
        let dy = a.centroid.y - b.centroid.y;
        if dx.abs() >= dy.abs() {
            if dx <= 0.0 {
                SpatialRelation::LeftOf
            } else {
                SpatialRelation::RightOf
            }
        } else if dy <= 0.0 {
            SpatialRelation::Above
        } else {
            SpatialRelation::Below
        }
    }

    /// Get the display name for this relation.
    pub fn name(&self) -> &'static str {
        match self {
            SpatialRelation::Above => "above",
            SpatialRelation::Below => "below",
            SpatialRelation::LeftOf => "left-of",
            SpatialRelation::RightOf => "right-of",
            SpatialRelation::Surrounds => "surrounds",
            SpatialRelation::Inside => "inside",
            SpatialRelation::Overlaps => "overlaps",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

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
    fn test_horizontal_relations() {
        let left = square("l", 0.0, 0.0, 10.0);
        let right = square("r", 50.0, 0.0, 10.0);
        assert_eq!(SpatialRelation::between(&left, &right), SpatialRelation::LeftOf);
        assert_eq!(SpatialRelation::between(&right, &left), SpatialRelation::RightOf);
    }

    #[test]
    fn test_vertical_relations() {
        // Image coordinates: y grows downward.
        let upper = square("u", 0.0, 0.0, 10.0);
        let lower = square("d", 0.0, 50.0, 10.0);
        assert_eq!(SpatialRelation::between(&upper, &lower), SpatialRelation::Above);
        assert_eq!(SpatialRelation::between(&lower, &upper), SpatialRelation::Below);
    }

    #[test]
    fn test_containment() {
        let outer = square("o", 0.0, 0.0, 100.0);
        let inner = square("i", 40.0, 40.0, 10.0);
        assert_eq!(SpatialRelation::between(&outer, &inner), SpatialRelation::Surrounds);
        assert_eq!(SpatialRelation::between(&inner, &outer), SpatialRelation::Inside);
    }

    #[test]
    fn test_self_relation_is_overlaps() {
        let poly = square("p", 5.0, 5.0, 10.0);
        assert_eq!(SpatialRelation::between(&poly, &poly), SpatialRelation::Overlaps);
    }

    #[test]
    fn test_identical_bounds_overlap() {
        let a = square("a", 5.0, 5.0, 10.0);
        let b = square("b", 5.0, 5.0, 10.0);
        assert_eq!(SpatialRelation::between(&a, &b), SpatialRelation::Overlaps);
    }
}
