//! visann - Visual Annotation Geometry
//!
//! Attaches geometric structure to a hand-annotated image: loads polygon
//! annotations for labeled objects, computes per-object normalized area,
//! image quadrant and pairwise spatial relations, pairs every object with
//! a nearest neighbour, and reconciles annotation entries against an
//! independent linguistic stream by label and approximate position. The
//! derived scene feeds a downstream dependency-parsing task that aligns
//! textual labels with visual regions.

pub mod formats;
pub mod geometry;
pub mod quadrant;
pub mod relation;
pub mod scene;

pub use formats::{Document, FormatError, ObjectRecord};
pub use geometry::{BoundingBox, Point, Polygon};
pub use quadrant::Quadrant;
pub use relation::SpatialRelation;
pub use scene::ImageAnnotation;
