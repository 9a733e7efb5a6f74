//! Scene aggregate: one image's labeled polygons and their derived
//! geometric facts.
//!
//! [`ImageAnnotation`] owns the polygon set for a single image together
//! with the image's pixel dimensions, and runs the derivation pipeline
//! over it: dimension bootstrap, area normalization, quadrant assignment,
//! the pairwise relation matrix and nearest-neighbour pairing. It also
//! answers reconciliation lookups from an independent annotation stream
//! (label plus approximate centroid).
//!
//! A scene is populated once and derived once, in a fixed stage order;
//! afterwards it is read-only. Scenes share no state with each other, so a
//! batch of images can be handed to independent workers, one scene each.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::formats::{labelme, FormatError, ObjectRecord};
use crate::geometry::{Point, Polygon};
use crate::quadrant::{self, Quadrant};
use crate::relation::SpatialRelation;

/// Sentinel dimension value for an image that could not be decoded.
pub const DIMENSION_UNAVAILABLE: i32 = -1;

/// Seed for the running minimum of the nearest-neighbour scan.
const DISTANCE_SEED: f64 = 1.0e11;

/// Tolerance applied when comparing candidate distances; near-ties favor
/// the most recently scanned candidate.
const DISTANCE_EPSILON: f64 = 1.0e-7;

/// Centroid distance threshold for reconciliation lookups.
const RECONCILE_THRESHOLD: f64 = 10.0;

/// One image's annotation: its polygon set plus derived geometric state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageAnnotation {
    /// Location of the raster image this annotation describes.
    pub image_path: PathBuf,
    /// Location of the annotation document, once one has been attached.
    pub annotation_path: Option<PathBuf>,
    /// Pixel width; `-1` when the image could not be decoded.
    pub width: i32,
    /// Pixel height; `-1` when the image could not be decoded.
    pub height: i32,
    /// Total pixel area; stays `0` until dimensions have been read, and on
    /// decode failure.
    pub area: f64,
    /// The polygon sequence, sorted by label after attach.
    pub polygons: Vec<Polygon>,
}

impl ImageAnnotation {
    /// Create an empty annotation for the image at `image_path`.
    pub fn new(image_path: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            annotation_path: None,
            width: 0,
            height: 0,
            area: 0.0,
            polygons: Vec::new(),
        }
    }

    // ========================================================================
    // Population
    // ========================================================================

    /// Attach parsed object records as this scene's polygon set.
    ///
    /// Only the last outline of each record is kept; records without an
    /// outline are dropped with a warning. The polygon sequence is then
    /// sorted by label (a stable sort, so equal labels keep their document
    /// order) to make downstream output deterministic.
    pub fn attach_objects(&mut self, records: Vec<ObjectRecord>) {
        self.polygons = records
            .into_iter()
            .filter_map(|mut record| match record.outlines.pop() {
                Some(points) => Some(Polygon::new(record.label, points)),
                None => {
                    log::warn!("object '{}' has no outline, skipping", record.label);
                    None
                }
            })
            .collect();
        self.polygons.sort_by(|a, b| a.label.cmp(&b.label));
    }

    /// Read and decode the annotation document at `path`, then attach its
    /// objects to this scene.
    ///
    /// Decode failures are fatal for this image's annotation only; callers
    /// processing a batch report the error and move on to the next image.
    pub fn parse_annotation_file(&mut self, path: impl Into<PathBuf>) -> Result<(), FormatError> {
        let path = path.into();
        let document = labelme::decode_file(&path)?;
        self.attach_objects(document.objects);
        self.annotation_path = Some(path);
        Ok(())
    }

    // ========================================================================
    // Derivation Pipeline
    // ========================================================================

    /// Probe the image header for pixel dimensions and compute the image
    /// area.
    ///
    /// Decode failures are recovered locally: dimensions are set to the
    /// sentinel, a diagnostic is logged, and the scene stays usable for
    /// every stage that does not depend on the image area. One unreadable
    /// image must not halt a batch.
    pub fn read_dimensions(&mut self) {
        match image::image_dimensions(&self.image_path) {
            Ok((w, h)) => {
                self.width = w as i32;
                self.height = h as i32;
                self.area = f64::from(self.width) * f64::from(self.height);
                log::debug!("{:?}: {}x{}", self.image_path, self.width, self.height);
            }
            Err(e) => {
                self.width = DIMENSION_UNAVAILABLE;
                self.height = DIMENSION_UNAVAILABLE;
                log::warn!("Could not read image dimensions from {:?}: {}", self.image_path, e);
            }
        }
    }

    /// Whether pixel dimensions are available for this scene.
    pub fn has_dimensions(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Normalize each polygon's raw pixel area by the image area.
    ///
    /// Skipped with a diagnostic when dimensions are unavailable; the
    /// image area is never used as a divisor before [`Self::read_dimensions`]
    /// has succeeded.
    pub fn normalize_areas(&mut self) {
        if !self.has_dimensions() {
            log::warn!("{:?}: image area unavailable, skipping area normalization", self.image_path);
            return;
        }
        let image_area = self.area;
        for polygon in &mut self.polygons {
            polygon.normalized_area = Some(polygon.area() / image_area);
        }
    }

    /// Classify every polygon's centroid into an image quadrant and record
    /// its distance from the image center.
    ///
    /// Pure per polygon; no cross-polygon order dependency. Skipped when
    /// dimensions are unavailable.
    pub fn assign_quadrants(&mut self) {
        if !self.has_dimensions() {
            log::warn!("{:?}: dimensions unavailable, skipping quadrant assignment", self.image_path);
            return;
        }
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        for polygon in &mut self.polygons {
            polygon.quadrant = Some(Quadrant::of(&polygon.centroid, w, h));
            polygon.distance_from_center =
                Some(quadrant::distance_from_center(&polygon.centroid, w, h));
        }
    }

    /// Compute the full pairwise relation matrix.
    ///
    /// Row `i` lands on polygon `i`, aligned positionally with the polygon
    /// sequence and including the self cell. Cells `[i][j]` and `[j][i]`
    /// are computed independently; no symmetry is guaranteed.
    pub fn compute_relations(&mut self) {
        let rows: Vec<Vec<SpatialRelation>> = self
            .polygons
            .iter()
            .map(|p1| {
                self.polygons
                    .iter()
                    .map(|p2| SpatialRelation::between(p1, p2))
                    .collect()
            })
            .collect();
        for (polygon, row) in self.polygons.iter_mut().zip(rows) {
            polygon.relations = row;
        }
    }

    /// Pair every polygon with a nearest neighbour.
    ///
    /// The scan is greedy and order dependent. The running minimum, and the
    /// best candidate recorded with it, carry over from one pivot to the
    /// next: once a very small distance has been seen anywhere, later
    /// pivots re-adopt that same candidate unless their own scan finds
    /// something smaller still. Assignments are mutual, and a polygon
    /// already claimed as a partner is skipped when its own turn comes; a
    /// late re-adoption can therefore overwrite an earlier back-reference.
    /// Distances compare with a small tolerance, so near-ties favor the
    /// most recently scanned candidate.
    ///
    /// A scene with fewer than two polygons gets no pairing.
    pub fn pair_nearest(&mut self) {
        if self.polygons.len() < 2 {
            return;
        }

        let mut best_distance = DISTANCE_SEED;
        let mut best: Option<usize> = None;
        for i in 0..self.polygons.len() {
            if self.polygons[i].nearest.is_some() {
                continue;
            }
            for j in 0..self.polygons.len() {
                if j == i {
                    continue;
                }
                let candidate = self.polygons[i].distance_to(&self.polygons[j]);
                if candidate - DISTANCE_EPSILON < best_distance {
                    best_distance = candidate;
                    best = Some(j);
                }
            }
            if let Some(j) = best {
                self.polygons[i].nearest = Some(j);
                self.polygons[j].nearest = Some(i);
            }
        }
    }

    /// Run the full derivation pipeline in its required stage order.
    ///
    /// Later stages consume fields written by earlier ones, so the order is
    /// fixed; stages that need image dimensions skip themselves when the
    /// bootstrap failed.
    pub fn derive_geometry(&mut self) {
        self.read_dimensions();
        self.normalize_areas();
        self.assign_quadrants();
        self.compute_relations();
        self.pair_nearest();
    }

    // ========================================================================
    // Lookups & Export
    // ========================================================================

    /// Find the polygon matching an entry from an independent annotation
    /// stream by label and approximate centroid.
    ///
    /// Returns the index of the first polygon (in current order) whose
    /// label matches exactly and whose centroid lies within 10 units of
    /// `centroid`. `None` means the two annotation sources disagree for
    /// this entry; that is an expected outcome for the caller to report
    /// upstream, not an error.
    pub fn find_polygon(&self, label: &str, centroid: &Point) -> Option<usize> {
        self.polygons.iter().position(|p| {
            p.label == label && p.centroid.distance_to(centroid) < RECONCILE_THRESHOLD
        })
    }

    /// Pretty JSON export of the scene and its derived facts.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Identifier used in the text rendering: the annotation document path
    /// when one is attached, the image path otherwise.
    fn identifier(&self) -> &Path {
        self.annotation_path.as_deref().unwrap_or(&self.image_path)
    }
}

impl fmt::Display for ImageAnnotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.identifier().display())?;
        writeln!(f, "---")?;
        for polygon in &self.polygons {
            writeln!(f, "{}", polygon)?;
        }
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
