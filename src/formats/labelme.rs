//! LabelMe-style annotation document support.
//!
//! LabelMe uses one XML file per image, with one `<object>` element per
//! annotated region and the region boundary given as a list of points.
//!
//! # Format Structure
//!
//! ```xml
//! <annotation>
//!   <filename>image1.jpg</filename>
//!   <object>
//!     <name>dog</name>
//!     <polygon>
//!       <pt><x>120</x><y>80</y></pt>
//!       <pt><x>180</x><y>85</y></pt>
//!       <pt><x>150</x><y>160</y></pt>
//!     </polygon>
//!   </object>
//! </annotation>
//! ```
//!
//! An object may carry several `<polygon>` elements; the decoder keeps all
//! of them, in document order, so the caller decides the retention policy.
//! Unknown elements (LabelMe's `<deleted>`, `<attributes>`, per-point
//! usernames, ...) are ignored.

use quick_xml::de::from_str;
use serde::Deserialize;
use std::path::Path;

use super::FormatError;
use crate::geometry::Point;

/// One annotated object from a document: its label and every boundary
/// outline the document carried for it, in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectRecord {
    pub label: String,
    pub outlines: Vec<Vec<Point>>,
}

/// A decoded annotation document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    /// Image filename declared by the document, if any.
    pub filename: Option<String>,
    /// One record per `<object>` element, in document order.
    pub objects: Vec<ObjectRecord>,
}

/// Decode a LabelMe-style document from its XML text.
///
/// A document with no `<object>` elements decodes to an empty record list.
/// An object without a `<name>` is a [`FormatError::MissingField`].
pub fn decode(content: &str) -> Result<Document, FormatError> {
    let ann: LabelMeAnnotation = from_str(content)?;

    let mut objects = Vec::with_capacity(ann.objects.len());
    for obj in ann.objects {
        let label = obj
            .name
            .ok_or_else(|| FormatError::missing_field("object/name"))?;
        let outlines = obj
            .polygons
            .into_iter()
            .map(|poly| {
                poly.points
                    .into_iter()
                    .map(|pt| Point::new(pt.x, pt.y))
                    .collect()
            })
            .collect();
        objects.push(ObjectRecord { label, outlines });
    }

    Ok(Document {
        filename: ann.filename,
        objects,
    })
}

/// Read and decode the document at `path`.
///
/// The file handle is scoped to the read; nothing stays open afterwards.
pub fn decode_file(path: &Path) -> Result<Document, FormatError> {
    let content = std::fs::read_to_string(path)?;
    decode(&content)
}

// ============================================================================
// LabelMe XML Structures
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename = "annotation")]
struct LabelMeAnnotation {
    #[serde(default)]
    filename: Option<String>,
    #[serde(rename = "object", default)]
    objects: Vec<LabelMeObject>,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelMeObject {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "polygon", default)]
    polygons: Vec<LabelMePolygon>,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelMePolygon {
    #[serde(rename = "pt", default)]
    points: Vec<LabelMePt>,
}

#[derive(Debug, Clone, Deserialize)]
struct LabelMePt {
    x: f64,
    y: f64,
}
