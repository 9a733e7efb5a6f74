//! Annotation document decoding.
//!
//! The geometric core consumes strongly-typed [`ObjectRecord`]s, never raw
//! markup, so scenes stay unit-testable from in-memory fixtures. This module
//! owns the decode that produces those records.
//!
//! One format is currently supported: LabelMe-style XML, one document per
//! image with an `<object>` element per annotated region (see [`labelme`]).

mod error;
pub mod labelme;

pub use error::FormatError;
pub use labelme::{Document, ObjectRecord};
