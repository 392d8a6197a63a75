//! Chart-ready data derived from rows.
//!
//! Rendering is left to the presentation layer; this module only shapes
//! the data (histogram buckets and target/feature point pairs).

mod histogram;
mod relationship;

pub use histogram::create_histogram;
pub use relationship::{MAX_RELATIONSHIP_POINTS, RelationshipPoint, relationship_points};
