//! geotab-geo: coordinate resolution and nearest-distance joins
//!
//! Geometry centroids come from the `geo` crate and nearest-neighbor search
//! runs over an `rstar` R*-tree.

pub mod coordinates;
pub mod index;
pub mod metric;
pub mod models;
pub mod nearest;

pub use coordinates::{with_coordinates, ResolvedCoordinates};
pub use index::{NearestIndex, Neighbor};
pub use nearest::{annotate_nearest, NearestJoin, NearestOptions};
