pub mod coordinates;
pub mod geometry;
pub mod record;

pub use coordinates::{CoordinateColumns, CoordinateStrategy, DEFAULT_LAT_COLUMN, DEFAULT_LON_COLUMN};
pub use geometry::{Crs, DistanceMetric, Geometry, GeometryType};
pub use record::{Record, RecordSet};
