pub mod buffer;
pub mod contains;
pub mod errors;
pub mod measure;
pub mod normalize;
pub mod shape;

pub use buffer::buffer_line;
pub use errors::GeometryError;
pub use measure::{haversine_meters, line_centroid, size_in_degrees};
pub use normalize::{GeometryOptions, NormalizedGeometry, normalize, parse_operand};
pub use shape::{Coord, Geometry};

#[cfg(test)]
mod buffer_test;
