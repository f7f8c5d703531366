//! Chora Geo - Coordinate reprojection and geometry transformation
//!
//! This crate converts survey coordinates from the Greek Grid (GGRS87,
//! EPSG:2100) to geographic WGS84 and applies that conversion recursively
//! across GeoJSON geometries and feature collections.

pub mod grid;
pub mod transform;

pub use grid::transform_position;
pub use transform::{transform_collection, transform_geometry};
