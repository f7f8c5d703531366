//! Domain models shared across the chora crates.

pub mod layer;

pub use layer::{dominant_geometry_type, LayerDescriptor};
