//! Chora Store - Layer discovery, loading, caching, and demonstration data
//!
//! The file-backed layer store reads one GeoJSON file per layer from the data
//! directory, reprojects it to WGS84 exactly once, and caches the result for
//! the life of the process. Unreadable or missing data degrades to built-in
//! demonstration collections so the service always has something to serve.

pub mod sample;
pub mod shapefile;
pub mod store;

pub use store::FileLayerStore;
