//! Chora Core - Domain models, layer configuration, and attribute filtering
//!
//! This crate contains the domain logic shared by the store and API crates:
//! layer descriptors, the layer configuration with its resolution rules,
//! category extraction for filter UIs, and the attribute filter engine.

pub mod categories;
pub mod config;
pub mod error;
pub mod filter;
pub mod models;
pub mod ports;

pub use categories::{build_categories, CategoryIndex};
pub use error::{ChoraError, Result};
pub use ports::LayerSource;
