//! geotab Core - Record sets, formats, persistence and configuration
//!
//! This crate contains the domain model shared by the geotab crates: tabular
//! record sets with an optional geometry attribute, the coordinate options used
//! by the nearest-distance join, readers/writers for the supported file
//! formats, and the layered configuration.

pub mod config;
pub mod error;
pub mod formats;
pub mod models;
pub mod persist;
pub mod summary;

pub use error::{GeotabError, Result};
