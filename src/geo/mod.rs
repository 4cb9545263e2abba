//! Geographic primitives and search-grid generation
//!
//! This module converts a center point, a radius, and a step distance into
//! the ordered set of sub-search coordinates that the engine dispatches.

mod grid;

pub use grid::{generate_grid, GeoPoint, KM_PER_DEGREE};
