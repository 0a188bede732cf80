//! # U-LoadPlan 3D
//!
//! Placement space for the U-LoadPlan truck allocation engine.
//!
//! This crate models the usable cargo bed of one truck, the boxes placed in
//! it, and the ordered best-position search used to load packages one unit
//! at a time.

pub mod boundary;
pub mod geometry;
pub mod packing_utils;
pub mod search;
pub mod space;

// Re-exports
pub use boundary::Container;
pub use geometry::{Footprint, Orientation};
pub use packing_utils::{fill, fill_max_fit};
pub use search::SearchPass;
pub use space::{LoadSpace, PlacedBox};
pub use u_loadplan_core::{Error, PackageGroup, Placement, Result};
