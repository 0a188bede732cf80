//! # U-LoadPlan Core
//!
//! Shared data model for the U-LoadPlan truck allocation engine.
//!
//! This crate provides the types that are shared between the placement
//! space (`u-loadplan-d3`) and the fleet planner (`u-loadplan-fleet`).
//!
//! ## Core Components
//!
//! - **Units**: length conversion and CBM volumes
//! - **Packages**: raw rows, per-unit packages, grouping and validation
//! - **Trucks**: catalog rows, usable dimensions, per-trip costs
//! - **Catalog cache**: time-bounded catalog snapshot owned by the caller
//! - **Placement**: positioned boxes and their AABBs
//! - **Results**: allocation outcomes and ranked options
//! - **Planner trait**: common interface for allocation engines
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod aabb;
pub mod cache;
pub mod error;
pub mod package;
pub mod placement;
pub mod result;
pub mod solver;
pub mod truck;
pub mod units;

// Re-exports
pub use aabb::Aabb3D;
pub use cache::{CatalogCache, CatalogSnapshot, CatalogSource, SharedCatalogCache};
pub use error::{Error, Result};
pub use package::{
    normalize, total_quantity, validate_rows, PackageGroup, PackageId, PackageRow, PackageUnit,
};
pub use placement::Placement;
pub use result::{
    AllocationOption, AllocationResult, OptionKind, TruckAllocation, ValidationFailure,
    ValidationReason,
};
pub use solver::{Config, Planner, Strategy};
pub use truck::{
    currency_symbol, usable_trucks, CostMap, TruckCatalogRow, TruckCost, TruckId, TruckType,
    DEFAULT_CLEARANCE,
};
pub use units::{cubic_feet_to_cbm, LengthUnit};
