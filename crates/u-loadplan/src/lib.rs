//! # U-LoadPlan
//!
//! Truck allocation engine for outbound freight.
//!
//! This crate provides:
//! - **Load placement**: one-unit-at-a-time box placement in a truck's usable space
//! - **Fleet allocation**: multi-strategy selection of the cheapest truck mix
//! - **Options**: ranked alternative loading plans for display
//!
//! ## Quick Start
//!
//! ```rust
//! use u_loadplan::core::{CostMap, LengthUnit, PackageRow, TruckCost, TruckType};
//! use u_loadplan::fleet::allocate;
//!
//! let packages = vec![PackageRow::new("P1", 120.0, 80.0, 100.0)
//!     .with_quantity(8)
//!     .with_weight(400.0)
//!     .to_unit(LengthUnit::Centimeter)];
//! let trucks = vec![TruckType::new("T14", "14ft Truck", 13.75, 5.75, 5.75)];
//! let costs = CostMap::new().with("T14", TruckCost::new(4500.0, "INR"));
//!
//! let result = allocate(&packages, &trucks, &costs);
//! assert_eq!(result.remaining_count(), 0);
//! ```
//!
//! ## Feature Flags
//!
//! - `d3` (default): placement space
//! - `fleet` (default): allocator and options generator
//! - `serde`: Serialization support

/// Core data model and abstractions.
pub use u_loadplan_core as core;

/// Placement space of a single truck.
#[cfg(feature = "d3")]
pub use u_loadplan_d3 as d3;

/// Multi-strategy allocation and option generation.
#[cfg(feature = "fleet")]
pub use u_loadplan_fleet as fleet;

// Re-export commonly used types at root level
pub use u_loadplan_core::{
    AllocationOption, AllocationResult, Config, CostMap, Planner, Strategy, TruckType,
};

#[cfg(feature = "fleet")]
pub use u_loadplan_fleet::Allocator;
