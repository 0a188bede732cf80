//! # U-LoadPlan Fleet
//!
//! Multi-strategy truck allocation for U-LoadPlan.
//!
//! ## Pipeline
//!
//! 1. Rows are validated against the catalog and merged into package groups.
//! 2. Each truck ordering runs the greedy [`StrategyRunner`], optionally on
//!    the rayon pool.
//! 3. The best [`StrategyResult`] is kept and may be replaced by a single
//!    cheaper truck.
//! 4. [`OptionsGenerator`] derives ranked alternative plans for display.
//!
//! ## Quick Start
//!
//! ```rust
//! use u_loadplan_core::{CostMap, LengthUnit, PackageRow, TruckCost, TruckType};
//! use u_loadplan_fleet::{allocate, generate_options};
//!
//! let packages = vec![PackageRow::new("P1", 4.0, 2.0, 5.0)
//!     .with_quantity(6)
//!     .to_unit(LengthUnit::Foot)];
//! let trucks = vec![TruckType::new("T1", "20ft Truck", 20.0, 4.0, 5.0)];
//! let costs = CostMap::new().with("T1", TruckCost::new(8000.0, "INR"));
//!
//! let result = allocate(&packages, &trucks, &costs);
//! let options = generate_options(&packages, &trucks, &costs, &result);
//! assert!(result.is_success());
//! assert!(!options.is_empty());
//! ```

pub mod allocator;
pub mod instance;
pub mod options;
pub mod runner;
pub mod selector;
pub mod single_truck;

// Re-exports
pub use allocator::{allocate, generate_options, Allocator};
pub use instance::{aggregate, plan_currency, TruckInstance};
pub use options::OptionsGenerator;
pub use runner::{Leftover, StrategyResult, StrategyRunner};
pub use single_truck::SingleTruckOverride;
