//! Planner trait and configuration.

use crate::package::PackageUnit;
use crate::result::{AllocationOption, AllocationResult};
use crate::truck::{CostMap, TruckType, DEFAULT_CLEARANCE};
use crate::{Error, Result};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Truck ordering used by a single allocation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Strategy {
    /// Smallest volumetric capacity first.
    #[default]
    SmallestCapacityFirst,
    /// Largest volumetric capacity first.
    LargestCapacityFirst,
    /// Lowest per-trip cost first.
    CheapestRateFirst,
    /// Lowest cost per unit of capacity first.
    BestValueFirst,
    /// Everything in one truck; set by the single-truck override.
    SingleTruck,
}

impl Strategy {
    /// Orderings that only need the catalog.
    pub const FIT_ORDERINGS: [Strategy; 2] = [
        Strategy::SmallestCapacityFirst,
        Strategy::LargestCapacityFirst,
    ];

    /// Orderings that need known costs.
    pub const COST_ORDERINGS: [Strategy; 2] =
        [Strategy::CheapestRateFirst, Strategy::BestValueFirst];

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Strategy::SmallestCapacityFirst => "Smallest Capacity First",
            Strategy::LargestCapacityFirst => "Largest Capacity First",
            Strategy::CheapestRateFirst => "Cheapest Rate First",
            Strategy::BestValueFirst => "Best Value First",
            Strategy::SingleTruck => "Single Truck",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Clearance subtracted from each catalog dimension, in feet.
    pub clearance: f64,

    /// Cost assumed for trucks without a known rate.
    pub missing_cost: f64,

    /// Evaluate strategies on the rayon pool.
    pub parallel_strategies: bool,

    /// Cheapest truck types considered for single-type options.
    pub single_type_candidates: usize,

    /// Most trucks of one type a generated option may use.
    pub max_trucks_per_option: usize,

    /// Most single-type options kept.
    pub max_single_type_options: usize,

    /// Most mixed options kept.
    pub max_mixed_options: usize,

    /// Largest truck types considered for high-capacity options.
    pub high_capacity_candidates: usize,

    /// Most high-capacity options kept.
    pub max_high_capacity_options: usize,

    /// Currency used when no costed truck is involved.
    pub default_currency: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            clearance: DEFAULT_CLEARANCE,
            missing_cost: 999_999.0,
            parallel_strategies: true,
            single_type_candidates: 5,
            max_trucks_per_option: 5,
            max_single_type_options: 3,
            max_mixed_options: 2,
            high_capacity_candidates: 3,
            max_high_capacity_options: 2,
            default_currency: "INR".to_string(),
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-axis clearance.
    pub fn with_clearance(mut self, feet: f64) -> Self {
        self.clearance = feet;
        self
    }

    /// Sets the cost used for trucks without a rate.
    pub fn with_missing_cost(mut self, cost: f64) -> Self {
        self.missing_cost = cost;
        self
    }

    /// Enables or disables parallel strategy evaluation.
    pub fn with_parallel_strategies(mut self, enabled: bool) -> Self {
        self.parallel_strategies = enabled;
        self
    }

    /// Sets the truck cap for generated options.
    pub fn with_max_trucks_per_option(mut self, n: usize) -> Self {
        self.max_trucks_per_option = n;
        self
    }

    /// Sets the fallback currency.
    pub fn with_default_currency(mut self, code: impl Into<String>) -> Self {
        self.default_currency = code.into();
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<()> {
        if !self.clearance.is_finite() || self.clearance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "clearance must be a non-negative number, got {}",
                self.clearance
            )));
        }
        if !self.missing_cost.is_finite() || self.missing_cost <= 0.0 {
            return Err(Error::InvalidConfig(format!(
                "missing_cost must be positive, got {}",
                self.missing_cost
            )));
        }
        if self.max_trucks_per_option == 0 {
            return Err(Error::InvalidConfig(
                "max_trucks_per_option must be at least 1".into(),
            ));
        }
        if self.default_currency.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "default_currency cannot be empty".into(),
            ));
        }
        Ok(())
    }

    /// Per-trip cost used for ranking: the known rate or the sentinel.
    pub fn effective_cost(&self, costs: &CostMap, truck_id: &str) -> f64 {
        costs.rate(truck_id).unwrap_or(self.missing_cost)
    }
}

/// Entry point shared by allocation engines.
pub trait Planner {
    /// Assigns packages to trucks.
    ///
    /// Never fails: invalid input and shortfalls are reported inside the
    /// returned [`AllocationResult`].
    fn allocate(
        &self,
        packages: &[PackageUnit],
        trucks: &[TruckType],
        costs: &CostMap,
    ) -> AllocationResult;

    /// Derives ranked alternative plans for the same input.
    fn generate_options(
        &self,
        packages: &[PackageUnit],
        trucks: &[TruckType],
        costs: &CostMap,
        result: &AllocationResult,
    ) -> Vec<AllocationOption>;
}
